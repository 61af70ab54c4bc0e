//! Video shape rules.
//!
//! The engine owns the playback attribute block; the actual media element
//! lives with the renderer. Every apply pushes the full block through the
//! [`MediaElement`] seam with idempotent calls, so the element converges on
//! the shape state no matter which attribute changed.

use crate::shapes::{Shape, ShapeKind};

/// The control surface of an external media element.
pub trait MediaElement {
    fn play(&mut self);
    fn pause(&mut self);
    fn set_looping(&mut self, looping: bool);
    /// Playback rate; negative values play in reverse.
    fn set_rate(&mut self, rate: f64);
    /// Volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
}

/// Synchronizes a media element with a video shape's playback block.
/// No-op for other kinds.
pub fn sync_media(shape: &Shape, media: &mut dyn MediaElement) {
    let ShapeKind::Video { playback, .. } = &shape.kind else {
        return;
    };

    media.set_looping(playback.looping);
    let rate = if playback.inverse {
        -playback.speed
    } else {
        playback.speed
    };
    media.set_rate(rate);
    media.set_volume(playback.volume.clamp(0.0, 1.0));

    if playback.playing {
        media.play();
    } else {
        media.pause();
    }
}
