//! Horizontal camera
//!
//! The camera has no state of its own: it is a clamped function of the
//! actor's x, recomputed after every physics step.

use crate::consts::VIEWPORT_WIDTH;

/// Camera offset that centres `actor_x`, clamped to `[0, level_width - viewport]`
#[inline]
pub fn follow(actor_x: f32, level_width: f32) -> f32 {
    (actor_x - VIEWPORT_WIDTH / 2.0)
        .min(level_width - VIEWPORT_WIDTH)
        .max(0.0)
}
