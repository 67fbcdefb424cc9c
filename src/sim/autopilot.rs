//! Ledge-hopping autopilot
//!
//! Runs right and jumps when the floor under its leading edge ends. Good
//! enough to clear both built-in segments without a fall; used by the
//! headless demo and tests.

use super::physics::TickInput;
use super::state::Actor;
use crate::level::LevelSegment;

/// How far past the leading edge to look for floor
const LOOKAHEAD: f32 = 8.0;
/// Feet-to-top distance still counted as standing on a platform
const FOOTING: f32 = 0.5;

/// Input for the next tick
pub fn ledge_hop(actor: &Actor, level: &LevelSegment) -> TickInput {
    let probe_x = actor.right() + LOOKAHEAD;
    let feet = actor.bottom();
    let floor_ahead = level.platforms.iter().any(|p| {
        probe_x >= p.x && probe_x <= p.right() && (p.y - feet).abs() < FOOTING
    });

    TickInput {
        move_left: false,
        move_right: true,
        jump: actor.grounded && !floor_ahead,
    }
}
