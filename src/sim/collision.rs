//! Landing detection against platform tops
//!
//! Only falling-onto-top contacts are resolved. Sides and undersides are not
//! solid, so the actor can jump up through a platform and walk through its
//! ends.

use super::state::Actor;
use crate::consts::SNAP_TOLERANCE;
use crate::level::Platform;

/// Whether `actor` is landing on `platform` this tick
///
/// The actor must overlap the platform horizontally, be falling, and have its
/// bottom edge inside `[top, top + height + SNAP_TOLERANCE)`. The band reaches
/// a little below the platform's bottom edge so jumps land responsively.
pub fn is_landing(actor: &Actor, platform: &Platform) -> bool {
    let bottom = actor.bottom();
    actor.right() > platform.x
        && actor.pos.x < platform.right()
        && bottom >= platform.y
        && bottom < platform.y + platform.height + SNAP_TOLERANCE
        && actor.vel.y > 0.0
}

/// Snap the actor onto the first platform it lands on
///
/// Returns the index of that platform. Landing zeroes `vel.y`, so later
/// platforms in the list can no longer catch the actor this tick.
pub fn resolve_landing(actor: &mut Actor, platforms: &[Platform]) -> Option<usize> {
    let index = platforms.iter().position(|p| is_landing(actor, p))?;
    actor.pos.y = platforms[index].y - actor.size;
    actor.vel.y = 0.0;
    actor.grounded = true;
    Some(index)
}
