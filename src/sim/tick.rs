//! Simulation tick and timer-driven phase advancement
//!
//! Two drivers advance the run, and only one is live at a time:
//! - `tick`: one physics/camera/trigger update per displayed frame, during
//!   platforming only
//! - `feed_timer` + `fire_timer`: interval timers for wipes, cutscene, zoom
//!   and dialogue

use super::camera;
use super::physics::{self, TickInput};
use super::schedule::DialogueCue;
use super::state::{EngineState, Phase};
use crate::consts::*;
use crate::level::Levels;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not a platforming phase, or waiting for a revive
    Suspended,
    /// Normal simulation step
    Moved,
    /// Fell and was put back on the spawn point
    Died,
    /// Reached the segment exit; the wipe has started
    Exited,
}

/// Advance the platforming simulation by one tick
pub fn tick(state: &mut EngineState, input: &TickInput, levels: &Levels) -> TickOutcome {
    let segment = match state.phase {
        Phase::Platforming {
            segment,
            awaiting_revive: false,
        } => segment,
        _ => return TickOutcome::Suspended,
    };
    let level = levels.get(segment);

    state.time_ticks += 1;

    let report = physics::step(&mut state.actor, input, &level.platforms, level.width);

    if report.fell {
        state.deaths += 1;
        state.actor.respawn(level.spawn);
        state.camera_x = 0.0;
        log::debug!(
            "Fell in '{}' (deaths: {})",
            segment.as_str(),
            state.deaths
        );
        if !state.auto_revive {
            state.phase = Phase::Platforming {
                segment,
                awaiting_revive: true,
            };
        }
        return TickOutcome::Died;
    }

    if level.exit.contains(state.actor.pos.x) {
        log::info!(
            "Reached exit of '{}' at x={:.1}",
            segment.as_str(),
            state.actor.pos.x
        );
        state.enter(Phase::wipe_close(segment));
        return TickOutcome::Exited;
    }

    state.camera_x = camera::follow(state.actor.pos.x, level.width);
    TickOutcome::Moved
}

/// Give the active phase's timer `dt_ms` of wall-clock time
pub fn feed_timer(state: &mut EngineState, dt_ms: u32) {
    if let Some(timer) = state.phase.timer_mut() {
        timer.feed(dt_ms);
    }
}

/// Process one due timer fire of the active phase
///
/// Returns false when nothing was due. A phase change replaces the timer, so
/// time fed to the old phase is discarded with it.
pub fn fire_timer(state: &mut EngineState, levels: &Levels) -> bool {
    let due = state.phase.timer_mut().is_some_and(|t| t.poll());
    if !due {
        return false;
    }

    match &mut state.phase {
        Phase::WipeClose { from, progress, .. } => {
            if *progress >= PROGRESS_MAX {
                let from = *from;
                state.enter(Phase::wipe_open(from));
            } else {
                *progress = (*progress + WIPE_STEP).min(PROGRESS_MAX);
            }
        }
        Phase::WipeOpen { from, progress, .. } => {
            if *progress <= 0.0 {
                match from.next() {
                    Some(next) => state.enter_segment(levels.get(next)),
                    None => state.enter(Phase::cutscene()),
                }
            } else {
                *progress = (*progress - WIPE_STEP).max(0.0);
            }
        }
        Phase::Cutscene { progress, .. } => {
            if *progress >= PROGRESS_MAX {
                state.enter(Phase::zoom());
            } else {
                *progress = (*progress + CUTSCENE_STEP).min(PROGRESS_MAX);
            }
        }
        Phase::Zoom { progress, .. } => {
            if *progress >= PROGRESS_MAX {
                state.enter(Phase::dialogue());
            } else {
                *progress = (*progress + ZOOM_STEP).min(PROGRESS_MAX);
            }
        }
        Phase::Dialogue { step, cue } => {
            if let Some(current) = *cue {
                *step = current.next;
                *cue = DialogueCue::for_step(current.next);
                log::info!("Dialogue step {}", current.next);
            }
        }
        Phase::Platforming { .. } => {}
    }
    true
}
