//! Frame driver
//!
//! Owns the run state, level data and input, and decides per displayed frame
//! which driver is live: one simulation tick during platforming, otherwise the
//! active phase's timers. Every tick and timer fire hands a read-only snapshot
//! to the page's renderer.

use serde::Serialize;

use crate::error::EngineError;
use crate::input::{InputAggregator, TouchButton};
use crate::level::{Levels, SegmentId};
use crate::settings::Settings;
use crate::sim::{
    DialogueCues, EngineState, PhaseKind, RespawnNotice, TickOutcome, feed_timer, fire_timer,
    tick,
};

/// Receives a snapshot after every tick or timer fire
pub trait RenderDispatcher {
    fn present(&mut self, snapshot: &RenderSnapshot);
}

impl<F: FnMut(&RenderSnapshot)> RenderDispatcher for F {
    fn present(&mut self, snapshot: &RenderSnapshot) {
        self(snapshot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorPose {
    pub x: f32,
    pub y: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: PhaseKind,
    pub segment: Option<SegmentId>,
    pub actor: ActorPose,
    pub camera: f32,
    pub progress: Option<f32>,
    pub dialogue_step: Option<u8>,
    pub cues: Option<DialogueCues>,
    pub deaths: u32,
    pub awaiting_revive: bool,
    /// Message tone while waiting for a revive
    pub notice: Option<RespawnNotice>,
}

impl RenderSnapshot {
    pub fn of(state: &EngineState) -> Self {
        let awaiting_revive = state.awaiting_revive();
        let dialogue_step = state.phase.dialogue_step();
        Self {
            phase: state.phase.kind(),
            segment: state.phase.segment(),
            actor: ActorPose {
                x: state.actor.pos.x,
                y: state.actor.pos.y,
            },
            camera: state.camera_x,
            progress: state.phase.progress(),
            dialogue_step,
            cues: dialogue_step.map(DialogueCues::for_step),
            deaths: state.deaths,
            awaiting_revive,
            notice: awaiting_revive.then(|| RespawnNotice::for_deaths(state.deaths)),
        }
    }
}

/// The whole sequence, driven frame by frame
pub struct Engine {
    state: EngineState,
    levels: Levels,
    input: InputAggregator,
    settings: Settings,
    /// Sub-millisecond remainder carried between frames
    carry_ms: f64,
}

impl Engine {
    /// Engine on the built-in levels
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        Self::with_levels(settings, Levels::builtin())
    }

    /// Engine on custom levels; fails if any segment is unusable
    pub fn with_levels(settings: Settings, levels: Levels) -> Result<Self, EngineError> {
        settings.validate()?;
        levels.validate()?;
        let state = EngineState::new(&levels.garden, settings.auto_revive);
        log::info!(
            "Engine ready: {} + {} platforms",
            levels.garden.platforms.len(),
            levels.castle.platforms.len()
        );
        Ok(Self {
            state,
            input: InputAggregator::new(settings.bindings.clone()),
            levels,
            settings,
            carry_ms: 0.0,
        })
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::of(&self.state)
    }

    /// Advance by one displayed frame of `dt_ms` milliseconds
    pub fn frame(&mut self, dt_ms: f64, out: &mut dyn RenderDispatcher) {
        if self.state.phase.is_simulation() {
            self.carry_ms = 0.0;
            let input = self.input.sample();
            if tick(&mut self.state, &input, &self.levels) != TickOutcome::Suspended {
                out.present(&self.snapshot());
            }
            return;
        }

        // A broken timestamp counts as no time at all
        let dt_ms = if dt_ms.is_finite() {
            dt_ms.max(0.0).min(self.settings.max_frame_ms)
        } else {
            0.0
        };
        let total = self.carry_ms + dt_ms;
        let whole = total.floor();
        self.carry_ms = total - whole;
        feed_timer(&mut self.state, whole as u32);

        while fire_timer(&mut self.state, &self.levels) {
            out.present(&self.snapshot());
            if self.state.phase.is_simulation() {
                // Keys released during the wipe were never seen
                self.input.clear_keyboard();
                break;
            }
        }
    }

    /// Returns true if the page should suppress the key's default action
    ///
    /// Keys are only recorded while the actor can move: not during the
    /// timed phases and not on the fall screen.
    pub fn key_down(&mut self, key: &str) -> bool {
        if !self.state.phase.is_simulation() || self.state.awaiting_revive() {
            return false;
        }
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    pub fn set_touch(&mut self, button: TouchButton, pressed: bool) {
        self.input.set_touch(button, pressed);
    }

    pub fn release_all(&mut self) {
        self.input.release_all();
    }

    /// Acknowledge the fall screen; presents the resumed state
    pub fn revive(&mut self, out: &mut dyn RenderDispatcher) -> bool {
        let revived = self.state.revive();
        if revived {
            out.present(&self.snapshot());
        }
        revived
    }

    /// Player advanced the dialogue to `to`; presents the new step
    pub fn acknowledge_dialogue(&mut self, to: u8, out: &mut dyn RenderDispatcher) -> bool {
        let accepted = self.state.acknowledge_dialogue(to);
        if accepted {
            out.present(&self.snapshot());
        }
        accepted
    }
}
