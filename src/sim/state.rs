//! Simulation state and phase types
//!
//! `EngineState` is the whole mutable context of a run. It is owned by the
//! driver and handed to `tick` by reference; nothing here is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::schedule::{Cadence, DialogueCue};
use crate::consts::*;
use crate::level::{LevelSegment, SegmentId};

/// The player-controlled mouse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner of the hit-box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Resting on a platform top this tick (re-derived every tick)
    pub grounded: bool,
    /// Side of the square hit-box
    pub size: f32,
}

impl Actor {
    pub fn spawned_at(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            grounded: false,
            size: ACTOR_SIZE,
        }
    }

    /// Put the actor back on `spawn` at rest
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }
}

/// Active mode of the sequence
///
/// Each variant carries only what it advances. Timers live inside their
/// variant so leaving a phase drops them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Player-controlled platforming
    Platforming {
        segment: SegmentId,
        /// Fell into a hole; physics halted until revived
        awaiting_revive: bool,
    },
    /// Circle closing over `from` (progress 0 -> 100)
    WipeClose {
        from: SegmentId,
        progress: f32,
        timer: Cadence,
    },
    /// Circle opening again (progress 100 -> 0)
    WipeOpen {
        from: SegmentId,
        progress: f32,
        timer: Cadence,
    },
    /// Camera flies up the tower
    Cutscene { progress: f32, timer: Cadence },
    /// Zoom into the tower room
    Zoom { progress: f32, timer: Cadence },
    /// Room dialogue; `cue` is `None` once the player drives it
    Dialogue { step: u8, cue: Option<DialogueCue> },
}

impl Phase {
    pub fn platforming(segment: SegmentId) -> Self {
        Phase::Platforming {
            segment,
            awaiting_revive: false,
        }
    }

    pub fn wipe_close(from: SegmentId) -> Self {
        Phase::WipeClose {
            from,
            progress: 0.0,
            timer: Cadence::every(WIPE_INTERVAL_MS),
        }
    }

    pub fn wipe_open(from: SegmentId) -> Self {
        Phase::WipeOpen {
            from,
            progress: PROGRESS_MAX,
            timer: Cadence::every(WIPE_INTERVAL_MS),
        }
    }

    pub fn cutscene() -> Self {
        Phase::Cutscene {
            progress: 0.0,
            timer: Cadence::every(CUTSCENE_INTERVAL_MS),
        }
    }

    pub fn zoom() -> Self {
        Phase::Zoom {
            progress: 0.0,
            timer: Cadence::every(ZOOM_INTERVAL_MS),
        }
    }

    pub fn dialogue() -> Self {
        Phase::Dialogue {
            step: 0,
            cue: DialogueCue::for_step(0),
        }
    }

    pub fn kind(&self) -> PhaseKind {
        match *self {
            Phase::Platforming { segment, .. } => match segment {
                SegmentId::Garden => PhaseKind::Level1,
                SegmentId::Castle => PhaseKind::Level2,
            },
            Phase::WipeClose { from, .. } => match from {
                SegmentId::Garden => PhaseKind::WipeClose1,
                SegmentId::Castle => PhaseKind::WipeClose2,
            },
            Phase::WipeOpen { from, .. } => match from {
                SegmentId::Garden => PhaseKind::WipeOpen1,
                SegmentId::Castle => PhaseKind::WipeOpen2,
            },
            Phase::Cutscene { .. } => PhaseKind::Cutscene,
            Phase::Zoom { .. } => PhaseKind::Zoom,
            Phase::Dialogue { .. } => PhaseKind::Dialogue,
        }
    }

    /// Segment being simulated, if this is a platforming phase
    pub fn segment(&self) -> Option<SegmentId> {
        match *self {
            Phase::Platforming { segment, .. } => Some(segment),
            _ => None,
        }
    }

    pub fn is_simulation(&self) -> bool {
        matches!(self, Phase::Platforming { .. })
    }

    /// The phase's progress scalar (0-100), for timer-driven phases
    pub fn progress(&self) -> Option<f32> {
        match *self {
            Phase::WipeClose { progress, .. }
            | Phase::WipeOpen { progress, .. }
            | Phase::Cutscene { progress, .. }
            | Phase::Zoom { progress, .. } => Some(progress),
            _ => None,
        }
    }

    pub fn dialogue_step(&self) -> Option<u8> {
        match *self {
            Phase::Dialogue { step, .. } => Some(step),
            _ => None,
        }
    }

    /// The timer driving this phase, if any
    pub fn timer_mut(&mut self) -> Option<&mut Cadence> {
        match self {
            Phase::WipeClose { timer, .. }
            | Phase::WipeOpen { timer, .. }
            | Phase::Cutscene { timer, .. }
            | Phase::Zoom { timer, .. } => Some(timer),
            Phase::Dialogue { cue, .. } => cue.as_mut().map(|c| &mut c.timer),
            Phase::Platforming { .. } => None,
        }
    }
}

/// Flat tag of every phase in visiting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Level1,
    WipeClose1,
    WipeOpen1,
    Level2,
    WipeClose2,
    WipeOpen2,
    Cutscene,
    Zoom,
    Dialogue,
}

impl PhaseKind {
    /// The fixed order of one complete run
    pub const SEQUENCE: [PhaseKind; 9] = [
        PhaseKind::Level1,
        PhaseKind::WipeClose1,
        PhaseKind::WipeOpen1,
        PhaseKind::Level2,
        PhaseKind::WipeClose2,
        PhaseKind::WipeOpen2,
        PhaseKind::Cutscene,
        PhaseKind::Zoom,
        PhaseKind::Dialogue,
    ];
}

/// Renderer hints derived from the dialogue step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialogueCues {
    /// Startled jump right after the opening line
    pub exclamation: bool,
    /// Second mouse has entered the room
    pub visitor_present: bool,
    /// Last step reached
    pub finished: bool,
}

impl DialogueCues {
    pub fn for_step(step: u8) -> Self {
        Self {
            exclamation: step == 1,
            visitor_present: step >= DIALOGUE_AUTO_END,
            finished: step >= DIALOGUE_FINAL_STEP,
        }
    }
}

/// Tone of the message shown while waiting for a revive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnNotice {
    Gentle,
    Teasing,
}

impl RespawnNotice {
    pub fn for_deaths(deaths: u32) -> Self {
        if deaths <= GENTLE_NOTICE_MAX_DEATHS {
            RespawnNotice::Gentle
        } else {
            RespawnNotice::Teasing
        }
    }
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineState {
    pub phase: Phase,
    pub actor: Actor,
    /// Horizontal camera offset
    pub camera_x: f32,
    /// Fall-deaths so far, never decremented
    pub deaths: u32,
    /// Simulation ticks run
    pub time_ticks: u64,
    /// Skip the revive acknowledgement after a fall
    pub auto_revive: bool,
    /// Phases entered, in order
    pub visited: Vec<PhaseKind>,
}

impl EngineState {
    /// Fresh run standing at the entry of `first`
    pub fn new(first: &LevelSegment, auto_revive: bool) -> Self {
        let phase = Phase::platforming(first.id);
        Self {
            phase,
            actor: Actor::spawned_at(first.spawn),
            camera_x: 0.0,
            deaths: 0,
            time_ticks: 0,
            auto_revive,
            visited: vec![phase.kind()],
        }
    }

    /// Switch phase. The old phase, with its timer, is dropped.
    pub fn enter(&mut self, phase: Phase) {
        let from = self.phase.kind();
        let to = phase.kind();
        self.phase = phase;
        if from != to {
            log::info!("Phase {:?} -> {:?}", from, to);
            self.visited.push(to);
        }
    }

    /// Start simulating `level` from its spawn point
    pub fn enter_segment(&mut self, level: &LevelSegment) {
        self.actor.respawn(level.spawn);
        self.camera_x = 0.0;
        self.enter(Phase::platforming(level.id));
        log::info!(
            "Entered segment '{}' at ({}, {})",
            level.id.as_str(),
            level.spawn.x,
            level.spawn.y
        );
    }

    /// Resume after a fall. Returns false if nothing was waiting.
    pub fn revive(&mut self) -> bool {
        match &mut self.phase {
            Phase::Platforming {
                awaiting_revive, ..
            } if *awaiting_revive => {
                *awaiting_revive = false;
                log::debug!("Revived after {} deaths", self.deaths);
                true
            }
            _ => false,
        }
    }

    pub fn awaiting_revive(&self) -> bool {
        matches!(
            self.phase,
            Phase::Platforming {
                awaiting_revive: true,
                ..
            }
        )
    }

    /// Player acknowledgement moving the dialogue to `to`
    ///
    /// Only accepted once the timed part is over, and only for the next step.
    pub fn acknowledge_dialogue(&mut self, to: u8) -> bool {
        if let Phase::Dialogue { step, cue: None } = &mut self.phase {
            if *step >= DIALOGUE_AUTO_END && *step < DIALOGUE_FINAL_STEP && to == *step + 1 {
                *step = to;
                log::info!("Dialogue step {}", to);
                return true;
            }
        }
        log::warn!(
            "Ignored dialogue acknowledgement to step {} during {:?}",
            to,
            self.phase.kind()
        );
        false
    }
}
