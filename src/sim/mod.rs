//! Deterministic simulation module
//!
//! All sequence logic lives here. This module must stay pure:
//! - One physics tick per displayed frame, no dt
//! - Timers fed explicit milliseconds, never read the clock
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod physics;
pub mod schedule;
pub mod state;
pub mod tick;

pub use autopilot::ledge_hop;
pub use collision::{is_landing, resolve_landing};
pub use physics::{StepReport, TickInput, step};
pub use schedule::{Cadence, DIALOGUE_SCHEDULE, DialogueCue};
pub use state::{Actor, DialogueCues, EngineState, Phase, PhaseKind, RespawnNotice};
pub use tick::{TickOutcome, feed_timer, fire_timer, tick};
