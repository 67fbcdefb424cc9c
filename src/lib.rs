//! Castle Dash - a two-level platformer sequence with a cutscene finale
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, landing, camera, phase machine)
//! - `level`: Static level geometry for both segments
//! - `input`: Keyboard + touch aggregation into per-tick intents
//! - `engine`: Frame driver and render hook
//! - `settings`: User configuration

pub mod engine;
pub mod error;
pub mod input;
pub mod level;
pub mod settings;
pub mod sim;

pub use engine::{Engine, RenderDispatcher, RenderSnapshot};
pub use error::{EngineError, LevelError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration added to vy every tick (px/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Upward velocity applied on jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Horizontal speed while a direction is held (px/tick)
    pub const MOVE_SPEED: f32 = 5.0;
    /// Multiplicative horizontal decay when no direction is held
    pub const FRICTION: f32 = 0.8;
    /// Side length of the actor's square hit-box
    pub const ACTOR_SIZE: f32 = 30.0;
    /// Landing band below a platform's bottom edge
    pub const SNAP_TOLERANCE: f32 = 10.0;
    /// Actor y beyond this counts as a fall-death
    pub const FALL_THRESHOLD_Y: f32 = 650.0;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Horizontal extent of both level segments
    pub const LEVEL_WIDTH: f32 = 3500.0;

    /// Circular wipe: progress step and timer cadence
    pub const WIPE_STEP: f32 = 2.0;
    pub const WIPE_INTERVAL_MS: u32 = 30;
    /// Tower fly-up cutscene (~20 seconds end to end)
    pub const CUTSCENE_STEP: f32 = 0.5;
    pub const CUTSCENE_INTERVAL_MS: u32 = 100;
    /// Zoom into the room
    pub const ZOOM_STEP: f32 = 2.0;
    pub const ZOOM_INTERVAL_MS: u32 = 50;

    /// Upper bound for every progress scalar
    pub const PROGRESS_MAX: f32 = 100.0;

    /// Last dialogue step reached by timers alone
    pub const DIALOGUE_AUTO_END: u8 = 3;
    /// Terminal dialogue step
    pub const DIALOGUE_FINAL_STEP: u8 = 8;

    /// Deaths up to this count get the gentle respawn notice
    pub const GENTLE_NOTICE_MAX_DEATHS: u32 = 2;
}
