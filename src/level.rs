//! Level geometry for the two platforming segments
//!
//! Everything here is static. A segment is built once when the engine starts
//! and never mutated afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LevelError;

/// Cosmetic platform style (no effect on collision)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    Heart,
    Castle,
}

/// Axis-aligned platform rectangle. Only its top surface is solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationKind {
    Flower,
    Heart,
    Tree,
}

/// Decoration marker, drawn by the page and ignored by physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub pos: Vec2,
    pub kind: DecorationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandmarkKind {
    Castle,
    CastleDoor,
    Tower,
}

/// Fixed point of interest in level space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub pos: Vec2,
}

/// Region whose entry ends a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExitTrigger {
    /// Fixed-width gate: `x <= actor.x <= x + width`
    Gate { x: f32, width: f32 },
    /// End-of-level line: `actor.x >= x`
    Threshold { x: f32 },
}

impl ExitTrigger {
    /// Whether an actor at horizontal position `x` has reached the exit
    pub fn contains(&self, x: f32) -> bool {
        match *self {
            ExitTrigger::Gate { x: left, width } => x >= left && x <= left + width,
            ExitTrigger::Threshold { x: line } => x >= line,
        }
    }

    fn within(&self, level_width: f32) -> bool {
        match *self {
            ExitTrigger::Gate { x, width } => {
                x.is_finite() && width >= 0.0 && x >= 0.0 && x + width <= level_width
            }
            ExitTrigger::Threshold { x } => x.is_finite() && x >= 0.0 && x <= level_width,
        }
    }
}

/// Which platforming segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentId {
    /// Outdoor path to the castle
    Garden,
    /// Castle interior up to the tower
    Castle,
}

impl SegmentId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentId::Garden => "garden",
            SegmentId::Castle => "castle",
        }
    }

    /// Segment entered after this one's wipe, if any
    pub fn next(&self) -> Option<SegmentId> {
        match self {
            SegmentId::Garden => Some(SegmentId::Castle),
            SegmentId::Castle => None,
        }
    }
}

/// One platforming segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSegment {
    pub id: SegmentId,
    pub width: f32,
    /// Entry point, also used as the respawn point after a fall
    pub spawn: Vec2,
    pub platforms: Vec<Platform>,
    pub decorations: Vec<Decoration>,
    pub landmarks: Vec<Landmark>,
    pub exit: ExitTrigger,
}

impl LevelSegment {
    /// Outdoor segment: ground with four holes, floating hearts, castle at the end
    pub fn garden() -> Self {
        Self {
            id: SegmentId::Garden,
            width: LEVEL_WIDTH,
            spawn: Vec2::new(100.0, 450.0),
            platforms: GARDEN_PLATFORMS.to_vec(),
            decorations: GARDEN_DECORATIONS.to_vec(),
            landmarks: vec![
                Landmark {
                    kind: LandmarkKind::Castle,
                    pos: Vec2::new(3100.0, 200.0),
                },
                Landmark {
                    kind: LandmarkKind::CastleDoor,
                    pos: Vec2::new(3150.0, 480.0),
                },
            ],
            exit: ExitTrigger::Gate {
                x: 3150.0,
                width: 50.0,
            },
        }
    }

    /// Castle interior: stone floor with holes, ends at the tower
    pub fn castle() -> Self {
        Self {
            id: SegmentId::Castle,
            width: LEVEL_WIDTH,
            spawn: Vec2::new(200.0, 450.0),
            platforms: CASTLE_PLATFORMS.to_vec(),
            decorations: Vec::new(),
            landmarks: vec![Landmark {
                kind: LandmarkKind::Tower,
                pos: Vec2::new(3300.0, 400.0),
            }],
            exit: ExitTrigger::Threshold { x: 3300.0 },
        }
    }

    /// Largest x the actor may occupy
    #[inline]
    pub fn max_actor_x(&self) -> f32 {
        self.width - ACTOR_SIZE
    }

    /// Reject geometry the simulation cannot run on
    pub fn validate(&self) -> Result<(), LevelError> {
        let name = self.id.as_str();

        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms(name));
        }
        if let Some(index) = self.platforms.iter().position(|p| !p.is_well_formed()) {
            return Err(LevelError::InvalidPlatform {
                segment: name,
                index,
            });
        }
        if !self.width.is_finite() || self.width < VIEWPORT_WIDTH {
            return Err(LevelError::NarrowerThanViewport {
                segment: name,
                width: self.width,
            });
        }
        let spawn_ok = self.spawn.is_finite()
            && self.spawn.x >= 0.0
            && self.spawn.x <= self.max_actor_x()
            && self.spawn.y < FALL_THRESHOLD_Y;
        if !spawn_ok {
            return Err(LevelError::SpawnOutOfBounds(name));
        }
        if !self.exit.within(self.width) {
            return Err(LevelError::ExitOutOfBounds(name));
        }
        Ok(())
    }
}

/// Both segments of a run, in play order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Levels {
    pub garden: LevelSegment,
    pub castle: LevelSegment,
}

impl Levels {
    pub fn builtin() -> Self {
        Self {
            garden: LevelSegment::garden(),
            castle: LevelSegment::castle(),
        }
    }

    pub fn get(&self, id: SegmentId) -> &LevelSegment {
        match id {
            SegmentId::Garden => &self.garden,
            SegmentId::Castle => &self.castle,
        }
    }

    /// Fail fast before the first tick
    pub fn validate(&self) -> Result<(), LevelError> {
        self.garden.validate()?;
        self.castle.validate()
    }
}

use PlatformKind::{Castle, Heart, Normal};

const GARDEN_PLATFORMS: &[Platform] = &[
    // Ground, holes at 600-750, 1100-1250, 1700-1900, 2300-2500
    Platform::new(0.0, 550.0, 600.0, 50.0, Normal),
    Platform::new(750.0, 550.0, 350.0, 50.0, Normal),
    Platform::new(1250.0, 550.0, 450.0, 50.0, Normal),
    Platform::new(1900.0, 550.0, 400.0, 50.0, Normal),
    Platform::new(2500.0, 550.0, 500.0, 50.0, Normal),
    // Opening climb
    Platform::new(250.0, 480.0, 120.0, 15.0, Heart),
    Platform::new(450.0, 420.0, 100.0, 15.0, Heart),
    Platform::new(650.0, 360.0, 120.0, 15.0, Heart),
    Platform::new(850.0, 420.0, 100.0, 15.0, Normal),
    // Floating hearts
    Platform::new(1000.0, 480.0, 80.0, 15.0, Heart),
    Platform::new(1150.0, 440.0, 80.0, 15.0, Heart),
    Platform::new(1300.0, 400.0, 80.0, 15.0, Heart),
    Platform::new(1450.0, 360.0, 80.0, 15.0, Heart),
    // Descent
    Platform::new(1600.0, 420.0, 150.0, 15.0, Normal),
    Platform::new(1800.0, 480.0, 150.0, 15.0, Normal),
    // Final obstacles
    Platform::new(2000.0, 450.0, 100.0, 15.0, Heart),
    Platform::new(2180.0, 400.0, 100.0, 15.0, Heart),
    Platform::new(2360.0, 350.0, 100.0, 15.0, Heart),
    Platform::new(2540.0, 450.0, 120.0, 15.0, Normal),
    Platform::new(2750.0, 500.0, 200.0, 15.0, Normal),
    // Castle base
    Platform::new(3000.0, 550.0, 500.0, 50.0, Castle),
];

const GARDEN_DECORATIONS: &[Decoration] = &[
    Decoration { pos: Vec2::new(200.0, 520.0), kind: DecorationKind::Flower },
    Decoration { pos: Vec2::new(400.0, 520.0), kind: DecorationKind::Heart },
    Decoration { pos: Vec2::new(600.0, 520.0), kind: DecorationKind::Flower },
    Decoration { pos: Vec2::new(800.0, 520.0), kind: DecorationKind::Heart },
    Decoration { pos: Vec2::new(1100.0, 520.0), kind: DecorationKind::Flower },
    Decoration { pos: Vec2::new(1400.0, 520.0), kind: DecorationKind::Heart },
    Decoration { pos: Vec2::new(1700.0, 520.0), kind: DecorationKind::Flower },
    Decoration { pos: Vec2::new(2000.0, 520.0), kind: DecorationKind::Heart },
    Decoration { pos: Vec2::new(2300.0, 520.0), kind: DecorationKind::Flower },
    Decoration { pos: Vec2::new(2600.0, 520.0), kind: DecorationKind::Heart },
];

const CASTLE_PLATFORMS: &[Platform] = &[
    // Stone floor, holes at 400-550, 900-1050, 1350-1500, 1900-2100
    Platform::new(0.0, 550.0, 400.0, 50.0, Castle),
    Platform::new(550.0, 550.0, 350.0, 50.0, Castle),
    Platform::new(1050.0, 550.0, 300.0, 50.0, Castle),
    Platform::new(1500.0, 550.0, 400.0, 50.0, Castle),
    Platform::new(2100.0, 550.0, 400.0, 50.0, Castle),
    Platform::new(2500.0, 550.0, 1000.0, 50.0, Castle),
    // Interior ledges
    Platform::new(200.0, 480.0, 120.0, 15.0, Castle),
    Platform::new(600.0, 420.0, 100.0, 15.0, Castle),
    Platform::new(800.0, 360.0, 120.0, 15.0, Castle),
    Platform::new(1100.0, 420.0, 100.0, 15.0, Castle),
    Platform::new(1400.0, 480.0, 80.0, 15.0, Castle),
    Platform::new(1600.0, 400.0, 120.0, 15.0, Castle),
    Platform::new(1850.0, 450.0, 100.0, 15.0, Castle),
    Platform::new(2200.0, 380.0, 150.0, 15.0, Castle),
    Platform::new(2600.0, 480.0, 120.0, 15.0, Castle),
];
