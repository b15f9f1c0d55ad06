#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting between numeric types since exact precision isn't critical in this game
    clippy::cast_precision_loss
)]

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::powerups::PowerUpKind;

/// Scene-space position. Obstacles and power-ups enter from the right edge
/// and travel left, so x grows toward the spawn side.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Viewport rectangle reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn min_y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// A zero-area frame would collapse every placement range, so degenerate
    /// dimensions are clamped to a one-unit floor instead of rejected.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: self.width.max(1.0),
            height: self.height.max(1.0),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0.0, 0.0, 800.0, 600.0)
    }
}

/// Frame the generators place into. Updated each tick or on resize.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub frame: Frame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Spike,
    Block,
    Moving,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Spike,
        ObstacleKind::Block,
        ObstacleKind::Moving,
    ];

    #[must_use]
    pub fn base_half_height(self) -> f32 {
        match self {
            ObstacleKind::Spike => 12.0,
            ObstacleKind::Block => 16.0,
            ObstacleKind::Moving => 14.0,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Block => "block",
            ObstacleKind::Moving => "moving",
        }
    }
}

/// A spawn request. The rendering/physics layer queries these off the world
/// and instantiates the visible, collidable entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub speed_multiplier: f32,
    pub size_multiplier: f32,
    pub rotation: Option<f32>,
    pub color_variation: u8,
}

/// A live power-up instance. `age` accumulates tick deltas; once it reaches
/// `lifetime` the instance expires uncollected.
#[derive(Component, Debug, Clone, Copy)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub age: f32,
    pub lifetime: f32,
}

/// Running score, owned by the outer game and pushed into the engine.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GameState {
    pub score: u32,
}
