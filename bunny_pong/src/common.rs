//!
//! This module contains a subset of items that are relevant across the bunny pong
//! codebase and will be included by many of the core modules.
//!

// -------------------------------------------------------------------------------------------------
// Included Symbols

use bevy::prelude::*;

// -------------------------------------------------------------------------------------------------
// Constants

/// Width of the playfield in field pixels
pub const FIELD_WIDTH: f32 = 800.0;
/// Height of the playfield in field pixels
pub const FIELD_HEIGHT: f32 = 500.0;

/// Width of both paddles
pub const PADDLE_WIDTH: f32 = 12.0;
/// Height of both paddles
pub const PADDLE_HEIGHT: f32 = 80.0;
/// Side length of the (square) ball hitbox
pub const BALL_SIZE: f32 = 12.0;

/// X coordinate of the player paddle's left face
pub const PLAYER_X: f32 = 30.0;
/// X coordinate of the AI paddle's left face, mirroring the player's inset
pub const AI_X: f32 = FIELD_WIDTH - PLAYER_X - PADDLE_WIDTH;

/// Distance the AI paddle moves per tick while chasing the ball
pub const AI_SPEED: f32 = 4.0;
/// Vertical offset window within which the AI paddle stays put
pub const AI_DEAD_ZONE: f32 = 8.0;

/// Horizontal ball speed magnitude on serve
pub const SERVE_SPEED_X: f32 = 5.0;
/// Vertical ball speed magnitude on serve
pub const SERVE_SPEED_Y: f32 = 4.0;
/// Extra vertical velocity per pixel of offset between ball and paddle centers
pub const DEFLECT_FACTOR: f32 = 0.12;

/// Z index for the background fill
pub const Z_BACKGROUND: f32 = -3f32;
/// Z index for the vignette frame, just above the background
pub const Z_VIGNETTE: f32 = -2f32;
/// Z index for components overlayed on background but behind core gameplay
pub const Z_BEHIND_GAMEPLAY: f32 = -1f32;
/// Z index for the paddles and ball
pub const Z_GAMEPLAY: f32 = 1f32;
/// Z index for the pause overlay, in front of everything else
pub const Z_OVERLAY: f32 = 5f32;

// -------------------------------------------------------------------------------------------------
// Re-Exports

pub use Side::Ai;
pub use Side::Player;

// -------------------------------------------------------------------------------------------------
// Public Types

/// Identifies one of the two competing sides throughout the game logic
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Side {
    /// The human-controlled left paddle
    Player,
    /// The computer-controlled right paddle
    Ai,
}

///
/// System sets chaining the three phases of each frame. Input systems apply
/// pointer and pause toggles to the simulation state, Tick advances the
/// simulation by one fixed step, and Render projects the resulting state onto
/// the on-screen entities. The top-level plugin chains these in order so that
/// input arriving between frames is fully applied before the next tick
/// observes it.
///
#[derive(SystemSet, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum FrameSet {
    Input,
    Tick,
    Render,
}

///
/// Configuration for the optional visual flourishes of the game. The richer
/// and the minimal renditions of the game are a single code path differing
/// only in these flags.
///
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct VisualStyle {
    /// Vertical gradient background instead of a flat fill
    pub gradient_background: bool,
    /// Darkened frame around the edges of the playfield
    pub vignette: bool,
    /// Decorative layered rabbit icon drawn on top of the ball
    pub rabbit_ball: bool,
    /// Any left mouse button press toggles pause, in addition to the keys
    pub pause_on_click: bool,
}

impl Default for VisualStyle {
    fn default() -> Self {
        VisualStyle {
            gradient_background: true,
            vignette: true,
            rabbit_ball: true,
            pause_on_click: true,
        }
    }
}

impl VisualStyle {
    /// The stripped-down rendition: flat background, plain ball, keyboard-only pause.
    pub fn minimal() -> Self {
        VisualStyle {
            gradient_background: false,
            vignette: false,
            rabbit_ball: false,
            pause_on_click: false,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Public Functions

///
/// Converts a point from field coordinates (origin top-left, y down, as used
/// by the simulation) to Bevy world coordinates (origin centered, y up).
///
pub fn field_to_world(x: f32, y: f32) -> Vec2 {
    Vec2::new(x - FIELD_WIDTH / 2f32, FIELD_HEIGHT / 2f32 - y)
}

/// Converts a world-space y coordinate back into field space.
pub fn world_to_field_y(world_y: f32) -> f32 {
    FIELD_HEIGHT / 2f32 - world_y
}

// -------------------------------------------------------------------------------------------------
// Unit Tests
