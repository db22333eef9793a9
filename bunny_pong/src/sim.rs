//!
//! The simulation module owns the entire mutable state of a game in a single
//! record, and advances it one fixed step at a time. Nothing in here touches
//! rendering or raw input devices, so the update logic can be unit tested by
//! stepping exactly one tick at a time.
//!
//! Positions are in field coordinates: origin at the top-left of the 800x500
//! playfield, y growing downward. Ball and paddle positions refer to the
//! top-left corner of their bounding boxes.
//!

// -------------------------------------------------------------------------------------------------
// Included Symbols

use bevy::prelude::*;
use rand::Rng;

use crate::common::*;
use crate::score::PlayerScored;

// -------------------------------------------------------------------------------------------------
// Public API

///
/// This plugin owns the GameState resource and advances it by one tick per
/// frame during the Tick phase. When a tick ends with the ball leaving the
/// field, a PlayerScored event is written for the side that earned the point.
///
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameState>()
            .add_systems(Update, advance_simulation.in_set(FrameSet::Tick));
    }
}

///
/// The complete mutable state of one game. All values are process-lifetime;
/// the ball position and velocity are re-randomized whenever a point is
/// scored, everything else only ever moves within its bounds.
///
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameState {
    /// Top edge of the player (left) paddle
    pub player_y: f32,
    /// Top edge of the AI (right) paddle
    pub ai_y: f32,
    /// Left edge of the ball
    pub ball_x: f32,
    /// Top edge of the ball
    pub ball_y: f32,
    /// Ball velocity, applied once per tick
    pub ball_vx: f32,
    pub ball_vy: f32,
    /// Points scored by the player
    pub player_score: u32,
    /// Points scored by the AI
    pub ai_score: u32,
    /// While set, ticks are no-ops; rendering continues regardless
    pub paused: bool,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl GameState {
    /// Creates the load-time state: paddles and ball centered, random serve.
    pub fn new() -> Self {
        let mut state = GameState {
            player_y: (FIELD_HEIGHT - PADDLE_HEIGHT) / 2f32,
            ai_y: (FIELD_HEIGHT - PADDLE_HEIGHT) / 2f32,
            ball_x: 0f32,
            ball_y: 0f32,
            ball_vx: 0f32,
            ball_vy: 0f32,
            player_score: 0,
            ai_score: 0,
            paused: false,
        };
        state.reset_ball();
        state
    }

    ///
    /// Advances the simulation by one fixed step: ball integration, wall and
    /// paddle collisions, AI movement, and scoring, in that order. Returns the
    /// side that scored during this tick, if any. A tick taken while paused
    /// changes nothing and returns None.
    ///
    /// The step is a fixed per-tick increment rather than delta-time scaled,
    /// matching the original game's frame-coupled physics.
    ///
    pub fn tick(&mut self) -> Option<Side> {
        if self.paused {
            return None;
        }

        self.ball_x += self.ball_vx;
        self.ball_y += self.ball_vy;

        // Top/bottom wall bounce. Clamp so the ball never rests out of bounds.
        if self.ball_y <= 0f32 || self.ball_y + BALL_SIZE >= FIELD_HEIGHT {
            self.ball_vy = -self.ball_vy;
            self.ball_y = self.ball_y.clamp(0f32, FIELD_HEIGHT - BALL_SIZE);
        }

        // Player paddle: overlap test on the ball's left edge
        if self.ball_x <= PLAYER_X + PADDLE_WIDTH
            && self.ball_x >= PLAYER_X
            && self.ball_y + BALL_SIZE >= self.player_y
            && self.ball_y <= self.player_y + PADDLE_HEIGHT
        {
            self.ball_vx = self.ball_vx.abs();
            self.ball_vy += self.deflection(self.player_y);
            // Flush against the paddle face so the ball can't stick inside it
            self.ball_x = PLAYER_X + PADDLE_WIDTH;
        }

        // AI paddle: overlap test on the ball's right edge
        if self.ball_x + BALL_SIZE >= AI_X
            && self.ball_x + BALL_SIZE <= AI_X + PADDLE_WIDTH
            && self.ball_y + BALL_SIZE >= self.ai_y
            && self.ball_y <= self.ai_y + PADDLE_HEIGHT
        {
            self.ball_vx = -self.ball_vx.abs();
            self.ball_vy += self.deflection(self.ai_y);
            self.ball_x = AI_X - BALL_SIZE;
        }

        // AI follow: chase the ball's vertical center, with a dead-zone to
        // keep the paddle from jittering around the target.
        let ai_center = self.ai_y + PADDLE_HEIGHT / 2f32;
        let ball_center = self.ball_y + BALL_SIZE / 2f32;
        if ai_center < ball_center - AI_DEAD_ZONE {
            self.ai_y += AI_SPEED;
        } else if ai_center > ball_center + AI_DEAD_ZONE {
            self.ai_y -= AI_SPEED;
        }
        self.ai_y = self.ai_y.clamp(0f32, FIELD_HEIGHT - PADDLE_HEIGHT);

        // Scoring: the ball leaving the horizontal bounds awards the point to
        // the opposing side, exactly once, and re-serves from the center.
        if self.ball_x < 0f32 {
            self.ai_score += 1;
            self.reset_ball();
            Some(Ai)
        } else if self.ball_x > FIELD_WIDTH {
            self.player_score += 1;
            self.reset_ball();
            Some(Player)
        } else {
            None
        }
    }

    ///
    /// Applies a pointer-move at the given field y coordinate: the player
    /// paddle centers on the pointer, clamped to the playfield. Pointer input
    /// is ignored entirely while paused.
    ///
    pub fn apply_pointer(&mut self, pointer_y: f32) {
        if self.paused {
            return;
        }
        self.player_y =
            (pointer_y - PADDLE_HEIGHT / 2f32).clamp(0f32, FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    /// Flips the pause flag. Pausing only blocks ticks, never rendering.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    // Re-centers the ball and serves it in a fresh random diagonal direction.
    // Speed magnitudes are fixed, only the signs are random.
    fn reset_ball(&mut self) {
        let mut rng = rand::rng();
        self.ball_x = (FIELD_WIDTH - BALL_SIZE) / 2f32;
        self.ball_y = (FIELD_HEIGHT - BALL_SIZE) / 2f32;
        self.ball_vx = SERVE_SPEED_X * if rng.random_bool(0.5) { 1f32 } else { -1f32 };
        self.ball_vy = SERVE_SPEED_Y * if rng.random_bool(0.5) { 1f32 } else { -1f32 };
    }

    // Deflection term for a paddle hit: vertical velocity gained in proportion
    // to how far off-center the ball struck the paddle.
    fn deflection(&self, paddle_y: f32) -> f32 {
        let ball_center = self.ball_y + BALL_SIZE / 2f32;
        let paddle_center = paddle_y + PADDLE_HEIGHT / 2f32;
        (ball_center - paddle_center) * DEFLECT_FACTOR
    }
}

// -------------------------------------------------------------------------------------------------
// Private Systems

//
// Steps the simulation once per frame and reports any point scored during the
// step to the score module.
//
fn advance_simulation(mut state: ResMut<GameState>, mut scored: EventWriter<PlayerScored>) {
    if let Some(side) = state.tick() {
        scored.write(PlayerScored(side));
    }
}

// -------------------------------------------------------------------------------------------------
// Unit Tests
