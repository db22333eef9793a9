//!
//! Contains code to set up the two paddles, feed pointer movement into the
//! simulation as the player paddle's target, and mirror the simulated paddle
//! positions onto the on-screen entities each frame.
//!

// -------------------------------------------------------------------------------------------------
// Included Symbols

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::arena::add_gradient_quad;
use crate::common::*;
use crate::sim::GameState;

// -------------------------------------------------------------------------------------------------
// Constants

const PLAYER_COLOR_TOP: Color = Color::srgb(0.0, 0.969, 1.0);
const PLAYER_COLOR_BOTTOM: Color = Color::srgb(0.0, 0.725, 1.0);
const AI_COLOR_TOP: Color = Color::srgb(1.0, 0.482, 0.482);
const AI_COLOR_BOTTOM: Color = Color::srgb(1.0, 0.251, 0.251);

// -------------------------------------------------------------------------------------------------
// Public API

///
/// The PaddlePlugin adds the two paddle entities: the player's on the left
/// and the AI's on the right. Pointer movement over the window re-targets the
/// player paddle (via the simulation, which clamps and ignores input while
/// paused); the AI paddle is driven entirely by the simulation tick.
///
pub struct PaddlePlugin;

impl Plugin for PaddlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_paddles)
            .add_systems(Update, track_pointer.in_set(FrameSet::Input))
            .add_systems(Update, sync_paddles.in_set(FrameSet::Render));
    }
}

///
/// Identifies a paddle entity and which side it belongs to. Exposed so other
/// modules can build disjoint queries with With/Without filters.
///
#[derive(Component)]
pub struct Paddle(pub Side);

// -------------------------------------------------------------------------------------------------
// Private Systems

//
// Creates the two paddle entities as vertical gradient quads, vertically
// centered to match the initial simulation state.
//
fn setup_paddles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let size = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);
    let start_y = (FIELD_HEIGHT - PADDLE_HEIGHT) / 2f32;

    for (side, x, top, bottom) in [
        (Player, PLAYER_X, PLAYER_COLOR_TOP, PLAYER_COLOR_BOTTOM),
        (Ai, AI_X, AI_COLOR_TOP, AI_COLOR_BOTTOM),
    ] {
        let center = field_to_world(x + PADDLE_WIDTH / 2f32, start_y + PADDLE_HEIGHT / 2f32);
        commands.spawn((
            Paddle(side),
            Mesh2d(add_gradient_quad(&mut meshes, size, top, bottom)),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::WHITE))),
            Transform::from_translation(center.extend(Z_GAMEPLAY)),
        ));
    }
}

//
// Maps the cursor position through the camera into field coordinates and
// hands it to the simulation as the player paddle's new target. Skips the
// frame when there is no cursor in the window yet.
//
fn track_pointer(
    mut state: ResMut<GameState>,
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) {
    let Some(cursor) = window.single().ok().and_then(|w| w.cursor_position()) else {
        return;
    };
    let Ok((cam, cam_tf)) = camera.single() else {
        return;
    };
    let Ok(world_pos) = cam.viewport_to_world_2d(cam_tf, cursor) else {
        return;
    };

    state.apply_pointer(world_to_field_y(world_pos.y));
}

// Mirrors the simulated paddle positions onto the paddle entities.
fn sync_paddles(state: Res<GameState>, paddles: Query<(&Paddle, &mut Transform)>) {
    for (paddle, tf) in paddles {
        let tf = tf.into_inner();
        let (x, y) = match paddle.0 {
            Player => (PLAYER_X, state.player_y),
            Ai => (AI_X, state.ai_y),
        };
        let center = field_to_world(x + PADDLE_WIDTH / 2f32, y + PADDLE_HEIGHT / 2f32);
        tf.translation.x = center.x;
        tf.translation.y = center.y;
    }
}

// -------------------------------------------------------------------------------------------------
// Unit Tests
