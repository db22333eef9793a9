//!
//! This module contains code for pausing the game: the input handling that
//! toggles the simulation's paused flag, and the dimming overlay shown while
//! paused. The overlay is always present in the world and is revealed by
//! flipping its visibility, so pausing never allocates.
//!

// -------------------------------------------------------------------------------------------------
// Included Symbols

use bevy::prelude::*;

use crate::common::*;
use crate::sim::GameState;

// -------------------------------------------------------------------------------------------------
// Constants

const OVERLAY_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.45);

const TITLE_TEXT: &str = "PAUSED";
const TITLE_FONT_SIZE: f32 = 48f32;
const TITLE_OFFSET_Y: f32 = 10f32;

const HINT_TEXT: &str = "Press Space or P to resume";
const HINT_FONT_SIZE: f32 = 16f32;
const HINT_OFFSET_Y: f32 = -24f32;

// -------------------------------------------------------------------------------------------------
// Public API

///
/// This plugin adds pause handling: Space or P toggles the pause state, as
/// does a left click when the VisualStyle resource enables click-to-pause.
/// While paused, a dimming overlay with resume instructions covers the field.
///
pub struct PausePlugin;

impl Plugin for PausePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_overlay)
            .add_systems(Update, handle_pause_input.in_set(FrameSet::Input))
            .add_systems(Update, sync_overlay.in_set(FrameSet::Render));
    }
}

// -------------------------------------------------------------------------------------------------
// Private Components

// Marker for the root overlay entity. Its children inherit its visibility.
#[derive(Component)]
struct PauseOverlay;

// -------------------------------------------------------------------------------------------------
// Private Systems

// Adds the (initially hidden) pause overlay and its text children.
fn setup_overlay(mut commands: Commands) {
    commands
        .spawn((
            PauseOverlay,
            Sprite::from_color(OVERLAY_COLOR, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT)),
            Transform::from_translation(Vec3::new(0f32, 0f32, Z_OVERLAY)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(TITLE_TEXT),
                TextFont {
                    font_size: TITLE_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_translation(Vec3::new(0f32, TITLE_OFFSET_Y, 0.1)),
            ));
            parent.spawn((
                Text2d::new(HINT_TEXT),
                TextFont {
                    font_size: HINT_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_translation(Vec3::new(0f32, HINT_OFFSET_Y, 0.1)),
            ));
        });
}

// Toggles the paused flag on Space, P, or (when enabled) a left click.
fn handle_pause_input(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    style: Res<VisualStyle>,
    mut state: ResMut<GameState>,
) {
    let key_toggle = keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::KeyP);
    let click_toggle = style.pause_on_click && buttons.just_pressed(MouseButton::Left);
    if key_toggle || click_toggle {
        state.toggle_pause();
    }
}

// Shows or hides the overlay to match the simulation's paused flag.
fn sync_overlay(state: Res<GameState>, overlay: Single<&mut Visibility, With<PauseOverlay>>) {
    *overlay.into_inner().into_inner() = if state.paused {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
}

// -------------------------------------------------------------------------------------------------
// Unit Tests
