//!
//! This module contains code to track and display the current score. The
//! authoritative score counters live in the simulation state; this module
//! owns the PlayerScored event and the on-screen score readout, which is
//! refreshed only on ticks where a point was actually scored.
//!

// -------------------------------------------------------------------------------------------------
// Included Symbols

use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::common::*;
use crate::sim::GameState;

// -------------------------------------------------------------------------------------------------
// Constants

const SCORE_FONT_SIZE: f32 = 28f32;

// Field-space position of the top-center anchor of the score text
const SCORE_POS_Y: f32 = 14f32;

// -------------------------------------------------------------------------------------------------
// Public API

///
/// This plugin adds the score readout at the top center of the field and
/// registers the PlayerScored event. The readout sits behind gameplay
/// entities so the ball can pass in front of it.
///
pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerScored>()
            .add_systems(Startup, setup_score_text)
            .add_systems(Update, update_score_text.in_set(FrameSet::Render));
    }
}

///
/// Written by the simulation on any tick in which the ball left the field,
/// carrying the side that earned the point.
///
#[derive(Event)]
pub struct PlayerScored(pub Side);

// -------------------------------------------------------------------------------------------------
// Private Components

// Marker for the score readout text entity
#[derive(Component)]
struct ScoreText;

// -------------------------------------------------------------------------------------------------
// Private Systems

// Adds the score readout entity, seeded from the current simulation state.
fn setup_score_text(mut commands: Commands, state: Res<GameState>) {
    commands.spawn((
        ScoreText,
        Text2d::new(format_score(state.player_score, state.ai_score)),
        TextFont {
            font_size: SCORE_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Anchor::TopCenter,
        Transform::from_translation(
            field_to_world(FIELD_WIDTH / 2f32, SCORE_POS_Y).extend(Z_BEHIND_GAMEPLAY),
        ),
    ));
}

// Rewrites the readout whenever a point was scored this frame.
fn update_score_text(
    mut scored: EventReader<PlayerScored>,
    state: Res<GameState>,
    text: Single<&mut Text2d, With<ScoreText>>,
) {
    if scored.is_empty() {
        return;
    }
    scored.clear();
    text.into_inner().into_inner().0 = format_score(state.player_score, state.ai_score);
}

// -------------------------------------------------------------------------------------------------
// Private Functions

// Formats the readout as "<player>   •   <ai>"
fn format_score(player: u32, ai: u32) -> String {
    format!("{player}   \u{2022}   {ai}")
}

// -------------------------------------------------------------------------------------------------
// Unit Tests

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::schedule::AnonymousSet;
    use bevy_test_helpers::prelude::*;

    #[test]
    fn test_plugin_sys_added_setup() {
        validate_sys_in_plugin(
            ScorePlugin,
            Startup,
            setup_score_text,
            Option::<AnonymousSet>::None,
        );
    }

    #[test]
    fn test_plugin_sys_added_update() {
        validate_sys_in_plugin(ScorePlugin, Update, update_score_text, Some(FrameSet::Render));
    }

    #[test]
    fn test_setup_score_text() {
        let mut world = World::default();
        world.init_resource::<GameState>();

        let setup_sys = world.register_system(setup_score_text);
        world.run_system(setup_sys).unwrap();

        let mut query = world.query::<(&ScoreText, &Text2d, &Anchor, &Transform)>();
        let (_, text, anchor, tf) = query
            .single(&world)
            .expect("Expected exactly one score readout");
        assert_eq!(text.0, "0   \u{2022}   0", "Expected a fresh game to read 0 - 0");
        assert_eq!(*anchor, Anchor::TopCenter);
        assert_eq!(
            tf.translation.xy(),
            field_to_world(FIELD_WIDTH / 2f32, SCORE_POS_Y),
            "Expected the readout anchored at the top center of the field",
        );
    }

    #[test]
    fn test_update_score_text_on_event() {
        let mut world = score_test_world();

        let mut state = GameState::new();
        state.player_score = 3;
        state.ai_score = 1;
        world.insert_resource(state);
        world
            .get_resource_mut::<Events<PlayerScored>>()
            .unwrap()
            .send(PlayerScored(Player));

        let update_sys = world.register_system(update_score_text);
        world.run_system(update_sys).unwrap();

        let mut query = world.query::<&Text2d>();
        assert_eq!(
            query.single(&world).unwrap().0,
            "3   \u{2022}   1",
            "Expected the readout to reflect the updated score",
        );
    }

    #[test]
    fn test_update_score_text_no_event() {
        let mut world = score_test_world();

        let mut state = GameState::new();
        state.player_score = 7;
        world.insert_resource(state);

        let update_sys = world.register_system(update_score_text);
        world.run_system(update_sys).unwrap();

        let mut query = world.query::<&Text2d>();
        assert_eq!(
            query.single(&world).unwrap().0,
            "0   \u{2022}   0",
            "Expected the readout untouched on a quiet frame",
        );
    }

    // --- Helper Functions ---

    fn score_test_world() -> World {
        let mut world = World::default();
        world.init_resource::<GameState>();
        world.init_resource::<Events<PlayerScored>>();

        let setup_sys = world.register_system(setup_score_text);
        world.run_system(setup_sys).unwrap();
        world
    }
}
