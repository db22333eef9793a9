//!
//! This crate contains helper functions to facilitate easier validation of certain bevy
//! constructs or situations in unit tests.
//!

// -------------------------------------------------------------------------------------------------
// Included Symbols

use bevy::ecs::schedule::ScheduleBuildError;
use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

use core::any::type_name;
use core::hash::Hash;

// -------------------------------------------------------------------------------------------------
// Public API

/// The prelude includes all basic members of this crate and should be included with prelude::*
pub mod prelude {
    pub use super::pressed_keys;
    pub use super::pressed_mouse_buttons;
    pub use super::validate_sys_in_plugin;
}

///
/// Validates the presence of the given system, within the given schedule, after installing
/// the given plugin in a new App. Optionally (if not None), a system set may be specified
/// too, in which case this function also validates the system was added as part of
/// the given set during the plugin build.
///
pub fn validate_sys_in_plugin<P, L, S, Marker, SS>(
    plugin: P,
    schedule: L,
    system: S,
    set: Option<SS>,
) where
    P: Plugin,
    L: ScheduleLabel + Clone,
    S: IntoSystemSet<Marker>,
    SS: SystemSet,
{
    let mut app = App::new();
    app.add_plugins(plugin);

    let found_system = app
        .get_schedule(schedule.clone())
        .unwrap_or_else(|| {
            panic!(
                "Expected {:?} schedule to exist in app after adding {} plugin",
                type_name::<L>(),
                type_name::<P>(),
            )
        })
        .graph()
        .systems()
        .any(|(_, boxed_sys, _)| boxed_sys.name() == type_name::<S>());

    assert!(
        found_system,
        "Expected to find system {} in schedule {} after adding {} plugin",
        type_name::<S>(),
        type_name::<L>(),
        type_name::<P>(),
    );

    let Some(set) = set else {
        // No need to validate the system is part of a system set
        return;
    };

    // Confirm system's presence in system set, if it's specified. Ordering a
    // set before one of its own members cannot be satisfied, so the schedule
    // build is expected to fail if (and only if) the membership holds.
    app.configure_sets(schedule.clone(), set.before(system));
    let init_result = app
        .world_mut()
        .try_schedule_scope(schedule, |world, sched| sched.initialize(world))
        .unwrap();
    let Err(ScheduleBuildError::SetsHaveOrderButIntersect(..)) = init_result else {
        panic!(
            concat!(
                "Expected {} schedule build to fail, ",
                "since {} should be in {} system set. But it succeeded unexpectedly, ",
                "suggesting the system is not in the set as it should be"
            ),
            type_name::<L>(),
            type_name::<S>(),
            type_name::<SS>(),
        );
    };
}

///
/// Builds a ButtonInput resource with the given keys freshly pressed, so both
/// pressed() and just_pressed() hold for them. Insert the result into a test
/// world before running systems that read keyboard input.
///
pub fn pressed_keys(keys: &[KeyCode]) -> ButtonInput<KeyCode> {
    pressed_input(keys)
}

/// Same as pressed_keys, for mouse buttons.
pub fn pressed_mouse_buttons(buttons: &[MouseButton]) -> ButtonInput<MouseButton> {
    pressed_input(buttons)
}

// -------------------------------------------------------------------------------------------------
// Private Functions

fn pressed_input<T>(values: &[T]) -> ButtonInput<T>
where
    T: Copy + Eq + Hash + Send + Sync + 'static,
{
    let mut input = ButtonInput::default();
    for value in values {
        input.press(*value);
    }
    input
}

// -------------------------------------------------------------------------------------------------
// Unit Tests
