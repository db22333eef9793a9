//!
//! A mouse-controlled take on pong: the player's paddle follows the cursor,
//! while a dead-zone tracking opponent defends the other side. The whole game
//! fits in the BunnyPongPlugin, with gameplay rules concentrated in the
//! simulation module and everything else handling presentation and input.
//!

mod arena;
mod ball;
mod common;
mod paddle;
mod pause;
mod score;
mod sim;
mod window;

use bevy::prelude::*;

use arena::ArenaPlugin;
use ball::BallPlugin;
use common::{FrameSet, VisualStyle};
use paddle::PaddlePlugin;
use pause::PausePlugin;
use score::ScorePlugin;
use sim::SimulationPlugin;
use window::GameWindowPlugin;

///
/// The BunnyPongPlugin is the only plugin needed to add the full game to an
/// app. It brings in the engine defaults and window via GameWindowPlugin, so
/// it should be added to an otherwise empty App.
///
/// Frame ordering is global: all input handling runs before the simulation
/// tick, and all rendering sync runs after it, so every frame shows a
/// consistent snapshot of the simulation.
///
pub struct BunnyPongPlugin;

impl Plugin for BunnyPongPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GameWindowPlugin)
            .add_plugins((
                SimulationPlugin,
                ArenaPlugin,
                PaddlePlugin,
                BallPlugin,
                ScorePlugin,
                PausePlugin,
            ))
            .init_resource::<VisualStyle>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Tick, FrameSet::Render).chain(),
            );
    }
}
