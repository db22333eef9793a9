use bevy::prelude::*;

use bunny_pong::BunnyPongPlugin;

fn main() {
    App::new().add_plugins(BunnyPongPlugin).run();
}
