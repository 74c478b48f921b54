use bevy::prelude::*;

mod setup;
mod state;
mod ui;
mod walkgrid;
mod spawner;
mod objective;

use objective::ObjectivePlugin;
use spawner::SpawnerPlugin;
use state::GameState;
use ui::{spawn_lose_overlay, spawn_survival_readout, update_survival_readout};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        // domain plugins
        .add_plugins(SpawnerPlugin)   // manifest + director + spawn systems
        .add_plugins(ObjectivePlugin) // survival clock + player-death handling
        .init_state::<GameState>()
        // camera, light, arena, anchors
        .add_systems(Startup, (setup::setup, spawn_survival_readout))
        // HUD clock each frame
        .add_systems(Update, update_survival_readout)
        // lose screen
        .add_systems(OnEnter(GameState::Lost), spawn_lose_overlay)
        .run();
}
