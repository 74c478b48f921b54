//! Objective wiring: tick the survival clock, react to the player dying.

use bevy::prelude::*;

use crate::objective::survive::{format_clock, SurvivalTimer};
use crate::state::GameState;

/// Sent by the hosting game when the player dies. Halts the clock and ends
/// the run.
#[derive(Event, Clone, Copy)]
pub struct PlayerDied;

pub struct ObjectivePlugin;
impl Plugin for ObjectivePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerDied>()
            .insert_resource(SurvivalTimer::endless())
            .add_systems(
                Update,
                (
                    tick_survival.run_if(in_state(GameState::Running)),
                    handle_player_death,
                ),
            );
    }
}

fn tick_survival(time: Res<Time>, mut timer: ResMut<SurvivalTimer>) {
    if timer.advance(time.delta_secs()) {
        info!("objective complete: survived {}", format_clock(timer.elapsed()));
    }
}

fn handle_player_death(
    mut deaths: EventReader<PlayerDied>,
    mut timer: ResMut<SurvivalTimer>,
    mut next: ResMut<NextState<GameState>>,
) {
    if deaths.read().next().is_none() {
        return;
    }
    timer.halt();
    next.set(GameState::Lost);
    info!("run ended at {}", format_clock(timer.elapsed()));
}
