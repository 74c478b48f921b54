use bevy::prelude::*;
use bevy::ui::BackgroundColor;

use crate::objective::survive::format_clock_brief;
use crate::objective::SurvivalTimer;

#[derive(Component)]
pub struct SurvivalReadout;

#[derive(Component)]
pub struct LoseOverlay;

/// Top-center clock readout, updated every frame.
pub fn spawn_survival_readout(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("00:00.000"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                SurvivalReadout,
            ));
        });
}

pub fn update_survival_readout(
    timer: Res<SurvivalTimer>,
    mut readouts: Query<&mut Text, With<SurvivalReadout>>,
) {
    for mut text in &mut readouts {
        text.0 = timer.hud_line();
    }
}

/// Fullscreen overlay shown once the run is lost.
pub fn spawn_lose_overlay(mut commands: Commands, timer: Res<SurvivalTimer>) {
    let body = format!(
        "You LOSE\nSurvive Time\n{}",
        format_clock_brief(timer.elapsed())
    );
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.0, 0.0, 0.7)),
            LoseOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(body),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextLayout::new_with_justify(JustifyText::Center),
                TextColor(Color::WHITE),
            ));
        });
}
