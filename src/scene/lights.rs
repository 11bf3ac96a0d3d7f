use bevy::prelude::*;

use super::config::SceneConfig;

pub struct LightsPlugin;

impl Plugin for LightsPlugin {
    fn build(&self, app: &mut App) { app.add_systems(Startup, spawn_directional_light); }
}

/// A distant sun. Ambient light lives on the camera (see `camera::cameras`) so it can't wash
/// out anything rendered by a second camera later.
fn spawn_directional_light(mut commands: Commands, config: Res<SceneConfig>) {
    let from = config.directional_from.normalize_or(Vec3::Y);

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            color: Color::WHITE,
            illuminance: config.directional_illuminance,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(from).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
