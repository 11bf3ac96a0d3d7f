use bevy::light::AmbientLight;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::config::CameraConfig;
use super::viewport::Viewport;
use crate::scene::SceneConfig;

pub struct CamerasPlugin;

impl Plugin for CamerasPlugin {
    fn build(&self, app: &mut App) { app.add_systems(Startup, spawn_landing_camera); }
}

/// The one camera looking at the background. Static until a `Flythrough` drives it.
#[derive(Component, Reflect, Debug, Default)]
#[reflect(Component)]
pub struct LandingCamera;

pub fn spawn_landing_camera(
    mut commands: Commands,
    camera_config: Res<CameraConfig>,
    scene_config: Res<SceneConfig>,
    mut viewport: ResMut<Viewport>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    // match the window before the first frame so the first draw isn't stretched
    if let Ok(window) = window.single() {
        viewport.set(window.width(), window.height());
    }

    commands.spawn((
        Name::new("LandingCamera"),
        LandingCamera,
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(camera_config.clear_color),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: camera_config.fov_degrees.to_radians(),
            aspect_ratio: viewport.aspect_ratio(),
            near: camera_config.near,
            far: camera_config.far,
            ..default()
        }),
        // An `AmbientLight` on the camera overrides the global resource for this view only
        AmbientLight {
            color: scene_config.ambient_color,
            brightness: scene_config.ambient_brightness,
            ..default()
        },
        Transform::from_translation(camera_config.start).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
