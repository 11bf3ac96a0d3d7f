use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::input::Inspector;
use crate::input::inspector_active;

pub struct CameraConfigPlugin;

impl Plugin for CameraConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<CameraConfig>::default()
                .run_if(inspector_active(Inspector::Camera)),
        )
        .init_resource::<CameraConfig>()
        .add_plugins(
            ResourceInspectorPlugin::<FlightConfig>::default()
                .run_if(inspector_active(Inspector::Flight)),
        )
        .init_resource::<FlightConfig>();
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct CameraConfig {
    pub clear_color: Color,
    /// Vertical field of view
    #[inspector(min = 10.0, max = 120.0, display = NumberDisplay::Slider)]
    pub fov_degrees: f32,
    pub near:        f32,
    pub far:         f32,
    pub start:       Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::srgb_u8(0x07, 0x07, 0x0e),
            fov_degrees: 75.0,
            near:        0.1,
            far:         1000.0,
            start:       Vec3::new(0.0, 0.0, 15.0),
        }
    }
}

/// The flythrough that runs when the donation panel is closed
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone)]
#[reflect(Resource, InspectorOptions)]
pub struct FlightConfig {
    /// Name of the body the camera frames - first match wins, resolved once at spawn
    pub tracked_body:  String,
    /// Where the camera ends up relative to the tracked body
    pub framing:       Vec3,
    #[inspector(min = 0.1, max = 10.0, display = NumberDisplay::Slider)]
    pub duration_secs: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            tracked_body:  "Earth".to_string(),
            framing:       Vec3::new(5.0, 2.0, 10.0),
            duration_secs: 3.0,
        }
    }
}
