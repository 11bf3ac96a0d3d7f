use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::input::Inspector;
use crate::input::inspector_active;

pub struct SceneConfigPlugin;

impl Plugin for SceneConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<SceneConfig>::default()
                .run_if(inspector_active(Inspector::Scene)),
        )
        .init_resource::<SceneConfig>()
        .add_plugins(
            ResourceInspectorPlugin::<DriftConfig>::default()
                .run_if(inspector_active(Inspector::Drift)),
        )
        .init_resource::<DriftConfig>();
    }
}

/// Everything the scene builder reads exactly once at startup
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct SceneConfig {
    #[inspector(min = 0, max = 20_000)]
    pub particle_count:          usize,
    /// Edge length of the cuboid particles are sampled in
    #[inspector(min = 1.0, max = 500.0)]
    pub particle_extent:         f32,
    /// Added to every sampled z so the field sits behind the camera target
    pub particle_depth_offset:   f32,
    #[inspector(min = 0.01, max = 1.0, display = NumberDisplay::Slider)]
    pub particle_size:           f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub particle_opacity:        f32,
    /// Grey level every particle colour starts from
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub particle_base_level:     f32,
    /// Upper bound of the random blend toward each accent colour
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub particle_accent_mix:     f32,
    pub primary_accent:          Color,
    pub secondary_accent:        Color,
    pub ambient_color:           Color,
    #[inspector(min = 0.0, max = 2_000.0, display = NumberDisplay::Slider)]
    pub ambient_brightness:      f32,
    #[inspector(min = 0.0, max = 20_000.0, display = NumberDisplay::Slider)]
    pub directional_illuminance: f32,
    pub directional_from:        Vec3,
    /// Sectors and stacks of every planet sphere
    #[inspector(min = 4, max = 128)]
    pub body_resolution:         u32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub body_metallic:           f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub body_roughness:          f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count:          3000,
            particle_extent:         100.0,
            particle_depth_offset:   -50.0,
            particle_size:           0.1,
            particle_opacity:        0.8,
            particle_base_level:     0.8,
            particle_accent_mix:     0.1,
            primary_accent:          Color::srgb_u8(0xff, 0x00, 0x66),
            secondary_accent:        Color::srgb_u8(0x00, 0xff, 0xcc),
            ambient_color:           Color::srgb_u8(0x40, 0x40, 0x40),
            ambient_brightness:      400.0,
            directional_illuminance: 4_000.0,
            directional_from:        Vec3::new(5.0, 5.0, 5.0),
            body_resolution:         32,
            body_metallic:           0.1,
            body_roughness:          0.8,
        }
    }
}

/// Per-frame motion constants shared by every body
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct DriftConfig {
    /// Self-rotation about Y in radians per second, identical for all bodies
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub spin_rate:           f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub float_speed:         f32,
    #[inspector(min = 0.0, max = 2.0, display = NumberDisplay::Slider)]
    pub float_amount:        f32,
    /// Horizontal sway runs at this fraction of the vertical speed and amplitude
    #[inspector(min = 0.0, max = 2.0, display = NumberDisplay::Slider)]
    pub horizontal_ratio:    f32,
    /// Phase step per body index on the vertical axis
    pub vertical_phase:      f32,
    /// Phase step per body index on the horizontal axis
    pub horizontal_phase:    f32,
    /// Particle field rotation about Y in radians per second
    #[inspector(min = 0.0, max = 0.5, display = NumberDisplay::Slider)]
    pub particle_spin_rate:  f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            // 0.001 rad per frame at 60 fps
            spin_rate:          0.06,
            float_speed:        0.05,
            float_amount:       0.1,
            horizontal_ratio:   0.8,
            vertical_phase:     2.0,
            horizontal_phase:   3.0,
            particle_spin_rate: 0.02,
        }
    }
}
