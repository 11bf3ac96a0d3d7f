use bevy::prelude::*;

use super::config::SceneConfig;
use crate::asset_loader::PlanetTextures;
use crate::camera::FlightConfig;

pub struct CelestialPlugin;

impl Plugin for CelestialPlugin {
    fn build(&self, app: &mut App) { app.add_systems(Startup, spawn_celestial_bodies); }
}

/// Static description of one planet. Colour is kept as the `0xRRGGBB` it was authored in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDescriptor {
    pub name:     &'static str,
    pub radius:   f32,
    pub color:    u32,
    pub position: Vec3,
    pub texture:  Option<&'static str>,
}

impl BodyDescriptor {
    pub fn flat_color(&self) -> Color {
        let [_, r, g, b] = self.color.to_be_bytes();
        Color::srgb_u8(r, g, b)
    }
}

pub const PLANETS: [BodyDescriptor; 8] = [
    BodyDescriptor {
        name:     "Mercury",
        radius:   0.4,
        color:    0x8A_8A8A,
        position: Vec3::new(-6.0, 2.0, -25.0),
        texture:  Some("textures/Mercury_baseColor.jpg"),
    },
    BodyDescriptor {
        name:     "Venus",
        radius:   0.7,
        color:    0xFF_D700,
        position: Vec3::new(8.0, -4.0, -35.0),
        texture:  None,
    },
    BodyDescriptor {
        name:     "Earth",
        radius:   0.8,
        color:    0x00_77BE,
        position: Vec3::new(-10.0, -1.0, -20.0),
        texture:  Some("textures/Earth_baseColor.jpg"),
    },
    BodyDescriptor {
        name:     "Mars",
        radius:   0.5,
        color:    0xFF_4500,
        position: Vec3::new(9.0, 6.0, -30.0),
        texture:  Some("textures/Mars_baseColor.jpg"),
    },
    BodyDescriptor {
        name:     "Jupiter",
        radius:   1.8,
        color:    0xD2_691E,
        position: Vec3::new(-18.0, 8.0, -45.0),
        texture:  Some("textures/Jupiter_baseColor.jpg"),
    },
    // no ring
    BodyDescriptor {
        name:     "Saturn",
        radius:   1.6,
        color:    0xDA_A520,
        position: Vec3::new(20.0, -10.0, -55.0),
        texture:  None,
    },
    BodyDescriptor {
        name:     "Uranus",
        radius:   1.0,
        color:    0xAF_EEEE,
        position: Vec3::new(-25.0, 4.0, -65.0),
        texture:  None,
    },
    BodyDescriptor {
        name:     "Neptune",
        radius:   1.0,
        color:    0x46_82B4,
        position: Vec3::new(30.0, -12.0, -75.0),
        texture:  Some("textures/Neptune_baseColor.jpg"),
    },
];

/// A rendered planet. `index` is assigned once at spawn and is what the drift phase keys off,
/// so two bodies sharing a name can never be confused.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct CelestialBody {
    pub index:         usize,
    pub base_position: Vec3,
}

/// The body the flythrough frames. At most one entity carries it.
#[derive(Component, Reflect, Debug, Default)]
#[reflect(Component)]
pub struct TrackedBody;

/// First descriptor whose name matches - duplicates after it are never tracked
pub fn tracked_index(descriptors: &[BodyDescriptor], name: &str) -> Option<usize> {
    descriptors.iter().position(|descriptor| descriptor.name == name)
}

fn spawn_celestial_bodies(
    mut commands: Commands,
    config: Res<SceneConfig>,
    flight: Res<FlightConfig>,
    textures: Res<PlanetTextures>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let tracked = tracked_index(&PLANETS, &flight.tracked_body);
    if tracked.is_none() {
        warn!(
            "no body named '{}' - flythrough will only hide the panel",
            flight.tracked_body
        );
    }

    for (index, descriptor) in PLANETS.iter().enumerate() {
        let material = match textures.get(index) {
            Some(texture) => StandardMaterial {
                base_color_texture: Some(texture),
                metallic: config.body_metallic,
                perceptual_roughness: config.body_roughness,
                ..default()
            },
            None => StandardMaterial {
                base_color: descriptor.flat_color(),
                metallic: config.body_metallic,
                perceptual_roughness: config.body_roughness,
                ..default()
            },
        };

        let mesh = Sphere::new(descriptor.radius)
            .mesh()
            .uv(config.body_resolution, config.body_resolution);

        let mut body = commands.spawn((
            Name::new(descriptor.name),
            CelestialBody {
                index,
                base_position: descriptor.position,
            },
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(material)),
            Transform::from_translation(descriptor.position),
        ));

        if tracked == Some(index) {
            body.insert(TrackedBody);
        }
    }

    debug!("spawned {} celestial bodies", PLANETS.len());
}
