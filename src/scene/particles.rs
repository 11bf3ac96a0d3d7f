use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use rand::Rng;

use super::config::SceneConfig;
use crate::traits::TransformExt;
use crate::traits::UsizeExt;

pub struct ParticleFieldPlugin;

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) { app.add_systems(Startup, spawn_particle_field); }
}

/// Root of the dust field. Only this entity ever moves - the particles are children and are
/// rotated rigidly with it.
#[derive(Component, Reflect, Debug, Default)]
#[reflect(Component)]
pub struct ParticleField;

#[derive(Component, Reflect, Debug, Default, Clone, Copy)]
#[reflect(Component)]
pub struct Particle;

/// Distinct accent levels per accent. Particles with the same pair of levels share a material,
/// so the whole field needs at most `TINT_STEPS * TINT_STEPS` of them.
const TINT_STEPS: usize = 4;

/// How far one particle leans toward each accent, in steps of `particle_accent_mix / (TINT_STEPS - 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleTint {
    primary:   usize,
    secondary: usize,
}

impl ParticleTint {
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self {
            primary:   rng.random_range(0..TINT_STEPS),
            secondary: rng.random_range(0..TINT_STEPS),
        }
    }

    /// Near-white, nudged a little toward the primary accent and then the secondary accent
    pub fn color(self, config: &SceneConfig) -> Color {
        let level = config.particle_base_level;
        let base = Color::linear_rgb(level, level, level);
        let step = config.particle_accent_mix / (TINT_STEPS - 1).to_f32();

        base.mix(&config.primary_accent, step * self.primary.to_f32())
            .mix(&config.secondary_accent, step * self.secondary.to_f32())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    pub position: Vec3,
    pub tint:     ParticleTint,
}

/// Uniform sample in a cube of side `extent` centred on the origin, pushed back by `depth_offset`
pub fn particle_position(extent: f32, depth_offset: f32, rng: &mut impl Rng) -> Vec3 {
    let mut axis = || (rng.random::<f32>() - 0.5) * extent;
    let x = axis();
    let y = axis();
    let z = axis() + depth_offset;
    Vec3::new(x, y, z)
}

pub fn generate_particles(config: &SceneConfig, rng: &mut impl Rng) -> Vec<ParticleSample> {
    (0..config.particle_count)
        .map(|_| ParticleSample {
            position: particle_position(
                config.particle_extent,
                config.particle_depth_offset,
                rng,
            ),
            tint:     ParticleTint::sample(rng),
        })
        .collect()
}

/// Spawn the field root and all particles with every component up front to avoid archetype
/// moves after spawn. One mesh for the whole field, one material per tint.
fn spawn_particle_field(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let samples = generate_particles(&config, &mut rand::rng());
    let mesh = meshes.add(Sphere::new(config.particle_size * 0.5));
    let mut palette: HashMap<ParticleTint, Handle<StandardMaterial>> = HashMap::default();

    commands
        .spawn((
            Name::new("ParticleField"),
            ParticleField,
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|field| {
            for sample in &samples {
                let material = palette
                    .entry(sample.tint)
                    .or_insert_with(|| {
                        materials.add(StandardMaterial {
                            base_color: sample.tint.color(&config).with_alpha(config.particle_opacity),
                            unlit: true,
                            alpha_mode: AlphaMode::Add,
                            ..default()
                        })
                    })
                    .clone();

                field.spawn((
                    Particle,
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_trs(sample.position, Quat::IDENTITY, Vec3::ONE),
                ));
            }
        });

    debug!(
        "spawned particle field with {} particles sharing {} materials",
        samples.len(),
        palette.len()
    );
}
