//! The per-frame half of the background: every body spins and floats around its base
//! position, the particle field turns slowly as one piece.
//!
//! Everything is a closed-form function of elapsed time so a frame never depends on the
//! previous one - a dropped frame can't accumulate drift.

use bevy::prelude::*;

use super::celestial::CelestialBody;
use super::config::DriftConfig;
use super::particles::ParticleField;
use crate::traits::UsizeExt;

pub struct DriftPlugin;

impl Plugin for DriftPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (drift_bodies, rotate_particle_field));
    }
}

/// Offset from the base position for body `index` at `elapsed` seconds. Z never moves.
pub fn drift_offset(elapsed: f32, index: usize, config: &DriftConfig) -> Vec3 {
    let index = index.to_f32();
    let vertical = elapsed
        .mul_add(config.float_speed, index * config.vertical_phase)
        .sin()
        * config.float_amount;
    let horizontal = (elapsed * config.float_speed)
        .mul_add(config.horizontal_ratio, index * config.horizontal_phase)
        .cos()
        * config.float_amount
        * config.horizontal_ratio;

    Vec3::new(horizontal, vertical, 0.0)
}

pub fn body_rotation(elapsed: f32, config: &DriftConfig) -> Quat {
    Quat::from_rotation_y(elapsed * config.spin_rate)
}

pub fn particle_field_rotation(elapsed: f32, config: &DriftConfig) -> Quat {
    Quat::from_rotation_y(elapsed * config.particle_spin_rate)
}

fn drift_bodies(
    time: Res<Time>,
    config: Res<DriftConfig>,
    mut bodies: Query<(&CelestialBody, &mut Transform)>,
) {
    let elapsed = time.elapsed_secs();
    let rotation = body_rotation(elapsed, &config);

    for (body, mut transform) in &mut bodies {
        transform.translation = body.base_position + drift_offset(elapsed, body.index, &config);
        transform.rotation = rotation;
    }
}

fn rotate_particle_field(
    time: Res<Time>,
    config: Res<DriftConfig>,
    mut field: Query<&mut Transform, With<ParticleField>>,
) {
    let rotation = particle_field_rotation(time.elapsed_secs(), &config);
    for mut transform in &mut field {
        transform.rotation = rotation;
    }
}
