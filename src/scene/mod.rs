mod celestial;
mod config;
mod drift;
mod lights;
mod particles;

use bevy::prelude::*;

pub use celestial::CelestialBody;
use celestial::CelestialPlugin;
pub use celestial::PLANETS;
pub use celestial::TrackedBody;
pub use config::SceneConfig;
use config::SceneConfigPlugin;
use drift::DriftPlugin;
use lights::LightsPlugin;
use particles::ParticleFieldPlugin;

/// Builds the background once at startup and keeps it drifting every frame.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SceneConfigPlugin)
            .add_plugins(LightsPlugin)
            .add_plugins(ParticleFieldPlugin)
            .add_plugins(CelestialPlugin)
            .add_plugins(DriftPlugin);
    }
}
