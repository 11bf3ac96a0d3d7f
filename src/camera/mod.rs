mod cameras;
mod config;
mod flythrough;
mod viewport;

use bevy::prelude::*;

use cameras::CamerasPlugin;
pub use cameras::LandingCamera;
use config::CameraConfigPlugin;
pub use config::FlightConfig;
pub use flythrough::Flythrough;
pub use flythrough::framing_position;
use flythrough::FlythroughPlugin;
use viewport::ViewportPlugin;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraConfigPlugin)
            .add_plugins(CamerasPlugin)
            .add_plugins(ViewportPlugin)
            .add_plugins(FlythroughPlugin);
    }
}
