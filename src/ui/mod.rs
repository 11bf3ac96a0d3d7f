mod clipboard;
mod config;
mod constants;
mod copy;
mod donation;
mod flight;
mod intro;
mod presentation;
mod sequence;
mod timeline;
mod tween;

use bevy::prelude::*;

use config::UiConfigPlugin;
use copy::CopyPlugin;
use donation::DonationPlugin;
use flight::FlightPlugin;
pub use intro::IntroLogo;
use intro::IntroPlugin;
use presentation::PresentationPlugin;
use sequence::SequencePlugin;
use tween::TweenPlugin;

/// The overlay: intro logo, donation panel and everything that animates them.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(UiConfigPlugin)
            .add_plugins(TweenPlugin)
            .add_plugins(PresentationPlugin)
            .add_plugins(SequencePlugin)
            .add_plugins(IntroPlugin)
            .add_plugins(DonationPlugin)
            .add_plugins(CopyPlugin)
            .add_plugins(FlightPlugin);
    }
}
