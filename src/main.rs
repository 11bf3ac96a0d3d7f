//! Hail Games landing page - a drifting 3D planet field behind an animated intro and a
//! donation panel, built with Bevy 0.18
//!
//! - Intro logo timeline, then a Pix donation panel with copy-to-clipboard
//! - Camera flythrough to a planet when the panel is closed
//! - Live config inspectors (F1-F5) and Bevy Remote Protocol (BRP) support for debugging

mod asset_loader;
mod camera;
mod despawn;
mod error;
mod input;
mod scene;
mod schedule;
mod state;
mod traits;
mod ui;

use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use bevy::window::PresentMode;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::asset_loader::AssetLoaderPlugin;
use crate::camera::CameraPlugin;
use crate::despawn::DespawnPlugin;
use crate::input::InputPlugin;
use crate::scene::ScenePlugin;
use crate::schedule::SchedulePlugin;
use crate::state::StatePlugin;
use crate::ui::UiPlugin;

fn main() {
    let mut app = App::new();

    // Get effective port from BrpExtrasPlugin to include in window title if non-default
    let brp_plugin = BrpExtrasPlugin::default();
    let (effective_port, _) = brp_plugin.get_effective_port();
    let window_title = if effective_port == bevy_brp_extras::DEFAULT_REMOTE_PORT {
        "Hail Games".to_string()
    } else {
        format!("Hail Games - {effective_port}")
    };

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            ..default()
        }),
        ..default()
    }));

    // draw into the page's own canvas; without it Bevy appends a canvas of its own
    #[cfg(target_arch = "wasm32")]
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            canvas: Some("#canvas-container canvas".to_string()),
            fit_canvas_to_parent: true,
            present_mode: PresentMode::AutoNoVsync, // Reduces input lag.
            ..default()
        }),
        ..default()
    }));

    app.add_plugins((
        EguiPlugin::default(),
        AssetLoaderPlugin,
        brp_plugin,
        CameraPlugin,
        DespawnPlugin,
        InputPlugin,
        ScenePlugin,
        SchedulePlugin,
        StatePlugin,
        UiPlugin,
    ))
    .run();
}
