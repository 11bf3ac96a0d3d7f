//! Keeps the camera projection and the drawable size in step with the window.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy::window::WindowResized;

use super::cameras::LandingCamera;

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(PreUpdate, sync_viewport_on_resize);
    }
}

/// Last known size of the primary window in logical pixels
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct Viewport {
    pub width:  f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width:  1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    /// Ignores degenerate sizes (minimised windows report 0x0)
    pub fn set(&mut self, width: f32, height: f32) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn aspect_ratio(&self) -> f32 { self.width / self.height }
}

/// Applies a new window size to the viewport and the projection together, or to neither
pub fn fit_viewport(
    viewport: &mut Viewport,
    projection: Option<&mut PerspectiveProjection>,
    width: f32,
    height: f32,
) -> bool {
    if !viewport.set(width, height) {
        return false;
    }
    if let Some(perspective) = projection {
        perspective.aspect_ratio = viewport.aspect_ratio();
    }
    true
}

fn sync_viewport_on_resize(
    mut reader: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
    mut cameras: Query<&mut Projection, With<LandingCamera>>,
) {
    let primary = primary.single().ok();

    // several resizes can land in one frame while dragging - only the last one matters
    let Some(resized) = reader
        .read()
        .filter(|event| primary.is_none_or(|entity| entity == event.window))
        .last()
    else {
        return;
    };

    let mut projection = cameras.single_mut().ok();
    let perspective = match projection.as_deref_mut() {
        Some(Projection::Perspective(perspective)) => Some(perspective),
        _ => None,
    };

    if fit_viewport(&mut viewport, perspective, resized.width, resized.height) {
        debug!("viewport resized to {}x{}", resized.width, resized.height);
    } else {
        debug!(
            "ignoring degenerate resize {}x{}",
            resized.width, resized.height
        );
    }
}
