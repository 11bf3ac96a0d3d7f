//! Camera flythrough plugin and component
//! Flies the landing camera to a framing position next to a body while keeping it in view.

use bevy::math::curve::Curve;
use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;

use super::cameras::LandingCamera;
use crate::schedule::LandingSet;

pub struct FlythroughPlugin;

impl Plugin for FlythroughPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, fly_camera.in_set(LandingSet::Tweening));
    }
}

/// State tracking for the flight in progress
#[derive(Clone, Copy, Reflect, Default, Debug, PartialEq)]
enum FlightState {
    InProgress {
        elapsed_secs: f32,
        start:        Vec3,
    },
    #[default]
    Ready,
}

/// Insert on the camera to fly it to `focus`'s position plus `framing`.
///
/// The destination is fixed when the component is inserted; the look-at follows the focus
/// entity's live position every frame. The component removes itself when the flight lands.
/// Inserting it again mid-flight restarts from wherever the camera is.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct Flythrough {
    pub focus:         Entity,
    pub destination:   Vec3,
    pub duration_secs: f32,
    pub ease:          EaseFunction,
    state:             FlightState,
}

impl Flythrough {
    pub const fn new(focus: Entity, destination: Vec3, duration_secs: f32) -> Self {
        Self {
            focus,
            destination,
            duration_secs,
            ease: EaseFunction::CubicInOut,
            state: FlightState::Ready,
        }
    }
}

/// Where the camera should end up for a body currently at `body_position`
pub fn framing_position(body_position: Vec3, framing: Vec3) -> Vec3 { body_position + framing }

/// Eased position along the straight path from `start` to `destination`
pub fn flight_position(
    start: Vec3,
    destination: Vec3,
    elapsed_secs: f32,
    duration_secs: f32,
    ease: EaseFunction,
) -> Vec3 {
    let t = if duration_secs <= 0.0 {
        1.0
    } else {
        (elapsed_secs / duration_secs).clamp(0.0, 1.0)
    };
    start.lerp(destination, ease.sample_clamped(t))
}

/// Advances the flythrough on the landing camera
///
/// The first frame captures the start position and already moves by that frame's delta, so a
/// flight lands on the same frame a timer of the same length runs out. If the focus is gone the
/// camera keeps flying and just stops re-aiming.
pub fn fly_camera(
    mut commands: Commands,
    time: Res<Time>,
    mut cameras: Query<(Entity, &mut Transform, &mut Flythrough), With<LandingCamera>>,
    focus: Query<&GlobalTransform, Without<LandingCamera>>,
) {
    for (entity, mut transform, mut flight) in &mut cameras {
        let focus_position = focus.get(flight.focus).ok().map(GlobalTransform::translation);

        let (elapsed_before, start) = match flight.state {
            FlightState::Ready => (0.0, transform.translation),
            FlightState::InProgress {
                elapsed_secs,
                start,
            } => (elapsed_secs, start),
        };
        let elapsed_secs = elapsed_before + time.delta_secs();

        transform.translation = flight_position(
            start,
            flight.destination,
            elapsed_secs,
            flight.duration_secs,
            flight.ease,
        );
        if let Some(target) = focus_position {
            transform.look_at(target, Vec3::Y);
        }

        if elapsed_secs >= flight.duration_secs {
            debug!("flythrough landed at {}", transform.translation);
            commands.entity(entity).remove::<Flythrough>();
        } else {
            flight.state = FlightState::InProgress {
                elapsed_secs,
                start,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    #[test]
    fn framing_offsets_from_the_body() {
        let earth = Vec3::new(-10.0, -1.0, -20.0);
        assert_eq!(
            framing_position(earth, Vec3::new(5.0, 2.0, 10.0)),
            Vec3::new(-5.0, 1.0, -10.0)
        );
    }

    #[test]
    fn flight_starts_and_ends_on_the_endpoints() {
        let start = Vec3::new(0.0, 0.0, 15.0);
        let end = Vec3::new(-5.0, 1.0, -10.0);
        let ease = EaseFunction::CubicInOut;

        assert!(flight_position(start, end, 0.0, 3.0, ease).abs_diff_eq(start, 1e-5));
        assert!(flight_position(start, end, 3.0, 3.0, ease).abs_diff_eq(end, 1e-5));
        assert!(flight_position(start, end, 10.0, 3.0, ease).abs_diff_eq(end, 1e-5));
    }

    #[test]
    fn flight_is_halfway_at_half_time_for_symmetric_ease() {
        let start = Vec3::ZERO;
        let end = Vec3::new(10.0, 0.0, 0.0);
        let mid = flight_position(start, end, 1.5, 3.0, EaseFunction::CubicInOut);
        assert!(mid.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn zero_duration_jumps_to_destination() {
        let end = Vec3::new(1.0, 2.0, 3.0);
        let pos = flight_position(Vec3::ZERO, end, 0.0, 0.0, EaseFunction::Linear);
        assert!(pos.abs_diff_eq(end, 1e-6));
    }

    #[test]
    fn flight_moves_on_its_first_frame_and_lands_on_time() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_systems(Update, fly_camera);
        app.update();

        let start = Vec3::new(0.0, 0.0, 15.0);
        let destination = Vec3::new(-5.0, 1.0, -10.0);
        let body = app
            .world_mut()
            .spawn(GlobalTransform::from_translation(Vec3::new(-10.0, -1.0, -20.0)))
            .id();
        let camera = app
            .world_mut()
            .spawn((
                LandingCamera,
                Transform::from_translation(start),
                Flythrough::new(body, destination, 0.25),
            ))
            .id();

        app.update();
        let after_one = app.world().get::<Transform>(camera).unwrap().translation;
        assert!(!after_one.abs_diff_eq(start, 1e-4), "first frame did not move");

        app.update();
        assert!(app.world().get::<Flythrough>(camera).is_some());

        // 0.3 s of frames covers the 0.25 s flight
        app.update();
        assert!(app.world().get::<Flythrough>(camera).is_none());
        let landed = app.world().get::<Transform>(camera).unwrap().translation;
        assert!(landed.abs_diff_eq(destination, 1e-4));
    }
}
