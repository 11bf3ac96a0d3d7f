//! Closing the panel: fade it out while the camera flies to the tracked body.

use bevy::ecs::system::SystemParam;
use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;

use super::config::SequenceConfig;
use super::donation::DonationPanel;
use super::presentation::PanelVisibility;
use super::sequence::StageTimer;
use super::tween::Appearance;
use super::tween::Tween;
use super::tween::TweenProperty;
use super::tween::Tweens;
use crate::camera::FlightConfig;
use crate::camera::Flythrough;
use crate::camera::LandingCamera;
use crate::camera::framing_position;
use crate::error::LandingError;
use crate::input::LandingCommand;
use crate::scene::TrackedBody;
use crate::schedule::LandingSet;
use crate::state::LandingState;
use crate::state::SequenceEvent;
use crate::state::apply_sequence_events;

pub struct FlightPlugin;

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(LandingState::DonationToFlight), launch_flight)
            .add_systems(
                Update,
                handle_close
                    .in_set(LandingSet::Sequencing)
                    .before(apply_sequence_events),
            );
    }
}

/// Everything needed to start (or restart) the exit: the panel fade, the camera flight and the
/// stage timer that ends it.
#[derive(SystemParam)]
pub struct FlightLauncher<'w, 's> {
    commands: Commands<'w, 's>,
    sequence: Res<'w, SequenceConfig>,
    flight:   Res<'w, FlightConfig>,
    panel:    Query<
        'w,
        's,
        (&'static mut PanelVisibility, &'static mut Tweens, &'static Appearance),
        With<DonationPanel>,
    >,
    body:     Query<'w, 's, (Entity, &'static GlobalTransform), With<TrackedBody>>,
    camera:   Query<'w, 's, Entity, With<LandingCamera>>,
}

impl FlightLauncher<'_, '_> {
    pub fn launch(&mut self) {
        self.fade_out_panel();

        let duration_secs = match self.start_flythrough() {
            Ok(duration_secs) => duration_secs,
            Err(error) => {
                warn!("{error}, only hiding the panel");
                self.sequence.panel_fade_out_secs
            },
        };

        self.commands.insert_resource(StageTimer::new(
            duration_secs,
            SequenceEvent::FlightFinished,
        ));
    }

    fn fade_out_panel(&mut self) {
        let Ok((mut visibility, mut tweens, appearance)) = self.panel.single_mut() else {
            warn!("{}", LandingError::missing("donation panel"));
            return;
        };

        // from wherever the fade-in got to, so an early close never pops to full opacity
        tweens.kill(&[TweenProperty::Opacity]);
        tweens.push(
            Tween::new(
                TweenProperty::Opacity,
                appearance.opacity,
                0.0,
                self.sequence.panel_fade_out_secs,
            )
            .with_ease(EaseFunction::CubicIn),
        );
        *visibility = PanelVisibility::Hiding;
    }

    fn start_flythrough(&mut self) -> Result<f32, LandingError> {
        let (body, body_transform) = self
            .body
            .single()
            .map_err(|_| LandingError::missing("tracked body"))?;
        let camera = self
            .camera
            .single()
            .map_err(|_| LandingError::missing("landing camera"))?;

        let destination = framing_position(body_transform.translation(), self.flight.framing);
        self.commands.entity(camera).insert(Flythrough::new(
            body,
            destination,
            self.flight.duration_secs,
        ));
        debug!("flying to {destination}");
        Ok(self.flight.duration_secs)
    }
}

pub fn launch_flight(mut launcher: FlightLauncher) { launcher.launch(); }

/// Close before the panel is up is ignored; close while already flying restarts the flight
/// from where the camera is now.
pub fn handle_close(
    mut commands_in: MessageReader<LandingCommand>,
    state: Res<State<LandingState>>,
    mut events: MessageWriter<SequenceEvent>,
    mut launcher: FlightLauncher,
) {
    let closes = commands_in
        .read()
        .filter(|command| **command == LandingCommand::Close)
        .count();
    if closes == 0 {
        return;
    }

    match state.get() {
        LandingState::IntroToDonation | LandingState::Donation => {
            events.write(SequenceEvent::CloseRequested);
        },
        LandingState::DonationToFlight => {
            info!("close requested mid-flight, restarting the flythrough");
            launcher.launch();
        },
        other => debug!("close ignored in {other:?}"),
    }
}
