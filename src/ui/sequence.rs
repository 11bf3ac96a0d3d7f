//! Stage timers: each `OnEnter` of the landing sequence arms one, and when it runs out the
//! stage's completion event goes to the transition table.

use bevy::prelude::*;

use crate::schedule::LandingSet;
use crate::state::SequenceEvent;
use crate::state::apply_sequence_events;

pub struct SequencePlugin;

impl Plugin for SequencePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            tick_stage_timer
                .in_set(LandingSet::Sequencing)
                .before(apply_sequence_events),
        );
    }
}

/// Fires `event` once `timer` finishes, then removes itself. Arming a new one replaces the old,
/// which is how a restarted stage resets its clock.
#[derive(Resource, Debug)]
pub struct StageTimer {
    timer: Timer,
    event: SequenceEvent,
}

impl StageTimer {
    pub fn new(duration_secs: f32, event: SequenceEvent) -> Self {
        Self {
            timer: Timer::from_seconds(duration_secs.max(0.0), TimerMode::Once),
            event,
        }
    }

    #[cfg(test)]
    pub const fn event(&self) -> SequenceEvent { self.event }

    #[cfg(test)]
    pub fn remaining_secs(&self) -> f32 { self.timer.remaining_secs() }
}

fn tick_stage_timer(
    mut commands: Commands,
    time: Res<Time>,
    stage: Option<ResMut<StageTimer>>,
    mut events: MessageWriter<SequenceEvent>,
) {
    let Some(mut stage) = stage else {
        return;
    };

    stage.timer.tick(time.delta());
    if stage.timer.is_finished() {
        debug!("stage timer finished, sending {:?}", stage.event);
        events.write(stage.event);
        commands.remove_resource::<StageTimer>();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::camera::FlightConfig;
    use crate::input::LandingCommand;
    use crate::schedule::SchedulePlugin;
    use crate::state::LandingState;
    use crate::state::StatePlugin;
    use crate::ui::config::SequenceConfig;
    use crate::ui::donation::ScrollLock;
    use crate::ui::donation::hide_donation_panel;
    use crate::ui::donation::reveal_donation_panel;
    use crate::ui::flight::handle_close;
    use crate::ui::flight::launch_flight;
    use crate::ui::donation::DonationPanel;
    use crate::ui::intro::IntroLogo;
    use crate::ui::intro::LogoMark;
    use crate::ui::intro::LogoTagline;
    use crate::ui::intro::LogoTitle;
    use crate::ui::intro::begin_intro;
    use crate::ui::presentation::PanelVisibility;
    use crate::ui::tween::Tweens;

    const STEP: Duration = Duration::from_millis(100);

    /// The sequencer with every stage system but no UI tree, camera or bodies
    fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
            .add_plugins((SchedulePlugin, StatePlugin, SequencePlugin))
            .add_message::<LandingCommand>()
            .init_resource::<SequenceConfig>()
            .init_resource::<FlightConfig>()
            .init_resource::<ScrollLock>()
            .add_systems(OnEnter(LandingState::Intro), begin_intro)
            .add_systems(OnEnter(LandingState::IntroToDonation), reveal_donation_panel)
            .add_systems(OnEnter(LandingState::DonationToFlight), launch_flight)
            .add_systems(OnEnter(LandingState::HiddenFinal), hide_donation_panel)
            .add_systems(
                Update,
                handle_close
                    .in_set(LandingSet::Sequencing)
                    .before(apply_sequence_events),
            );
        app.update();
        app
    }

    fn state(app: &App) -> LandingState { *app.world().resource::<State<LandingState>>().get() }

    /// Updates until `target` is the current state, returning how many frames that took
    fn run_until(app: &mut App, target: LandingState, max_frames: usize) -> usize {
        let mut frames = 0;
        while state(app) != target {
            assert!(
                frames < max_frames,
                "never reached {target:?}, stuck in {:?}",
                state(app)
            );
            app.update();
            frames += 1;
        }
        frames
    }

    #[test]
    fn timer_fires_once_then_removes_itself() {
        let mut app = headless_app();
        app.insert_resource(StageTimer::new(0.25, SequenceEvent::FlightFinished));

        for _ in 0..5 {
            app.update();
        }

        assert!(!app.world().contains_resource::<StageTimer>());
        // FlightFinished is meaningless in Launch, so nothing moved
        assert_eq!(state(&app), LandingState::Launch);
    }

    #[test]
    fn fallback_intro_waits_before_the_panel() {
        let mut app = headless_app();
        app.world_mut().write_message(SequenceEvent::AssetsSettled);
        run_until(&mut app, LandingState::Intro, 5);

        // no logo and no panel: the fallback delay alone holds the intro for 0.5 s
        for _ in 0..4 {
            app.update();
            assert_eq!(state(&app), LandingState::Intro);
        }

        let frames = run_until(&mut app, LandingState::Donation, 30);
        assert!(frames > 0);
    }

    #[test]
    fn close_without_body_or_panel_still_hides() {
        let mut app = headless_app();
        app.world_mut().write_message(SequenceEvent::AssetsSettled);
        run_until(&mut app, LandingState::Donation, 40);
        assert_eq!(*app.world().resource::<ScrollLock>(), ScrollLock::Unlocked);

        app.world_mut().write_message(LandingCommand::Close);
        run_until(&mut app, LandingState::DonationToFlight, 5);
        run_until(&mut app, LandingState::HiddenFinal, 20);

        assert_eq!(*app.world().resource::<ScrollLock>(), ScrollLock::Locked);
        assert!(state(&app).is_terminal());
    }

    #[test]
    fn close_is_ignored_during_the_intro() {
        let mut app = headless_app();
        app.world_mut().write_message(SequenceEvent::AssetsSettled);
        run_until(&mut app, LandingState::Intro, 5);

        app.world_mut().write_message(LandingCommand::Close);
        app.update();
        app.update();
        assert_eq!(state(&app), LandingState::Intro);
    }

    fn spawn_logo_and_panel(app: &mut App) {
        let world = app.world_mut();
        world.spawn((IntroLogo, PanelVisibility::Visible, Tweens::default()));
        world.spawn((LogoMark, Tweens::default()));
        world.spawn((LogoTitle, Tweens::default()));
        world.spawn((LogoTagline, Tweens::default()));
        world.spawn((DonationPanel, PanelVisibility::Hidden, Tweens::default()));
    }

    #[test]
    fn full_logo_holds_the_intro_for_its_whole_timeline() {
        let mut app = headless_app();
        spawn_logo_and_panel(&mut app);
        app.world_mut().write_message(SequenceEvent::AssetsSettled);
        run_until(&mut app, LandingState::Intro, 5);

        // the entering frame already ticked once, so this is 3.4 s of timeline
        for _ in 0..33 {
            app.update();
            assert_eq!(state(&app), LandingState::Intro);
        }
        let remaining = app.world().resource::<StageTimer>().remaining_secs();
        assert!((remaining - 0.1).abs() < 1e-3, "{remaining} s left");

        let frames = run_until(&mut app, LandingState::IntroToDonation, 3);
        assert!(frames >= 1);
        run_until(&mut app, LandingState::Donation, 20);
    }

    #[test]
    fn close_in_the_reveal_frame_is_not_lost() {
        let mut app = headless_app();
        app.world_mut().write_message(SequenceEvent::AssetsSettled);
        run_until(&mut app, LandingState::IntroToDonation, 20);

        app.world_mut().write_message(SequenceEvent::PanelRevealed);
        app.world_mut().write_message(SequenceEvent::CloseRequested);
        for _ in 0..3 {
            app.update();
            assert_ne!(state(&app), LandingState::Donation);
            if state(&app) == LandingState::DonationToFlight {
                break;
            }
        }
        assert_eq!(state(&app), LandingState::DonationToFlight);
    }
}
