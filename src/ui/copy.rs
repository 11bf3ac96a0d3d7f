//! Copy button feedback: relabel, pop or flash, then revert and resume the idle pulse.

use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;

use super::clipboard::CopyOutcome;
use super::clipboard::PixClipboard;
use super::clipboard::copy_text;
use super::config::DonationConfig;
use super::config::SequenceConfig;
use super::donation::CopyButton;
use super::donation::CopyLabel;
use super::donation::PixKeyText;
use super::tween::Appearance;
use super::tween::Repeat;
use super::tween::Tween;
use super::tween::TweenProperty;
use super::tween::Tweens;
use super::tween::start_pulse;
use crate::error::LandingError;
use crate::input::LandingCommand;
use crate::schedule::LandingSet;
use crate::state::LandingState;

pub struct CopyPlugin;

impl Plugin for CopyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PixClipboard>().add_systems(
            Update,
            (
                handle_copy.run_if(
                    in_state(LandingState::IntroToDonation).or(in_state(LandingState::Donation)),
                ),
                tick_copy_feedback,
            )
                .chain()
                .in_set(LandingSet::Sequencing),
        );
    }
}

/// Present on the copy button while its label shows a copy outcome
#[derive(Component, Debug)]
pub struct CopyFeedback {
    timer:          Timer,
    original_label: String,
}

impl CopyFeedback {
    pub fn new(original_label: String, revert_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(revert_secs, TimerMode::Once),
            original_label,
        }
    }

    pub fn original_label(&self) -> &str { &self.original_label }
}

/// Short scale bump on success
fn pop(config: &SequenceConfig) -> Tween {
    Tween::new(TweenProperty::Scale, 1.0, config.pop_scale, config.pop_secs)
        .with_ease(EaseFunction::QuadraticOut)
        .yoyo(Repeat::Times(1))
}

/// Short flash toward the error colour on failure
fn error_flash(config: &SequenceConfig) -> Tween {
    Tween::new(TweenProperty::Flash, 0.0, 1.0, config.pop_secs)
        .with_ease(EaseFunction::QuadraticOut)
        .yoyo(Repeat::Times(1))
}

pub fn handle_copy(
    mut commands_in: MessageReader<LandingCommand>,
    mut commands: Commands,
    clipboard: Res<PixClipboard>,
    donation: Res<DonationConfig>,
    sequence: Res<SequenceConfig>,
    pix_key: Query<&Text, (With<PixKeyText>, Without<CopyLabel>)>,
    mut buttons: Query<
        (
            Entity,
            &mut Tweens,
            &mut Appearance,
            &Children,
            Option<&CopyFeedback>,
        ),
        With<CopyButton>,
    >,
    mut labels: Query<&mut Text, With<CopyLabel>>,
) {
    let copies = commands_in
        .read()
        .filter(|command| **command == LandingCommand::Copy)
        .count();
    if copies == 0 {
        return;
    }

    let Ok(pix_key) = pix_key.single() else {
        warn!("{}, nothing to copy", LandingError::missing("pix key"));
        return;
    };
    let Ok((button, mut tweens, mut appearance, children, feedback)) = buttons.single_mut() else {
        warn!("{}, nothing to copy", LandingError::missing("copy button"));
        return;
    };
    let Some(label_entity) = children.iter().find(|child| labels.contains(*child)) else {
        warn!("{}", LandingError::missing("copy label"));
        return;
    };
    let Ok(mut label) = labels.get_mut(label_entity) else {
        return;
    };

    tweens.kill(&[TweenProperty::Scale, TweenProperty::Glow, TweenProperty::Flash]);
    appearance.scale = 1.0;
    appearance.glow = sequence.pressed_glow;
    appearance.flash = 0.0;

    let outcome = copy_text(clipboard.writer(), pix_key.0.trim());
    match &outcome {
        CopyOutcome::Failed(error) => {
            error!("pix key not copied: {}", LandingError::from(error.clone()));
            tweens.push(error_flash(&sequence));
        },
        CopyOutcome::Copied | CopyOutcome::CopiedWithFallback => {
            info!("pix key copied ({outcome:?})");
            tweens.push(pop(&sequence));
        },
    }

    // a second click while feedback shows must not capture the feedback text as the original
    let original_label = feedback.map_or_else(
        || label.0.clone(),
        |feedback| feedback.original_label().to_string(),
    );
    label.0 = outcome.label(&donation).to_string();

    commands.entity(button).insert(CopyFeedback::new(
        original_label,
        sequence.feedback_revert_secs,
    ));
}

fn tick_copy_feedback(
    mut commands: Commands,
    time: Res<Time>,
    sequence: Res<SequenceConfig>,
    mut buttons: Query<(
        Entity,
        &mut CopyFeedback,
        &mut Tweens,
        &mut Appearance,
        &Children,
    )>,
    mut labels: Query<&mut Text, With<CopyLabel>>,
) {
    for (button, mut feedback, mut tweens, mut appearance, children) in &mut buttons {
        feedback.timer.tick(time.delta());
        if !feedback.timer.is_finished() {
            continue;
        }

        for child in children.iter() {
            if let Ok(mut label) = labels.get_mut(child) {
                label.0.clone_from(&feedback.original_label);
            }
        }

        tweens.kill(&[TweenProperty::Flash]);
        appearance.flash = 0.0;
        start_pulse(&mut tweens, sequence.pulse_secs, sequence.pulse_scale);
        commands.entity(button).remove::<CopyFeedback>();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::error::ClipboardError;
    use crate::ui::clipboard::tests::FakeClipboard;

    fn copy_app(clipboard: FakeClipboard) -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_message::<LandingCommand>()
            .init_resource::<SequenceConfig>()
            .init_resource::<DonationConfig>()
            .insert_resource(PixClipboard(Box::new(clipboard)))
            .add_systems(Update, (handle_copy, tick_copy_feedback).chain());

        let world = app.world_mut();
        world.spawn((PixKeyText, Text::new("  contato@hailgames.com.br \n")));
        let button = world.spawn((CopyButton, Tweens::default())).id();
        let label = world
            .spawn((CopyLabel, Text::new("Copiar"), ChildOf(button)))
            .id();

        app.update();
        (app, button, label)
    }

    fn label_text(app: &App, label: Entity) -> String {
        app.world().get::<Text>(label).unwrap().0.clone()
    }

    fn click(app: &mut App) {
        app.world_mut().write_message(LandingCommand::Copy);
        app.update();
    }

    #[test]
    fn failed_copy_shows_error_then_reverts() {
        let (mut app, button, label) = copy_app(FakeClipboard::failing());

        click(&mut app);
        assert_eq!(label_text(&app, label), "Erro!");
        let tweens = app.world().get::<Tweens>(button).unwrap();
        assert!(tweens.is_animating(TweenProperty::Flash));

        for _ in 0..25 {
            app.update();
        }

        assert_eq!(label_text(&app, label), "Copiar");
        assert!(app.world().get::<CopyFeedback>(button).is_none());
        let appearance = app.world().get::<Appearance>(button).unwrap();
        assert!(appearance.flash.abs() < f32::EPSILON);
        let tweens = app.world().get::<Tweens>(button).unwrap();
        assert_eq!(tweens.len(), 2, "only the idle pulse is left");
    }

    #[test]
    fn fallback_copy_gets_its_own_label() {
        let fake = FakeClipboard::new(Err(ClipboardError::Unavailable("x11".into())), Ok(()));
        let (mut app, _, label) = copy_app(fake);

        click(&mut app);
        assert_eq!(label_text(&app, label), "Copiado (Fallback)!");
    }

    #[test]
    fn copies_the_trimmed_key() {
        let fake = FakeClipboard::new(Ok(()), Ok(()));
        let written = Arc::clone(&fake.written);
        let (mut app, button, label) = copy_app(fake);

        click(&mut app);
        assert_eq!(label_text(&app, label), "Copiado!");
        assert_eq!(*written.lock().unwrap(), vec!["contato@hailgames.com.br".to_string()]);
        let appearance = app.world().get::<Appearance>(button).unwrap();
        assert!((appearance.glow - 0.5).abs() < f32::EPSILON);
        assert!(
            app.world()
                .get::<Tweens>(button)
                .unwrap()
                .is_animating(TweenProperty::Scale)
        );
    }

    #[test]
    fn second_click_keeps_the_first_original_label() {
        let (mut app, button, label) = copy_app(FakeClipboard::new(Ok(()), Ok(())));

        click(&mut app);
        click(&mut app);
        assert_eq!(
            app.world()
                .get::<CopyFeedback>(button)
                .unwrap()
                .original_label(),
            "Copiar"
        );

        for _ in 0..25 {
            app.update();
        }
        assert_eq!(label_text(&app, label), "Copiar");
    }

    #[test]
    fn missing_button_is_a_no_op() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<LandingCommand>()
            .init_resource::<SequenceConfig>()
            .init_resource::<DonationConfig>()
            .insert_resource(PixClipboard(Box::new(FakeClipboard::new(Ok(()), Ok(())))))
            .add_systems(Update, handle_copy);
        app.world_mut()
            .spawn((PixKeyText, Text::new("contato@hailgames.com.br")));

        click(&mut app);
        assert!(
            app.world_mut()
                .query::<&CopyFeedback>()
                .iter(app.world())
                .next()
                .is_none()
        );
    }
}
