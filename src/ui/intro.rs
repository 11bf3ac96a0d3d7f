//! The intro logo: spawned hidden at startup, played as one timeline on entering `Intro`,
//! despawned on the way out.

use bevy::ecs::system::SystemParam;
use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;

use super::config::SequenceConfig;
use super::constants::LOGO_GLOW;
use super::constants::LOGO_HALO;
use super::constants::LOGO_TAGLINE_FONT_SIZE;
use super::constants::LOGO_TITLE_FONT_SIZE;
use super::constants::PRIMARY;
use super::constants::TEXT;
use super::donation::DonationPanel;
use super::presentation::PanelVisibility;
use super::presentation::Tint;
use super::sequence::StageTimer;
use super::timeline::Placement;
use super::timeline::Timeline;
use super::tween::Appearance;
use super::tween::Repeat;
use super::tween::Tween;
use super::tween::TweenProperty;
use super::tween::Tweens;
use crate::error::LandingError;
use crate::state::LandingState;
use crate::state::SequenceEvent;

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_intro_logo)
            .add_systems(OnEnter(LandingState::Intro), begin_intro);
    }
}

/// Full-screen container of the logo
#[derive(Component, Debug)]
pub struct IntroLogo;

/// The framed mark that scales in and glows
#[derive(Component, Debug)]
pub struct LogoMark;

#[derive(Component, Debug)]
pub struct LogoTitle;

#[derive(Component, Debug)]
pub struct LogoTagline;

fn spawn_intro_logo(mut commands: Commands) {
    let text_tint = Tint::text(TEXT, TEXT, TEXT);

    commands.spawn((
        Name::new("IntroLogo"),
        IntroLogo,
        PanelVisibility::Visible,
        Tweens::default(),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        },
        children![(
            Name::new("LogoMark"),
            LogoMark,
            Tweens::default(),
            Appearance::hidden(),
            Tint::background(LOGO_HALO, LOGO_GLOW, LOGO_GLOW),
            BackgroundColor(LOGO_HALO),
            UiTransform::default(),
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(32.0)),
                ..default()
            },
            children![
                (
                    Name::new("LogoTitle"),
                    LogoTitle,
                    Tweens::default(),
                    Appearance::hidden(),
                    text_tint,
                    Text::new("HAIL"),
                    TextFont {
                        font_size: LOGO_TITLE_FONT_SIZE,
                        ..default()
                    },
                    TextColor(TEXT),
                    Node::default(),
                ),
                (
                    Name::new("LogoTagline"),
                    LogoTagline,
                    Tweens::default(),
                    Appearance::hidden(),
                    Tint::text(PRIMARY, PRIMARY, PRIMARY),
                    Text::new("GAMES"),
                    TextFont {
                        font_size: LOGO_TAGLINE_FONT_SIZE,
                        ..default()
                    },
                    TextColor(PRIMARY),
                    Node::default(),
                ),
            ],
        )],
    ));
}

/// Lays out the logo reveal. Generic over the target so the timing can be checked without a
/// world.
pub fn intro_timeline<T: Copy>(
    container: T,
    mark: T,
    title: T,
    tagline: T,
    config: &SequenceConfig,
) -> Timeline<T> {
    let mut timeline = Timeline::default();
    timeline
        .add(
            &[mark],
            &[
                Tween::new(TweenProperty::Opacity, 0.0, 1.0, config.logo_reveal_secs)
                    .with_ease(EaseFunction::ElasticOut),
                Tween::new(
                    TweenProperty::Scale,
                    config.logo_start_scale,
                    1.0,
                    config.logo_reveal_secs,
                )
                .with_ease(EaseFunction::ElasticOut),
            ],
            Placement::End,
        )
        .add(
            &[title, tagline],
            &[
                Tween::new(TweenProperty::Opacity, 0.0, 1.0, config.title_reveal_secs)
                    .with_ease(EaseFunction::CubicOut),
                Tween::new(TweenProperty::Rise, config.title_rise_px, 0.0, config.title_reveal_secs)
                    .with_ease(EaseFunction::CubicOut),
            ],
            Placement::WithPrevious(config.title_reveal_offset),
        )
        .add(
            &[mark],
            &[Tween::new(TweenProperty::Glow, 0.0, 1.0, config.glow_secs)
                .with_ease(EaseFunction::CubicOut)
                .yoyo(Repeat::Times(1))],
            Placement::AfterPrevious(-config.glow_overlap_secs),
        )
        .add(
            &[container],
            &[Tween::new(TweenProperty::Opacity, 1.0, 0.0, config.logo_fade_secs)
                .with_ease(EaseFunction::CubicIn)],
            Placement::AfterEnd(config.logo_hold_secs),
        );
    timeline
}

struct LogoElements {
    container: Entity,
    mark:      Entity,
    title:     Entity,
    tagline:   Entity,
}

#[derive(SystemParam)]
pub struct LogoQueries<'w, 's> {
    container: Query<'w, 's, Entity, With<IntroLogo>>,
    mark:      Query<'w, 's, Entity, With<LogoMark>>,
    title:     Query<'w, 's, Entity, With<LogoTitle>>,
    tagline:   Query<'w, 's, Entity, With<LogoTagline>>,
    panel:     Query<'w, 's, (), With<DonationPanel>>,
}

impl LogoQueries<'_, '_> {
    /// Everything the timeline animates, plus the panel it hands over to
    fn find(&self) -> Result<LogoElements, LandingError> {
        let container = self
            .container
            .single()
            .map_err(|_| LandingError::missing("intro logo"))?;
        let mark = self
            .mark
            .single()
            .map_err(|_| LandingError::missing("logo mark"))?;
        let title = self
            .title
            .single()
            .map_err(|_| LandingError::missing("logo title"))?;
        let tagline = self
            .tagline
            .single()
            .map_err(|_| LandingError::missing("logo tagline"))?;
        if self.panel.is_empty() {
            return Err(LandingError::missing("donation panel"));
        }

        Ok(LogoElements {
            container,
            mark,
            title,
            tagline,
        })
    }
}

pub fn begin_intro(
    mut commands: Commands,
    config: Res<SequenceConfig>,
    logo: LogoQueries,
    mut animated: Query<(&mut Tweens, &mut Appearance)>,
    mut visibility: Query<&mut PanelVisibility, With<IntroLogo>>,
) {
    let elements = match logo.find() {
        Ok(elements) => elements,
        Err(error) => {
            warn!("{error}, skipping the logo animation");
            for mut visibility in &mut visibility {
                *visibility = PanelVisibility::Hidden;
            }
            commands.insert_resource(StageTimer::new(
                config.fallback_delay_secs,
                SequenceEvent::LogoFinished,
            ));
            return;
        },
    };

    let starting = [
        (elements.container, Appearance::default()),
        (elements.mark, Appearance {
            opacity: 0.0,
            scale: config.logo_start_scale,
            ..default()
        }),
        (elements.title, Appearance {
            opacity: 0.0,
            rise: config.title_rise_px,
            ..default()
        }),
        (elements.tagline, Appearance {
            opacity: 0.0,
            rise: config.title_rise_px,
            ..default()
        }),
    ];
    for (entity, start) in starting {
        if let Ok((mut tweens, mut appearance)) = animated.get_mut(entity) {
            tweens.kill_all();
            *appearance = start;
        }
    }

    let timeline = intro_timeline(
        elements.container,
        elements.mark,
        elements.title,
        elements.tagline,
        &config,
    );
    let duration_secs = timeline.duration_secs();

    for entry in timeline.into_entries() {
        if let Ok((mut tweens, _)) = animated.get_mut(entry.target) {
            tweens.push(entry.tween);
        }
    }

    debug!("intro timeline runs for {duration_secs:.2}s");
    commands.insert_resource(StageTimer::new(duration_secs, SequenceEvent::LogoFinished));
}
