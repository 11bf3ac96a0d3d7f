//! The donation panel: built hidden at startup, revealed after the intro, scrolled with the
//! mouse wheel while it is up, and hidden for good once the flythrough lands.

use bevy::input::mouse::MouseScrollUnit;
use bevy::input::mouse::MouseWheel;
use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;

use super::config::DonationConfig;
use super::config::SequenceConfig;
use super::constants::BUTTON_BACKGROUND;
use super::constants::BUTTON_FONT_SIZE;
use super::constants::BUTTON_GLOW;
use super::constants::ERROR_FLASH;
use super::constants::KEY_BACKGROUND;
use super::constants::MUTED_TEXT;
use super::constants::PANEL_BACKGROUND;
use super::constants::PANEL_BODY_FONT_SIZE;
use super::constants::PANEL_TITLE_FONT_SIZE;
use super::constants::PANEL_WIDTH_PX;
use super::constants::PIX_KEY_FONT_SIZE;
use super::constants::PRIMARY;
use super::constants::SECONDARY;
use super::constants::TEXT;
use super::presentation::PanelVisibility;
use super::presentation::Tint;
use super::sequence::StageTimer;
use super::tween::Appearance;
use super::tween::Tween;
use super::tween::TweenProperty;
use super::tween::Tweens;
use super::tween::start_pulse;
use crate::error::LandingError;
use crate::input::CommandButton;
use crate::input::LandingCommand;
use crate::schedule::LandingSet;
use crate::state::LandingState;
use crate::state::SequenceEvent;
use crate::traits::UsizeExt;

pub struct DonationPlugin;

impl Plugin for DonationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollLock>()
            .add_systems(Startup, spawn_donation_panel)
            .add_systems(OnEnter(LandingState::IntroToDonation), reveal_donation_panel)
            .add_systems(OnEnter(LandingState::Donation), settle_donation_panel)
            .add_systems(OnEnter(LandingState::HiddenFinal), hide_donation_panel)
            .add_systems(
                Update,
                scroll_donation_panel
                    .in_set(LandingSet::Input)
                    .run_if(resource_equals(ScrollLock::Unlocked)),
            );
    }
}

/// Whether the mouse wheel moves the panel content
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScrollLock {
    #[default]
    Locked,
    Unlocked,
}

/// Root of the panel, full screen, centres the card
#[derive(Component, Debug)]
pub struct DonationPanel;

/// The scrollable card inside the panel
#[derive(Component, Debug)]
pub struct PanelCard;

/// Reveal slot: slot `k` starts `stagger_step_secs * k` after the first
#[derive(Component, Debug, Clone, Copy)]
pub struct StaggerReveal(pub usize);

#[derive(Component, Debug)]
pub struct PixKeyText;

#[derive(Component, Debug)]
pub struct CopyButton;

/// The text inside the copy button that the feedback rewrites
#[derive(Component, Debug)]
pub struct CopyLabel;

#[derive(Component, Debug)]
pub struct CloseButton;

fn panel_text(text: &str, font_size: f32, color: Color, slot: usize) -> impl Bundle + use<> {
    (
        StaggerReveal(slot),
        Tweens::default(),
        Tint::text(color, color, color),
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Node::default(),
    )
}

fn spawn_donation_panel(mut commands: Commands, donation: Res<DonationConfig>) {
    let button_tint = Tint::background(BUTTON_BACKGROUND, BUTTON_GLOW, ERROR_FLASH);

    commands.spawn((
        Name::new("DonationPanel"),
        DonationPanel,
        PanelVisibility::Hidden,
        Tweens::default(),
        Appearance::hidden(),
        Node {
            display: Display::None,
            position_type: PositionType::Absolute,
            top: Val::Px(0.0),
            left: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        },
        children![(
            Name::new("PanelCard"),
            PanelCard,
            Tint::background(PANEL_BACKGROUND, PANEL_BACKGROUND, PANEL_BACKGROUND),
            BackgroundColor(PANEL_BACKGROUND),
            ScrollPosition::default(),
            Node {
                width: Val::Px(PANEL_WIDTH_PX),
                max_width: Val::Percent(92.0),
                max_height: Val::Percent(90.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(18.0),
                padding: UiRect::all(Val::Px(32.0)),
                overflow: Overflow::scroll_y(),
                ..default()
            },
            children![
                panel_text(&donation.title, PANEL_TITLE_FONT_SIZE, PRIMARY, 0),
                panel_text(&donation.message, PANEL_BODY_FONT_SIZE, TEXT, 1),
                (
                    Name::new("PixKey"),
                    StaggerReveal(2),
                    Tweens::default(),
                    Tint::background(KEY_BACKGROUND, KEY_BACKGROUND, KEY_BACKGROUND),
                    BackgroundColor(KEY_BACKGROUND),
                    Node {
                        padding: UiRect::axes(Val::Px(16.0), Val::Px(10.0)),
                        ..default()
                    },
                    children![(
                        PixKeyText,
                        Tint::text(SECONDARY, SECONDARY, SECONDARY),
                        Text::new(donation.pix_key.clone()),
                        TextFont {
                            font_size: PIX_KEY_FONT_SIZE,
                            ..default()
                        },
                        TextColor(SECONDARY),
                    )],
                ),
                (
                    Name::new("CopyButton"),
                    CopyButton,
                    CommandButton(LandingCommand::Copy),
                    StaggerReveal(3),
                    Tweens::default(),
                    button_tint,
                    BackgroundColor(BUTTON_BACKGROUND),
                    UiTransform::default(),
                    Node {
                        padding: UiRect::axes(Val::Px(28.0), Val::Px(12.0)),
                        ..default()
                    },
                    children![(
                        CopyLabel,
                        Tint::text(TEXT, TEXT, TEXT),
                        Text::new(donation.copy_label.clone()),
                        TextFont {
                            font_size: BUTTON_FONT_SIZE,
                            ..default()
                        },
                        TextColor(TEXT),
                    )],
                ),
                panel_text(&donation.thank_you, PANEL_BODY_FONT_SIZE, MUTED_TEXT, 4),
                (
                    Name::new("CloseButton"),
                    CloseButton,
                    CommandButton(LandingCommand::Close),
                    Tint::background(KEY_BACKGROUND, KEY_BACKGROUND, KEY_BACKGROUND),
                    BackgroundColor(KEY_BACKGROUND),
                    Node {
                        padding: UiRect::axes(Val::Px(20.0), Val::Px(8.0)),
                        ..default()
                    },
                    children![(
                        Tint::text(MUTED_TEXT, MUTED_TEXT, MUTED_TEXT),
                        Text::new(donation.close_label.clone()),
                        TextFont {
                            font_size: BUTTON_FONT_SIZE,
                            ..default()
                        },
                        TextColor(MUTED_TEXT),
                    )],
                ),
            ],
        )],
    ));
}

/// Start offset of stagger slot `slot`
pub fn stagger_delay(slot: usize, config: &SequenceConfig) -> f32 {
    config
        .stagger_step_secs
        .mul_add(slot.to_f32(), config.stagger_delay_secs)
}

pub fn reveal_donation_panel(
    mut commands: Commands,
    config: Res<SequenceConfig>,
    mut scroll_lock: ResMut<ScrollLock>,
    mut panel: Query<(&mut PanelVisibility, &mut Tweens, &mut Appearance), With<DonationPanel>>,
    mut staggered: Query<
        (&StaggerReveal, Has<CopyButton>, &mut Tweens, &mut Appearance),
        Without<DonationPanel>,
    >,
) {
    *scroll_lock = ScrollLock::Unlocked;

    let Ok((mut visibility, mut tweens, mut appearance)) = panel.single_mut() else {
        warn!(
            "{}, moving on without it",
            LandingError::missing("donation panel")
        );
        commands.insert_resource(StageTimer::new(
            config.fallback_delay_secs,
            SequenceEvent::PanelRevealed,
        ));
        return;
    };

    *visibility = PanelVisibility::Revealing;
    appearance.opacity = 0.0;
    tweens.kill_all();
    tweens.push(
        Tween::new(TweenProperty::Opacity, 0.0, 1.0, config.panel_fade_in_secs)
            .with_ease(EaseFunction::CubicOut),
    );

    for (slot, is_copy_button, mut tweens, mut appearance) in &mut staggered {
        let delay_secs = stagger_delay(slot.0, &config);
        appearance.opacity = 0.0;
        appearance.rise = config.stagger_rise_px;
        tweens.kill(&[TweenProperty::Opacity, TweenProperty::Rise]);
        tweens.push(
            Tween::new(TweenProperty::Opacity, 0.0, 1.0, config.stagger_reveal_secs)
                .with_ease(EaseFunction::CubicOut)
                .with_delay(delay_secs),
        );
        tweens.push(
            Tween::new(
                TweenProperty::Rise,
                config.stagger_rise_px,
                0.0,
                config.stagger_reveal_secs,
            )
            .with_ease(EaseFunction::CubicOut)
            .with_delay(delay_secs),
        );

        if is_copy_button {
            start_pulse(&mut tweens, config.pulse_secs, config.pulse_scale);
        }
    }

    commands.insert_resource(StageTimer::new(
        config.panel_fade_in_secs,
        SequenceEvent::PanelRevealed,
    ));
}

fn settle_donation_panel(mut panel: Query<&mut PanelVisibility, With<DonationPanel>>) {
    for mut visibility in &mut panel {
        if *visibility == PanelVisibility::Revealing {
            *visibility = PanelVisibility::Visible;
        }
    }
}

pub fn hide_donation_panel(
    mut scroll_lock: ResMut<ScrollLock>,
    mut panel: Query<(&mut PanelVisibility, &mut Tweens, &mut Appearance), With<DonationPanel>>,
) {
    *scroll_lock = ScrollLock::Locked;

    for (mut visibility, mut tweens, mut appearance) in &mut panel {
        tweens.kill_all();
        appearance.opacity = 0.0;
        *visibility = PanelVisibility::Hidden;
    }
    debug!("donation panel hidden");
}

/// Wheel delta in logical pixels, positive scrolls the content up
pub fn wheel_pixels(wheel: &MouseWheel, line_px: f32) -> f32 {
    match wheel.unit {
        MouseScrollUnit::Line => wheel.y * line_px,
        MouseScrollUnit::Pixel => wheel.y,
    }
}

/// New scroll offset, kept within the overflow of the content
pub fn clamp_scroll(offset: f32, delta: f32, max_offset: f32) -> f32 {
    (offset - delta).clamp(0.0, max_offset.max(0.0))
}

fn scroll_donation_panel(
    mut wheel: MessageReader<MouseWheel>,
    config: Res<SequenceConfig>,
    mut cards: Query<(&mut ScrollPosition, &ComputedNode), With<PanelCard>>,
) {
    let delta: f32 = wheel
        .read()
        .map(|event| wheel_pixels(event, config.scroll_line_px))
        .sum();
    if delta == 0.0 {
        return;
    }

    for (mut scroll, computed) in &mut cards {
        let overflow = (computed.content_size() - computed.size()) * computed.inverse_scale_factor();
        scroll.0.y = clamp_scroll(scroll.0.y, delta, overflow.y);
    }
}
