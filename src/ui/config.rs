use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::input::Inspector;
use crate::input::inspector_active;

pub struct UiConfigPlugin;

impl Plugin for UiConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<SequenceConfig>::default()
                .run_if(inspector_active(Inspector::Sequence)),
        )
        .init_resource::<SequenceConfig>()
        .init_resource::<DonationConfig>();
    }
}

/// Timings of the intro, the panel reveal and the copy feedback, all in seconds
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct SequenceConfig {
    #[inspector(min = 0.1, max = 5.0, display = NumberDisplay::Slider)]
    pub logo_reveal_secs:     f32,
    pub logo_start_scale:     f32,
    #[inspector(min = 0.1, max = 5.0, display = NumberDisplay::Slider)]
    pub title_reveal_secs:    f32,
    /// Title starts this long after the logo mark starts
    pub title_reveal_offset:  f32,
    pub title_rise_px:        f32,
    pub glow_secs:            f32,
    /// Glow starts this long before the title reveal ends
    pub glow_overlap_secs:    f32,
    /// Pause between the glow and the logo fade-out
    pub logo_hold_secs:       f32,
    pub logo_fade_secs:       f32,
    /// How long a stage waits before moving on when its elements are missing
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub fallback_delay_secs:  f32,
    pub panel_fade_in_secs:   f32,
    pub panel_fade_out_secs:  f32,
    pub stagger_delay_secs:   f32,
    pub stagger_step_secs:    f32,
    pub stagger_reveal_secs:  f32,
    pub stagger_rise_px:      f32,
    #[inspector(min = 0.1, max = 5.0, display = NumberDisplay::Slider)]
    pub pulse_secs:           f32,
    pub pulse_scale:          f32,
    /// Glow the copy button is reset to while the click feedback plays
    pub pressed_glow:         f32,
    pub pop_scale:            f32,
    pub pop_secs:             f32,
    /// Label and colour revert this long after a copy, whatever the outcome
    #[inspector(min = 0.1, max = 10.0, display = NumberDisplay::Slider)]
    pub feedback_revert_secs: f32,
    /// Logical pixels per mouse-wheel line
    pub scroll_line_px:       f32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            logo_reveal_secs:     1.5,
            logo_start_scale:     0.8,
            title_reveal_secs:    1.0,
            title_reveal_offset:  0.5,
            title_rise_px:        10.0,
            glow_secs:            0.5,
            glow_overlap_secs:    0.5,
            logo_hold_secs:       0.5,
            logo_fade_secs:       1.0,
            fallback_delay_secs:  0.5,
            panel_fade_in_secs:   1.0,
            panel_fade_out_secs:  0.8,
            stagger_delay_secs:   0.6,
            stagger_step_secs:    0.15,
            stagger_reveal_secs:  0.8,
            stagger_rise_px:      20.0,
            pulse_secs:           1.5,
            pulse_scale:          1.02,
            pressed_glow:         0.5,
            pop_scale:            1.1,
            pop_secs:             0.2,
            feedback_revert_secs: 2.0,
            scroll_line_px:       24.0,
        }
    }
}

/// Text shown on the donation panel
#[derive(Resource, Reflect, Debug, PartialEq, Clone)]
#[reflect(Resource)]
pub struct DonationConfig {
    pub title:          String,
    pub message:        String,
    pub pix_key:        String,
    pub copy_label:     String,
    pub copied_label:   String,
    pub fallback_label: String,
    pub error_label:    String,
    pub thank_you:      String,
    pub close_label:    String,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            title:          "Apoie a Hail Games".to_string(),
            message:        "Gostou do nosso trabalho? Faça uma doação via Pix e ajude a manter \
                             os jogos no ar."
                .to_string(),
            pix_key:        "contato@hailgames.com.br".to_string(),
            copy_label:     "Copiar".to_string(),
            copied_label:   "Copiado!".to_string(),
            fallback_label: "Copiado (Fallback)!".to_string(),
            error_label:    "Erro!".to_string(),
            thank_you:      "Obrigado pelo apoio!".to_string(),
            close_label:    "Fechar".to_string(),
        }
    }
}
