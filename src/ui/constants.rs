use bevy::prelude::*;

pub const PRIMARY: Color = Color::srgb(1.0, 0.0, 0.4);
pub const SECONDARY: Color = Color::srgb(0.0, 1.0, 0.8);
pub const ERROR_FLASH: Color = Color::srgb(1.0, 0.0, 0.0);
pub const TEXT: Color = Color::srgb(0.93, 0.93, 0.96);
pub const MUTED_TEXT: Color = Color::srgb(0.7, 0.7, 0.78);
pub const PANEL_BACKGROUND: Color = Color::srgba(0.05, 0.05, 0.1, 0.85);
pub const KEY_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.06);
pub const BUTTON_BACKGROUND: Color = Color::srgb(0.55, 0.0, 0.22);
pub const LOGO_HALO: Color = Color::srgba(1.0, 0.0, 0.4, 0.0);
pub const LOGO_GLOW: Color = Color::srgba(1.0, 0.0, 0.4, 0.7);
pub const BUTTON_GLOW: Color = Color::srgb(1.0, 0.2, 0.55);

pub const LOGO_TITLE_FONT_SIZE: f32 = 96.0;
pub const LOGO_TAGLINE_FONT_SIZE: f32 = 40.0;
pub const PANEL_TITLE_FONT_SIZE: f32 = 32.0;
pub const PANEL_BODY_FONT_SIZE: f32 = 18.0;
pub const PIX_KEY_FONT_SIZE: f32 = 20.0;
pub const BUTTON_FONT_SIZE: f32 = 18.0;

pub const PANEL_WIDTH_PX: f32 = 480.0;
