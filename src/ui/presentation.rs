//! Writes `Appearance` and `PanelVisibility` into the Bevy UI components that actually draw.

use bevy::prelude::*;

use super::tween::Appearance;
use crate::schedule::LandingSet;
use crate::traits::ColorExt;

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (present_visibility, present_appearance).in_set(LandingSet::Presentation),
        );
    }
}

/// Colours a node is drawn with before opacity, glow and flash are applied
#[derive(Component, Clone, Copy, Debug)]
#[require(Appearance)]
pub struct Tint {
    pub background: Option<Color>,
    pub text:       Option<Color>,
    pub glow:       Color,
    pub flash:      Color,
}

impl Tint {
    pub const fn text(color: Color, glow: Color, flash: Color) -> Self {
        Self {
            background: None,
            text: Some(color),
            glow,
            flash,
        }
    }

    pub const fn background(color: Color, glow: Color, flash: Color) -> Self {
        Self {
            background: Some(color),
            text: None,
            glow,
            flash,
        }
    }

    /// Glow and flash blend alpha too, so a transparent halo can glow into view
    fn resolve(&self, base: Color, appearance: &Appearance, opacity: f32) -> Color {
        base.mix(&self.glow, appearance.glow.clamp(0.0, 1.0))
            .mix(&self.flash, appearance.flash.clamp(0.0, 1.0))
            .faded(opacity)
    }

    pub fn resolve_background(&self, appearance: &Appearance, opacity: f32) -> Option<Color> {
        self.background
            .map(|base| self.resolve(base, appearance, opacity))
    }

    pub fn resolve_text(&self, appearance: &Appearance, opacity: f32) -> Option<Color> {
        self.text.map(|base| self.resolve(base, appearance, opacity))
    }
}

/// Layout state of a top-level panel. `Hidden` takes the panel out of layout entirely.
#[derive(Component, Reflect, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[reflect(Component)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Revealing,
    Visible,
    Hiding,
}

impl PanelVisibility {
    pub const fn display(self) -> Display {
        match self {
            Self::Hidden => Display::None,
            Self::Revealing | Self::Visible | Self::Hiding => Display::Flex,
        }
    }
}

/// Own opacity times every ancestor's opacity
pub fn effective_opacity(
    entity: Entity,
    parents: &Query<&ChildOf>,
    appearances: &Query<&Appearance>,
) -> f32 {
    let mut opacity = appearances.get(entity).map_or(1.0, |a| a.opacity);
    let mut current = entity;
    while let Ok(child_of) = parents.get(current) {
        current = child_of.parent();
        if let Ok(appearance) = appearances.get(current) {
            opacity *= appearance.opacity;
        }
    }
    opacity
}

fn present_visibility(mut panels: Query<(&PanelVisibility, &mut Node), Changed<PanelVisibility>>) {
    for (visibility, mut node) in &mut panels {
        node.display = visibility.display();
    }
}

fn present_appearance(
    mut nodes: Query<(
        Entity,
        Ref<Appearance>,
        Option<&Tint>,
        Option<&mut BackgroundColor>,
        Option<&mut TextColor>,
        Option<&mut UiTransform>,
        Option<&mut Node>,
    )>,
    parents: Query<&ChildOf>,
    appearances: Query<&Appearance>,
) {
    for (entity, appearance, tint, background, text, transform, node) in &mut nodes {
        let opacity = effective_opacity(entity, &parents, &appearances);

        if let Some(tint) = tint {
            if let (Some(mut background), Some(color)) =
                (background, tint.resolve_background(&appearance, opacity))
            {
                background.0 = color;
            }
            if let (Some(mut text), Some(color)) = (text, tint.resolve_text(&appearance, opacity))
            {
                text.0 = color;
            }
        }

        if !appearance.is_changed() {
            continue;
        }

        if let Some(mut transform) = transform {
            transform.scale = Vec2::splat(appearance.scale);
        }
        if let Some(mut node) = node {
            let top = Val::Px(appearance.rise);
            if node.top != top {
                node.top = top;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    #[test]
    fn hidden_panels_leave_layout() {
        assert_eq!(PanelVisibility::Hidden.display(), Display::None);
        assert_eq!(PanelVisibility::Hiding.display(), Display::Flex);
        assert_eq!(PanelVisibility::Revealing.display(), Display::Flex);
    }

    #[test]
    fn resting_tint_is_the_base_colour() {
        let tint = Tint::background(Color::srgb(0.2, 0.4, 0.6), Color::WHITE, Color::BLACK);
        let color = tint
            .resolve_background(&Appearance::default(), 1.0)
            .unwrap()
            .to_srgba();
        assert!((color.red - 0.2).abs() < 1e-5);
        assert!((color.green - 0.4).abs() < 1e-5);
        assert!((color.blue - 0.6).abs() < 1e-5);
        assert!((color.alpha - 1.0).abs() < 1e-5);
    }

    #[test]
    fn full_flash_is_the_flash_colour() {
        let tint = Tint::background(
            Color::srgb(0.2, 0.4, 0.6),
            Color::WHITE,
            Color::srgb(1.0, 0.0, 0.0),
        );
        let appearance = Appearance {
            flash: 1.0,
            ..default()
        };
        let color = tint.resolve_background(&appearance, 1.0).unwrap().to_srgba();
        assert!((color.red - 1.0).abs() < 1e-5);
        assert!(color.green.abs() < 1e-5);
    }

    #[test]
    fn opacity_scales_alpha() {
        let tint = Tint::text(Color::WHITE, Color::WHITE, Color::WHITE);
        let color = tint.resolve_text(&Appearance::default(), 0.25).unwrap();
        assert!((color.alpha() - 0.25).abs() < 1e-5);
        assert!(tint.resolve_background(&Appearance::default(), 1.0).is_none());
    }

    #[test]
    fn opacity_multiplies_down_the_hierarchy() {
        let mut world = World::new();
        let root = world
            .spawn(Appearance {
                opacity: 0.5,
                ..default()
            })
            .id();
        let middle = world.spawn(ChildOf(root)).id();
        let leaf = world
            .spawn((
                Appearance {
                    opacity: 0.5,
                    ..default()
                },
                ChildOf(middle),
            ))
            .id();

        let opacity = world
            .run_system_once(
                move |parents: Query<&ChildOf>, appearances: Query<&Appearance>| {
                    effective_opacity(leaf, &parents, &appearances)
                },
            )
            .unwrap();
        assert!((opacity - 0.25).abs() < 1e-6);
    }
}
