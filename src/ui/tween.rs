//! Time-interpolated property animations for UI nodes.
//!
//! A `Tween` only produces numbers; it writes them into the entity's `Appearance`, and the
//! presentation pass turns `Appearance` into Bevy UI colours, transforms and offsets. Tweens on
//! the same entity run independently - two tweens driving the same property are
//! last-write-wins, which is why restarting an animation kills the old tweens first.

use bevy::math::curve::Curve;
use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;

use crate::schedule::LandingSet;

pub struct TweenPlugin;

impl Plugin for TweenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_tweens.in_set(LandingSet::Tweening));
    }
}

/// The animatable values of a UI node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum TweenProperty {
    Opacity,
    Scale,
    /// Vertical offset in logical pixels, positive is down
    Rise,
    /// Blend toward the node's glow colour
    Glow,
    /// Blend toward the node's flash colour
    Flash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum Repeat {
    /// Extra cycles after the first one
    Times(u16),
    Forever,
}

#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct Tween {
    pub property:      TweenProperty,
    pub from:          f32,
    pub to:            f32,
    pub duration_secs: f32,
    pub delay_secs:    f32,
    pub ease:          EaseFunction,
    pub repeat:        Repeat,
    /// Odd cycles play backwards
    pub yoyo:          bool,
    elapsed_secs:      f32,
}

impl Tween {
    pub const fn new(property: TweenProperty, from: f32, to: f32, duration_secs: f32) -> Self {
        Self {
            property,
            from,
            to,
            duration_secs,
            delay_secs: 0.0,
            ease: EaseFunction::QuadraticOut,
            repeat: Repeat::Times(0),
            yoyo: false,
            elapsed_secs: 0.0,
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay_secs: f32) -> Self {
        self.delay_secs = delay_secs;
        self
    }

    #[must_use]
    pub const fn with_ease(mut self, ease: EaseFunction) -> Self {
        self.ease = ease;
        self
    }

    #[cfg(test)]
    #[must_use]
    pub const fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub const fn yoyo(mut self, repeat: Repeat) -> Self {
        self.yoyo = true;
        self.repeat = repeat;
        self
    }

    /// Delay plus every cycle. `None` for tweens that never end.
    pub fn span_secs(&self) -> Option<f32> {
        match self.repeat {
            Repeat::Times(extra) => {
                Some(self.duration_secs.mul_add(f32::from(extra) + 1.0, self.delay_secs))
            },
            Repeat::Forever => None,
        }
    }

    pub fn advance(&mut self, delta_secs: f32) { self.elapsed_secs += delta_secs; }

    pub fn is_finished(&self) -> bool {
        self.span_secs()
            .is_some_and(|span| self.elapsed_secs >= span)
    }

    /// Current value, or `None` while still waiting out the delay
    pub fn value(&self) -> Option<f32> { self.value_at(self.elapsed_secs) }

    pub fn value_at(&self, elapsed_secs: f32) -> Option<f32> {
        let local = elapsed_secs - self.delay_secs;
        if local < 0.0 {
            return None;
        }
        Some(self.lerp(self.progress(local)))
    }

    fn lerp(&self, progress: f32) -> f32 {
        (self.to - self.from).mul_add(self.ease.sample_clamped(progress), self.from)
    }

    /// Linear progress through the current cycle, already reversed on yoyo back-swings
    fn progress(&self, local: f32) -> f32 {
        if self.duration_secs <= 0.0 {
            return self.final_progress();
        }

        if let Repeat::Times(extra) = self.repeat
            && local >= self.duration_secs * (f32::from(extra) + 1.0)
        {
            return self.final_progress();
        }

        let cycles = (local / self.duration_secs).floor();
        let fraction = (local - cycles * self.duration_secs) / self.duration_secs;
        let backwards = self.yoyo && cycles.rem_euclid(2.0) >= 1.0;

        if backwards { 1.0 - fraction } else { fraction }
    }

    /// An even number of yoyo cycles lands back on `from`
    fn final_progress(&self) -> f32 {
        match self.repeat {
            Repeat::Times(extra) if self.yoyo && extra % 2 == 1 => 0.0,
            _ => 1.0,
        }
    }
}

/// Values the tweens write and the presentation pass reads
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq)]
#[reflect(Component)]
pub struct Appearance {
    pub opacity: f32,
    pub scale:   f32,
    pub rise:    f32,
    pub glow:    f32,
    pub flash:   f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale:   1.0,
            rise:    0.0,
            glow:    0.0,
            flash:   0.0,
        }
    }
}

impl Appearance {
    pub const fn hidden() -> Self {
        Self {
            opacity: 0.0,
            scale:   1.0,
            rise:    0.0,
            glow:    0.0,
            flash:   0.0,
        }
    }

    pub const fn set(&mut self, property: TweenProperty, value: f32) {
        match property {
            TweenProperty::Opacity => self.opacity = value,
            TweenProperty::Scale => self.scale = value,
            TweenProperty::Rise => self.rise = value,
            TweenProperty::Glow => self.glow = value,
            TweenProperty::Flash => self.flash = value,
        }
    }
}

/// All running tweens of one entity
#[derive(Component, Clone, Debug, Default)]
#[require(Appearance)]
pub struct Tweens(Vec<Tween>);

impl Tweens {
    pub fn push(&mut self, tween: Tween) { self.0.push(tween); }

    pub fn kill_all(&mut self) { self.0.clear(); }

    /// Stops every tween driving one of `properties`, leaving the values where they are
    pub fn kill(&mut self, properties: &[TweenProperty]) {
        self.0.retain(|tween| !properties.contains(&tween.property));
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Tween> { self.0.iter() }

    #[cfg(test)]
    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn is_animating(&self, property: TweenProperty) -> bool {
        self.0.iter().any(|tween| tween.property == property)
    }

    /// Steps every tween, writes started ones into `appearance` and drops finished ones
    pub fn advance(&mut self, delta_secs: f32, appearance: &mut Appearance) {
        for tween in &mut self.0 {
            tween.advance(delta_secs);
            if let Some(value) = tween.value() {
                appearance.set(tween.property, value);
            }
        }
        self.0.retain(|tween| !tween.is_finished());
    }
}

/// The idle "press me" pulse on the copy button. Kills any running pulse first so calling this
/// twice never layers two pulses.
pub fn start_pulse(tweens: &mut Tweens, duration_secs: f32, peak_scale: f32) {
    tweens.kill(&[TweenProperty::Scale, TweenProperty::Glow]);
    tweens.push(
        Tween::new(TweenProperty::Scale, 1.0, peak_scale, duration_secs)
            .with_ease(EaseFunction::QuadraticInOut)
            .yoyo(Repeat::Forever),
    );
    tweens.push(
        Tween::new(TweenProperty::Glow, 0.0, 1.0, duration_secs)
            .with_ease(EaseFunction::QuadraticInOut)
            .yoyo(Repeat::Forever),
    );
}

fn advance_tweens(time: Res<Time>, mut animated: Query<(&mut Tweens, &mut Appearance)>) {
    let delta_secs = time.delta_secs();
    for (mut tweens, mut appearance) in &mut animated {
        if tweens.is_empty() {
            continue;
        }
        tweens.advance(delta_secs, &mut appearance);
    }
}
