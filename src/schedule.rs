use bevy::prelude::*;

/// Ordering inside `Update` for everything the landing sequence touches.
///
/// Input produces commands, sequencing turns them (and stage timers) into state changes and
/// tweens, tweening advances the property animations, and presentation writes the animated
/// values into Bevy UI components. The drift systems stay outside these sets - they only touch
/// scene transforms and last-write-wins is fine for them.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum LandingSet {
    Input,
    Sequencing,
    Tweening,
    Presentation,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                LandingSet::Input,
                LandingSet::Sequencing,
                LandingSet::Tweening,
                LandingSet::Presentation,
            )
                .chain(),
        );
    }
}
