use bevy::prelude::*;

use crate::state::LandingState;
use crate::ui::IntroLogo;

pub struct DespawnPlugin;

impl Plugin for DespawnPlugin {
    fn build(&self, app: &mut App) { app.add_systems(OnExit(LandingState::Intro), despawn_intro_logo); }
}

/// Uses `try_despawn` because the logo may already be gone if it was never spawned or a
/// fallback path removed it
pub fn despawn(commands: &mut Commands, entity: Entity) { commands.entity(entity).try_despawn(); }

fn despawn_intro_logo(mut commands: Commands, query: Query<Entity, With<IntroLogo>>) {
    for entity in query.iter() {
        debug!("despawning intro logo");
        despawn(&mut commands, entity);
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    #[test]
    fn intro_logo_and_children_are_removed() {
        let mut world = World::new();
        let logo = world.spawn(IntroLogo).id();
        let child = world.spawn(ChildOf(logo)).id();
        let bystander = world.spawn_empty().id();

        world.run_system_once(despawn_intro_logo).unwrap();

        assert!(world.get_entity(logo).is_err());
        assert!(world.get_entity(child).is_err());
        assert!(world.get_entity(bystander).is_ok());
    }
}
