use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use crate::schedule::LandingSet;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin)
            .add_input_context::<LandingInput>()
            .add_message::<LandingCommand>()
            .init_resource::<InspectorToggles>()
            .add_systems(Startup, spawn_landing_input)
            .add_systems(Update, button_commands.in_set(LandingSet::Input))
            .add_observer(copy_pix_key)
            .add_observer(close_donation)
            .add_observer(toggle_inspector::<ToggleSceneInspector>)
            .add_observer(toggle_inspector::<ToggleDriftInspector>)
            .add_observer(toggle_inspector::<ToggleCameraInspector>)
            .add_observer(toggle_inspector::<ToggleFlightInspector>)
            .add_observer(toggle_inspector::<ToggleSequenceInspector>);
    }
}

/// What the visitor asked for, by button or by key. Handlers decide whether it applies in the
/// current state.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingCommand {
    Copy,
    Close,
}

/// Put on a `Button` to have a press send its command
#[derive(Component, Debug, Clone, Copy)]
#[require(Button)]
pub struct CommandButton(pub LandingCommand);

/// Input context for the whole page - there is only ever one
#[derive(Component)]
pub struct LandingInput;

#[derive(InputAction)]
#[action_output(bool)]
struct CopyPixKey;

#[derive(InputAction)]
#[action_output(bool)]
struct CloseDonation;

#[derive(InputAction)]
#[action_output(bool)]
struct ToggleSceneInspector;

#[derive(InputAction)]
#[action_output(bool)]
struct ToggleDriftInspector;

#[derive(InputAction)]
#[action_output(bool)]
struct ToggleCameraInspector;

#[derive(InputAction)]
#[action_output(bool)]
struct ToggleFlightInspector;

#[derive(InputAction)]
#[action_output(bool)]
struct ToggleSequenceInspector;

fn spawn_landing_input(mut commands: Commands) {
    commands.spawn((
        Name::new("LandingInput"),
        LandingInput,
        actions!(LandingInput[
            (Action::<CopyPixKey>::new(), bindings![KeyCode::KeyC]),
            (Action::<CloseDonation>::new(), bindings![KeyCode::Escape]),
            (Action::<ToggleSceneInspector>::new(), bindings![KeyCode::F1]),
            (Action::<ToggleDriftInspector>::new(), bindings![KeyCode::F2]),
            (Action::<ToggleCameraInspector>::new(), bindings![KeyCode::F3]),
            (Action::<ToggleFlightInspector>::new(), bindings![KeyCode::F4]),
            (Action::<ToggleSequenceInspector>::new(), bindings![KeyCode::F5]),
        ]),
    ));
}

fn copy_pix_key(_: On<Start<CopyPixKey>>, mut commands: MessageWriter<LandingCommand>) {
    commands.write(LandingCommand::Copy);
}

fn close_donation(_: On<Start<CloseDonation>>, mut commands: MessageWriter<LandingCommand>) {
    commands.write(LandingCommand::Close);
}

fn button_commands(
    buttons: Query<(&Interaction, &CommandButton), Changed<Interaction>>,
    mut commands: MessageWriter<LandingCommand>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            debug!("button pressed: {:?}", button.0);
            commands.write(button.0);
        }
    }
}

/// Live config inspectors, one per config resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Inspector {
    Scene,
    Drift,
    Camera,
    Flight,
    Sequence,
}

#[derive(Resource, Debug, Default)]
pub struct InspectorToggles {
    open: HashSet<Inspector>,
}

impl InspectorToggles {
    /// Returns whether the inspector is open afterwards
    pub fn toggle(&mut self, inspector: Inspector) -> bool {
        if self.open.remove(&inspector) {
            false
        } else {
            self.open.insert(inspector);
            true
        }
    }

    pub fn is_open(&self, inspector: Inspector) -> bool { self.open.contains(&inspector) }
}

/// Run condition for a `ResourceInspectorPlugin`
pub fn inspector_active(inspector: Inspector) -> impl Fn(Res<InspectorToggles>) -> bool + Clone {
    move |toggles: Res<InspectorToggles>| toggles.is_open(inspector)
}

trait InspectorToggle: InputAction {
    const INSPECTOR: Inspector;
}

impl InspectorToggle for ToggleSceneInspector {
    const INSPECTOR: Inspector = Inspector::Scene;
}

impl InspectorToggle for ToggleDriftInspector {
    const INSPECTOR: Inspector = Inspector::Drift;
}

impl InspectorToggle for ToggleCameraInspector {
    const INSPECTOR: Inspector = Inspector::Camera;
}

impl InspectorToggle for ToggleFlightInspector {
    const INSPECTOR: Inspector = Inspector::Flight;
}

impl InspectorToggle for ToggleSequenceInspector {
    const INSPECTOR: Inspector = Inspector::Sequence;
}

fn toggle_inspector<A: InspectorToggle>(_: On<Start<A>>, mut toggles: ResMut<InspectorToggles>) {
    let open = toggles.toggle(A::INSPECTOR);
    info!("{:?} inspector {}", A::INSPECTOR, if open { "opened" } else { "closed" });
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    #[test]
    fn toggling_twice_closes() {
        let mut toggles = InspectorToggles::default();
        assert!(toggles.toggle(Inspector::Flight));
        assert!(toggles.is_open(Inspector::Flight));
        assert!(!toggles.is_open(Inspector::Scene));
        assert!(!toggles.toggle(Inspector::Flight));
        assert!(!toggles.is_open(Inspector::Flight));
    }

    #[test]
    fn run_condition_follows_the_toggle() {
        let mut world = World::new();
        world.init_resource::<InspectorToggles>();

        assert!(!world.run_system_once(inspector_active(Inspector::Drift)).unwrap());
        world
            .resource_mut::<InspectorToggles>()
            .toggle(Inspector::Drift);
        assert!(world.run_system_once(inspector_active(Inspector::Drift)).unwrap());
        assert!(!world.run_system_once(inspector_active(Inspector::Camera)).unwrap());
    }

    #[test]
    fn pressed_buttons_send_their_command() {
        let mut app = App::new();
        app.add_message::<LandingCommand>()
            .add_systems(Update, button_commands);

        app.world_mut()
            .spawn((CommandButton(LandingCommand::Close), Interaction::Pressed));
        app.world_mut()
            .spawn((CommandButton(LandingCommand::Copy), Interaction::Hovered));
        app.update();

        let messages = app.world().resource::<Messages<LandingCommand>>();
        let sent: Vec<_> = messages.iter_current_update_messages().copied().collect();
        assert_eq!(sent, vec![LandingCommand::Close]);
    }
}
