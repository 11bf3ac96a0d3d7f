use bevy::asset::LoadState;
// load the planet textures once, amigos - the intro waits until every one has either
// loaded or failed
use bevy::prelude::*;

use crate::scene::CelestialBody;
use crate::scene::PLANETS;
use crate::state::SequenceEvent;

pub struct AssetLoaderPlugin;

impl Plugin for AssetLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AssetsState>() // necessary to tell if they've finished loading
            .init_resource::<PlanetTextures>()
            // the bodies read these handles at Startup, so load them first
            .add_systems(PreStartup, load_planet_textures)
            .add_systems(
                Update,
                check_asset_loading.run_if(in_state(AssetsState::Loading)),
            )
            .add_systems(
                OnEnter(AssetsState::Loaded),
                (fall_back_to_flat_colors, announce_assets_settled),
            );
    }
}

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AssetsState {
    #[default]
    Loading,
    Loaded,
}

/// One optional texture per entry of `PLANETS`, same order
#[derive(Resource, Clone, Debug, Default)]
pub struct PlanetTextures(Vec<Option<Handle<Image>>>);

impl PlanetTextures {
    pub fn get(&self, index: usize) -> Option<Handle<Image>> {
        self.0.get(index).cloned().flatten()
    }

    fn handles(&self) -> impl Iterator<Item = &Handle<Image>> { self.0.iter().flatten() }
}

pub fn load_planet_textures(
    mut textures: ResMut<PlanetTextures>,
    asset_server: Res<AssetServer>,
) {
    *textures = PlanetTextures(
        PLANETS
            .iter()
            .map(|descriptor| descriptor.texture.map(|path| asset_server.load(path)))
            .collect(),
    );
    debug!("requested {} planet textures", textures.handles().count());
}

/// A load that failed counts as settled - that body just keeps its flat colour
pub fn is_settled(state: Option<&LoadState>) -> bool {
    matches!(state, Some(LoadState::Loaded | LoadState::Failed(_)))
}

pub fn check_asset_loading(
    mut next_state: ResMut<NextState<AssetsState>>,
    asset_server: Res<AssetServer>,
    textures: Res<PlanetTextures>,
) {
    let all_settled = textures
        .handles()
        .all(|handle| is_settled(asset_server.get_load_state(handle.id()).as_ref()));

    if all_settled {
        info!("All planet textures settled!");
        next_state.set(AssetsState::Loaded);
    }
}

/// Bodies whose texture failed would otherwise render with a missing texture
fn fall_back_to_flat_colors(
    asset_server: Res<AssetServer>,
    textures: Res<PlanetTextures>,
    bodies: Query<(&CelestialBody, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (body, material) in &bodies {
        let Some(texture) = textures.get(body.index) else {
            continue;
        };
        if !matches!(
            asset_server.get_load_state(texture.id()),
            Some(LoadState::Failed(_))
        ) {
            continue;
        }

        let Some(descriptor) = PLANETS.get(body.index) else {
            continue;
        };
        if let Some(material) = materials.get_mut(&material.0) {
            warn!("texture for {} failed to load, using its flat colour", descriptor.name);
            material.base_color_texture = None;
            material.base_color = descriptor.flat_color();
        }
    }
}

fn announce_assets_settled(mut events: MessageWriter<SequenceEvent>) {
    events.write(SequenceEvent::AssetsSettled);
}
