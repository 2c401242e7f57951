use crate::engine::core::config::DemoConfig;
use crate::engine::loading::progress::LoadingProgress;
use bevy::asset::LoadState;
use bevy::prelude::*;

pub const CONFIG_PATH: &str = "config/demo.json";

/// Tracks the in-flight config load.
#[derive(Resource, Default)]
pub struct ConfigLoader {
    pub handle: Option<Handle<DemoConfig>>,
    pub resolved: bool,
}

pub fn start_config_load(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    println!("Loading demo config from: {}", CONFIG_PATH);
    loader.handle = Some(asset_server.load(CONFIG_PATH));
}

/// Installs the loaded config as a resource, or the defaults if loading failed.
pub fn resolve_config(
    mut commands: Commands,
    mut loader: ResMut<ConfigLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<DemoConfig>>,
) {
    if loader.resolved {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(config) = configs.get(&handle) {
        info!("Demo config loaded: {:?}", config);
        commands.insert_resource(config.clone());
        loader.resolved = true;
        loading_progress.config_loaded = true;
    } else if matches!(
        asset_server.get_load_state(&handle),
        Some(LoadState::Failed(_))
    ) {
        warn!("Could not load {}, using default settings", CONFIG_PATH);
        commands.insert_resource(DemoConfig::default());
        loader.resolved = true;
        loading_progress.config_loaded = true;
    }
}
