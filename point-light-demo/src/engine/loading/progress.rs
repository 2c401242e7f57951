use bevy::prelude::*;

/// Gates the move from `AppState::Loading` to `AppState::Running`.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub config_loaded: bool,
    pub textures_loaded: bool,
    pub environment_ready: bool,
}

impl LoadingProgress {
    pub fn is_complete(&self) -> bool {
        self.config_loaded && self.textures_loaded && self.environment_ready
    }
}
