use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct ModeText;

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_complete() {
        println!("→ All assets ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app_with_progress(progress: LoadingProgress) -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .insert_resource(progress)
            .add_systems(Update, transition_to_running);
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn stays_loading_until_everything_is_ready() {
        let mut app = app_with_progress(LoadingProgress {
            config_loaded: true,
            textures_loaded: true,
            environment_ready: false,
        });

        app.update();
        app.update();

        assert_eq!(state(&app), AppState::Loading);
    }

    #[test]
    fn moves_to_running_once_complete() {
        let mut app = app_with_progress(LoadingProgress {
            config_loaded: true,
            textures_loaded: true,
            environment_ready: true,
        });

        app.update();
        app.update();

        assert_eq!(state(&app), AppState::Running);
    }
}
