use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::POINT_LIGHT_COUNT;
// Crate engine modules
use crate::engine::camera::fps_camera::sync_camera_transform;
use crate::engine::core::app_state::{AppState, FpsText, ModeText, transition_to_running};
use crate::engine::core::config::DemoConfig;
use crate::engine::core::frame::FrameState;
use crate::engine::core::window_config::{apply_window_title, create_window_config};
use crate::engine::loading::config_loader::{ConfigLoader, resolve_config, start_config_load};
use crate::engine::loading::environment_cubemap::build_environment_cubemap;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_loader::{check_texture_loading, start_texture_loading};
use crate::engine::render::materials::material_plugin::LitMaterialsPlugin;
use crate::engine::render::shadow::depth_pass::ShadowDepthPlugin;
use crate::engine::scene::animate::{
    animate_keyframe_meshes, animate_scene_objects, face_billboards_to_camera,
    follow_camera_with_skybox, update_light_markers, update_particle_billboards,
    update_projectile_billboards,
};
use crate::engine::scene::setup::{spawn_camera, spawn_scene};
use crate::engine::simulation::lights::LightTable;
use crate::engine::simulation::particles::ParticleSystem;
use crate::engine::simulation::projectiles::ProjectileMagazine;
use crate::engine::systems::fps_tracking::{fps_text_update_system, mode_text_update_system};
use crate::engine::systems::frame_update::{FrameUpdateSet, handle_controls, run_frame};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers DemoConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<DemoConfig>::new(&["json"]))
        .add_plugins(ShadowDepthPlugin)
        .add_plugins(LitMaterialsPlugin)
        .add_plugins(WireframePlugin::default())
        .insert_resource(WireframeConfig {
            global: false,
            default_color: Color::WHITE,
        });

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<DemoConfig>()
        .init_resource::<ProjectileMagazine>()
        .init_resource::<LightTable>()
        .insert_resource(FrameState::new())
        .insert_resource(ParticleSystem::new(POINT_LIGHT_COUNT, &mut rand::rng()));

    // State-based system scheduling
    app.add_systems(
        Startup,
        (start_config_load, start_texture_loading, spawn_camera, setup),
    )
    .add_systems(
        Update,
        (
            // Loading phase systems
            resolve_config,
            check_texture_loading,
            build_environment_cubemap,
            transition_to_running,
        )
            .chain()
            .run_if(in_state(AppState::Loading)),
    )
    .add_systems(OnEnter(AppState::Running), (spawn_scene, apply_window_title));

    app.add_systems(
        Update,
        (handle_controls, run_frame, sync_camera_transform)
            .chain()
            .in_set(FrameUpdateSet)
            .run_if(in_state(AppState::Running)),
    );

    // Scene systems read the state the frame update just produced.
    app.add_systems(
        Update,
        (
            animate_scene_objects,
            follow_camera_with_skybox,
            update_particle_billboards,
            update_projectile_billboards,
            face_billboards_to_camera,
            update_light_markers,
            animate_keyframe_meshes,
            mode_text_update_system,
        )
            .after(FrameUpdateSet)
            .run_if(in_state(AppState::Running)),
    );

    app.add_systems(Update, fps_text_update_system);

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    create_native_overlays(&mut commands);
}

fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
            parent.spawn((
                Text::new("Loading..."),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                ModeText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config(&DemoConfig::default().window_title)),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
