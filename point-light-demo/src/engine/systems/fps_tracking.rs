use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::core::app_state::{FpsText, ModeText};
use crate::engine::core::frame::{FrameState, LightMode, SkyView};
use crate::engine::simulation::lights::LightTable;

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}

/// Status line for the current mode, light selection and sky view.
pub fn mode_text_update_system(
    frame: Res<FrameState>,
    lights: Res<LightTable>,
    mut query: Query<&mut Text, With<ModeText>>,
) {
    for mut text in &mut query {
        text.0 = mode_summary(&frame, &lights);
    }
}

fn mode_summary(frame: &FrameState, lights: &LightTable) -> String {
    let mode = match frame.mode {
        LightMode::Particles => "particles",
        LightMode::Gun => "gun",
    };
    let sky = match frame.sky_view {
        SkyView::Environment => "skybox",
        SkyView::DepthMap => "depth map",
    };
    format!(
        "Mode: {mode} | Lights: {} | Selected: {} | Sky: {sky} | Parallax: {}",
        lights.active_count(),
        frame.selected_light,
        if frame.parallax { "on" } else { "off" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reflects_frame_state() {
        let mut frame = FrameState::new();
        frame.mode = LightMode::Gun;
        frame.sky_view = SkyView::DepthMap;
        frame.selected_light = 2;
        frame.parallax = false;
        let mut lights = LightTable::default();
        lights.publish(&[Vec3::ZERO]);

        let summary = mode_summary(&frame, &lights);

        assert_eq!(
            summary,
            "Mode: gun | Lights: 1 | Selected: 2 | Sky: depth map | Parallax: off"
        );
    }
}
