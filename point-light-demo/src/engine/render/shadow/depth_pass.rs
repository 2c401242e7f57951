//! Distance cubemap rendering for the point lights.
//!
//! Runs as a standalone render-graph node ahead of the camera driver, so every
//! cubemap is complete before any camera samples it. Each light gets six
//! passes, one per cube face, drawing every `ShadowCaster` mesh.

use bevy::{
    prelude::*,
    render::{
        Extract, ExtractSchedule, Render, RenderApp, RenderSet,
        extract_resource::ExtractResourcePlugin,
        mesh::{MeshVertexBufferLayoutRef, RenderMesh, RenderMeshBufferInfo, allocator::MeshAllocator},
        render_asset::RenderAssets,
        render_graph::{self, NodeRunError, RenderGraph, RenderGraphContext, RenderLabel},
        render_resource::{
            binding_types::uniform_buffer_sized,
            *,
        },
        renderer::{RenderContext, RenderDevice},
        texture::GpuImage,
    },
};
use bytemuck::{Pod, Zeroable};
use constants::render_settings::{POINT_LIGHT_COUNT, SHADOW_FAR, SHADOW_MAP_SIZE};

use crate::engine::core::frame::FramePhase;
use crate::engine::render::shadow::cube_faces::cube_face_view_projections;
use crate::engine::render::shadow::depth_cubemaps::{DEPTH_CUBEMAP_FORMAT, DepthCubemaps};
use crate::engine::simulation::lights::LightTable;

const SHADOW_DEPTH_SHADER_PATH: &str = "shaders/shadow_depth.wgsl";
const SHADOW_Z_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Dynamic uniform offsets must be multiples of this on every backend.
const DRAW_UNIFORM_STRIDE: u64 = 256;

/// Meshes tagged with this are drawn into every light's cubemap.
#[derive(Component, Default, Clone, Copy)]
pub struct ShadowCaster;

pub struct ShadowDepthPlugin;

impl Plugin for ShadowDepthPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DepthCubemaps>()
            .add_plugins(ExtractResourcePlugin::<DepthCubemaps>::default())
            .add_plugins(ExtractResourcePlugin::<LightTable>::default());

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app
            .init_resource::<ExtractedShadowCasters>()
            .init_resource::<SpecializedMeshPipelines<ShadowDepthPipeline>>()
            .init_resource::<PreparedShadowDraws>()
            .add_systems(ExtractSchedule, extract_shadow_casters)
            .add_systems(
                Render,
                prepare_shadow_draws.in_set(RenderSet::PrepareBindGroups),
            );

        let mut render_graph = render_app.world_mut().resource_mut::<RenderGraph>();
        render_graph.add_node(ShadowDepthLabel, ShadowDepthNode);
        render_graph.add_node_edge(ShadowDepthLabel, bevy::render::graph::CameraDriverLabel);
    }

    fn finish(&self, app: &mut App) {
        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };
        render_app
            .init_resource::<ShadowDepthPipeline>()
            .init_resource::<ShadowDepthTarget>();
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
pub struct ShadowDepthLabel;

/// Per-draw block: one caster, one face, one light. Padded to the dynamic
/// offset stride.
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct DepthDrawUniform {
    view_projection: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    light_index: u32,
    _padding: [u32; 31],
}

/// All light positions plus the far plane used to normalise distances.
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct DepthLightsUniform {
    positions: [[f32; 4]; POINT_LIGHT_COUNT],
    far_plane: f32,
    _padding: [f32; 3],
}

impl DepthLightsUniform {
    fn from_table(lights: &LightTable) -> Self {
        Self {
            positions: lights.positions().map(|p| p.extend(1.0).to_array()),
            far_plane: SHADOW_FAR,
            _padding: [0.0; 3],
        }
    }
}

#[derive(Clone, Copy)]
struct ShadowCasterInstance {
    mesh: AssetId<Mesh>,
    model: Mat4,
}

#[derive(Resource, Default)]
struct ExtractedShadowCasters(Vec<ShadowCasterInstance>);

fn extract_shadow_casters(
    mut extracted: ResMut<ExtractedShadowCasters>,
    casters: Extract<Query<(&Mesh3d, &GlobalTransform, &InheritedVisibility), With<ShadowCaster>>>,
) {
    extracted.0.clear();
    extracted.0.extend(
        casters
            .iter()
            .filter(|(_, _, visibility)| visibility.get())
            .map(|(mesh, transform, _)| ShadowCasterInstance {
                mesh: mesh.id(),
                model: transform.compute_matrix(),
            }),
    );
}

#[derive(Resource)]
struct ShadowDepthPipeline {
    shader: Handle<Shader>,
    layout: BindGroupLayout,
}

impl FromWorld for ShadowDepthPipeline {
    fn from_world(world: &mut World) -> Self {
        let render_device = world.resource::<RenderDevice>();

        let layout = render_device.create_bind_group_layout(
            "shadow_depth_bind_group_layout",
            &BindGroupLayoutEntries::sequential(
                ShaderStages::VERTEX_FRAGMENT,
                (
                    uniform_buffer_sized(true, BufferSize::new(DRAW_UNIFORM_STRIDE)),
                    uniform_buffer_sized(
                        false,
                        BufferSize::new(std::mem::size_of::<DepthLightsUniform>() as u64),
                    ),
                ),
            ),
        );

        Self {
            shader: world.load_asset(SHADOW_DEPTH_SHADER_PATH),
            layout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ShadowDepthPipelineKey {
    topology: PrimitiveTopology,
}

impl SpecializedMeshPipeline for ShadowDepthPipeline {
    type Key = ShadowDepthPipelineKey;

    fn specialize(
        &self,
        key: Self::Key,
        layout: &MeshVertexBufferLayoutRef,
    ) -> Result<RenderPipelineDescriptor, SpecializedMeshPipelineError> {
        let vertex_layout = layout
            .0
            .get_layout(&[Mesh::ATTRIBUTE_POSITION.at_shader_location(0)])?;

        Ok(RenderPipelineDescriptor {
            label: Some("shadow_depth_pipeline".into()),
            layout: vec![self.layout.clone()],
            push_constant_ranges: vec![],
            vertex: VertexState {
                shader: self.shader.clone(),
                shader_defs: vec![],
                entry_point: "vertex".into(),
                buffers: vec![vertex_layout],
            },
            fragment: Some(FragmentState {
                shader: self.shader.clone(),
                shader_defs: vec![],
                entry_point: "fragment".into(),
                targets: vec![Some(ColorTargetState {
                    format: DEPTH_CUBEMAP_FORMAT,
                    blend: None,
                    write_mask: ColorWrites::RED,
                })],
            }),
            // Face projections flip y, so winding is not reliable here.
            primitive: PrimitiveState {
                topology: key.topology,
                cull_mode: None,
                ..default()
            },
            depth_stencil: Some(DepthStencilState {
                format: SHADOW_Z_FORMAT,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: MultisampleState::default(),
            zero_initialize_workgroup_memory: false,
        })
    }
}

/// Depth attachment shared by every face pass; only used for z-testing.
#[derive(Resource)]
struct ShadowDepthTarget {
    view: TextureView,
}

impl FromWorld for ShadowDepthTarget {
    fn from_world(world: &mut World) -> Self {
        let render_device = world.resource::<RenderDevice>();
        let texture = render_device.create_texture(&TextureDescriptor {
            label: Some("shadow_depth_z_texture"),
            size: Extent3d {
                width: SHADOW_MAP_SIZE,
                height: SHADOW_MAP_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: SHADOW_Z_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        Self {
            view: texture.create_view(&TextureViewDescriptor::default()),
        }
    }
}

struct ShadowDraw {
    mesh: AssetId<Mesh>,
    pipeline: CachedRenderPipelineId,
    offset: u32,
}

/// Lights whose cubemaps are drawn this frame, in phase order. The walk
/// stops at `ColorPass`, which is the camera driver's turn.
pub(crate) fn depth_pass_lights(light_count: usize) -> Vec<usize> {
    FramePhase::sequence(light_count)
        .into_iter()
        .map_while(|phase| match phase {
            FramePhase::DepthPass { light } => Some(light),
            FramePhase::ColorPass => None,
        })
        .collect()
}

/// Face targets and draw list for one light's `DepthPass` phase.
struct LightCubeDraws {
    light: usize,
    faces: Vec<TextureView>,
    draws: Vec<Vec<ShadowDraw>>,
}

#[derive(Resource, Default)]
struct PreparedShadowDraws {
    bind_group: Option<BindGroup>,
    lights: Vec<LightCubeDraws>,
}

#[allow(clippy::too_many_arguments)]
fn prepare_shadow_draws(
    mut prepared: ResMut<PreparedShadowDraws>,
    render_device: Res<RenderDevice>,
    pipeline: Res<ShadowDepthPipeline>,
    mut pipelines: ResMut<SpecializedMeshPipelines<ShadowDepthPipeline>>,
    pipeline_cache: Res<PipelineCache>,
    meshes: Res<RenderAssets<RenderMesh>>,
    gpu_images: Res<RenderAssets<GpuImage>>,
    casters: Res<ExtractedShadowCasters>,
    cubemaps: Option<Res<DepthCubemaps>>,
    lights: Option<Res<LightTable>>,
) {
    prepared.bind_group = None;
    prepared.lights.clear();

    let (Some(cubemaps), Some(lights)) = (cubemaps, lights) else {
        return;
    };

    // Specialise once per caster; the same pipeline serves every face.
    let mut caster_pipelines = Vec::with_capacity(casters.0.len());
    for caster in &casters.0 {
        let Some(mesh) = meshes.get(caster.mesh) else {
            continue;
        };
        let key = ShadowDepthPipelineKey {
            topology: mesh.primitive_topology(),
        };
        match pipelines.specialize(&pipeline_cache, &pipeline, key, &mesh.layout) {
            Ok(id) => caster_pipelines.push((caster, id)),
            Err(err) => error!("Shadow depth pipeline specialisation failed: {err}"),
        }
    }

    let mut draw_uniforms = Vec::new();
    for light_index in depth_pass_lights(POINT_LIGHT_COUNT) {
        let Some(handle) = cubemaps.get(light_index) else {
            continue;
        };
        let Some(cubemap) = gpu_images.get(handle) else {
            continue;
        };
        let Some(light_position) = lights.get(light_index) else {
            continue;
        };

        let mut faces = Vec::with_capacity(6);
        let mut draws = Vec::with_capacity(6);
        for (face, view_projection) in cube_face_view_projections(light_position)
            .into_iter()
            .enumerate()
        {
            faces.push(cubemap.texture.create_view(&TextureViewDescriptor {
                label: Some("shadow_depth_face_view"),
                dimension: Some(TextureViewDimension::D2),
                base_array_layer: face as u32,
                array_layer_count: Some(1),
                ..default()
            }));

            let face_draws = caster_pipelines
                .iter()
                .map(|(caster, id)| {
                    let offset = (draw_uniforms.len() as u64 * DRAW_UNIFORM_STRIDE) as u32;
                    draw_uniforms.push(DepthDrawUniform {
                        view_projection: view_projection.to_cols_array_2d(),
                        model: caster.model.to_cols_array_2d(),
                        light_index: light_index as u32,
                        _padding: [0; 31],
                    });
                    ShadowDraw {
                        mesh: caster.mesh,
                        pipeline: *id,
                        offset,
                    }
                })
                .collect();
            draws.push(face_draws);
        }

        prepared.lights.push(LightCubeDraws {
            light: light_index,
            faces,
            draws,
        });
    }

    if draw_uniforms.is_empty() {
        // Faces still need clearing even with nothing to draw.
        return;
    }

    let draw_buffer = render_device.create_buffer_with_data(&BufferInitDescriptor {
        label: Some("shadow_depth_draw_uniforms"),
        contents: bytemuck::cast_slice(&draw_uniforms),
        usage: BufferUsages::UNIFORM,
    });
    let lights_buffer = render_device.create_buffer_with_data(&BufferInitDescriptor {
        label: Some("shadow_depth_lights_uniform"),
        contents: bytemuck::bytes_of(&DepthLightsUniform::from_table(&lights)),
        usage: BufferUsages::UNIFORM,
    });

    prepared.bind_group = Some(render_device.create_bind_group(
        "shadow_depth_bind_group",
        &pipeline.layout,
        &BindGroupEntries::sequential((
            BufferBinding {
                buffer: &draw_buffer,
                offset: 0,
                size: BufferSize::new(DRAW_UNIFORM_STRIDE),
            },
            lights_buffer.as_entire_binding(),
        )),
    ));
}

struct ShadowDepthNode;

impl render_graph::Node for ShadowDepthNode {
    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let prepared = world.resource::<PreparedShadowDraws>();
        let target = world.resource::<ShadowDepthTarget>();
        let pipeline_cache = world.resource::<PipelineCache>();
        let meshes = world.resource::<RenderAssets<RenderMesh>>();
        let mesh_allocator = world.resource::<MeshAllocator>();

        // Prepared in phase order; the edge to the camera driver is the colour pass.
        for light in &prepared.lights {
            trace!("Shadow depth pass for light {}", light.light);
            for (face_view, face_draws) in light.faces.iter().zip(&light.draws) {
                let mut pass = render_context.begin_tracked_render_pass(RenderPassDescriptor {
                    label: Some("shadow_depth_face_pass"),
                    // Cleared to 1.0, i.e. a full far-plane distance.
                    color_attachments: &[Some(RenderPassColorAttachment {
                        view: face_view,
                        resolve_target: None,
                        ops: Operations {
                            load: LoadOp::Clear(LinearRgba::WHITE.into()),
                            store: StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                        view: &target.view,
                        depth_ops: Some(Operations {
                            load: LoadOp::Clear(1.0),
                            store: StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    }),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

                let Some(bind_group) = &prepared.bind_group else {
                    continue;
                };

                for draw in face_draws {
                    let Some(render_pipeline) = pipeline_cache.get_render_pipeline(draw.pipeline)
                    else {
                        continue;
                    };
                    let Some(mesh) = meshes.get(draw.mesh) else {
                        continue;
                    };
                    let Some(vertex_slice) = mesh_allocator.mesh_vertex_slice(&draw.mesh) else {
                        continue;
                    };

                    pass.set_render_pipeline(render_pipeline);
                    pass.set_bind_group(0, bind_group, &[draw.offset]);
                    pass.set_vertex_buffer(0, vertex_slice.buffer.slice(..));

                    match &mesh.buffer_info {
                        RenderMeshBufferInfo::Indexed {
                            index_format,
                            count,
                        } => {
                            let Some(index_slice) = mesh_allocator.mesh_index_slice(&draw.mesh)
                            else {
                                continue;
                            };
                            pass.set_index_buffer(index_slice.buffer.slice(..), 0, *index_format);
                            pass.draw_indexed(
                                index_slice.range.start..(index_slice.range.start + count),
                                vertex_slice.range.start as i32,
                                0..1,
                            );
                        }
                        RenderMeshBufferInfo::NonIndexed => {
                            pass.draw(vertex_slice.range.clone(), 0..1);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::frame::{FrameState, advance_frame};
    use crate::engine::render::materials::lighting::LightingUniform;
    use crate::engine::simulation::particles::ParticleSystem;
    use crate::engine::simulation::projectiles::ProjectileMagazine;
    use constants::render_settings::INITIAL_LIGHT_POSITIONS;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn depth_passes_cover_every_light_in_order() {
        assert_eq!(depth_pass_lights(POINT_LIGHT_COUNT), vec![0, 1, 2, 3]);
        assert!(depth_pass_lights(0).is_empty());
    }

    #[test]
    fn depth_and_colour_passes_read_the_same_lights_after_a_zero_time_frame() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = FrameState::new();
        let mut particles = ParticleSystem::new(POINT_LIGHT_COUNT, &mut rng);
        let mut projectiles = ProjectileMagazine::new();
        let mut lights = LightTable::default();
        advance_frame(
            &mut state,
            &mut particles,
            &mut projectiles,
            &mut lights,
            0.4,
            &mut rng,
        );
        let published = lights.clone();

        advance_frame(
            &mut state,
            &mut particles,
            &mut projectiles,
            &mut lights,
            0.0,
            &mut rng,
        );

        assert_eq!(lights, published);
        let depth = DepthLightsUniform::from_table(&lights);
        let colour = LightingUniform::new(state.camera.eye, &lights);
        for (depth_slot, colour_slot) in depth.positions.iter().zip(colour.light_positions) {
            assert_eq!(&depth_slot[..3], &colour_slot.truncate().to_array()[..]);
        }
        assert_eq!(depth.far_plane, colour.far_plane);
    }

    #[test]
    fn draw_uniform_fills_exactly_one_dynamic_stride() {
        assert_eq!(
            std::mem::size_of::<DepthDrawUniform>() as u64,
            DRAW_UNIFORM_STRIDE
        );
    }

    #[test]
    fn light_uniform_carries_every_light_and_the_far_plane() {
        let uniform = DepthLightsUniform::from_table(&LightTable::default());

        assert_eq!(uniform.far_plane, SHADOW_FAR);
        for (slot, expected) in uniform.positions.iter().zip(INITIAL_LIGHT_POSITIONS) {
            assert_eq!(&slot[..3], &expected.to_array());
        }
        assert_eq!(std::mem::size_of::<DepthLightsUniform>() % 16, 0);
    }
}
