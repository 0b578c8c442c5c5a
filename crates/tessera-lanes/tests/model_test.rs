// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;
use std::path::Path;
use tessera_core::math::{Vec2, Vec3};
use tessera_core::mesh::{MaterialDescriptor, MeshFragment, PhongMaterial};
use tessera_core::renderer::{
    GraphicsDevice, PrimitiveStateDescriptor, RenderPipelineDescriptor, RenderPipelineId,
    ShaderModuleDescriptor, ShaderSourceData,
};
use tessera_infra::HeadlessDevice;
use tessera_io::{LoadError, MemoryMeshSource};
use tessera_lanes::render_lane::shaders::{MODEL_DEFAULT_WGSL, MODEL_FS_ENTRY, MODEL_VS_ENTRY};
use tessera_lanes::{
    BufferAssembler, DrawRange, MaterialTable, MergedGeometry, Model, ModelError, ModelSettings,
};

fn fragment(name: &str, vertex_count: usize, indices: &[u32], diffuse: Vec3) -> MeshFragment {
    MeshFragment {
        name: name.to_string(),
        positions: (0..vertex_count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect(),
        tex_coords: vec![Vec2::ZERO; vertex_count],
        normals: vec![Vec3::Z; vertex_count],
        indices: indices.to_vec(),
        material: MaterialDescriptor {
            name: format!("{name}_material"),
            diffuse,
            ..Default::default()
        },
    }
}

/// A four-vertex fragment drawing one triangle, then a three-vertex one.
fn two_fragments() -> Vec<MeshFragment> {
    vec![
        fragment("hull", 4, &[0, 1, 2], Vec3::X),
        fragment("mast", 3, &[0, 1, 2], Vec3::Y),
    ]
}

fn external_pipeline(device: &HeadlessDevice) -> RenderPipelineId {
    let module = device
        .create_shader_module(&ShaderModuleDescriptor {
            label: Some("external"),
            source: ShaderSourceData::Wgsl(Cow::Borrowed(MODEL_DEFAULT_WGSL)),
        })
        .unwrap();
    let layout = tessera_core::mesh::Vertex::layout();
    device
        .create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("External Pipeline".into()),
            vertex_shader_module: module,
            vertex_entry_point: MODEL_VS_ENTRY.into(),
            fragment_shader_module: Some(module),
            fragment_entry_point: Some(MODEL_FS_ENTRY.into()),
            vertex_buffers_layout: Cow::Owned(vec![layout]),
            primitive_state: PrimitiveStateDescriptor::default(),
        })
        .unwrap()
}

#[test]
fn model_reports_merged_statistics() {
    let device = HeadlessDevice::new();
    let model =
        Model::from_fragments(&device, &two_fragments(), None, &ModelSettings::default()).unwrap();

    assert_eq!(model.vertex_count(), 7);
    assert_eq!(model.index_count(), 6);
    assert_eq!(model.triangle_count(), 2);
    assert_eq!(model.fragment_count(), 2);
    assert_eq!(model.fragment_names(), ["hull", "mast"]);

    let ranges: Vec<DrawRange> = model.draws().iter().map(|d| d.range).collect();
    assert_eq!(
        ranges,
        vec![
            DrawRange {
                start_index: 0,
                length: 3
            },
            DrawRange {
                start_index: 3,
                length: 3
            },
        ]
    );
    assert_eq!(model.draws()[0].material.diffuse, Vec3::X);
    assert_eq!(model.draws()[1].material.diffuse, Vec3::Y);
}

#[test]
fn uploaded_indices_are_rebased_by_vertex_offset() {
    let device = HeadlessDevice::new();
    let model =
        Model::from_fragments(&device, &two_fragments(), None, &ModelSettings::default()).unwrap();

    let indices = device.buffer_contents(model.index_buffer()).unwrap();
    let expected: &[u8] = bytemuck::cast_slice(&[0u32, 1, 2, 4, 5, 6]);
    assert_eq!(indices, expected);

    let vertices = device.buffer_contents(model.vertex_buffer()).unwrap();
    assert_eq!(vertices.len(), 7 * std::mem::size_of::<tessera_core::mesh::Vertex>());
}

#[test]
fn owned_model_releases_everything_on_destroy() {
    let device = HeadlessDevice::new();
    let model =
        Model::from_fragments(&device, &two_fragments(), None, &ModelSettings::default()).unwrap();
    assert!(model.owns_pipeline());

    let stats = device.stats().unwrap();
    assert_eq!((stats.shader_modules, stats.pipelines, stats.buffers), (1, 1, 2));

    model.destroy(&device).unwrap();
    let stats = device.stats().unwrap();
    assert_eq!((stats.shader_modules, stats.pipelines, stats.buffers), (0, 0, 0));
    assert_eq!(stats.allocated_bytes, 0);
    assert!(stats.peak_bytes > 0);
}

#[test]
fn external_pipeline_survives_model_destruction() {
    let device = HeadlessDevice::new();
    let pipeline = external_pipeline(&device);

    let model = Model::from_fragments(
        &device,
        &two_fragments(),
        Some(pipeline),
        &ModelSettings::default(),
    )
    .unwrap();
    assert!(!model.owns_pipeline());
    assert_eq!(model.pipeline(), pipeline);

    model.destroy(&device).unwrap();
    let stats = device.stats().unwrap();
    assert_eq!((stats.pipelines, stats.buffers), (1, 0));
    assert!(device.pipeline_label(pipeline).is_some());
}

#[test]
fn material_count_mismatch_uploads_nothing() {
    let device = HeadlessDevice::new();
    let geometry = BufferAssembler::default().assemble(&two_fragments()).unwrap();
    let mut materials = MaterialTable::new();
    materials.push(PhongMaterial::default());

    let err = Model::from_parts(&device, geometry, &materials, None).unwrap_err();
    assert!(matches!(
        err,
        ModelError::MaterialCountMismatch {
            materials: 1,
            ranges: 2
        }
    ));

    let stats = device.stats().unwrap();
    assert_eq!((stats.shader_modules, stats.pipelines, stats.buffers), (0, 0, 0));
}

#[test]
fn empty_parts_build_a_model_without_draws() {
    let device = HeadlessDevice::new();
    let model =
        Model::from_parts(&device, MergedGeometry::default(), &MaterialTable::new(), None).unwrap();
    assert_eq!(model.fragment_count(), 0);
    assert_eq!(model.index_count(), 0);
    assert_eq!(model.triangle_count(), 0);
    model.destroy(&device).unwrap();
}

#[test]
fn empty_fragment_list_is_rejected() {
    let device = HeadlessDevice::new();
    let err = Model::from_fragments(&device, &[], None, &ModelSettings::default()).unwrap_err();
    assert!(matches!(err, ModelError::EmptyModel));
    assert_eq!(device.stats().unwrap().buffers, 0);
}

#[test]
fn out_of_range_index_is_rejected_when_validating() {
    let device = HeadlessDevice::new();
    let fragments = vec![fragment("broken", 3, &[0, 1, 3], Vec3::ONE)];

    let err =
        Model::from_fragments(&device, &fragments, None, &ModelSettings::default()).unwrap_err();
    assert!(matches!(
        err,
        ModelError::IndexOutOfRange {
            fragment: 0,
            index: 3,
            vertex_count: 3,
            ..
        }
    ));
}

#[test]
fn create_loads_through_the_mesh_source() {
    let device = HeadlessDevice::new();
    let source = MemoryMeshSource::new().with_model("memory://ship", two_fragments());

    let model = Model::create(
        &device,
        &source,
        Path::new("memory://ship"),
        None,
        &ModelSettings::default(),
    )
    .unwrap();
    assert_eq!(model.fragment_count(), 2);

    let err = Model::create(
        &device,
        &source,
        Path::new("memory://missing"),
        None,
        &ModelSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::Load(LoadError::NotFound { .. })));
}

#[test]
fn settings_flow_into_every_material() {
    let device = HeadlessDevice::new();
    let settings: ModelSettings =
        ron::from_str("(ambient_intensity: 0.5, with_error_check: true)").unwrap();

    let model = Model::from_fragments(&device, &two_fragments(), None, &settings).unwrap();
    for draw in model.draws() {
        assert_eq!(draw.material.ambient_intensity, 0.5);
        assert_eq!(draw.material.diffuse_intensity, 0.8);
        assert!(draw.material.with_error_check);
    }
}
