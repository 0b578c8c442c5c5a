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

//! Model creation, statistics and teardown.

mod gpu_geometry;
mod pipeline;

pub use gpu_geometry::GpuGeometry;

use self::pipeline::ModelPipeline;
use crate::assembly_lane::{BufferAssembler, FragmentDraw, MaterialTable, MergedGeometry};
use crate::error::ModelError;
use crate::settings::ModelSettings;
use std::path::Path;
use tessera_core::mesh::MeshFragment;
use tessera_core::renderer::{
    BufferId, GraphicsDevice, IndexFormat, RenderPipelineId, ResourceError,
};
use tessera_io::MeshSource;

/// A multi-fragment model resident in a rendering backend.
///
/// Holds the shared vertex/index buffers, one [`FragmentDraw`] per fragment in
/// source order, and the pipeline it is drawn with. Only constructible through
/// the `create`/`from_*` functions, which either succeed completely or leave no
/// backend resource behind. Release with [`Model::destroy`].
#[derive(Debug)]
pub struct Model {
    pub(crate) geometry: GpuGeometry,
    pub(crate) draws: Vec<FragmentDraw>,
    fragment_names: Vec<String>,
    pub(crate) pipeline: ModelPipeline,
}

impl Model {
    /// Loads `path` through `source` and builds the model from its fragments.
    ///
    /// Without an `external_pipeline`, the model compiles and owns the default
    /// shader and pipeline.
    pub fn create(
        device: &dyn GraphicsDevice,
        source: &dyn MeshSource,
        path: &Path,
        external_pipeline: Option<RenderPipelineId>,
        settings: &ModelSettings,
    ) -> Result<Self, ModelError> {
        log::info!("Model: loading '{}'", path.display());
        let fragments = source.load(path)?;
        Self::from_fragments(device, &fragments, external_pipeline, settings)
    }

    /// Builds a model from an already loaded fragment list.
    pub fn from_fragments(
        device: &dyn GraphicsDevice,
        fragments: &[MeshFragment],
        external_pipeline: Option<RenderPipelineId>,
        settings: &ModelSettings,
    ) -> Result<Self, ModelError> {
        let geometry = BufferAssembler::new(settings).assemble(fragments)?;
        let materials = MaterialTable::from_fragments(fragments, settings);
        Self::from_parts(device, geometry, &materials, external_pipeline)
    }

    /// Builds a model from merged geometry and a separately built material table.
    ///
    /// The table must hold exactly one material per draw range. Nothing is
    /// uploaded unless it does.
    pub fn from_parts(
        device: &dyn GraphicsDevice,
        geometry: MergedGeometry,
        materials: &MaterialTable,
        external_pipeline: Option<RenderPipelineId>,
    ) -> Result<Self, ModelError> {
        let draws = materials.pair_with(geometry.ranges())?;
        let gpu = GpuGeometry::upload(device, &geometry)?;

        let pipeline = match ModelPipeline::resolve(device, external_pipeline) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                if let Err(cleanup) = gpu.release(device) {
                    log::error!("Model: failed to release buffers after pipeline error: {cleanup}");
                }
                return Err(e.into());
            }
        };

        let fragment_names = geometry.into_fragment_names();
        let model = Self {
            geometry: gpu,
            draws,
            fragment_names,
            pipeline,
        };
        log::info!(
            "Model: ready with {} fragments, {} vertices, {} indices ({} triangles)",
            model.fragment_count(),
            model.vertex_count(),
            model.index_count(),
            model.triangle_count()
        );
        Ok(model)
    }

    /// Number of vertices in the merged vertex buffer.
    pub fn vertex_count(&self) -> u32 {
        self.geometry.vertex_count
    }

    /// Number of indices in the merged index buffer.
    pub fn index_count(&self) -> u32 {
        self.geometry.index_count
    }

    /// Number of fragments, which is also the number of draw calls per frame.
    pub fn fragment_count(&self) -> usize {
        self.draws.len()
    }

    /// Number of triangles across all fragments.
    pub fn triangle_count(&self) -> u32 {
        self.geometry.index_count / 3
    }

    /// Fragment names, in draw order.
    pub fn fragment_names(&self) -> &[String] {
        &self.fragment_names
    }

    /// Draw range and material of every fragment, in draw order.
    pub fn draws(&self) -> &[FragmentDraw] {
        &self.draws
    }

    /// The pipeline the model is drawn with.
    pub fn pipeline(&self) -> RenderPipelineId {
        *self.pipeline.id()
    }

    /// `true` if the pipeline was built by the model and is released with it.
    pub fn owns_pipeline(&self) -> bool {
        self.pipeline.is_owned()
    }

    /// The shared vertex buffer.
    pub fn vertex_buffer(&self) -> BufferId {
        self.geometry.vertex_buffer
    }

    /// The shared index buffer.
    pub fn index_buffer(&self) -> BufferId {
        self.geometry.index_buffer
    }

    /// Width of the values in the index buffer.
    pub fn index_format(&self) -> IndexFormat {
        self.geometry.index_format
    }

    /// Releases the buffers and, when owned, the pipeline and shader module.
    ///
    /// Every release is attempted; the first error is returned.
    pub fn destroy(self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        log::debug!(
            "Model: destroying {} fragments (owned pipeline: {})",
            self.fragment_count(),
            self.owns_pipeline()
        );
        let buffers = self.geometry.release(device);
        let pipeline = self.pipeline.release(device);
        buffers.and(pipeline)
    }
}
