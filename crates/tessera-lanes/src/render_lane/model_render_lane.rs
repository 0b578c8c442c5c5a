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

//! Records one draw call per model fragment.

use crate::model::Model;
use tessera_core::math::Mat4;
use tessera_core::renderer::{
    BufferId, RenderPass, RenderPipelineId, TransformUniforms, MATERIAL_BINDING,
    TRANSFORM_BINDING,
};

/// The render pass state a draw leaves behind.
///
/// Nothing bound during a draw is restored afterwards. Callers recording more
/// work into the same pass must rebind whatever they rely on.
#[must_use = "the pass keeps this state; rebind before recording unrelated draws"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassState {
    /// Pipeline left bound, if any.
    pub pipeline: Option<RenderPipelineId>,
    /// Vertex buffer left bound to slot 0, if any.
    pub vertex_buffer: Option<BufferId>,
    /// Index buffer left bound, if any.
    pub index_buffer: Option<BufferId>,
    /// Fragment whose material is left in the material binding, if any.
    pub last_material: Option<usize>,
    /// Number of `draw_indexed` calls issued.
    pub draw_calls: u32,
}

impl PassState {
    /// `true` if the draw changed any pass state.
    pub fn is_dirty(&self) -> bool {
        self.pipeline.is_some()
            || self.vertex_buffer.is_some()
            || self.index_buffer.is_some()
            || self.last_material.is_some()
    }
}

/// Draws multi-fragment models with their per-fragment materials.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelRenderLane;

impl ModelRenderLane {
    /// Creates a new `ModelRenderLane`.
    pub fn new() -> Self {
        Self
    }

    /// Records `model` into `pass`.
    ///
    /// Binds the model's pipeline, vertex buffer and index buffer once and
    /// writes the transform block. Then, for every fragment in source order,
    /// writes its material block and draws its index range as one instance.
    /// A model without fragments records nothing.
    pub fn draw<'pass>(
        &self,
        model: &'pass Model,
        pass: &mut dyn RenderPass<'pass>,
        projection: &Mat4,
        view: &Mat4,
        model_transform: &Mat4,
    ) -> PassState {
        if model.draws.is_empty() {
            log::debug!("ModelRenderLane: model has no fragments, nothing recorded");
            return PassState::default();
        }

        let mut state = PassState::default();

        pass.set_pipeline(model.pipeline.id());
        state.pipeline = Some(*model.pipeline.id());

        let geometry = &model.geometry;
        pass.set_vertex_buffer(0, &geometry.vertex_buffer, 0);
        pass.set_index_buffer(&geometry.index_buffer, 0, geometry.index_format);
        state.vertex_buffer = Some(geometry.vertex_buffer);
        state.index_buffer = Some(geometry.index_buffer);

        let transform = TransformUniforms::new(projection, view, model_transform);
        pass.set_uniform_data(TRANSFORM_BINDING, bytemuck::bytes_of(&transform));

        for (i, draw) in model.draws.iter().enumerate() {
            let material = draw.material.to_uniforms();
            pass.set_uniform_data(MATERIAL_BINDING, bytemuck::bytes_of(&material));
            pass.draw_indexed(draw.range.as_range(), 0, 0..1);
            state.last_material = Some(i);
            state.draw_calls += 1;
        }

        log::trace!(
            "ModelRenderLane: recorded {} draw calls ({} indices)",
            state.draw_calls,
            geometry.index_count
        );
        state
    }
}
