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

//! The render pipeline a model draws with: its own, or one lent by the caller.

use crate::render_lane::shaders::{MODEL_DEFAULT_WGSL, MODEL_FS_ENTRY, MODEL_VS_ENTRY};
use std::borrow::Cow;
use tessera_core::mesh::Vertex;
use tessera_core::renderer::{
    GraphicsDevice, PrimitiveStateDescriptor, PrimitiveTopology, RenderPipelineDescriptor,
    RenderPipelineId, ResourceError, ShaderModuleDescriptor, ShaderModuleId, ShaderSourceData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModelPipeline {
    /// Built from the default shader; released with the model.
    Owned {
        shader: ShaderModuleId,
        pipeline: RenderPipelineId,
    },
    /// Supplied by the caller; never released by the model.
    External(RenderPipelineId),
}

impl ModelPipeline {
    pub(crate) fn resolve(
        device: &dyn GraphicsDevice,
        external: Option<RenderPipelineId>,
    ) -> Result<Self, ResourceError> {
        if let Some(pipeline) = external {
            log::debug!("ModelPipeline: using external pipeline {pipeline:?}");
            return Ok(Self::External(pipeline));
        }

        let shader = device.create_shader_module(&ShaderModuleDescriptor {
            label: Some("model_default"),
            source: ShaderSourceData::Wgsl(Cow::Borrowed(MODEL_DEFAULT_WGSL)),
        })?;

        let descriptor = RenderPipelineDescriptor {
            label: Some("Model Default Pipeline".into()),
            vertex_shader_module: shader,
            vertex_entry_point: MODEL_VS_ENTRY.into(),
            fragment_shader_module: Some(shader),
            fragment_entry_point: Some(MODEL_FS_ENTRY.into()),
            vertex_buffers_layout: Cow::Owned(vec![Vertex::layout()]),
            primitive_state: PrimitiveStateDescriptor {
                topology: PrimitiveTopology::TriangleList,
                ..Default::default()
            },
        };

        match device.create_render_pipeline(&descriptor) {
            Ok(pipeline) => Ok(Self::Owned { shader, pipeline }),
            Err(e) => {
                if let Err(cleanup) = device.destroy_shader_module(shader) {
                    log::error!("ModelPipeline: failed to release shader {shader:?}: {cleanup}");
                }
                Err(e)
            }
        }
    }

    pub(crate) fn id(&self) -> &RenderPipelineId {
        match self {
            Self::Owned { pipeline, .. } => pipeline,
            Self::External(pipeline) => pipeline,
        }
    }

    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, Self::Owned { .. })
    }

    pub(crate) fn release(self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        match self {
            Self::Owned { shader, pipeline } => {
                let pipeline = device.destroy_render_pipeline(pipeline);
                let shader = device.destroy_shader_module(shader);
                pipeline.and(shader)
            }
            Self::External(_) => Ok(()),
        }
    }
}
