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

//! Upload of merged geometry into backend buffers.

use crate::assembly_lane::MergedGeometry;
use tessera_core::renderer::{
    BufferDescriptor, BufferId, BufferUsage, GraphicsDevice, IndexFormat, ResourceError,
};

/// The GPU-resident half of a model: its shared vertex and index buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuGeometry {
    /// The merged vertex buffer.
    pub vertex_buffer: BufferId,
    /// The merged index buffer.
    pub index_buffer: BufferId,
    /// Width of the values in `index_buffer`.
    pub index_format: IndexFormat,
    /// Number of vertices in `vertex_buffer`.
    pub vertex_count: u32,
    /// Number of indices in `index_buffer`.
    pub index_count: u32,
}

impl GpuGeometry {
    /// Uploads the vertex and index stores of `geometry`.
    ///
    /// If the index buffer cannot be created, the vertex buffer is released
    /// before the error is returned.
    pub fn upload(
        device: &dyn GraphicsDevice,
        geometry: &MergedGeometry,
    ) -> Result<Self, ResourceError> {
        let vertex_data: &[u8] = bytemuck::cast_slice(geometry.vertices());
        let vertex_buffer = device.create_buffer_with_data(
            &BufferDescriptor {
                label: Some("Model Vertex Buffer".into()),
                size: vertex_data.len() as u64,
                usage: BufferUsage::VERTEX | BufferUsage::COPY_DST,
                mapped_at_creation: false,
            },
            vertex_data,
        )?;

        let index_data: &[u8] = bytemuck::cast_slice(geometry.indices());
        let index_buffer = match device.create_buffer_with_data(
            &BufferDescriptor {
                label: Some("Model Index Buffer".into()),
                size: index_data.len() as u64,
                usage: BufferUsage::INDEX | BufferUsage::COPY_DST,
                mapped_at_creation: false,
            },
            index_data,
        ) {
            Ok(buffer) => buffer,
            Err(e) => {
                if let Err(cleanup) = device.destroy_buffer(vertex_buffer) {
                    log::error!("GpuGeometry: failed to release vertex buffer {vertex_buffer:?}: {cleanup}");
                }
                return Err(e);
            }
        };

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_format: IndexFormat::Uint32,
            vertex_count: geometry.vertices().len() as u32,
            index_count: geometry.indices().len() as u32,
        })
    }

    /// Destroys both buffers. Both are attempted; the first error is returned.
    pub fn release(self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        let vertex = device.destroy_buffer(self.vertex_buffer);
        let index = device.destroy_buffer(self.index_buffer);
        vertex.and(index)
    }
}
