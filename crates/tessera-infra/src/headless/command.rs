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

use super::device::HeadlessDevice;
use std::ops::Range;
use tessera_core::renderer::{
    BufferId, BufferUsage, CommandBufferId, CommandEncoder, IndexFormat, RenderPass,
    RenderPassDescriptor, RenderPipelineId,
};

/// One command captured by a [`HeadlessCommandEncoder`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCommand {
    /// A render pass was opened.
    BeginRenderPass {
        /// The pass label.
        label: Option<String>,
        /// The clear color, when the pass clears its target.
        clear_color: Option<[f32; 4]>,
    },
    /// A pipeline was bound.
    SetPipeline(RenderPipelineId),
    /// A vertex buffer was bound to `slot`.
    SetVertexBuffer {
        /// The vertex buffer slot.
        slot: u32,
        /// The bound buffer.
        buffer: BufferId,
        /// Byte offset into the buffer.
        offset: u64,
    },
    /// An index buffer was bound.
    SetIndexBuffer {
        /// The bound buffer.
        buffer: BufferId,
        /// Byte offset into the buffer.
        offset: u64,
        /// The width of one index.
        format: IndexFormat,
    },
    /// A uniform block was written.
    SetUniformData {
        /// The binding slot.
        binding: u32,
        /// A copy of the written bytes.
        data: Vec<u8>,
    },
    /// An indexed draw was issued.
    DrawIndexed {
        /// The index range drawn.
        indices: Range<u32>,
        /// Value added to each index before fetching vertices.
        base_vertex: i32,
        /// The instance range drawn.
        instances: Range<u32>,
    },
    /// The render pass was closed.
    EndRenderPass,
}

/// A render pass that appends to its encoder's command list.
///
/// Bindings naming unknown resources are logged and dropped, as are draws
/// that read past the bound index buffer.
pub struct HeadlessRenderPass<'a> {
    commands: &'a mut Vec<RecordedCommand>,
    device: &'a HeadlessDevice,
    pipeline_bound: bool,
    index_capacity: Option<u64>,
}

impl<'pass> RenderPass<'pass> for HeadlessRenderPass<'pass> {
    fn set_pipeline(&mut self, pipeline_id: &'pass RenderPipelineId) {
        if self.device.has_pipeline(*pipeline_id) {
            self.pipeline_bound = true;
            self.commands.push(RecordedCommand::SetPipeline(*pipeline_id));
        } else {
            log::warn!(
                "HeadlessRenderPass: RenderPipelineId {:?} not found.",
                pipeline_id
            );
        }
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer_id: &'pass BufferId, offset: u64) {
        if self
            .device
            .buffer_len_for(*buffer_id, BufferUsage::VERTEX)
            .is_some()
        {
            self.commands.push(RecordedCommand::SetVertexBuffer {
                slot,
                buffer: *buffer_id,
                offset,
            });
        } else {
            log::warn!(
                "HeadlessRenderPass: Vertex BufferId {:?} not found.",
                buffer_id
            );
        }
    }

    fn set_index_buffer(
        &mut self,
        buffer_id: &'pass BufferId,
        offset: u64,
        index_format: IndexFormat,
    ) {
        match self.device.buffer_len_for(*buffer_id, BufferUsage::INDEX) {
            Some(len) => {
                self.index_capacity = Some(len.saturating_sub(offset) / index_format.size());
                self.commands.push(RecordedCommand::SetIndexBuffer {
                    buffer: *buffer_id,
                    offset,
                    format: index_format,
                });
            }
            None => {
                log::warn!(
                    "HeadlessRenderPass: Index BufferId {:?} not found.",
                    buffer_id
                );
            }
        }
    }

    fn set_uniform_data(&mut self, binding: u32, data: &[u8]) {
        self.commands.push(RecordedCommand::SetUniformData {
            binding,
            data: data.to_vec(),
        });
    }

    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>) {
        if !self.pipeline_bound {
            log::warn!("HeadlessRenderPass: draw_indexed without a pipeline, skipped.");
            return;
        }
        let Some(capacity) = self.index_capacity else {
            log::warn!("HeadlessRenderPass: draw_indexed without an index buffer, skipped.");
            return;
        };
        if u64::from(indices.end) > capacity {
            log::warn!(
                "HeadlessRenderPass: index range {:?} exceeds the {} bound indices, skipped.",
                indices,
                capacity
            );
            return;
        }
        self.commands.push(RecordedCommand::DrawIndexed {
            indices,
            base_vertex,
            instances,
        });
    }
}

impl Drop for HeadlessRenderPass<'_> {
    fn drop(&mut self) {
        self.commands.push(RecordedCommand::EndRenderPass);
    }
}

/// Records commands in memory until [`CommandEncoder::finish`] hands them to the device.
#[derive(Debug)]
pub struct HeadlessCommandEncoder {
    label: Option<String>,
    commands: Vec<RecordedCommand>,
    device: HeadlessDevice,
}

impl HeadlessCommandEncoder {
    pub(crate) fn new(device: HeadlessDevice, label: Option<&str>) -> Self {
        Self {
            label: label.map(String::from),
            commands: Vec::new(),
            device,
        }
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }
}

impl CommandEncoder for HeadlessCommandEncoder {
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'encoder>,
    ) -> Box<dyn RenderPass<'encoder> + 'encoder> {
        self.commands.push(RecordedCommand::BeginRenderPass {
            label: descriptor.label.map(String::from),
            clear_color: descriptor.clear_color,
        });
        Box::new(HeadlessRenderPass {
            commands: &mut self.commands,
            device: &self.device,
            pipeline_bound: false,
            index_capacity: None,
        })
    }

    fn finish(self: Box<Self>) -> CommandBufferId {
        let encoder = *self;
        encoder.device.store_finished(encoder.label, encoder.commands)
    }
}
