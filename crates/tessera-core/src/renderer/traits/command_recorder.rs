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

use crate::renderer::api::command::{CommandBufferId, RenderPassDescriptor};
use crate::renderer::api::{BufferId, IndexFormat, RenderPipelineId};
use std::ops::Range;

/// A trait representing an active render pass, used for recording drawing commands.
///
/// A `RenderPass` object is obtained from a [`CommandEncoder`] and provides methods
/// to set pipeline state (pipeline, vertex/index buffers, uniform data) and issue
/// draw calls. State set on a pass persists until it is overwritten; nothing is
/// restored when a caller is done with it.
///
/// The `'pass` lifetime ensures that the pass object cannot outlive the [`CommandEncoder`]
/// that created it, and that any resources bound to it also live long enough.
pub trait RenderPass<'pass> {
    /// Sets the active render pipeline for subsequent draw calls.
    fn set_pipeline(&mut self, pipeline: &'pass RenderPipelineId);

    /// Binds a vertex buffer to a specific slot.
    fn set_vertex_buffer(&mut self, slot: u32, buffer: &'pass BufferId, offset: u64);

    /// Binds an index buffer for indexed drawing.
    fn set_index_buffer(&mut self, buffer: &'pass BufferId, offset: u64, index_format: IndexFormat);

    /// Writes the bytes of a uniform block to a binding slot.
    ///
    /// The data is copied; later draws see it until the slot is written again.
    fn set_uniform_data(&mut self, binding: u32, data: &[u8]);

    /// Records an indexed draw call.
    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>);
}

/// A trait for an object that records a sequence of GPU commands.
///
/// A `CommandEncoder` is the main tool for building a [`CommandBufferId`]. Passes
/// borrow the encoder mutably, so only one pass can be active at a time.
pub trait CommandEncoder {
    /// Begins a new render pass. The pass ends when the returned object is dropped.
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'encoder>,
    ) -> Box<dyn RenderPass<'encoder> + 'encoder>;

    /// Finalizes the command recording and returns a handle to the resulting command buffer.
    ///
    /// The returned ID can then be submitted with
    /// [`crate::renderer::GraphicsDevice::submit_command_buffer`].
    fn finish(self: Box<Self>) -> CommandBufferId;
}
