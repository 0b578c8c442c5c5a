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

//! Command buffer handles and render pass descriptors.

/// An opaque handle to a recorded command buffer that is ready for submission.
///
/// Returned by [`crate::renderer::CommandEncoder::finish`] and consumed by
/// [`crate::renderer::GraphicsDevice::submit_command_buffer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CommandBufferId(pub u64);

/// Describes a render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderPassDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<&'a str>,
    /// Linear RGBA color the target is cleared to, or `None` to keep its contents.
    pub clear_color: Option<[f32; 4]>,
}
