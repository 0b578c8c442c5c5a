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

//! Statistics over the command streams the headless device received.

use tessera_infra::{RecordedCommand, SubmittedCommandBuffer};
use tessera_core::renderer::MATERIAL_BINDING;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandSummary {
    pub command_buffers: usize,
    pub render_passes: usize,
    pub draw_calls: usize,
    pub indices_drawn: u64,
    pub material_writes: usize,
    pub uniform_bytes: usize,
}

impl CommandSummary {
    pub fn from_submitted(buffers: &[SubmittedCommandBuffer]) -> Self {
        let mut summary = Self {
            command_buffers: buffers.len(),
            ..Default::default()
        };
        for command in buffers.iter().flat_map(|buffer| &buffer.commands) {
            match command {
                RecordedCommand::BeginRenderPass { .. } => summary.render_passes += 1,
                RecordedCommand::DrawIndexed {
                    indices, instances, ..
                } => {
                    summary.draw_calls += 1;
                    summary.indices_drawn += indices.len() as u64 * instances.len() as u64;
                }
                RecordedCommand::SetUniformData { binding, data } => {
                    if *binding == MATERIAL_BINDING {
                        summary.material_writes += 1;
                    }
                    summary.uniform_bytes += data.len();
                }
                _ => {}
            }
        }
        summary
    }
}
