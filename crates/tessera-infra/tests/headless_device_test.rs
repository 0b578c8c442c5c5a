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

use std::sync::Arc;
use std::thread;
use tessera_core::renderer::{BufferDescriptor, BufferUsage, GraphicsDevice, RenderPassDescriptor};
use tessera_infra::{HeadlessDevice, RecordedCommand};

fn descriptor(size: u64) -> BufferDescriptor<'static> {
    BufferDescriptor {
        label: Some("shared".into()),
        size,
        usage: BufferUsage::VERTEX | BufferUsage::COPY_DST,
        mapped_at_creation: false,
    }
}

#[test]
fn clones_share_one_registry_across_threads() {
    let device = HeadlessDevice::new();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let device = device.clone();
            thread::spawn(move || {
                (0..8)
                    .map(|_| device.create_buffer_with_data(&descriptor(16), &[0u8; 16]).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_by_key(|id| id.0);
    ids.dedup();
    assert_eq!(ids.len(), 32, "every buffer gets a distinct id");

    let stats = device.stats().unwrap();
    assert_eq!(stats.buffers, 32);
    assert_eq!(stats.allocated_bytes, 32 * 16);

    for id in ids {
        device.destroy_buffer(id).unwrap();
    }
    let stats = device.stats().unwrap();
    assert_eq!(stats.allocated_bytes, 0);
    assert_eq!(stats.peak_bytes, 32 * 16);
}

#[test]
fn device_is_usable_as_a_shared_trait_object() {
    let device: Arc<dyn GraphicsDevice> = Arc::new(HeadlessDevice::new());
    let id = device
        .create_buffer_with_data(&descriptor(4), &[1, 2, 3, 4])
        .unwrap();

    let mut encoder = device.create_command_encoder(Some("trait object"));
    {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor::default());
        pass.set_vertex_buffer(0, &id, 0);
    }
    device.submit_command_buffer(encoder.finish()).unwrap();
    device.destroy_buffer(id).unwrap();
}

#[test]
fn submissions_keep_their_order() {
    let device = HeadlessDevice::new();
    let first = device.create_command_encoder(Some("first")).finish();
    let second = device.create_command_encoder(Some("second")).finish();

    device.submit_command_buffer(second).unwrap();
    device.submit_command_buffer(first).unwrap();

    let labels: Vec<_> = device
        .take_submitted()
        .unwrap()
        .into_iter()
        .map(|buffer| buffer.label)
        .collect();
    assert_eq!(labels, vec![Some("second".to_string()), Some("first".to_string())]);
}

#[test]
fn recorded_pass_is_visible_after_submission() {
    let device = HeadlessDevice::new();
    let id = device
        .create_buffer_with_data(&descriptor(4), &[9, 9, 9, 9])
        .unwrap();

    let mut encoder = device.create_command_encoder(None);
    {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor::default());
        pass.set_vertex_buffer(1, &id, 0);
    }
    device.submit_command_buffer(encoder.finish()).unwrap();

    let submitted = device.take_submitted().unwrap();
    assert_eq!(
        submitted[0].commands,
        vec![
            RecordedCommand::BeginRenderPass {
                label: None,
                clear_color: None,
            },
            RecordedCommand::SetVertexBuffer {
                slot: 1,
                buffer: id,
                offset: 0,
            },
            RecordedCommand::EndRenderPass,
        ]
    );
}
