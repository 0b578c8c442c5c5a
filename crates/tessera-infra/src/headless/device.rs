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

use super::command::{HeadlessCommandEncoder, RecordedCommand};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tessera_core::renderer::{
    BufferDescriptor, BufferId, BufferUsage, CommandBufferId, CommandEncoder, GraphicsDevice,
    PipelineError, RenderError, RenderPipelineDescriptor, RenderPipelineId, ResourceError,
    ShaderError, ShaderModuleDescriptor, ShaderModuleId, ShaderSourceData,
};

#[derive(Debug)]
struct HeadlessShaderModuleEntry {
    source: String,
}

#[derive(Debug)]
struct HeadlessRenderPipelineEntry {
    label: Option<String>,
}

#[derive(Debug)]
struct HeadlessBufferEntry {
    usage: BufferUsage,
    data: Vec<u8>,
}

/// A finished command buffer, in the order it was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedCommandBuffer {
    /// The handle returned by `finish`.
    pub id: CommandBufferId,
    /// The encoder label, if any.
    pub label: Option<String>,
    /// Every command recorded into the buffer.
    pub commands: Vec<RecordedCommand>,
}

/// Live resource counts and memory use of a [`HeadlessDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceStats {
    /// Live shader modules.
    pub shader_modules: usize,
    /// Live render pipelines.
    pub pipelines: usize,
    /// Live buffers.
    pub buffers: usize,
    /// Bytes held by live buffers.
    pub allocated_bytes: usize,
    /// Highest value `allocated_bytes` reached.
    pub peak_bytes: usize,
}

#[derive(Debug, Default)]
struct HeadlessDeviceInternal {
    shader_modules: Mutex<HashMap<ShaderModuleId, HeadlessShaderModuleEntry>>,
    pipelines: Mutex<HashMap<RenderPipelineId, HeadlessRenderPipelineEntry>>,
    buffers: Mutex<HashMap<BufferId, HeadlessBufferEntry>>,

    next_shader_id: AtomicUsize,
    next_pipeline_id: AtomicUsize,
    next_buffer_id: AtomicUsize,
    command_buffer_id_counter: AtomicU64,

    allocated_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,

    /// Finished but not yet submitted, keyed by their handle.
    pending_command_buffers: Mutex<HashMap<CommandBufferId, (Option<String>, Vec<RecordedCommand>)>>,
    submitted: Mutex<Vec<SubmittedCommandBuffer>>,
}

/// A clonable, thread-safe graphics device that executes nothing and records everything.
///
/// Clones share the same registries.
#[derive(Clone, Debug, Default)]
pub struct HeadlessDevice {
    internal: Arc<HeadlessDeviceInternal>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, ResourceError> {
    mutex
        .lock()
        .map_err(|e| ResourceError::BackendError(format!("Mutex poisoned ({what}): {e}")))
}

fn declares_entry_point(source: &str, entry_point: &str) -> bool {
    source.contains(&format!("fn {entry_point}("))
}

impl HeadlessDevice {
    /// Creates a device with empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    // --- ID Generation Helpers ---

    fn generate_shader_id(&self) -> ShaderModuleId {
        ShaderModuleId(self.internal.next_shader_id.fetch_add(1, Ordering::Relaxed))
    }

    fn generate_pipeline_id(&self) -> RenderPipelineId {
        RenderPipelineId(
            self.internal
                .next_pipeline_id
                .fetch_add(1, Ordering::Relaxed),
        )
    }

    fn generate_buffer_id(&self) -> BufferId {
        BufferId(self.internal.next_buffer_id.fetch_add(1, Ordering::Relaxed))
    }

    // --- Inspection ---

    /// A copy of the bytes stored in buffer `id`, or `None` if it does not exist.
    pub fn buffer_contents(&self, id: BufferId) -> Option<Vec<u8>> {
        match lock(&self.internal.buffers, "buffers") {
            Ok(buffers) => buffers.get(&id).map(|entry| entry.data.clone()),
            Err(e) => {
                log::error!("HeadlessDevice: {e}");
                None
            }
        }
    }

    /// The usage flags buffer `id` was created with.
    pub fn buffer_usage(&self, id: BufferId) -> Option<BufferUsage> {
        lock(&self.internal.buffers, "buffers")
            .ok()
            .and_then(|buffers| buffers.get(&id).map(|entry| entry.usage))
    }

    /// The label pipeline `id` was created with, if it exists.
    pub fn pipeline_label(&self, id: RenderPipelineId) -> Option<Option<String>> {
        lock(&self.internal.pipelines, "pipelines")
            .ok()
            .and_then(|pipelines| pipelines.get(&id).map(|entry| entry.label.clone()))
    }

    /// Current resource counts and memory use.
    pub fn stats(&self) -> Result<DeviceStats, ResourceError> {
        Ok(DeviceStats {
            shader_modules: lock(&self.internal.shader_modules, "shader_modules")?.len(),
            pipelines: lock(&self.internal.pipelines, "pipelines")?.len(),
            buffers: lock(&self.internal.buffers, "buffers")?.len(),
            allocated_bytes: self.internal.allocated_bytes.load(Ordering::Relaxed),
            peak_bytes: self.internal.peak_bytes.load(Ordering::Relaxed),
        })
    }

    /// Removes and returns every command buffer submitted so far, oldest first.
    pub fn take_submitted(&self) -> Result<Vec<SubmittedCommandBuffer>, ResourceError> {
        let mut submitted = lock(&self.internal.submitted, "submitted")?;
        Ok(std::mem::take(&mut *submitted))
    }

    // --- Lookups used while recording ---

    pub(crate) fn has_pipeline(&self, id: RenderPipelineId) -> bool {
        lock(&self.internal.pipelines, "pipelines")
            .map(|pipelines| pipelines.contains_key(&id))
            .unwrap_or(false)
    }

    /// Size in bytes of buffer `id`, if it exists and allows `usage`.
    pub(crate) fn buffer_len_for(&self, id: BufferId, usage: BufferUsage) -> Option<u64> {
        let buffers = lock(&self.internal.buffers, "buffers").ok()?;
        buffers
            .get(&id)
            .filter(|entry| entry.usage.contains(usage))
            .map(|entry| entry.data.len() as u64)
    }

    pub(crate) fn store_finished(
        &self,
        label: Option<String>,
        commands: Vec<RecordedCommand>,
    ) -> CommandBufferId {
        let id = CommandBufferId(
            self.internal
                .command_buffer_id_counter
                .fetch_add(1, Ordering::Relaxed),
        );
        match lock(&self.internal.pending_command_buffers, "pending_command_buffers") {
            Ok(mut pending) => {
                pending.insert(id, (label, commands));
            }
            Err(e) => log::error!("HeadlessDevice: dropping command buffer {id:?}: {e}"),
        }
        id
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_shader_module(
        &self,
        descriptor: &ShaderModuleDescriptor,
    ) -> Result<ShaderModuleId, ResourceError> {
        let label = descriptor.label.unwrap_or("unlabeled");
        let ShaderSourceData::Wgsl(source) = &descriptor.source;
        if source.trim().is_empty() {
            return Err(ShaderError::CompilationError {
                label: label.to_owned(),
                details: "empty WGSL source".to_owned(),
            }
            .into());
        }

        let id = self.generate_shader_id();
        lock(&self.internal.shader_modules, "shader_modules")?.insert(
            id,
            HeadlessShaderModuleEntry {
                source: source.to_string(),
            },
        );

        log::info!("HeadlessDevice: Created shader module '{label}' with ID: {id:?}");
        Ok(id)
    }

    fn destroy_shader_module(&self, id: ShaderModuleId) -> Result<(), ResourceError> {
        let mut modules = lock(&self.internal.shader_modules, "shader_modules")?;
        if modules.remove(&id).is_some() {
            log::debug!("HeadlessDevice: Destroyed shader module with ID: {id:?}");
            Ok(())
        } else {
            Err(ShaderError::NotFound { id }.into())
        }
    }

    fn create_render_pipeline(
        &self,
        descriptor: &RenderPipelineDescriptor,
    ) -> Result<RenderPipelineId, ResourceError> {
        log::debug!(
            "HeadlessDevice: Creating render pipeline with label: {:?}",
            descriptor.label
        );
        let pipeline_label = descriptor.label.as_deref().map(String::from);

        {
            let modules = lock(&self.internal.shader_modules, "shader_modules")?;
            let mut stages = vec![(
                descriptor.vertex_shader_module,
                Some(&*descriptor.vertex_entry_point),
            )];
            if let Some(fragment) = descriptor.fragment_shader_module {
                stages.push((fragment, descriptor.fragment_entry_point.as_deref()));
            }

            for (module_id, entry_point) in stages {
                let module = modules.get(&module_id).ok_or_else(|| {
                    ResourceError::Pipeline(PipelineError::InvalidShaderModuleForPipeline {
                        id: module_id,
                        pipeline_label: pipeline_label.clone(),
                    })
                })?;
                match entry_point {
                    Some(entry) if declares_entry_point(&module.source, entry) => {}
                    other => {
                        return Err(ShaderError::InvalidEntryPoint {
                            id: module_id,
                            entry_point: other.unwrap_or_default().to_owned(),
                        }
                        .into())
                    }
                }
            }
        }

        if let Some(slot) = descriptor
            .vertex_buffers_layout
            .iter()
            .position(|layout| !layout.is_well_formed())
        {
            return Err(PipelineError::InvalidVertexLayout {
                pipeline_label,
                slot,
            }
            .into());
        }

        let id = self.generate_pipeline_id();
        lock(&self.internal.pipelines, "pipelines")?.insert(
            id,
            HeadlessRenderPipelineEntry {
                label: pipeline_label,
            },
        );
        log::info!("HeadlessDevice: Created render pipeline with ID: {id:?}");
        Ok(id)
    }

    fn destroy_render_pipeline(&self, id: RenderPipelineId) -> Result<(), ResourceError> {
        let mut pipelines = lock(&self.internal.pipelines, "pipelines")?;
        if pipelines.remove(&id).is_some() {
            log::debug!("HeadlessDevice: Destroyed render pipeline with ID: {id:?}");
            Ok(())
        } else {
            Err(PipelineError::InvalidRenderPipeline { id }.into())
        }
    }

    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        if descriptor.size != data.len() as u64 {
            log::warn!(
                "HeadlessDevice: buffer '{}' declares {} bytes but got {}",
                descriptor.label.as_deref().unwrap_or_default(),
                descriptor.size,
                data.len()
            );
            return Err(ResourceError::OutOfBounds);
        }

        let id = self.generate_buffer_id();
        lock(&self.internal.buffers, "buffers")?.insert(
            id,
            HeadlessBufferEntry {
                usage: descriptor.usage,
                data: data.to_vec(),
            },
        );

        let allocated = self
            .internal
            .allocated_bytes
            .fetch_add(data.len(), Ordering::Relaxed)
            + data.len();
        self.internal
            .peak_bytes
            .fetch_max(allocated, Ordering::Relaxed);

        log::info!(
            "HeadlessDevice: Created buffer '{}' with initial data. ID: {:?}, size: {} bytes",
            descriptor.label.as_deref().unwrap_or_default(),
            id,
            data.len()
        );
        Ok(id)
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        let mut buffers = lock(&self.internal.buffers, "buffers")?;
        if let Some(entry) = buffers.remove(&id) {
            self.internal
                .allocated_bytes
                .fetch_sub(entry.data.len(), Ordering::Relaxed);
            log::debug!("HeadlessDevice: Destroyed buffer with ID: {id:?}");
            Ok(())
        } else {
            Err(ResourceError::NotFound)
        }
    }

    fn create_command_encoder(&self, label: Option<&str>) -> Box<dyn CommandEncoder> {
        Box::new(HeadlessCommandEncoder::new(self.clone(), label))
    }

    fn submit_command_buffer(&self, command_buffer: CommandBufferId) -> Result<(), RenderError> {
        let internal_error = |e: ResourceError| RenderError::Internal(e.to_string());
        let (label, commands) = lock(&self.internal.pending_command_buffers, "pending_command_buffers")
            .map_err(internal_error)?
            .remove(&command_buffer)
            .ok_or(RenderError::UnknownCommandBuffer(command_buffer.0))?;

        log::debug!(
            "HeadlessDevice: Submitted command buffer {:?} with {} commands",
            command_buffer,
            commands.len()
        );
        lock(&self.internal.submitted, "submitted")
            .map_err(internal_error)?
            .push(SubmittedCommandBuffer {
                id: command_buffer,
                label,
                commands,
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use tessera_core::renderer::{
        PrimitiveStateDescriptor, VertexAttributeDescriptor, VertexBufferLayoutDescriptor,
        VertexFormat, VertexStepMode,
    };

    const SHADER: &str = "@vertex fn vs_main() {}\n@fragment fn fs_main() {}";

    fn shader(device: &HeadlessDevice, source: &str) -> Result<ShaderModuleId, ResourceError> {
        device.create_shader_module(&ShaderModuleDescriptor {
            label: Some("test"),
            source: ShaderSourceData::Wgsl(Cow::Borrowed(source)),
        })
    }

    fn pipeline_descriptor<'a>(
        module: ShaderModuleId,
        vertex_entry: &'a str,
        layouts: Vec<VertexBufferLayoutDescriptor<'a>>,
    ) -> RenderPipelineDescriptor<'a> {
        RenderPipelineDescriptor {
            label: Some("test pipeline".into()),
            vertex_shader_module: module,
            vertex_entry_point: vertex_entry.into(),
            fragment_shader_module: Some(module),
            fragment_entry_point: Some("fs_main".into()),
            vertex_buffers_layout: Cow::Owned(layouts),
            primitive_state: PrimitiveStateDescriptor::default(),
        }
    }

    #[test]
    fn buffers_keep_their_contents_and_track_memory() {
        let device = HeadlessDevice::new();
        let data = [1u8, 2, 3, 4];
        let id = device
            .create_buffer_with_data(
                &BufferDescriptor {
                    label: Some("bytes".into()),
                    size: 4,
                    usage: BufferUsage::VERTEX,
                    mapped_at_creation: false,
                },
                &data,
            )
            .unwrap();

        assert_eq!(device.buffer_contents(id), Some(data.to_vec()));
        assert_eq!(device.buffer_usage(id), Some(BufferUsage::VERTEX));
        assert_eq!(device.stats().unwrap().allocated_bytes, 4);

        device.destroy_buffer(id).unwrap();
        let stats = device.stats().unwrap();
        assert_eq!((stats.buffers, stats.allocated_bytes, stats.peak_bytes), (0, 0, 4));
        assert!(matches!(device.destroy_buffer(id), Err(ResourceError::NotFound)));
    }

    #[test]
    fn size_mismatch_is_out_of_bounds() {
        let device = HeadlessDevice::new();
        let result = device.create_buffer_with_data(
            &BufferDescriptor {
                label: None,
                size: 8,
                usage: BufferUsage::INDEX,
                mapped_at_creation: false,
            },
            &[0u8; 4],
        );
        assert!(matches!(result, Err(ResourceError::OutOfBounds)));
    }

    #[test]
    fn empty_shader_source_does_not_compile() {
        let device = HeadlessDevice::new();
        let err = shader(&device, "   ").unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Shader(ShaderError::CompilationError { .. })
        ));
    }

    #[test]
    fn pipeline_checks_modules_and_entry_points() {
        let device = HeadlessDevice::new();
        let module = shader(&device, SHADER).unwrap();

        let id = device
            .create_render_pipeline(&pipeline_descriptor(module, "vs_main", vec![]))
            .unwrap();
        assert_eq!(device.pipeline_label(id), Some(Some("test pipeline".to_string())));

        let err = device
            .create_render_pipeline(&pipeline_descriptor(module, "main", vec![]))
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Shader(ShaderError::InvalidEntryPoint { .. })
        ));

        let err = device
            .create_render_pipeline(&pipeline_descriptor(ShaderModuleId(99), "vs_main", vec![]))
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Pipeline(PipelineError::InvalidShaderModuleForPipeline { .. })
        ));
    }

    #[test]
    fn pipeline_rejects_overlapping_vertex_layout() {
        let device = HeadlessDevice::new();
        let module = shader(&device, SHADER).unwrap();
        let layout = VertexBufferLayoutDescriptor {
            array_stride: 8,
            step_mode: VertexStepMode::Vertex,
            attributes: Cow::Owned(vec![VertexAttributeDescriptor {
                shader_location: 0,
                format: VertexFormat::Float32x3,
                offset: 0,
            }]),
        };
        let err = device
            .create_render_pipeline(&pipeline_descriptor(module, "vs_main", vec![layout]))
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Pipeline(PipelineError::InvalidVertexLayout { slot: 0, .. })
        ));
    }

    #[test]
    fn destroying_unknown_resources_fails() {
        let device = HeadlessDevice::new();
        assert!(matches!(
            device.destroy_shader_module(ShaderModuleId(3)),
            Err(ResourceError::Shader(ShaderError::NotFound { .. }))
        ));
        assert!(matches!(
            device.destroy_render_pipeline(RenderPipelineId(3)),
            Err(ResourceError::Pipeline(PipelineError::InvalidRenderPipeline { .. }))
        ));
    }

    #[test]
    fn unknown_command_buffer_cannot_be_submitted() {
        let device = HeadlessDevice::new();
        assert!(matches!(
            device.submit_command_buffer(CommandBufferId(42)),
            Err(RenderError::UnknownCommandBuffer(42))
        ));
    }
}
