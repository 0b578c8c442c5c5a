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

// Tessera Sandbox
// Loads an OBJ model and renders a few frames on the headless backend.

mod config;
mod summary;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tessera_core::renderer::{GraphicsDevice, RenderPassDescriptor};
use tessera_infra::HeadlessDevice;
use tessera_io::ObjMeshSource;
use tessera_lanes::{Model, ModelRenderLane};

use crate::config::SandboxConfig;
use crate::summary::CommandSummary;

const CLEAR_COLOR: [f32; 4] = [0.1, 0.2, 0.3, 1.0];

fn run(model_path: &Path, config: &SandboxConfig) -> Result<()> {
    let device = HeadlessDevice::new();

    let model = Model::create(
        &device,
        &ObjMeshSource,
        model_path,
        None,
        &config.settings,
    )
    .with_context(|| format!("failed to create model from '{}'", model_path.display()))?;

    for (name, draw) in model.fragment_names().iter().zip(model.draws()) {
        log::info!(
            " -> fragment '{}': indices {:?}, diffuse {:?}",
            name,
            draw.range.as_range(),
            draw.material.diffuse
        );
    }

    let projection = config.camera.projection();
    let view = config.camera.view()?;
    let lane = ModelRenderLane::new();

    for frame in 0..config.frames {
        let transform = config.transform.at_frame(frame);
        let mut encoder = device.create_command_encoder(Some("Sandbox Frame Encoder"));
        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Model Pass"),
                clear_color: Some(CLEAR_COLOR),
            });
            let state = lane.draw(&model, pass.as_mut(), &projection, &view, &transform);
            log::debug!("Frame {}: {} draw calls recorded", frame, state.draw_calls);
        }
        device
            .submit_command_buffer(encoder.finish())
            .with_context(|| format!("failed to submit frame {frame}"))?;
    }

    let summary = CommandSummary::from_submitted(&device.take_submitted()?);
    log::info!(
        "Rendered {} frames: {} passes, {} draw calls, {} indices, {} material writes, {} uniform bytes",
        summary.command_buffers,
        summary.render_passes,
        summary.draw_calls,
        summary.indices_drawn,
        summary.material_writes,
        summary.uniform_bytes
    );

    model
        .destroy(&device)
        .context("failed to release model resources")?;

    let stats = device.stats()?;
    log::info!(
        "Device after teardown: {} buffers, {} pipelines, {} bytes live, {} bytes peak",
        stats.buffers,
        stats.pipelines,
        stats.allocated_bytes,
        stats.peak_bytes
    );
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let mut args = std::env::args().skip(1);
    let model_path = args
        .next()
        .map(PathBuf::from)
        .context("usage: sandbox <model.obj> [config.ron]")?;
    let config_path = args.next().map(PathBuf::from);
    let config = SandboxConfig::load(config_path.as_deref())?;

    Builder::from_env(Env::default().default_filter_or(config.log_filter.as_str())).init();
    run(&model_path, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_lantern_renders_and_tears_down() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/lantern.obj");
        run(&path, &SandboxConfig::default()).unwrap();
    }

    #[test]
    fn missing_model_is_reported() {
        let err = run(Path::new("does/not/exist.obj"), &SandboxConfig::default()).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.obj"));
    }
}
