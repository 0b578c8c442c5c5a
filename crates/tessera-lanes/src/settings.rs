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

//! Settings applied to every model built by this crate.

use serde::Deserialize;
use tessera_core::mesh::{MaterialDescriptor, PhongMaterial};

/// Material intensities and assembly switches.
///
/// Missing fields take their [`Default`] value when deserialized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Ambient intensity given to every material.
    pub ambient_intensity: f32,
    /// Diffuse intensity given to every material.
    pub diffuse_intensity: f32,
    /// Specular intensity given to every material.
    pub specular_intensity: f32,
    /// Error-check flag given to every material.
    pub with_error_check: bool,
    /// Reject local indices outside their fragment instead of passing them on.
    pub validate_indices: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.2,
            diffuse_intensity: 0.8,
            specular_intensity: 0.2,
            with_error_check: false,
            validate_indices: true,
        }
    }
}

impl ModelSettings {
    /// Builds the runtime material for a source descriptor.
    pub fn material_for(&self, descriptor: &MaterialDescriptor) -> PhongMaterial {
        PhongMaterial::from_descriptor(descriptor)
            .with_intensities(
                self.ambient_intensity,
                self.diffuse_intensity,
                self.specular_intensity,
            )
            .with_error_check(self.with_error_check)
    }
}
