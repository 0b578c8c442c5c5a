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

use crate::math::Vec3;
use crate::renderer::api::MaterialUniforms;

/// Material values as read from the mesh source.
///
/// Missing colors are black and a missing exponent is `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDescriptor {
    /// Material name in the source, or `"default"`.
    pub name: String,
    /// Ambient color (`Ka`).
    pub ambient: Vec3,
    /// Diffuse color (`Kd`).
    pub diffuse: Vec3,
    /// Specular color (`Ks`).
    pub specular: Vec3,
    /// Specular exponent (`Ns`).
    pub shininess: f32,
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self {
            name: "default".to_owned(),
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            shininess: 0.0,
        }
    }
}

/// A Phong material ready to be applied to a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    /// Ambient color.
    pub ambient: Vec3,
    /// Diffuse color.
    pub diffuse: Vec3,
    /// Specular color.
    pub specular: Vec3,
    /// Specular exponent.
    pub shininess: f32,
    /// Scale applied to the ambient term.
    pub ambient_intensity: f32,
    /// Scale applied to the diffuse term.
    pub diffuse_intensity: f32,
    /// Scale applied to the specular term.
    pub specular_intensity: f32,
    /// Asks the shader to flag out-of-range lighting results.
    pub with_error_check: bool,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self::from_descriptor(&MaterialDescriptor::default())
    }
}

impl PhongMaterial {
    /// Takes colors and shininess from `descriptor`, with default intensities
    /// (ambient 0.2, diffuse 0.8, specular 0.2) and error checking off.
    pub fn from_descriptor(descriptor: &MaterialDescriptor) -> Self {
        Self {
            ambient: descriptor.ambient,
            diffuse: descriptor.diffuse,
            specular: descriptor.specular,
            shininess: descriptor.shininess,
            ambient_intensity: 0.2,
            diffuse_intensity: 0.8,
            specular_intensity: 0.2,
            with_error_check: false,
        }
    }

    /// Replaces the three intensity scalars.
    #[must_use]
    pub fn with_intensities(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient_intensity = ambient;
        self.diffuse_intensity = diffuse;
        self.specular_intensity = specular;
        self
    }

    /// Sets the error-check flag.
    #[must_use]
    pub fn with_error_check(mut self, enabled: bool) -> Self {
        self.with_error_check = enabled;
        self
    }

    /// Packs the material into its uniform block.
    pub fn to_uniforms(&self) -> MaterialUniforms {
        let pack = |c: Vec3, i: f32| [c.x, c.y, c.z, i];
        MaterialUniforms {
            ambient: pack(self.ambient, self.ambient_intensity),
            diffuse: pack(self.diffuse, self.diffuse_intensity),
            specular: pack(self.specular, self.specular_intensity),
            params: [
                self.shininess,
                if self.with_error_check { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}
