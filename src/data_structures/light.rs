use cgmath::Vector3;

use crate::data_structures::material::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Omnidirectional light emitted from `position`.
    Point { position: Vector3<f32> },
    /// Parallel light shining from `position` towards the origin.
    Directional { position: Vector3<f32> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    pub fn point(color: Color, intensity: f32, position: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Point {
                position: position.into(),
            },
            color,
            intensity,
        }
    }

    pub fn directional(color: Color, intensity: f32, position: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Directional {
                position: position.into(),
            },
            color,
            intensity,
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        let (kind, position) = match self.kind {
            LightKind::Ambient => (0, [0.0; 3]),
            LightKind::Point { position } => (1, position.into()),
            LightKind::Directional { position } => (2, position.into()),
        };
        let [r, g, b] = self.color.to_linear();
        LightUniform {
            position,
            kind,
            color: [r * self.intensity, g * self.intensity, b * self.intensity],
            _padding: 0,
        }
    }
}

/// GPU layout of a light, premultiplied by its intensity.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub kind: u32,
    pub color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    pub _padding: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_premultiplies_intensity() {
        let uniform = Light::ambient(Color::WHITE, 0.2).to_uniform();
        assert_eq!(uniform.kind, 0);
        assert_eq!(uniform.color, [0.2, 0.2, 0.2]);
    }

    #[test]
    fn point_light_keeps_position() {
        let uniform = Light::point(Color::WHITE, 1.0, [5.0, 3.0, 5.0]).to_uniform();
        assert_eq!(uniform.kind, 1);
        assert_eq!(uniform.position, [5.0, 3.0, 5.0]);
        assert_eq!(std::mem::size_of::<LightUniform>(), 32);
    }
}
