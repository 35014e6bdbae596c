//! Per-node transformation data.
//!
//! Every scene node carries one local [`Instance`] (position, Euler rotation and
//! scale relative to its parent). World transforms are composed as matrices
//! during the scene walk and packed into [`InstanceRaw`] for upload.

use cgmath::{Euler, Matrix, Matrix3, Matrix4, Quaternion, Rad, SquareMatrix, Vector3};

/// Local transformation: position, rotation (XYZ Euler angles) and scale.
///
/// Euler angles are kept instead of a quaternion so that animation code can
/// overwrite a single axis (yaw of a figure, swing of an arm) without
/// disturbing the others.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Euler<Rad<f32>>,
    pub scale: Vector3<f32>,
}

impl Instance {
    /// Create a new instance with identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn quaternion(&self) -> Quaternion<f32> {
        Quaternion::from(self.rotation)
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.quaternion())
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw instance is the actual data handed to the renderer: the world matrix
 * and the matching normal matrix (inverse transpose of the upper 3x3).
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub handedness: f32,
}

impl InstanceRaw {
    pub fn from_world(world: &Matrix4<f32>) -> Self {
        let upper = Matrix3::from_cols(
            world.x.truncate(),
            world.y.truncate(),
            world.z.truncate(),
        );
        // Degenerate scales (a zero axis) have no inverse; fall back to identity normals.
        let normal = upper
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix3::identity);
        InstanceRaw {
            model: (*world).into(),
            normal: normal.into(),
            handedness: world.determinant().signum(),
        }
    }

    pub fn translation(&self) -> Vector3<f32> {
        Vector3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use cgmath::{InnerSpace, Vector4};

    use super::*;

    #[test]
    fn identity_instance_yields_identity_matrix() {
        assert_eq!(Instance::new().to_matrix(), Matrix4::identity());
    }

    #[test]
    fn yaw_rotates_x_axis_towards_negative_z() {
        let mut instance = Instance::new();
        instance.rotation.y = Rad(FRAC_PI_2);
        let rotated = instance.to_matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!((rotated.truncate() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn raw_instance_keeps_translation_and_scale_sign() {
        let instance = Instance::new()
            .with_position(1.0, 2.0, 3.0)
            .with_uniform_scale(0.2);
        let raw = InstanceRaw::from_world(&instance.to_matrix());
        assert_eq!(raw.translation(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(raw.handedness, 1.0);
        // normal matrix of a uniform 0.2 scale is a uniform 5.0 scale
        assert!((raw.normal[0][0] - 5.0).abs() < 1e-4);
    }

    #[test]
    fn zero_scale_falls_back_to_identity_normals() {
        let instance = Instance::new().with_uniform_scale(0.0);
        let raw = InstanceRaw::from_world(&instance.to_matrix());
        let expected: [[f32; 3]; 3] = Matrix3::identity().into();
        assert_eq!(raw.normal, expected);
    }
}
