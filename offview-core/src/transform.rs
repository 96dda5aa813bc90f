/// Model transforms for viewing a recentered mesh
use nalgebra::Matrix4;

use crate::bounds::BoundingSphere;
use crate::vector::{rotation_matrix, Axis};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// Builders for 4x4 model matrices
pub struct Transform;

impl Transform {
    /// Elementary axis rotations applied X first, then Y, then Z
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = rotation_matrix(Axis::X, rotation.x);
        let ry = rotation_matrix(Axis::Y, rotation.y);
        let rz = rotation_matrix(Axis::Z, rotation.z);

        (rz * ry * rx).to_homogeneous()
    }

    pub fn uniform_scale(scale: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(scale)
    }

    /// Scale factor that maps a bounding sphere onto the unit sphere.
    /// A zero radius (a single point) leaves the mesh unscaled.
    pub fn fit_unit_sphere(sphere: &BoundingSphere) -> f32 {
        if sphere.radius > f32::EPSILON {
            1.0 / sphere.radius
        } else {
            1.0
        }
    }

    /// Scale first, then rotate about the origin
    pub fn model_matrix(rotation: &RotationState, scale: f32) -> Matrix4<f32> {
        Self::rotation_matrix(rotation) * Self::uniform_scale(scale)
    }
}
