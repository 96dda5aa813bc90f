/// Centroid, bounding sphere and recentering for meshes
use nalgebra::{Point3, Vector3};

use crate::error::MeshError;
use crate::geometry::Mesh;

/// Sphere enclosing every vertex of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Mesh {
    /// Arithmetic mean of all vertex positions
    pub fn centroid(&self) -> Result<Point3<f32>, MeshError> {
        if self.vertices().is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        let sum = self
            .vertices()
            .iter()
            .fold(Vector3::<f32>::zeros(), |acc, v| acc + v.coords);
        Ok(Point3::from(sum / self.vertex_count() as f32))
    }

    /// Largest distance from `centroid` to any vertex
    pub fn bounding_radius(&self, centroid: &Point3<f32>) -> Result<f32, MeshError> {
        if self.vertices().is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        Ok(self
            .vertices()
            .iter()
            .map(|v| nalgebra::distance(v, centroid))
            .fold(0.0, f32::max))
    }

    /// Shift every vertex by `-centroid`.
    ///
    /// Applying this twice with the same point shifts twice; recompute the
    /// centroid between calls to re-center.
    pub fn normalize(&mut self, centroid: &Point3<f32>) {
        let offset = centroid.coords;
        for vertex in self.vertices_mut() {
            *vertex -= offset;
        }
    }

    pub fn bounding_sphere(&self) -> Result<BoundingSphere, MeshError> {
        let center = self.centroid()?;
        let radius = self.bounding_radius(&center)?;
        Ok(BoundingSphere { center, radius })
    }

    /// Move the centroid to the origin. Returns the sphere measured before the
    /// move, so `center` is the offset that was removed.
    pub fn recenter(&mut self) -> Result<BoundingSphere, MeshError> {
        let sphere = self.bounding_sphere()?;
        self.normalize(&sphere.center);
        Ok(sphere)
    }
}
