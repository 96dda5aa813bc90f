/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// A projected point: pixel coordinates plus NDC depth (smaller is closer)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Camera looking at the origin, where recentered meshes live
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    /// Camera framing the unit sphere for a `width` x `height` viewport
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: width.max(1) as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        };
        camera.frame_radius(1.0);
        camera
    }

    /// Back the camera off along its view axis until a sphere of `radius`
    /// around the target fits inside the vertical field of view
    pub fn frame_radius(&mut self, radius: f32) {
        let radius = radius.max(f32::EPSILON);
        let distance = radius / (self.fov / 2.0).sin() * 1.1;
        let direction = (self.position - self.target)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::z);
        self.position = self.target + direction * distance;
        self.near = (distance - radius * 1.5).max(distance * 0.01);
        self.far = distance + radius * 1.5;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                // Same visible height at the target as the perspective view
                let distance = (self.position - self.target).norm();
                let height = 2.0 * distance * (self.fov / 2.0).tan();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a world-space point to screen space, `None` when it falls
    /// outside the view volume
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let clip = self.projection_matrix() * self.view_matrix() * point.to_homogeneous();

        // Behind the eye or on the eye plane
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.iter().any(|c| !(-1.0..=1.0).contains(c)) {
            return None;
        }

        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * width as f32,
            y: (1.0 - ndc.y) * 0.5 * height as f32,
            depth: ndc.z,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(camera.near > 0.0 && camera.near < camera.far);
    }

    #[test]
    fn test_framed_sphere_is_visible() {
        let mut camera = Camera::new(100, 100);
        camera.frame_radius(10.0);

        for p in [
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(0.0, -10.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(0.0, 0.0, -10.0),
        ] {
            assert!(camera.project_to_screen(&p, 100, 100).is_some(), "{p:?}");
        }
    }

    #[test]
    fn test_origin_projects_to_centre() {
        let mut camera = Camera::new(80, 40);
        for _ in 0..2 {
            let p = camera.project_to_screen(&Point3::origin(), 80, 40).unwrap();
            assert!((p.x - 40.0).abs() < 1e-3);
            assert!((p.y - 20.0).abs() < 1e-3);
            camera.toggle_mode();
        }
        assert_eq!(camera.mode, ProjectionMode::Perspective);
    }

    #[test]
    fn test_nearer_points_have_smaller_depth() {
        let camera = Camera::default();
        let near = camera
            .project_to_screen(&Point3::new(0.0, 0.0, 0.5), 800, 600)
            .unwrap();
        let far = camera
            .project_to_screen(&Point3::new(0.0, 0.0, -0.5), 800, 600)
            .unwrap();
        assert!(near.depth < far.depth);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::default();
        let behind = camera.position + Vector3::new(0.0, 0.0, 1.0);
        assert!(camera.project_to_screen(&behind, 800, 600).is_none());
    }
}
