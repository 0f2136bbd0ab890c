//! Free-fly camera and projection utilities
use nalgebra::{Matrix4, Point3, Rotation3, Unit, Vector3};

/// Radians of view rotation per unit of mouse movement
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.0075;

/// Camera configuration for 3D rendering
///
/// The view direction is free; the up vector stays fixed and is used as the
/// yaw axis and, crossed with the view direction, to get the right vector.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub view_direction: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub look_sensitivity: f32,
    last_mouse: Option<(f32, f32)>,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            eye: Point3::origin(),
            view_direction: -Vector3::z(),
            up: Vector3::y(),
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect,
            near: 0.1,
            far: 20.0,
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
            last_mouse: None,
        };
        camera.reset();
        camera
    }

    /// Move back to the default eye, looking down -Z with Y up
    pub fn reset(&mut self) {
        self.eye = Point3::new(0.0, 0.0, 8.0);
        self.view_direction = Vector3::new(0.0, 0.0, -1.0);
        self.up = Vector3::new(0.0, 1.0, 0.0);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn right(&self) -> Vector3<f32> {
        self.view_direction.cross(&self.up)
    }

    pub fn move_forward(&mut self, speed: f32) {
        self.eye += speed * self.view_direction;
    }

    pub fn move_backward(&mut self, speed: f32) {
        self.eye -= speed * self.view_direction;
    }

    pub fn move_left(&mut self, speed: f32) {
        self.eye -= speed * self.right();
    }

    pub fn move_right(&mut self, speed: f32) {
        self.eye += speed * self.right();
    }

    pub fn move_up(&mut self, speed: f32) {
        self.eye += speed * self.up;
    }

    pub fn move_down(&mut self, speed: f32) {
        self.eye -= speed * self.up;
    }

    /// Turn the view by the mouse movement since the previous sample.
    ///
    /// The first sample only records the mouse position.
    pub fn mouse_look(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let right = self.right();
            let yaw = Rotation3::from_axis_angle(
                &Unit::new_normalize(self.up),
                -self.look_sensitivity * (x - last_x),
            );
            self.view_direction = yaw * self.view_direction;
            if right.norm() > 1e-6 {
                let pitch = Rotation3::from_axis_angle(
                    &Unit::new_normalize(right),
                    -self.look_sensitivity * (y - last_y),
                );
                self.view_direction = pitch * self.view_direction;
            }
        }
        self.last_mouse = Some((x, y));
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &(self.eye + self.view_direction), &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space
    ///
    /// Returns `(x, y, depth)` with depth in normalized device coordinates.
    /// Points behind the eye or outside the depth range give `None`; points
    /// beside the screen are returned so that triangles can be clipped by the
    /// rasterizer.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        let mvp = projection * view * model_matrix;

        // Transform to clip space
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&depth) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800.0 / 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.eye, Point3::new(0.0, 0.0, 8.0));
        assert_eq!(camera.view_direction, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.up, Vector3::y());
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_movement() {
        let mut camera = Camera::default();
        camera.move_forward(1.0);
        assert_eq!(camera.eye, Point3::new(0.0, 0.0, 7.0));
        camera.move_right(2.0);
        assert_eq!(camera.eye, Point3::new(2.0, 0.0, 7.0));
        camera.move_up(1.0);
        camera.move_left(2.0);
        camera.move_backward(1.0);
        camera.move_down(1.0);
        assert_eq!(camera.eye, Point3::new(0.0, 0.0, 8.0));
    }

    #[test]
    fn test_mouse_look_yaw() {
        let mut camera = Camera::default();
        camera.mouse_look(10.0, 10.0);
        assert_eq!(camera.view_direction, -Vector3::z());

        // Moving the mouse right turns the view right.
        let quarter = std::f32::consts::FRAC_PI_2 / camera.look_sensitivity;
        camera.mouse_look(10.0 + quarter, 10.0);
        assert!((camera.view_direction - Vector3::x()).norm() < 1e-4);
    }

    #[test]
    fn test_mouse_look_pitch() {
        let mut camera = Camera::default();
        camera.mouse_look(0.0, 0.0);
        camera.mouse_look(0.0, -10.0);
        // Moving the mouse up tilts the view up.
        assert!(camera.view_direction.y > 0.0);
    }

    #[test]
    fn test_reset_restores_view() {
        let mut camera = Camera::default();
        camera.mouse_look(0.0, 0.0);
        camera.mouse_look(30.0, 20.0);
        camera.move_forward(3.0);
        camera.reset();
        assert_eq!(camera.eye, Point3::new(0.0, 0.0, 8.0));
        assert_eq!(camera.view_direction, -Vector3::z());
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::default();
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-4);
        assert!((y - 20.0).abs() < 1e-4);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = Camera::default();
        let behind = Point3::new(0.0, 0.0, 9.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 80, 40)
            .is_none());
    }
}
