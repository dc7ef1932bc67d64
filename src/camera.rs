use glam::{Mat4, Vec3};

use crate::transform::make_affine_matrix;

/// Camera uniform uploaded to the GPU: view and projection, column-major.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

/// Perspective 3D camera. Left-handed: +Z points into the screen, so a
/// camera at negative Z looks toward the stage.
#[derive(Clone, Debug)]
pub struct Camera {
    pub translation: Vec3,
    pub rotation: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    view: Mat4,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            translation: Vec3::new(0.0, 0.0, -50.0),
            rotation: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 2000.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_matrix();
        camera
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild view and projection from the current fields.
    pub fn update_matrix(&mut self) {
        self.view = make_affine_matrix(Vec3::ONE, self.rotation, self.translation).inverse();
        self.projection = Mat4::perspective_lh(self.fov_y, self.aspect, self.near, self.far);
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
        }
    }
}

/// Clamp bounds for the camera position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovableArea {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for MovableArea {
    fn default() -> Self {
        Self { left: 0.0, right: 100.0, bottom: 0.0, top: 100.0 }
    }
}

/// Follows a target with velocity look-ahead and exponential smoothing.
#[derive(Clone, Debug)]
pub struct CameraController {
    pub camera: Camera,
    pub target_offset: Vec3,
    pub movable_area: MovableArea,
    /// Fraction of the remaining distance covered each frame.
    pub interpolation_rate: f32,
    pub velocity_smooth_rate: f32,
    pub look_ahead_scale_x: f32,
    pub look_ahead_scale_y: f32,
    /// Extra damping on vertical look-ahead.
    pub vertical_damping: f32,
    smoothed_velocity: Vec3,
    target_position: Vec3,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            target_offset: Vec3::new(0.0, 0.0, -15.0),
            movable_area: MovableArea::default(),
            interpolation_rate: 0.3,
            velocity_smooth_rate: 0.12,
            look_ahead_scale_x: 12.0,
            look_ahead_scale_y: 4.0,
            vertical_damping: 0.3,
            smoothed_velocity: Vec3::ZERO,
            target_position: Vec3::ZERO,
        }
    }
}

impl CameraController {
    pub fn new(movable_area: MovableArea) -> Self {
        Self { movable_area, ..Self::default() }
    }

    /// Snap onto the target without smoothing.
    pub fn reset(&mut self, target: Vec3) {
        self.smoothed_velocity = Vec3::ZERO;
        self.target_position = target + self.target_offset;
        self.camera.translation = self.target_position;
        self.camera.update_matrix();
    }

    pub fn update(&mut self, target: Vec3, target_velocity: Vec3) {
        self.smoothed_velocity =
            self.smoothed_velocity.lerp(target_velocity, self.velocity_smooth_rate);

        let look_ahead = Vec3::new(
            self.smoothed_velocity.x * self.look_ahead_scale_x,
            self.smoothed_velocity.y * self.look_ahead_scale_y * self.vertical_damping,
            0.0,
        );
        self.target_position = target + self.target_offset + look_ahead;

        let area = self.movable_area;
        let mut position =
            self.camera.translation.lerp(self.target_position, self.interpolation_rate);
        // Not `clamp`: maps narrower than the view give left > right.
        position.x = position.x.max(area.left).min(area.right);
        position.y = position.y.max(area.bottom).min(area.top);
        self.camera.translation = position;
        self.camera.update_matrix();
    }

    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_snaps_to_target_plus_offset() {
        let mut c = CameraController::new(MovableArea { left: 0.0, right: 50.0, bottom: 0.0, top: 50.0 });
        c.reset(Vec3::new(10.0, 5.0, 0.0));
        assert_eq!(c.camera.translation, Vec3::new(10.0, 5.0, -15.0));
    }

    #[test]
    fn follow_moves_part_way_and_respects_bounds() {
        let mut c = CameraController::new(MovableArea { left: 12.0, right: 88.0, bottom: 6.0, top: 6.0 });
        c.reset(Vec3::new(20.0, 6.0, 0.0));
        c.update(Vec3::new(30.0, 6.0, 0.0), Vec3::ZERO);
        assert!((c.camera.translation.x - 23.0).abs() < 1e-4);
        assert_eq!(c.camera.translation.y, 6.0);

        c.reset(Vec3::new(0.0, 0.0, 0.0));
        c.update(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(c.camera.translation.x, 12.0);
    }

    #[test]
    fn view_maps_camera_position_to_origin() {
        let mut camera = Camera::new();
        camera.translation = Vec3::new(3.0, 4.0, -15.0);
        camera.update_matrix();
        let p = camera.view().transform_point3(Vec3::new(3.0, 4.0, -15.0));
        assert!(p.length() < 1e-4);
    }
}
