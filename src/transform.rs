use glam::{Mat4, Vec3};

/// Per-object constant uploaded to the GPU: the world matrix only.
///
/// Layout matches WGSL/HLSL `mat4x4<f32>` (column-major).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub mat_world: [[f32; 4]; 4],
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self { mat_world: Mat4::IDENTITY.to_cols_array_2d() }
    }
}

/// Compose scale, Euler rotation (X, then Y, then Z) and translation.
///
/// Points are scaled first, rotated about X, Y and Z in that order, and
/// finally translated. This is a pure function so it can be tested without
/// any entity.
pub fn make_affine_matrix(scale: Vec3, rotation: Vec3, translation: Vec3) -> Mat4 {
    let rotate = Mat4::from_rotation_z(rotation.z)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_x(rotation.x);
    Mat4::from_translation(translation) * rotate * Mat4::from_scale(scale)
}

/// Scale/rotation/translation owned by one drawable, plus its derived matrix.
///
/// `mat_world` is only written by [`WorldTransform::update_matrix`], which
/// callers run once per frame after the frame's SRT values are final.
#[derive(Clone, Debug)]
pub struct WorldTransform {
    pub scale: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub translation: Vec3,
    mat_world: Mat4,
    constant: TransformUniform,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            translation: Vec3::ZERO,
            mat_world: Mat4::IDENTITY,
            constant: TransformUniform::default(),
        }
    }
}

impl WorldTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(translation: Vec3) -> Self {
        Self { translation, ..Self::default() }
    }

    /// Recompute `mat_world` from the current SRT and push it to the constant.
    pub fn update_matrix(&mut self) {
        self.mat_world = make_affine_matrix(self.scale, self.rotation, self.translation);
        self.transfer_matrix();
    }

    /// Copy `mat_world` into the GPU-layout constant without recomputing it.
    pub fn transfer_matrix(&mut self) {
        self.constant.mat_world = self.mat_world.to_cols_array_2d();
    }

    pub fn mat_world(&self) -> Mat4 {
        self.mat_world
    }

    pub fn constant(&self) -> &TransformUniform {
        &self.constant
    }

    /// Translation column of the last computed world matrix.
    pub fn world_position(&self) -> Vec3 {
        self.mat_world.w_axis.truncate()
    }
}
