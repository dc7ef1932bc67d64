pub mod camera;
pub mod collision;
pub mod config;
pub mod easing;
pub mod effects;
pub mod entity;
pub mod error;
pub mod fade;
pub mod input;
pub mod map;
pub mod render;
pub mod scene;
pub mod transform;

/// Fixed simulation step. Every timer except the fireworks advances by this.
pub const FRAME_DT: f32 = 1.0 / 60.0;
