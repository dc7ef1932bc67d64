pub mod aabb;
pub mod resolver;

pub use aabb::{is_aabb_collision, Aabb};
pub use resolver::{corner_position, resolve, CollisionMapInfo, Corner};
