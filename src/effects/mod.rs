//! Cosmetic particle systems. None of them affect gameplay state.

pub mod death_particles;
pub mod fireworks;
pub mod hit_effect;

pub use death_particles::DeathParticles;
pub use fireworks::{Fireworks, Spark};
pub use hit_effect::{HitEffect, HitEffectState};
