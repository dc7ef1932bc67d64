// =============================================================================
// FIREWORKS.RS: Variable-timestep spark bursts for the stage-clear celebration
//
// Unlike the rest of the simulation this system integrates with a caller-
// supplied dt. Drag is expressed per 1/60 s frame and rescaled by `dt * 60`
// so that the falloff is roughly frame-rate independent.
// =============================================================================

use std::f32::consts::PI;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::easing::{lerp, smoothstep};
use crate::transform::WorldTransform;

const GRAVITY: f32 = -9.8 * 0.6;
const DRAG_PER_FRAME: f32 = 0.98;
const START_SCALE_MIN: f32 = 0.12;
const START_SCALE_MAX: f32 = 0.22;

pub struct Spark {
    pub transform: WorldTransform,
    pub velocity: Vec3,
    pub elapsed: f32,
    pub lifetime: f32,
    pub start_scale: f32,
    pub end_scale: f32,
}

pub struct Fireworks {
    sparks: Vec<Spark>,
    rng: StdRng,
}

impl Fireworks {
    pub fn new(seed: u64) -> Self {
        Self { sparks: Vec::new(), rng: StdRng::seed_from_u64(seed) }
    }

    /// Emit `count` sparks in uniformly random directions over the sphere of
    /// azimuth/polar angles.
    pub fn burst(
        &mut self,
        center: Vec3,
        count: usize,
        min_speed: f32,
        max_speed: f32,
        min_life: f32,
        max_life: f32,
    ) {
        self.sparks.reserve(count);
        for _ in 0..count {
            let azimuth = self.rng.gen_range(0.0..=2.0 * PI);
            let polar = self.rng.gen_range(0.0..=PI);
            let speed = self.rng.gen_range(min_speed..=max_speed);
            let direction = Vec3::new(
                polar.sin() * azimuth.cos(),
                polar.cos(),
                polar.sin() * azimuth.sin(),
            );

            let mut transform = WorldTransform::at(center);
            transform.update_matrix();
            self.sparks.push(Spark {
                transform,
                velocity: direction * speed,
                elapsed: 0.0,
                lifetime: self.rng.gen_range(min_life..=max_life),
                start_scale: self.rng.gen_range(START_SCALE_MIN..=START_SCALE_MAX),
                end_scale: 0.0,
            });
        }
    }

    /// Integrate every spark, then drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        let drag = DRAG_PER_FRAME.powf(dt * 60.0);

        for s in &mut self.sparks {
            s.elapsed += dt;
            if s.elapsed >= s.lifetime {
                continue;
            }

            s.velocity.y += GRAVITY * dt;
            s.velocity *= drag;
            s.transform.translation += s.velocity * dt;

            let scale = lerp(s.start_scale, s.end_scale, smoothstep(s.elapsed / s.lifetime));
            s.transform.scale = Vec3::splat(scale);
            s.transform.update_matrix();
        }

        self.sparks.retain(|s| s.elapsed < s.lifetime);
    }

    pub fn sparks(&self) -> &[Spark] { &self.sparks }
    pub fn len(&self) -> usize { self.sparks.len() }
    pub fn is_empty(&self) -> bool { self.sparks.is_empty() }

    pub fn clear(&mut self) {
        self.sparks.clear();
    }
}
