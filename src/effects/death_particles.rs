use std::f32::consts::PI;

use glam::Vec3;

use crate::transform::WorldTransform;
use crate::FRAME_DT;

const PARTICLE_COUNT: usize = 8;
const DURATION: f32 = 1.0;
const SPEED: f32 = 0.08;
const ANGLE_STEP: f32 = PI / 4.0;

/// Ring burst played where the player died.
pub struct DeathParticles {
    transforms: [WorldTransform; PARTICLE_COUNT],
    counter: f32,
    alpha: f32,
    finished: bool,
}

impl DeathParticles {
    pub fn new(position: Vec3) -> Self {
        Self {
            transforms: std::array::from_fn(|_| WorldTransform::at(position)),
            counter: 0.0,
            alpha: 1.0,
            finished: false,
        }
    }

    pub fn update(&mut self) {
        if self.finished {
            return;
        }

        self.counter += FRAME_DT;
        if self.counter >= DURATION {
            self.counter = DURATION;
            self.finished = true;
        }

        for (i, t) in self.transforms.iter_mut().enumerate() {
            let angle = ANGLE_STEP * i as f32;
            t.translation += Vec3::new(angle.cos(), angle.sin(), 0.0) * SPEED;
            t.update_matrix();
        }

        self.alpha = (1.0 - self.counter / DURATION).clamp(0.0, 1.0);
    }

    pub fn is_finished(&self) -> bool { self.finished }
    pub fn alpha(&self) -> f32 { self.alpha }
    pub fn transforms(&self) -> &[WorldTransform] { &self.transforms }
}
