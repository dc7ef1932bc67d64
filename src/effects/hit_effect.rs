use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::easing::ease_out_cubic;
use crate::transform::WorldTransform;
use crate::FRAME_DT;

pub const EXPANSION_TIME: f32 = 0.1;
pub const FADE_OUT_TIME: f32 = 0.5;
const CIRCLE_GROWTH: f32 = 0.03;
const ELLIPSE_GROWTH: f32 = 0.01;
const ELLIPSE_COUNT: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitEffectState {
    Expansion,
    FadeOut,
    /// Finished; the owner removes it on its next update.
    Disappear,
}

/// Impact flash: a growing circle with two thin crossed streaks.
pub struct HitEffect {
    state: HitEffectState,
    counter: f32,
    alpha: f32,
    circle: WorldTransform,
    ellipses: [WorldTransform; ELLIPSE_COUNT],
}

impl HitEffect {
    pub fn new<R: Rng>(position: Vec3, rng: &mut R) -> Self {
        let mut circle = WorldTransform::at(position);
        circle.update_matrix();

        let ellipses = std::array::from_fn(|_| {
            let mut t = WorldTransform::at(position);
            t.scale = Vec3::new(0.2, 3.0, 1.0);
            t.rotation.z = rng.gen_range(-PI..=PI);
            t.update_matrix();
            t
        });

        Self { state: HitEffectState::Expansion, counter: 0.0, alpha: 1.0, circle, ellipses }
    }

    pub fn update(&mut self) {
        self.counter += FRAME_DT;

        match self.state {
            HitEffectState::Expansion => {
                self.circle.scale += Vec3::splat(CIRCLE_GROWTH);
                for e in &mut self.ellipses {
                    e.scale += Vec3::splat(ELLIPSE_GROWTH);
                }
                if self.counter >= EXPANSION_TIME {
                    self.state = HitEffectState::FadeOut;
                    self.counter = 0.0;
                }
            }
            HitEffectState::FadeOut => {
                self.alpha = 1.0 - ease_out_cubic(self.counter / FADE_OUT_TIME);
                if self.counter >= FADE_OUT_TIME {
                    self.state = HitEffectState::Disappear;
                    self.counter = 0.0;
                }
            }
            HitEffectState::Disappear => {}
        }

        self.circle.update_matrix();
        for e in &mut self.ellipses {
            e.update_matrix();
        }
    }

    pub fn state(&self) -> HitEffectState { self.state }
    pub fn alpha(&self) -> f32 { self.alpha }
    pub fn is_dead(&self) -> bool { self.state == HitEffectState::Disappear }

    /// Circle first, then the streaks.
    pub fn transforms(&self) -> impl Iterator<Item = &WorldTransform> {
        std::iter::once(&self.circle).chain(self.ellipses.iter())
    }
}
