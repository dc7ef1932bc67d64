use std::f32::consts::PI;

use glam::Vec3;
use tracing::debug;

use crate::collision::{corner_position, resolve, Aabb, CollisionMapInfo, Corner};
use crate::config::PlayerTuning;
use crate::easing::{ease_in, ease_in_out_sine, ease_out, lerp};
use crate::entity::{Enemy, Facing, ENTITY_HALF_EXTENTS};
use crate::input::PlayerInput;
use crate::map::{GridMap, TileType};
use crate::transform::WorldTransform;
use crate::FRAME_DT;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerBehavior {
    /// Walking, jumping, falling and wall jumps.
    Root,
    Attack,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttackPhase {
    Charge,
    Dash,
    CoolDown,
}

fn facing_rotation_y(facing: Facing) -> f32 {
    match facing {
        Facing::Right => PI / 2.0,
        Facing::Left => PI * 3.0 / 2.0,
    }
}

/// The controllable character.
pub struct Player {
    transform: WorldTransform,
    attack_transform: WorldTransform,
    tuning: PlayerTuning,
    velocity: Vec3,

    behavior: PlayerBehavior,
    pending: Option<PlayerBehavior>,

    facing: Facing,
    turn_first_rotation_y: f32,
    turn_timer: f32,

    on_ground: bool,
    /// Air jumps spent since leaving the ground.
    jump_count: u32,
    on_wall: bool,
    wall_direction: i32,

    attack_phase: AttackPhase,
    attack_timer: f32,
    attack_effect_visible: bool,

    dead: bool,
}

impl Player {
    pub fn new(position: Vec3, tuning: &PlayerTuning) -> Self {
        let mut transform = WorldTransform::at(position);
        transform.rotation.y = facing_rotation_y(Facing::Right);
        transform.update_matrix();
        let mut attack_transform = WorldTransform::at(position);
        attack_transform.update_matrix();

        Self {
            transform,
            attack_transform,
            tuning: *tuning,
            velocity: Vec3::ZERO,
            behavior: PlayerBehavior::Root,
            pending: None,
            facing: Facing::Right,
            turn_first_rotation_y: 0.0,
            turn_timer: 0.0,
            on_ground: true,
            jump_count: 0,
            on_wall: false,
            wall_direction: 0,
            attack_phase: AttackPhase::Charge,
            attack_timer: 0.0,
            attack_effect_visible: false,
            dead: false,
        }
    }

    /// Queue a behavior change. It takes effect at the start of the next
    /// `update`; a later request in the same frame replaces an earlier one.
    pub fn request(&mut self, behavior: PlayerBehavior) {
        self.pending = Some(behavior);
    }

    /// Advance one frame.
    pub fn update(&mut self, input: PlayerInput, map: &GridMap) {
        if let Some(next) = self.pending.take() {
            debug!(from = ?self.behavior, to = ?next, "player behavior change");
            self.behavior = next;
            match next {
                PlayerBehavior::Root => self.root_initialize(),
                PlayerBehavior::Attack => self.attack_initialize(),
            }
        }

        match self.behavior {
            PlayerBehavior::Root => self.root_update(input, map),
            PlayerBehavior::Attack => self.attack_update(map),
        }

        self.update_matrices_only();
    }

    /// Refresh the world matrices without simulating. Used while the scene is
    /// frozen (countdown, death, clear).
    pub fn update_matrices_only(&mut self) {
        self.transform.update_matrix();
        self.attack_transform.translation = self.transform.translation;
        self.attack_transform.rotation = self.transform.rotation;
        self.attack_transform.update_matrix();
    }

    // ── Root ──────────────────────────────────────────────────────────────────

    fn root_initialize(&mut self) {
        self.transform.scale = Vec3::ONE;
        self.attack_effect_visible = false;
    }

    fn root_update(&mut self, input: PlayerInput, map: &GridMap) {
        if input.attack {
            self.request(PlayerBehavior::Attack);
        }

        self.update_vertical(input);
        self.update_horizontal(input);
        self.move_with_collision(map);
        self.update_turn();
    }

    fn update_vertical(&mut self, input: PlayerInput) {
        let t = &self.tuning;
        if self.on_ground {
            if self.velocity.y > 0.0 {
                self.on_ground = false;
            }
            if input.jump {
                self.velocity.y = t.jump_speed;
            }
            self.jump_count = 0;
            return;
        }

        self.velocity.y = (self.velocity.y - t.gravity).max(-t.max_fall_speed);

        if input.jump {
            if self.on_wall && self.wall_direction != 0 {
                self.velocity.x = -(self.wall_direction as f32) * t.wall_jump_speed[0];
                self.velocity.y = t.wall_jump_speed[1];
                self.on_wall = false;
                self.wall_direction = 0;
            } else if self.jump_count < t.max_air_jumps {
                self.jump_count += 1;
                self.velocity.y = t.jump_speed;
            }
        }
    }

    fn update_horizontal(&mut self, input: PlayerInput) {
        let t = &self.tuning;
        let direction = if input.right {
            Some(Facing::Right)
        } else if input.left {
            Some(Facing::Left)
        } else {
            None
        };

        let Some(direction) = direction else {
            self.velocity.x *= 1.0 - t.attenuation;
            return;
        };

        // Braking when pushing against the current motion.
        if self.velocity.x * direction.sign() < 0.0 {
            self.velocity.x *= 1.0 - t.attenuation;
        }
        self.velocity.x += direction.sign() * t.acceleration;
        self.velocity.x = self.velocity.x.clamp(-t.max_speed, t.max_speed);

        if self.facing != direction {
            self.facing = direction;
            self.turn_first_rotation_y = self.transform.rotation.y;
            self.turn_timer = t.turn_time;
        }
    }

    fn update_turn(&mut self) {
        if self.turn_timer <= 0.0 {
            return;
        }
        self.turn_timer = (self.turn_timer - FRAME_DT).max(0.0);
        let progress = 1.0 - self.turn_timer / self.tuning.turn_time;
        self.transform.rotation.y = lerp(
            self.turn_first_rotation_y,
            facing_rotation_y(self.facing),
            ease_in_out_sine(progress),
        );
    }

    // ── Attack ────────────────────────────────────────────────────────────────

    fn attack_initialize(&mut self) {
        self.attack_phase = AttackPhase::Charge;
        self.attack_timer = 0.0;
        self.velocity = Vec3::ZERO;
        self.turn_timer = 0.0;
        self.transform.rotation.y = facing_rotation_y(self.facing);
    }

    fn attack_update(&mut self, map: &GridMap) {
        let t = self.tuning;
        self.attack_timer += FRAME_DT;

        match self.attack_phase {
            AttackPhase::Charge => {
                let p = self.attack_timer / t.charge_time;
                self.transform.scale.z = ease_out(1.0, 0.3, p);
                self.transform.scale.y = ease_out(1.0, 1.6, p);
                self.velocity = Vec3::ZERO;
                if self.attack_timer >= t.charge_time {
                    self.enter_attack_phase(AttackPhase::Dash);
                }
            }
            AttackPhase::Dash => {
                let p = self.attack_timer / t.dash_time;
                self.transform.scale.z = ease_out(0.3, 1.3, p);
                self.transform.scale.y = ease_in(1.6, 0.7, p);
                self.velocity = Vec3::new(self.facing.sign() * t.dash_speed, 0.0, 0.0);
                if self.attack_timer >= t.dash_time {
                    self.enter_attack_phase(AttackPhase::CoolDown);
                }
            }
            AttackPhase::CoolDown => {
                let p = self.attack_timer / t.cool_down_time;
                self.transform.scale.z = ease_out(1.3, 1.0, p);
                self.transform.scale.y = ease_out(0.7, 1.0, p);
                self.velocity = Vec3::ZERO;
                if self.attack_timer >= t.cool_down_time {
                    self.request(PlayerBehavior::Root);
                }
            }
        }

        self.attack_effect_visible = self.attack_phase == AttackPhase::Dash;
        self.move_with_collision(map);
    }

    fn enter_attack_phase(&mut self, phase: AttackPhase) {
        debug!(?phase, "attack phase");
        self.attack_phase = phase;
        self.attack_timer = 0.0;
    }

    // ── Grid collision ────────────────────────────────────────────────────────

    fn move_with_collision(&mut self, map: &GridMap) {
        let mut info = CollisionMapInfo::new(self.velocity);
        resolve(
            map,
            self.transform.translation,
            ENTITY_HALF_EXTENTS,
            &mut info,
            self.tuning.clearance,
        );
        self.move_by_collision_result(&info);
        self.change_ground_state(map, &info);
    }

    fn move_by_collision_result(&mut self, info: &CollisionMapInfo) {
        if info.hit_ceiling {
            self.velocity.y = 0.0;
        }
        if info.hit_wall {
            self.velocity.x *= 1.0 - self.tuning.wall_attenuation;
            self.on_wall = true;
            self.wall_direction = info.wall_direction;
        } else {
            self.on_wall = false;
            self.wall_direction = 0;
        }
        self.transform.translation += info.move_amount;
    }

    fn change_ground_state(&mut self, map: &GridMap, info: &CollisionMapInfo) {
        if !self.on_ground {
            if info.hit_landing {
                self.on_ground = true;
                self.jump_count = 0;
                self.velocity.x *= 1.0 - self.tuning.landing_attenuation;
                self.velocity.y = 0.0;
                self.on_wall = false;
                self.wall_direction = 0;
            }
            return;
        }

        if self.velocity.y > 0.0 || !self.has_ground_below(map) {
            self.on_ground = false;
        }
    }

    fn has_ground_below(&self, map: &GridMap) -> bool {
        let probe = Vec3::new(0.0, -self.tuning.ground_check_offset, 0.0);
        [Corner::LeftBottom, Corner::RightBottom].into_iter().any(|c| {
            let at = corner_position(self.transform.translation, ENTITY_HALF_EXTENTS, c) + probe;
            map.tile_at_index(map.index_of(at)) == TileType::Block
        })
    }

    // ── Contacts ──────────────────────────────────────────────────────────────

    /// Touching an enemy is fatal unless mid-attack.
    pub fn on_collision(&mut self, _enemy: &Enemy) {
        if self.is_attacking() {
            return;
        }
        if !self.dead {
            debug!("player killed by enemy contact");
        }
        self.dead = true;
    }

    pub fn aabb(&self) -> Aabb {
        let half = ENTITY_HALF_EXTENTS;
        Aabb::from_center(self.world_position(), Vec3::new(half.x, half.y, half.x))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn transform(&self) -> &WorldTransform { &self.transform }
    pub fn attack_transform(&self) -> &WorldTransform { &self.attack_transform }
    pub fn world_position(&self) -> Vec3 { self.transform.world_position() }
    pub fn translation(&self) -> Vec3 { self.transform.translation }
    pub fn velocity(&self) -> Vec3 { self.velocity }
    pub fn behavior(&self) -> PlayerBehavior { self.behavior }
    pub fn attack_phase(&self) -> AttackPhase { self.attack_phase }
    pub fn is_attacking(&self) -> bool { self.behavior == PlayerBehavior::Attack }
    pub fn is_attack_effect_visible(&self) -> bool { self.attack_effect_visible }
    pub fn facing(&self) -> Facing { self.facing }
    pub fn on_ground(&self) -> bool { self.on_ground }
    pub fn jump_count(&self) -> u32 { self.jump_count }
    pub fn is_on_wall(&self) -> bool { self.on_wall }
    pub fn wall_direction(&self) -> i32 { self.wall_direction }
    pub fn is_dead(&self) -> bool { self.dead }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapSize;

    fn empty_map() -> GridMap {
        GridMap::blank(MapSize::new(4, 4)).unwrap()
    }

    #[test]
    fn spawns_facing_right() {
        let p = Player::new(Vec3::new(1.0, 1.0, 0.0), &PlayerTuning::default());
        assert_eq!(p.facing(), Facing::Right);
        assert!((p.transform().rotation.y - PI / 2.0).abs() < 1e-6);
        assert_eq!(p.world_position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn turning_reaches_left_angle_after_turn_time() {
        let tuning = PlayerTuning::default();
        let mut p = Player::new(Vec3::new(1.0, 10.0, 0.0), &tuning);
        let map = empty_map();
        let left = PlayerInput { left: true, ..PlayerInput::default() };
        let frames = (tuning.turn_time / FRAME_DT).ceil() as usize + 1;
        for _ in 0..frames {
            p.update(left, &map);
        }
        assert_eq!(p.facing(), Facing::Left);
        assert!((p.transform().rotation.y - PI * 1.5).abs() < 1e-4);
    }

    #[test]
    fn no_input_decays_horizontal_speed() {
        let mut p = Player::new(Vec3::new(1.0, 10.0, 0.0), &PlayerTuning::default());
        let map = empty_map();
        let right = PlayerInput { right: true, ..PlayerInput::default() };
        for _ in 0..10 {
            p.update(right, &map);
        }
        let before = p.velocity().x;
        p.update(PlayerInput::default(), &map);
        assert!(p.velocity().x < before);
        assert!(p.velocity().x > 0.0);
    }
}
