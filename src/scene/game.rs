// =============================================================================
// GAME.RS: One stage from fade-in to fade-out
//
// Phases:
//
//   FadeIn ──► Play ──► Death ──► FadeOut ──► (finished)
//                 └───► Clear ──► FadeOut
//
// Every FadeIn frame also runs the Play update, so the world is live (and the
// countdown is already ticking) while the screen clears. Player, enemies and
// collisions only simulate once the start countdown has finished; before that
// the player just refreshes its matrices.
//
// Dead enemies and finished hit effects are removed at the top of the next
// frame, never while a list is being iterated.
// =============================================================================

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::info;

use crate::camera::CameraController;
use crate::collision::{is_aabb_collision, Aabb};
use crate::config::Tuning;
use crate::easing::{ease_out_back, lerp, smoothstep};
use crate::effects::{DeathParticles, Fireworks, HitEffect};
use crate::entity::{Enemy, Player, SceneHooks};
use crate::fade::{Fade, FadeStatus};
use crate::input::{GameAction, PlayerInput};
use crate::map::{GridMap, TileIndex};
use crate::render::{DrawSink, ModelKind, SpriteKind, SpriteParams};
use crate::scene::{
    block_transforms, goal_transform, stage_camera, FrameContext, Scene, SceneAction,
    StartCountdown, StartPhase,
};
use crate::transform::WorldTransform;
use crate::FRAME_DT;

const GOAL_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 0.5, 0.5);

const OPENING_BURSTS: [Vec3; 3] =
    [Vec3::new(-4.0, 7.0, 0.0), Vec3::new(0.0, 9.0, 0.0), Vec3::new(4.0, 11.0, 0.0)];
const FIRST_FIREWORK_DELAY: f32 = 0.25;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GamePhase {
    FadeIn,
    Play,
    Death,
    Clear,
    FadeOut,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClearStep {
    /// Vignette darkens.
    Slow,
    /// Banner pops in.
    BannerIn,
    /// Fireworks until the player confirms.
    ShowTime,
}

/// Routes entity requests into the scene's effect list.
struct EffectSpawner<'a> {
    effects: &'a mut Vec<HitEffect>,
    rng: &'a mut StdRng,
}

impl SceneHooks for EffectSpawner<'_> {
    fn spawn_hit_effect(&mut self, position: Vec3) {
        self.effects.push(HitEffect::new(position, &mut *self.rng));
    }
}

pub struct GameScene {
    tuning: Tuning,
    map: GridMap,
    phase: GamePhase,
    fade: Fade,
    countdown: StartCountdown,

    skydome: WorldTransform,
    blocks: Vec<WorldTransform>,
    goal: Option<WorldTransform>,

    player: Player,
    enemies: Vec<Enemy>,
    hit_effects: Vec<HitEffect>,
    death_particles: Option<DeathParticles>,

    camera: CameraController,
    rng: StdRng,

    clear_step: ClearStep,
    clear_timer: f32,
    vignette_alpha: f32,
    banner_scale: f32,
    banner_alpha: f32,
    blink_alpha: f32,
    fireworks: Fireworks,
    firework_timer: f32,
    next_firework: f32,

    finished: bool,
}

fn tile_index(tile: [i32; 2]) -> TileIndex {
    TileIndex::new(tile[0], tile[1])
}

impl GameScene {
    pub fn new(map: GridMap, tuning: &Tuning, seed: u64) -> Self {
        let mut fade = Fade::new();
        fade.start(FadeStatus::FadeIn, tuning.scene.fade_time);

        let blocks = block_transforms(&map);
        let goal = goal_transform(&map);

        let mut skydome = WorldTransform::new();
        skydome.update_matrix();

        let spawn = tile_index(tuning.player.spawn_tile);
        let player = Player::new(map.world_position_of(spawn.col, spawn.row), &tuning.player);

        let e = &tuning.enemy;
        let enemies = (0..e.spawn_count as i32)
            .map(|i| {
                let col = e.spawn_tile[0] + e.spawn_spacing * i;
                Enemy::new(map.world_position_of(col, e.spawn_tile[1]), e)
            })
            .collect();

        let mut camera = stage_camera(&map);
        camera.reset(player.translation());

        let mut rng = StdRng::seed_from_u64(seed);
        let fireworks = Fireworks::new(rng.next_u64());

        info!(
            blocks = blocks.len(),
            enemies = e.spawn_count,
            has_goal = goal.is_some(),
            "game scene ready"
        );

        Self {
            countdown: StartCountdown::new(
                tuning.scene.countdown_time,
                tuning.scene.start_banner_time,
            ),
            tuning: tuning.clone(),
            map,
            phase: GamePhase::FadeIn,
            fade,
            skydome,
            blocks,
            goal,
            player,
            enemies,
            hit_effects: Vec::new(),
            death_particles: None,
            camera,
            rng,
            clear_step: ClearStep::Slow,
            clear_timer: 0.0,
            vignette_alpha: 0.0,
            banner_scale: 1.0,
            banner_alpha: 0.0,
            blink_alpha: 0.0,
            fireworks,
            firework_timer: 0.0,
            next_firework: FIRST_FIREWORK_DELAY,
            finished: false,
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            info!(from = ?self.phase, to = ?phase, "game phase");
            self.phase = phase;
        }
    }

    // ── Play ──────────────────────────────────────────────────────────────────

    fn update_play(&mut self, input: PlayerInput) {
        if self.countdown.is_started() {
            self.player.update(input, &self.map);

            if self.player.is_dead() && self.death_particles.is_none() {
                self.set_phase(GamePhase::Death);
                self.death_particles = Some(DeathParticles::new(self.player.world_position()));
            }

            for enemy in &mut self.enemies {
                enemy.update(&self.map);
            }
            for effect in &mut self.hit_effects {
                effect.update();
            }
        } else {
            self.player.update_matrices_only();
        }

        self.camera.update(self.player.translation(), self.player.velocity());

        if self.countdown.is_started() {
            self.check_all_collisions();
        }
    }

    fn check_all_collisions(&mut self) {
        let player_box = self.player.aabb();
        let mut spawner = EffectSpawner { effects: &mut self.hit_effects, rng: &mut self.rng };

        for enemy in &mut self.enemies {
            if enemy.is_collision_disabled() {
                continue;
            }
            if is_aabb_collision(&player_box, &enemy.aabb()) {
                self.player.on_collision(enemy);
                enemy.on_collision(&self.player, &mut spawner);
            }
        }

        if self.player.is_dead() || self.phase == GamePhase::Clear {
            return;
        }
        let Some(goal) = &self.goal else {
            return;
        };
        let goal_box = Aabb::from_center(goal.translation, GOAL_HALF_EXTENTS);
        if is_aabb_collision(&self.player.aabb(), &goal_box) {
            self.enter_clear();
        }
    }

    // ── Clear ─────────────────────────────────────────────────────────────────

    fn enter_clear(&mut self) {
        self.set_phase(GamePhase::Clear);
        self.clear_step = ClearStep::Slow;
        self.clear_timer = 0.0;
        self.banner_scale = 0.1;
        self.banner_alpha = 0.0;
        self.vignette_alpha = 0.0;

        let base = self.goal_position();
        for offset in OPENING_BURSTS {
            self.fireworks.burst(base + offset, 90, 3.5, 7.5, 0.7, 1.4);
        }
        self.firework_timer = 0.0;
        self.next_firework = FIRST_FIREWORK_DELAY;
    }

    fn update_clear(&mut self, confirm: bool) {
        let s = self.tuning.scene;
        self.clear_timer += FRAME_DT;
        self.fireworks.update(FRAME_DT);

        if self.clear_step == ClearStep::ShowTime {
            self.firework_timer += FRAME_DT;
            if self.firework_timer >= self.next_firework {
                self.firework_timer = 0.0;
                let [a, b] = s.firework_interval;
                self.next_firework = self.rng.gen_range(a.min(b)..=a.max(b));
                let offset = Vec3::new(
                    self.rng.gen_range(-8.0..=8.0),
                    self.rng.gen_range(6.0..=12.0),
                    self.rng.gen_range(-3.0..=3.0),
                );
                let base = self.goal_position();
                self.fireworks.burst(base + offset, 80, 3.0, 7.0, 0.7, 1.4);
            }
        }

        match self.clear_step {
            ClearStep::Slow => {
                let t = (self.clear_timer / s.clear_slow_time).min(1.0);
                self.vignette_alpha = lerp(0.0, s.vignette_max, smoothstep(t));
                if t >= 1.0 {
                    self.clear_step = ClearStep::BannerIn;
                    self.clear_timer = 0.0;
                }
            }
            ClearStep::BannerIn => {
                let t = (self.clear_timer / s.clear_banner_time).min(1.0);
                self.banner_scale = lerp(0.2, 1.0, ease_out_back(t));
                self.banner_alpha = t;
                if t >= 1.0 {
                    self.clear_step = ClearStep::ShowTime;
                    self.clear_timer = 0.0;
                }
            }
            ClearStep::ShowTime => {
                self.blink_alpha = 0.5 + 0.5 * (self.clear_timer * 6.0).sin();
                if confirm {
                    self.fade.start(FadeStatus::FadeOut, s.fade_time);
                    self.set_phase(GamePhase::FadeOut);
                }
            }
        }

        self.camera.camera.update_matrix();
    }

    fn goal_position(&self) -> Vec3 {
        self.goal.as_ref().map_or(Vec3::ZERO, |g| g.translation)
    }

    // ── Death / FadeOut ───────────────────────────────────────────────────────

    fn update_aftermath(&mut self) {
        for enemy in &mut self.enemies {
            enemy.update(&self.map);
        }
        if let Some(particles) = &mut self.death_particles {
            particles.update();
        }
        self.camera.update(self.player.translation(), self.player.velocity());
    }

    fn update_death(&mut self) {
        if self.death_particles.as_ref().is_some_and(|p| p.is_finished()) {
            self.fade.start(FadeStatus::FadeOut, self.tuning.scene.fade_time);
            self.set_phase(GamePhase::FadeOut);
        }
        self.update_aftermath();
    }

    fn update_fade_out(&mut self) {
        self.fade.update();
        self.update_aftermath();
        self.fireworks.update(FRAME_DT);
        if self.fade.is_finished() {
            self.fireworks.clear();
            self.finished = true;
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn phase(&self) -> GamePhase { self.phase }
    pub fn clear_step(&self) -> ClearStep { self.clear_step }
    pub fn countdown(&self) -> &StartCountdown { &self.countdown }
    pub fn player(&self) -> &Player { &self.player }
    pub fn enemies(&self) -> &[Enemy] { &self.enemies }
    pub fn hit_effects(&self) -> &[HitEffect] { &self.hit_effects }
    pub fn death_particles(&self) -> Option<&DeathParticles> { self.death_particles.as_ref() }
    pub fn fireworks(&self) -> &Fireworks { &self.fireworks }
    pub fn camera(&self) -> &CameraController { &self.camera }
    pub fn map(&self) -> &GridMap { &self.map }
    pub fn goal(&self) -> Option<&WorldTransform> { self.goal.as_ref() }
    pub fn fade(&self) -> &Fade { &self.fade }
    pub fn vignette_alpha(&self) -> f32 { self.vignette_alpha }
    pub fn banner_scale(&self) -> f32 { self.banner_scale }
    pub fn banner_alpha(&self) -> f32 { self.banner_alpha }
    pub fn is_finished(&self) -> bool { self.finished }
}

impl Scene for GameScene {
    fn on_enter(&mut self) {
        info!("game scene");
    }

    fn update(&mut self, ctx: &FrameContext) -> SceneAction {
        if self.countdown.is_started() {
            self.enemies.retain(|e| !e.is_dead());
            self.hit_effects.retain(|h| !h.is_dead());
        } else {
            self.countdown.update();
        }

        let input = PlayerInput::read(ctx.actions, ctx.input);
        match self.phase {
            GamePhase::FadeIn => {
                self.fade.update();
                if self.fade.is_finished() {
                    self.fade.stop();
                    self.set_phase(GamePhase::Play);
                }
                self.update_play(input);
            }
            GamePhase::Play => self.update_play(input),
            GamePhase::Death => self.update_death(),
            GamePhase::Clear => self.update_clear(ctx.pressed(GameAction::Confirm)),
            GamePhase::FadeOut => self.update_fade_out(),
        }

        if self.finished { SceneAction::Finished } else { SceneAction::None }
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        let camera = &self.camera.camera;

        sink.draw_model(ModelKind::Skydome, &self.skydome, camera);
        for block in &self.blocks {
            sink.draw_model(ModelKind::Block, block, camera);
        }
        if let Some(goal) = &self.goal {
            sink.draw_model(ModelKind::Goal, goal, camera);
        }

        if !self.player.is_dead() {
            sink.draw_model(ModelKind::Player, self.player.transform(), camera);
            if self.player.is_attack_effect_visible() {
                sink.draw_model(ModelKind::AttackEffect, self.player.attack_transform(), camera);
            }
        }
        for enemy in &self.enemies {
            sink.draw_model(ModelKind::Enemy, enemy.transform(), camera);
        }
        for effect in &self.hit_effects {
            for t in effect.transforms() {
                sink.draw_model_alpha(ModelKind::HitEffect, t, camera, effect.alpha());
            }
        }
        if let Some(particles) = self.death_particles.as_ref().filter(|p| !p.is_finished()) {
            for t in particles.transforms() {
                sink.draw_model_alpha(ModelKind::DeathParticle, t, camera, particles.alpha());
            }
        }
        if matches!(self.phase, GamePhase::Clear | GamePhase::FadeOut) {
            for spark in self.fireworks.sparks() {
                sink.draw_model(ModelKind::Spark, &spark.transform, camera);
            }
        }

        match self.countdown.phase() {
            StartPhase::Counting => sink.draw_sprite(
                SpriteKind::Countdown(self.countdown.count_index()),
                SpriteParams::at(640.0, 360.0),
            ),
            StartPhase::ShowStart => {
                sink.draw_sprite(SpriteKind::StartBanner, SpriteParams::at(640.0, 360.0))
            }
            StartPhase::Playing => {}
        }

        if matches!(self.phase, GamePhase::Clear | GamePhase::FadeOut) {
            sink.draw_sprite(
                SpriteKind::ClearVignette,
                SpriteParams::at(640.0, 360.0).with_alpha(self.vignette_alpha),
            );
            sink.draw_sprite(
                SpriteKind::ClearBanner,
                SpriteParams::at(640.0, 240.0)
                    .with_scale(self.banner_scale)
                    .with_alpha(self.banner_alpha),
            );
            if self.clear_step == ClearStep::ShowTime {
                sink.draw_sprite(
                    SpriteKind::ToTitle,
                    SpriteParams::at(640.0, 520.0).with_alpha(self.blink_alpha),
                );
            }
        }

        if self.fade.status() != FadeStatus::None {
            sink.draw_sprite(
                SpriteKind::Fade,
                SpriteParams::at(640.0, 360.0).with_alpha(self.fade.alpha()),
            );
        }
    }
}
