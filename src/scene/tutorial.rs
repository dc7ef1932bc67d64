// =============================================================================
// TUTORIAL.RS: Free play on a practice map with one instruction at a time
//
//   FadeIn ──► Run ──► FadeOut ──► (finished)
//
// As in the stage, FadeIn frames also run the Run update. The instruction
// advances Move → Jump → Finish on fresh presses only, so keys held over from
// the title do not skip a step. Confirm on Finish fades out.
// =============================================================================

use tracing::info;

use crate::camera::CameraController;
use crate::config::Tuning;
use crate::entity::Player;
use crate::fade::{Fade, FadeStatus};
use crate::input::{GameAction, PlayerInput};
use crate::map::GridMap;
use crate::render::{DrawSink, ModelKind, SpriteKind, SpriteParams};
use crate::scene::{block_transforms, goal_transform, stage_camera, FrameContext, Scene, SceneAction};
use crate::transform::WorldTransform;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TutorialPhase {
    FadeIn,
    Run,
    FadeOut,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TutorialStep {
    Move,
    Jump,
    Finish,
}

impl TutorialStep {
    fn sprite(self) -> SpriteKind {
        match self {
            TutorialStep::Move => SpriteKind::TutorialMove,
            TutorialStep::Jump => SpriteKind::TutorialJump,
            TutorialStep::Finish => SpriteKind::TutorialDone,
        }
    }
}

pub struct TutorialScene {
    map: GridMap,
    phase: TutorialPhase,
    step: TutorialStep,
    fade: Fade,
    fade_time: f32,

    skydome: WorldTransform,
    blocks: Vec<WorldTransform>,
    goal: Option<WorldTransform>,
    player: Player,
    camera: CameraController,

    finished: bool,
}

impl TutorialScene {
    pub fn new(map: GridMap, tuning: &Tuning) -> Self {
        let fade_time = tuning.scene.tutorial_fade_time;
        let mut fade = Fade::new();
        fade.start(FadeStatus::FadeIn, fade_time);

        let mut skydome = WorldTransform::new();
        skydome.update_matrix();

        let [col, row] = tuning.player.spawn_tile;
        let player = Player::new(map.world_position_of(col, row), &tuning.player);

        let mut camera = stage_camera(&map);
        camera.reset(player.translation());

        Self {
            blocks: block_transforms(&map),
            goal: goal_transform(&map),
            map,
            phase: TutorialPhase::FadeIn,
            step: TutorialStep::Move,
            fade,
            fade_time,
            skydome,
            player,
            camera,
            finished: false,
        }
    }

    fn update_run(&mut self, ctx: &FrameContext) {
        let input = PlayerInput::read(ctx.actions, ctx.input);
        self.player.update(input, &self.map);
        self.camera.update(self.player.translation(), self.player.velocity());

        let next = match self.step {
            TutorialStep::Move
                if ctx.pressed(GameAction::Left) || ctx.pressed(GameAction::Right) =>
            {
                Some(TutorialStep::Jump)
            }
            TutorialStep::Jump if input.jump => Some(TutorialStep::Finish),
            TutorialStep::Finish if ctx.pressed(GameAction::Confirm) => {
                self.fade.start(FadeStatus::FadeOut, self.fade_time);
                self.phase = TutorialPhase::FadeOut;
                None
            }
            _ => None,
        };
        if let Some(step) = next {
            info!(from = ?self.step, to = ?step, "tutorial step");
            self.step = step;
        }
    }

    pub fn phase(&self) -> TutorialPhase { self.phase }
    pub fn step(&self) -> TutorialStep { self.step }
    pub fn player(&self) -> &Player { &self.player }
    pub fn camera(&self) -> &CameraController { &self.camera }
    pub fn is_finished(&self) -> bool { self.finished }
}

impl Scene for TutorialScene {
    fn on_enter(&mut self) {
        info!(blocks = self.blocks.len(), "tutorial scene");
    }

    fn update(&mut self, ctx: &FrameContext) -> SceneAction {
        match self.phase {
            TutorialPhase::FadeIn => {
                self.fade.update();
                if self.fade.is_finished() {
                    self.fade.stop();
                    self.phase = TutorialPhase::Run;
                }
                self.update_run(ctx);
            }
            TutorialPhase::Run => self.update_run(ctx),
            TutorialPhase::FadeOut => {
                self.fade.update();
                if self.fade.is_finished() {
                    self.finished = true;
                }
            }
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
        sink.draw_model(ModelKind::Player, self.player.transform(), camera);
        if self.player.is_attack_effect_visible() {
            sink.draw_model(ModelKind::AttackEffect, self.player.attack_transform(), camera);
        }

        sink.draw_sprite(self.step.sprite(), SpriteParams::at(640.0, 200.0));
        if self.fade.status() != FadeStatus::None {
            sink.draw_sprite(
                SpriteKind::Fade,
                SpriteParams::at(640.0, 360.0).with_alpha(self.fade.alpha()),
            );
        }
    }
}
