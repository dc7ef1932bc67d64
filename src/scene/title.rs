use std::f32::consts::TAU;

use glam::Vec3;
use tracing::info;

use crate::camera::Camera;
use crate::config::Tuning;
use crate::fade::{Fade, FadeStatus};
use crate::input::GameAction;
use crate::render::{DrawSink, ModelKind, SpriteKind, SpriteParams};
use crate::scene::{FrameContext, Scene, SceneAction, SceneId};
use crate::transform::WorldTransform;
use crate::FRAME_DT;

const LOGO_BASE_Y: f32 = 1.5;
const LOGO_BOB_RANGE: f32 = 0.6;
const LOGO_BOB_CYCLE: f32 = 2.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TitlePhase {
    FadeIn,
    Main,
    FadeOut,
}

pub struct TitleScene {
    phase: TitlePhase,
    fade: Fade,
    fade_time: f32,
    elapsed: f32,
    logo: WorldTransform,
    skydome: WorldTransform,
    camera: Camera,
    finished: bool,
}

impl TitleScene {
    pub fn new(tuning: &Tuning) -> Self {
        let fade_time = tuning.scene.fade_time;
        let mut fade = Fade::new();
        fade.start(FadeStatus::FadeIn, fade_time);

        let mut logo = WorldTransform::at(Vec3::new(0.0, LOGO_BASE_Y, 0.0));
        logo.scale = Vec3::splat(2.0);
        logo.update_matrix();
        let mut skydome = WorldTransform::new();
        skydome.update_matrix();

        Self {
            phase: TitlePhase::FadeIn,
            fade,
            fade_time,
            elapsed: 0.0,
            logo,
            skydome,
            camera: Camera::new(),
            finished: false,
        }
    }

    pub fn phase(&self) -> TitlePhase { self.phase }
    pub fn is_finished(&self) -> bool { self.finished }
    pub fn logo(&self) -> &WorldTransform { &self.logo }
}

impl Scene for TitleScene {
    fn on_enter(&mut self) {
        info!("title scene");
    }

    fn update(&mut self, ctx: &FrameContext) -> SceneAction {
        self.elapsed += FRAME_DT;
        self.logo.translation.y =
            LOGO_BASE_Y + LOGO_BOB_RANGE * (TAU * self.elapsed / LOGO_BOB_CYCLE).sin();
        self.logo.update_matrix();

        match self.phase {
            TitlePhase::FadeIn => {
                self.fade.update();
                if self.fade.is_finished() {
                    self.fade.stop();
                    self.phase = TitlePhase::Main;
                }
            }
            TitlePhase::Main => {
                if ctx.held(GameAction::Confirm) {
                    self.fade.start(FadeStatus::FadeOut, self.fade_time);
                    self.phase = TitlePhase::FadeOut;
                }
            }
            TitlePhase::FadeOut => {
                self.fade.update();
                if self.fade.is_finished() {
                    self.finished = true;
                }
            }
        }

        // Shortcuts skip the fade in any phase.
        if ctx.pressed(GameAction::Quit) {
            SceneAction::Quit
        } else if ctx.pressed(GameAction::StartGame) {
            SceneAction::Switch(SceneId::Game)
        } else if ctx.pressed(GameAction::StartTutorial) {
            SceneAction::Switch(SceneId::Tutorial)
        } else if self.finished {
            SceneAction::Finished
        } else {
            SceneAction::None
        }
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        sink.draw_model(ModelKind::Skydome, &self.skydome, &self.camera);
        sink.draw_model(ModelKind::TitleLogo, &self.logo, &self.camera);
        sink.draw_sprite(SpriteKind::StartPrompt, SpriteParams::at(640.0, 500.0));
        if self.fade.status() != FadeStatus::None {
            sink.draw_sprite(
                SpriteKind::Fade,
                SpriteParams::at(640.0, 360.0).with_alpha(self.fade.alpha()),
            );
        }
    }
}
