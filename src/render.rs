//! Draw-side seam. Scenes describe what to draw through [`DrawSink`]; the
//! host engine (or a test) decides what that means.

use glam::{Mat4, Vec2};

use crate::camera::Camera;
use crate::transform::WorldTransform;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Skydome,
    Block,
    Goal,
    Player,
    AttackEffect,
    Enemy,
    HitEffect,
    DeathParticle,
    Spark,
    TitleLogo,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    /// Full-screen black overlay.
    Fade,
    /// Countdown digit 1 to 3.
    Countdown(u32),
    StartBanner,
    ClearVignette,
    ClearBanner,
    /// "Press Enter" prompt under the clear banner.
    ToTitle,
    /// "Press Space" prompt on the title screen.
    StartPrompt,
    /// Tutorial instructions, one per step.
    TutorialMove,
    TutorialJump,
    TutorialDone,
}

/// Screen-space placement in 1280 × 720 pixels, anchored at the center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteParams {
    pub position: Vec2,
    pub scale: f32,
    pub alpha: f32,
}

impl SpriteParams {
    pub fn at(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y), scale: 1.0, alpha: 1.0 }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

pub trait DrawSink {
    fn draw_model(&mut self, kind: ModelKind, transform: &WorldTransform, camera: &Camera);

    /// Model draw with an opacity override. Sinks without blending can ignore
    /// the alpha.
    fn draw_model_alpha(
        &mut self,
        kind: ModelKind,
        transform: &WorldTransform,
        camera: &Camera,
        _alpha: f32,
    ) {
        self.draw_model(kind, transform, camera);
    }

    fn draw_sprite(&mut self, kind: SpriteKind, params: SpriteParams);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Model { kind: ModelKind, mat_world: Mat4, alpha: f32 },
    Sprite { kind: SpriteKind, params: SpriteParams },
}

/// Records one frame of draw calls.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn model_count(&self, kind: ModelKind) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Model { kind: k, .. } if *k == kind))
            .count()
    }

    pub fn sprite(&self, kind: SpriteKind) -> Option<SpriteParams> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Sprite { kind: k, params } if *k == kind => Some(*params),
            _ => None,
        })
    }
}

impl DrawSink for DrawList {
    fn draw_model(&mut self, kind: ModelKind, transform: &WorldTransform, _camera: &Camera) {
        self.commands.push(DrawCommand::Model { kind, mat_world: transform.mat_world(), alpha: 1.0 });
    }

    fn draw_model_alpha(
        &mut self,
        kind: ModelKind,
        transform: &WorldTransform,
        _camera: &Camera,
        alpha: f32,
    ) {
        self.commands.push(DrawCommand::Model { kind, mat_world: transform.mat_world(), alpha });
    }

    fn draw_sprite(&mut self, kind: SpriteKind, params: SpriteParams) {
        self.commands.push(DrawCommand::Sprite { kind, params });
    }
}
