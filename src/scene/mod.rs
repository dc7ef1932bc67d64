pub mod countdown;
pub mod game;
pub mod title;
pub mod tutorial;

pub use countdown::{StartCountdown, StartPhase};
pub use game::{ClearStep, GamePhase, GameScene};
pub use title::{TitlePhase, TitleScene};
pub use tutorial::{TutorialPhase, TutorialScene, TutorialStep};

use tracing::info;

use crate::camera::{CameraController, MovableArea};
use crate::config::Tuning;
use crate::input::{ActionMap, GameAction, InputState};
use crate::map::{GridMap, TileType};
use crate::render::DrawSink;
use crate::transform::WorldTransform;

/// Per-frame input handed to the active scene.
pub struct FrameContext<'a> {
    pub input: &'a InputState,
    pub actions: &'a ActionMap<GameAction>,
}

impl<'a> FrameContext<'a> {
    pub fn new(input: &'a InputState, actions: &'a ActionMap<GameAction>) -> Self {
        Self { input, actions }
    }

    pub fn pressed(&self, action: GameAction) -> bool {
        self.actions.is_pressed(action, self.input)
    }

    pub fn held(&self, action: GameAction) -> bool {
        self.actions.is_held(action, self.input)
    }
}

pub enum SceneAction {
    None,
    /// The scene has played out; the manager picks what comes next.
    Finished,
    /// Leave now for the named scene.
    Switch(SceneId),
    Quit,
}

pub trait Scene {
    fn on_enter(&mut self) {}
    fn on_exit(&mut self) {}
    fn update(&mut self, ctx: &FrameContext) -> SceneAction;
    fn draw(&self, sink: &mut dyn DrawSink);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneId {
    Title,
    Game,
    Tutorial,
}

/// One static transform per block tile.
pub(crate) fn block_transforms(map: &GridMap) -> Vec<WorldTransform> {
    map.tiles_of(TileType::Block)
        .map(|i| {
            let mut t = WorldTransform::at(map.world_position_of(i.col, i.row));
            t.update_matrix();
            t
        })
        .collect()
}

pub(crate) fn goal_transform(map: &GridMap) -> Option<WorldTransform> {
    map.find_first(TileType::Goal).map(|i| {
        let mut t = WorldTransform::at(map.world_position_of(i.col, i.row));
        t.update_matrix();
        t
    })
}

/// Side-on follow camera kept twelve tiles inside either end of the map.
pub(crate) fn stage_camera(map: &GridMap) -> CameraController {
    let mut camera = CameraController::new(MovableArea {
        left: 12.0,
        right: map.columns() as f32 - 12.0,
        bottom: 6.0,
        top: 6.0,
    });
    camera.camera.far = 2000.0;
    camera
}

/// Owns the active scene. Title leads to the stage (or the tutorial), and
/// both lead back to the title.
///
/// Maps are kept here and cloned into each new scene so a level is parsed
/// only once. Without a dedicated tutorial map the stage map is reused.
pub struct SceneManager {
    current: Box<dyn Scene>,
    current_id: SceneId,
    map: GridMap,
    tutorial_map: Option<GridMap>,
    tuning: Tuning,
    seed: u64,
    initialized: bool,
    quit: bool,
}

impl SceneManager {
    pub fn new(map: GridMap, tuning: Tuning, seed: u64) -> Self {
        Self {
            current: Box::new(TitleScene::new(&tuning)),
            current_id: SceneId::Title,
            map,
            tutorial_map: None,
            tuning,
            seed,
            initialized: false,
            quit: false,
        }
    }

    pub fn with_tutorial_map(mut self, map: GridMap) -> Self {
        self.tutorial_map = Some(map);
        self
    }

    pub fn update(&mut self, ctx: &FrameContext) {
        if !self.initialized {
            self.initialized = true;
            self.current.on_enter();
        }

        match self.current.update(ctx) {
            SceneAction::None => {}
            SceneAction::Finished => {
                let next = match self.current_id {
                    SceneId::Title => SceneId::Game,
                    SceneId::Game | SceneId::Tutorial => SceneId::Title,
                };
                self.switch_to(next);
            }
            SceneAction::Switch(id) => self.switch_to(id),
            SceneAction::Quit => {
                self.current.on_exit();
                self.quit = true;
                info!(from = ?self.current_id, "quit requested");
            }
        }
    }

    fn switch_to(&mut self, id: SceneId) {
        self.current.on_exit();
        let next: Box<dyn Scene> = match id {
            SceneId::Title => Box::new(TitleScene::new(&self.tuning)),
            SceneId::Game => {
                self.seed = self.seed.wrapping_add(1);
                Box::new(GameScene::new(self.map.clone(), &self.tuning, self.seed))
            }
            SceneId::Tutorial => {
                let map = self.tutorial_map.as_ref().unwrap_or(&self.map).clone();
                Box::new(TutorialScene::new(map, &self.tuning))
            }
        };
        info!(from = ?self.current_id, to = ?id, "scene change");
        self.current = next;
        self.current_id = id;
        self.current.on_enter();
    }

    pub fn draw(&self, sink: &mut dyn DrawSink) {
        self.current.draw(sink);
    }

    pub fn current_id(&self) -> SceneId {
        self.current_id
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
