use tilehop::config::Tuning;
use tilehop::fade::FadeStatus;
use tilehop::input::{ActionMap, GameAction, InputState, KeyCode};
use tilehop::map::{GridMap, MapSize};
use tilehop::render::{DrawList, ModelKind, SpriteKind};
use tilehop::scene::*;

/// Twenty columns, six rows, solid bottom row. `extra` adds (col, row, token).
fn small_stage(extra: &[(usize, usize, &str)]) -> GridMap {
    let mut rows: Vec<Vec<&str>> = (0..6).map(|_| vec!["0"; 20]).collect();
    rows[5] = vec!["1"; 20];
    for &(c, r, token) in extra {
        rows[r][c] = token;
    }
    let text: Vec<String> = rows.iter().map(|r| r.join(",")).collect();
    GridMap::parse(&text.join("\n"), MapSize::new(20, 6)).unwrap()
}

fn quick_tuning() -> Tuning {
    let mut t = Tuning::default();
    t.player.spawn_tile = [5, 4];
    t.enemy.spawn_count = 0;
    t.scene.countdown_time = 0.0;
    t.scene.start_banner_time = 0.0;
    t.scene.fade_time = 0.1;
    t.scene.tutorial_fade_time = 0.1;
    t
}

struct Driver {
    input: InputState,
    actions: ActionMap<GameAction>,
}

impl Driver {
    fn new() -> Self {
        Self { input: InputState::new(), actions: ActionMap::default_bindings() }
    }

    /// One frame with `keys` freshly pressed (and therefore held).
    fn step(&mut self, scene: &mut dyn Scene, keys: &[KeyCode]) -> SceneAction {
        self.input.clear_frame_state();
        for &key in keys {
            self.input.release(key);
            self.input.press(key);
        }
        let action = scene.update(&FrameContext::new(&self.input, &self.actions));
        for &key in keys {
            self.input.release(key);
        }
        action
    }
}

#[test]
fn default_countdown_holds_the_player() {
    let map = small_stage(&[]);
    let mut tuning = quick_tuning();
    tuning.scene.countdown_time = 3.0;
    let mut scene = GameScene::new(map, &tuning, 1);
    let mut driver = Driver::new();

    let start = scene.player().translation();
    for _ in 0..60 {
        driver.step(&mut scene, &[KeyCode::ArrowRight]);
    }
    assert!(!scene.countdown().is_started());
    assert_eq!(scene.countdown().phase(), StartPhase::Counting);
    assert_eq!(scene.player().translation(), start);
    assert_eq!(scene.phase(), GamePhase::Play);

    let mut draws = DrawList::new();
    scene.draw(&mut draws);
    assert!(draws.sprite(SpriteKind::Countdown(2)).is_some());
}

#[test]
fn zero_countdown_starts_on_second_frame() {
    let mut scene = GameScene::new(small_stage(&[]), &quick_tuning(), 1);
    let mut driver = Driver::new();

    driver.step(&mut scene, &[]);
    assert!(!scene.countdown().is_started());
    driver.step(&mut scene, &[]);
    assert!(scene.countdown().is_started());
}

#[test]
fn overlay_is_dropped_once_the_fade_in_ends() {
    let mut scene = GameScene::new(small_stage(&[]), &quick_tuning(), 1);
    let mut driver = Driver::new();
    assert_eq!(scene.fade().status(), FadeStatus::FadeIn);
    for _ in 0..10 {
        driver.step(&mut scene, &[]);
    }
    assert_eq!(scene.fade().status(), FadeStatus::None);

    let mut draws = DrawList::new();
    scene.draw(&mut draws);
    assert!(draws.sprite(SpriteKind::Fade).is_none());
}

#[test]
fn reversed_firework_interval_still_fires() {
    let mut tuning = quick_tuning();
    tuning.scene.firework_interval = [0.45, 0.20];
    let mut scene = GameScene::new(small_stage(&[(6, 4, "2")]), &tuning, 3);
    let mut driver = Driver::new();

    for _ in 0..240 {
        driver.step(&mut scene, &[]);
    }
    assert_eq!(scene.phase(), GamePhase::Clear);
    assert_eq!(scene.clear_step(), ClearStep::ShowTime);
    assert!(!scene.fireworks().is_empty());
}

#[test]
fn touching_the_goal_clears_the_stage() {
    let map = small_stage(&[(6, 4, "2")]);
    let mut scene = GameScene::new(map, &quick_tuning(), 9);
    let mut driver = Driver::new();
    assert!(scene.goal().is_some());

    driver.step(&mut scene, &[]);
    driver.step(&mut scene, &[]);
    assert_eq!(scene.phase(), GamePhase::Clear);
    assert_eq!(scene.clear_step(), ClearStep::Slow);
    assert_eq!(scene.fireworks().len(), 270);

    // Confirm is ignored until the banner has landed.
    let mut frames = 0;
    while scene.phase() == GamePhase::Clear && frames < 300 {
        driver.step(&mut scene, &[KeyCode::Enter]);
        frames += 1;
    }
    assert_eq!(scene.phase(), GamePhase::FadeOut);
    assert_eq!(scene.clear_step(), ClearStep::ShowTime);
    assert!(frames > 40, "left clear after {frames} frames");
    assert!((scene.vignette_alpha() - tuning_vignette()).abs() < 1e-4);
    assert!((scene.banner_scale() - 1.0).abs() < 1e-4);

    let mut finished = false;
    for _ in 0..20 {
        if matches!(driver.step(&mut scene, &[]), SceneAction::Finished) {
            finished = true;
            break;
        }
    }
    assert!(finished);
    assert!(scene.is_finished());
    assert!(scene.fireworks().is_empty());
}

fn tuning_vignette() -> f32 {
    Tuning::default().scene.vignette_max
}

#[test]
fn enemy_contact_ends_the_run() {
    let mut tuning = quick_tuning();
    tuning.enemy.spawn_count = 1;
    tuning.enemy.spawn_tile = [7, 4];
    let mut scene = GameScene::new(small_stage(&[]), &tuning, 5);
    let mut driver = Driver::new();
    assert_eq!(scene.enemies().len(), 1);

    let mut saw_death = false;
    let mut finished = false;
    for _ in 0..400 {
        let action = driver.step(&mut scene, &[]);
        saw_death |= scene.phase() == GamePhase::Death;
        if matches!(action, SceneAction::Finished) {
            finished = true;
            break;
        }
    }
    assert!(saw_death);
    assert!(scene.player().is_dead());
    assert!(scene.death_particles().is_some_and(|p| p.is_finished()));
    assert!(finished);
}

#[test]
fn attacking_into_an_enemy_spawns_a_hit_effect() {
    let mut tuning = quick_tuning();
    tuning.enemy.spawn_count = 1;
    tuning.enemy.spawn_tile = [8, 4];
    let mut scene = GameScene::new(small_stage(&[]), &tuning, 5);
    let mut driver = Driver::new();

    driver.step(&mut scene, &[]);
    driver.step(&mut scene, &[]);
    driver.step(&mut scene, &[KeyCode::KeyX]);

    let mut hit = false;
    for _ in 0..20 {
        driver.step(&mut scene, &[]);
        hit |= !scene.hit_effects().is_empty();
    }
    assert!(hit);
    assert!(!scene.player().is_dead());

    for _ in 0..60 {
        driver.step(&mut scene, &[]);
    }
    assert!(scene.enemies().is_empty());
    assert!(scene.hit_effects().is_empty());
}

#[test]
fn manager_cycles_title_game_title() {
    let map = small_stage(&[(6, 4, "2")]);
    let mut manager = SceneManager::new(map, quick_tuning(), 0);
    let actions = ActionMap::default_bindings();
    let mut input = InputState::new();
    assert_eq!(manager.current_id(), SceneId::Title);

    let mut visited = vec![manager.current_id()];
    for _ in 0..600 {
        input.clear_frame_state();
        input.release(KeyCode::Enter);
        input.press(KeyCode::Enter);
        manager.update(&FrameContext::new(&input, &actions));
        if visited.last() != Some(&manager.current_id()) {
            visited.push(manager.current_id());
        }
        if visited.len() == 3 {
            break;
        }
    }
    assert_eq!(visited, vec![SceneId::Title, SceneId::Game, SceneId::Title]);
    assert!(!manager.should_quit());

    let mut draws = DrawList::new();
    manager.draw(&mut draws);
    assert_eq!(draws.model_count(ModelKind::TitleLogo), 1);
}

#[test]
fn title_waits_for_confirm() {
    let mut title = TitleScene::new(&quick_tuning());
    let mut driver = Driver::new();
    for _ in 0..30 {
        driver.step(&mut title, &[KeyCode::ArrowLeft]);
    }
    assert_eq!(title.phase(), TitlePhase::Main);

    driver.step(&mut title, &[KeyCode::Space]);
    assert_eq!(title.phase(), TitlePhase::FadeOut);
    let mut finished = false;
    for _ in 0..20 {
        finished |= matches!(driver.step(&mut title, &[]), SceneAction::Finished);
    }
    assert!(finished);
    assert!(title.is_finished());
}

/// One manager frame with `keys` freshly pressed.
fn tick(manager: &mut SceneManager, driver: &mut Driver, keys: &[KeyCode]) {
    driver.input.clear_frame_state();
    for &key in keys {
        driver.input.release(key);
        driver.input.press(key);
    }
    manager.update(&FrameContext::new(&driver.input, &driver.actions));
    for &key in keys {
        driver.input.release(key);
    }
}

fn drawn(manager: &SceneManager) -> DrawList {
    let mut draws = DrawList::new();
    manager.draw(&mut draws);
    draws
}

#[test]
fn manager_runs_title_tutorial_title() {
    let mut manager = SceneManager::new(small_stage(&[]), quick_tuning(), 0);
    let mut driver = Driver::new();

    tick(&mut manager, &mut driver, &[KeyCode::KeyT]);
    assert_eq!(manager.current_id(), SceneId::Tutorial);
    assert!(drawn(&manager).sprite(SpriteKind::TutorialMove).is_some());

    tick(&mut manager, &mut driver, &[KeyCode::ArrowRight]);
    assert!(drawn(&manager).sprite(SpriteKind::TutorialJump).is_some());
    tick(&mut manager, &mut driver, &[KeyCode::ArrowUp]);
    assert!(drawn(&manager).sprite(SpriteKind::TutorialDone).is_some());
    tick(&mut manager, &mut driver, &[KeyCode::Enter]);

    for _ in 0..20 {
        tick(&mut manager, &mut driver, &[]);
        if manager.current_id() == SceneId::Title {
            break;
        }
    }
    assert_eq!(manager.current_id(), SceneId::Title);
    assert_eq!(drawn(&manager).model_count(ModelKind::TitleLogo), 1);
}

#[test]
fn title_shortcut_jumps_straight_into_the_stage() {
    let mut manager = SceneManager::new(small_stage(&[]), quick_tuning(), 0);
    let mut driver = Driver::new();
    tick(&mut manager, &mut driver, &[KeyCode::Digit1]);
    assert_eq!(manager.current_id(), SceneId::Game);
}

#[test]
fn escape_on_the_title_quits() {
    let mut title = TitleScene::new(&quick_tuning());
    let mut driver = Driver::new();
    assert!(matches!(driver.step(&mut title, &[KeyCode::Escape]), SceneAction::Quit));

    let mut manager = SceneManager::new(small_stage(&[]), quick_tuning(), 0);
    tick(&mut manager, &mut driver, &[KeyCode::Escape]);
    assert!(manager.should_quit());
    assert_eq!(manager.current_id(), SceneId::Title);
}

#[test]
fn tutorial_steps_follow_fresh_presses() {
    let mut tutorial = TutorialScene::new(small_stage(&[]), &quick_tuning());
    let mut driver = Driver::new();
    assert_eq!(tutorial.step(), TutorialStep::Move);

    driver.step(&mut tutorial, &[KeyCode::Enter]);
    driver.step(&mut tutorial, &[KeyCode::ArrowUp]);
    assert_eq!(tutorial.step(), TutorialStep::Move);

    driver.step(&mut tutorial, &[KeyCode::KeyD]);
    assert_eq!(tutorial.step(), TutorialStep::Jump);
    driver.step(&mut tutorial, &[KeyCode::Enter]);
    assert_eq!(tutorial.step(), TutorialStep::Jump);
    driver.step(&mut tutorial, &[KeyCode::KeyZ]);
    assert_eq!(tutorial.step(), TutorialStep::Finish);

    // The player is live throughout.
    let start_x = tutorial.player().translation().x;
    for _ in 0..60 {
        driver.step(&mut tutorial, &[KeyCode::ArrowRight]);
    }
    assert!(tutorial.player().translation().x > start_x);
    assert_eq!(tutorial.phase(), TutorialPhase::Run);

    driver.step(&mut tutorial, &[KeyCode::Enter]);
    assert_eq!(tutorial.phase(), TutorialPhase::FadeOut);
    let mut finished = false;
    for _ in 0..20 {
        finished |= matches!(driver.step(&mut tutorial, &[]), SceneAction::Finished);
    }
    assert!(finished);
    assert!(tutorial.is_finished());
}
