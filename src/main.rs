// Headless run of the title → stage → title loop with a scripted player.
//
//   cargo run -- [level.csv] [tuning.json]
//
// Without arguments the first CSV under `levels/` is played with default
// tuning. `levels/tutorial.csv`, when present, backs the tutorial scene.
// Set RUST_LOG=debug to see behavior transitions.

use std::path::PathBuf;

use tilehop::config::Tuning;
use tilehop::input::{ActionMap, InputState, KeyCode};
use tilehop::map::{discover_levels, GridMap, MapSize};
use tilehop::render::{DrawList, ModelKind};
use tilehop::scene::{FrameContext, SceneId, SceneManager};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const MAX_FRAMES: u64 = 60 * 90;
const SEED: u64 = 0x7117_E409;
const TUTORIAL_LEVEL: &str = "levels/tutorial.csv";

fn main() {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let level = match args.next().map(PathBuf::from).or_else(|| discover_levels("levels").into_iter().next()) {
        Some(path) => path,
        None => {
            error!("no level given and none found under levels/");
            std::process::exit(1);
        }
    };

    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(t) => t,
            Err(err) => {
                warn!(%path, error = %err, "tuning not loaded; using defaults");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let map = match GridMap::load(&level, MapSize::default()) {
        Ok(map) => map,
        Err(err) => {
            error!(error = %err, "map load failed");
            std::process::exit(1);
        }
    };

    let actions = ActionMap::default_bindings();
    let mut input = InputState::new();
    let mut manager = SceneManager::new(map, tuning, SEED);
    match GridMap::load(TUTORIAL_LEVEL, MapSize::default()) {
        Ok(tutorial) => manager = manager.with_tutorial_map(tutorial),
        Err(err) => debug!(error = %err, "no tutorial map; the tutorial reuses the stage"),
    }
    let mut draws = DrawList::new();
    let mut left_title = false;
    let mut frame = 0u64;

    while frame < MAX_FRAMES && !manager.should_quit() {
        input.clear_frame_state();
        script(frame, manager.current_id(), &mut input);

        manager.update(&FrameContext::new(&input, &actions));
        draws.clear();
        manager.draw(&mut draws);

        match manager.current_id() {
            SceneId::Game | SceneId::Tutorial => left_title = true,
            SceneId::Title if left_title => break,
            SceneId::Title => {}
        }
        frame += 1;
    }

    info!(
        frames = frame,
        scene = ?manager.current_id(),
        enemies_drawn = draws.model_count(ModelKind::Enemy),
        "demo finished"
    );
    println!("ran {frame} frames, ended on {:?}", manager.current_id());
}

/// Title: hold Space. Stage: run right, hop every 40 frames and swing every
/// 25, then keep confirming so a clear banner is dismissed. The tutorial is
/// only reached through its title shortcut, which this script never presses.
fn script(frame: u64, scene: SceneId, input: &mut InputState) {
    match scene {
        SceneId::Tutorial => {}
        SceneId::Title => input.press(KeyCode::Space),
        SceneId::Game => {
            input.release(KeyCode::Space);
            input.press(KeyCode::ArrowRight);
            if frame % 40 == 0 {
                input.release(KeyCode::ArrowUp);
                input.press(KeyCode::ArrowUp);
            }
            if frame % 25 == 0 {
                input.release(KeyCode::KeyX);
                input.press(KeyCode::KeyX);
            }
            if frame % 30 == 0 {
                input.release(KeyCode::Enter);
                input.press(KeyCode::Enter);
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}
