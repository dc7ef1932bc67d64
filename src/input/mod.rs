use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use winit::keyboard::KeyCode;

/// Raw keyboard state for a single frame.
///
/// `keys_held` mirrors the engine's push query; `keys_pressed` holds only the
/// keys whose down edge happened this frame (the trigger query).
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event. Repeats of an already held key are not edges.
    pub fn press(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        if self.keys_held.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    /// Drop this frame's edges; held keys carry over.
    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }
}

/// Maps logical actions to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, key: KeyCode) {
        self.bindings.entry(action).or_default().push(key);
    }

    /// True if any bound key went down this frame.
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_pressed(*k)))
    }

    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_held(*k)))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameAction {
    Left,
    Right,
    Jump,
    Attack,
    /// Start / continue on menus and banners.
    Confirm,
    /// Title shortcut straight into the stage.
    StartGame,
    /// Title shortcut into the tutorial.
    StartTutorial,
    Quit,
}

impl ActionMap<GameAction> {
    /// Arrow keys or A/D to move, Up/Space/Z to jump, X/J to attack,
    /// Enter/Space to confirm. On the title, 1/G starts the stage, 2/T the
    /// tutorial and Escape quits.
    pub fn default_bindings() -> Self {
        let mut map = Self::new();
        map.bind(GameAction::Left, KeyCode::ArrowLeft);
        map.bind(GameAction::Left, KeyCode::KeyA);
        map.bind(GameAction::Right, KeyCode::ArrowRight);
        map.bind(GameAction::Right, KeyCode::KeyD);
        map.bind(GameAction::Jump, KeyCode::ArrowUp);
        map.bind(GameAction::Jump, KeyCode::Space);
        map.bind(GameAction::Jump, KeyCode::KeyZ);
        map.bind(GameAction::Attack, KeyCode::KeyX);
        map.bind(GameAction::Attack, KeyCode::KeyJ);
        map.bind(GameAction::Confirm, KeyCode::Enter);
        map.bind(GameAction::Confirm, KeyCode::Space);
        map.bind(GameAction::StartGame, KeyCode::Digit1);
        map.bind(GameAction::StartGame, KeyCode::KeyG);
        map.bind(GameAction::StartTutorial, KeyCode::Digit2);
        map.bind(GameAction::StartTutorial, KeyCode::KeyT);
        map.bind(GameAction::Quit, KeyCode::Escape);
        map
    }
}

/// What the player reads in one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
}

impl PlayerInput {
    pub fn read(actions: &ActionMap<GameAction>, input: &InputState) -> Self {
        Self {
            left: actions.is_held(GameAction::Left, input),
            right: actions.is_held(GameAction::Right, input),
            jump: actions.is_pressed(GameAction::Jump, input),
            attack: actions.is_pressed(GameAction::Attack, input),
        }
    }
}
