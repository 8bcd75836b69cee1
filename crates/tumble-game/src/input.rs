//! Input Handling
//!
//! Raw key and mouse events are folded into an [`InputState`], which hands
//! the session one [`InputFrame`] of game actions per frame.

use std::collections::{HashMap, HashSet};

use bitflags::bitflags;
use glam::Vec2;

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Special keys
    Space, Enter, Escape, Tab,

    // Arrow keys
    Left, Right, Up, Down,

    // Other
    Unknown,
}

/// Input event types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    /// Relative mouse motion
    MouseMoved { dx: f32, dy: f32 },
    /// Window close request
    CloseRequested,
}

bitflags! {
    /// Game actions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Actions: u16 {
        const FORWARD = 1 << 0;
        const BACK = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const JUMP = 1 << 4;
        const SHOOT = 1 << 5;
        const SPAWN_CRATE = 1 << 6;
        const RESET = 1 << 7;
        const QUIT = 1 << 8;

        const MOVEMENT = Self::FORWARD.bits() | Self::BACK.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// Key to action mapping
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Actions>,
}

impl KeyBindings {
    /// No keys bound
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Bind `key` to `actions`, adding to any existing binding
    pub fn bind(&mut self, key: KeyCode, actions: Actions) -> &mut Self {
        *self.bindings.entry(key).or_default() |= actions;
        self
    }

    /// Remove every action from `key`
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Actions bound to `key`
    pub fn actions(&self, key: KeyCode) -> Actions {
        self.bindings.get(&key).copied().unwrap_or_default()
    }

    /// Union of the actions bound to every key in `keys`
    pub fn resolve<'a>(&self, keys: impl IntoIterator<Item = &'a KeyCode>) -> Actions {
        keys.into_iter().fold(Actions::empty(), |acc, key| acc | self.actions(*key))
    }
}

impl Default for KeyBindings {
    /// WASD movement, Space jump, F shoot, G crate, R reset, Escape quit
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings
            .bind(KeyCode::W, Actions::FORWARD)
            .bind(KeyCode::S, Actions::BACK)
            .bind(KeyCode::A, Actions::LEFT)
            .bind(KeyCode::D, Actions::RIGHT)
            .bind(KeyCode::Space, Actions::JUMP)
            .bind(KeyCode::F, Actions::SHOOT)
            .bind(KeyCode::G, Actions::SPAWN_CRATE)
            .bind(KeyCode::R, Actions::RESET)
            .bind(KeyCode::Escape, Actions::QUIT);
        bindings
    }
}

/// Everything the session reads from input for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputFrame {
    /// Actions whose keys are down
    pub held: Actions,
    /// Actions whose keys went down this frame
    pub pressed: Actions,
    /// Accumulated mouse motion this frame
    pub mouse_delta: Vec2,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_held(mut self, actions: Actions) -> Self {
        self.held |= actions;
        self
    }

    /// Mark `actions` as pressed this frame (and therefore held)
    pub fn with_pressed(mut self, actions: Actions) -> Self {
        self.pressed |= actions;
        self.held |= actions;
        self
    }

    pub fn with_mouse_delta(mut self, delta: Vec2) -> Self {
        self.mouse_delta = delta;
        self
    }
}

/// Keyboard and mouse state across frames
#[derive(Debug, Clone)]
pub struct InputState {
    bindings: KeyBindings,
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Mouse delta this frame
    mouse_delta: Vec2,
    close_requested: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys_pressed: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_delta: Vec2::ZERO,
            close_requested: false,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Handle an input event
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyPressed(key) => {
                // Auto-repeat does not count as a new press
                if self.keys_pressed.insert(*key) {
                    self.keys_just_pressed.insert(*key);
                }
            }
            InputEvent::KeyReleased(key) => {
                self.keys_pressed.remove(key);
            }
            InputEvent::MouseMoved { dx, dy } => {
                self.mouse_delta += Vec2::new(*dx, *dy);
            }
            InputEvent::CloseRequested => {
                self.close_requested = true;
            }
        }
    }

    /// Actions for the frame so far
    pub fn frame(&self) -> InputFrame {
        let mut pressed = self.bindings.resolve(&self.keys_just_pressed);
        if self.close_requested {
            pressed |= Actions::QUIT;
        }
        InputFrame {
            held: self.bindings.resolve(&self.keys_pressed) | pressed,
            pressed,
            mouse_delta: self.mouse_delta,
        }
    }

    /// Clear per-frame state (call at the end of each frame)
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
        self.close_requested = false;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
