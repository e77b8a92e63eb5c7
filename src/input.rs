//! Key handling: maps terminal key events to game commands

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the driving loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(Action),
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub restart: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Unknown key name in settings: {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            restart: Self::parse_keys(&settings.keys.restart),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Translates key presses into commands
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle any key event. Only presses map to a command; release and
    /// repeat events are dropped.
    pub fn key_event(&self, key: KeyEvent, game_over: bool) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        self.key_down(key, game_over)
    }

    /// Handle a key press. While the game is over only the play-again
    /// prompt answers (y / n), restart and quit are recognised.
    pub fn key_down(&self, key: KeyEvent, game_over: bool) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = normalize_key(key.code);
        let bindings = &self.bindings;

        if bindings.quit.contains(&code) {
            return Some(Command::Quit);
        }
        if bindings.restart.contains(&code) {
            return Some(Command::Game(Action::Restart));
        }

        if game_over {
            return match code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Command::Game(Action::Restart)),
                KeyCode::Char('n') => Some(Command::Quit),
                _ => None,
            };
        }

        if bindings.move_left.contains(&code) {
            Some(Command::Game(Action::MoveLeft))
        } else if bindings.move_right.contains(&code) {
            Some(Command::Game(Action::MoveRight))
        } else if bindings.soft_drop.contains(&code) {
            Some(Command::Game(Action::SoftDrop))
        } else if bindings.rotate.contains(&code) {
            Some(Command::Game(Action::Rotate))
        } else {
            None
        }
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
