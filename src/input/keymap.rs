//! Key bindings: parsing shortcut strings and resolving key events to actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::warn;

/// Everything a key can ask the board screens to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Progress,
    Regress,
    RaisePriority,
    LowerPriority,
    Refresh,
    Open,
    Back,
    New,
    Edit,
    Delete,
    CopyPath,
    Quit,
}

impl Action {
    /// Resolution order when two actions share a key
    pub const ALL: [Action; 16] = [
        Action::Quit,
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Progress,
        Action::Regress,
        Action::RaisePriority,
        Action::LowerPriority,
        Action::Refresh,
        Action::Open,
        Action::Back,
        Action::New,
        Action::Edit,
        Action::Delete,
        Action::CopyPath,
    ];

    /// Name used for the action in the config file
    pub fn name(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
            Action::Progress => "progress",
            Action::Regress => "regress",
            Action::RaisePriority => "raise-priority",
            Action::LowerPriority => "lower-priority",
            Action::Refresh => "refresh",
            Action::Open => "open",
            Action::Back => "back",
            Action::New => "new",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::CopyPath => "copy-path",
            Action::Quit => "quit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// A single key plus the modifiers that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Parse shortcuts like `"L"`, `"ctrl+c"`, `"Shift+Tab"`, `"left"`.
    ///
    /// Named keys and modifiers ignore case; single characters do not, so
    /// `"L"` and `"l"` are different bindings.
    pub fn parse(shortcut: &str) -> Option<Self> {
        let shortcut = shortcut.trim();
        if let Some((modifier, rest)) = shortcut.split_once('+') {
            if !modifier.is_empty() && !rest.is_empty() {
                let modifier = match modifier.to_lowercase().as_str() {
                    "ctrl" | "control" => KeyModifiers::CONTROL,
                    "alt" => KeyModifiers::ALT,
                    "shift" => KeyModifiers::SHIFT,
                    _ => return None,
                };
                let mut binding = Self::parse(rest)?;
                if modifier == KeyModifiers::SHIFT && binding.code == KeyCode::Tab {
                    binding.code = KeyCode::BackTab;
                } else {
                    binding.modifiers |= modifier;
                }
                return Some(binding);
            }
        }

        let mut chars = shortcut.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Self::char(c));
        }

        let code = match shortcut.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            name => match name.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                Some(n @ 1..=12) => KeyCode::F(n),
                _ => return None,
            },
        };
        Some(Self::plain(code))
    }

    /// Whether a key event triggers this binding.
    ///
    /// Shift is already folded into the character for printable keys, so it
    /// is not compared for them.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let (expected, actual) = match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => (
                self.modifiers.difference(KeyModifiers::SHIFT),
                key.modifiers.difference(KeyModifiers::SHIFT),
            ),
            _ => (self.modifiers, key.modifiers),
        };
        self.code == key.code && expected == actual
    }

    /// Short label for help lines
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::BackTab => "shift+tab".to_string(),
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("f{n}"),
            other => format!("{other:?}").to_lowercase(),
        };
        let mut label = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            label.push_str("ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            label.push_str("alt+");
        }
        label.push_str(&key);
        label
    }
}

/// Immutable action → keys table, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<Action, Vec<KeyBinding>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyBinding as K;

        let table = [
            (Action::Left, vec![K::plain(KeyCode::Left), K::char('h')]),
            (Action::Right, vec![K::plain(KeyCode::Right), K::char('l')]),
            (Action::Up, vec![K::plain(KeyCode::Up), K::char('k')]),
            (Action::Down, vec![K::plain(KeyCode::Down), K::char('j')]),
            (Action::Progress, vec![K::char('L'), K::char('>')]),
            (Action::Regress, vec![K::char('H'), K::char('<')]),
            (Action::RaisePriority, vec![K::char('+'), K::char('=')]),
            (Action::LowerPriority, vec![K::char('-'), K::char('_')]),
            (Action::Refresh, vec![K::char('r')]),
            (Action::Open, vec![K::plain(KeyCode::Enter)]),
            (Action::Back, vec![K::plain(KeyCode::Esc)]),
            (Action::New, vec![K::char('n')]),
            (Action::Edit, vec![K::char('e')]),
            (Action::Delete, vec![K::char('d'), K::char('x')]),
            (Action::CopyPath, vec![K::char('y')]),
            (
                Action::Quit,
                vec![
                    K::char('q'),
                    K::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                ],
            ),
        ];

        Self {
            bindings: table.into_iter().collect(),
        }
    }
}

impl KeyMap {
    /// Defaults with per-action replacements from the config file.
    ///
    /// Unknown actions and unparseable shortcuts are logged and skipped.
    pub fn with_overrides(overrides: &HashMap<String, Vec<String>>) -> Self {
        let mut keymap = Self::default();
        for (name, shortcuts) in overrides {
            let Some(action) = Action::from_name(name) else {
                warn!(action = %name, "Ignoring key binding for unknown action");
                continue;
            };

            let parsed: Vec<KeyBinding> = shortcuts
                .iter()
                .filter_map(|s| {
                    let binding = KeyBinding::parse(s);
                    if binding.is_none() {
                        warn!(action = %name, shortcut = %s, "Ignoring unparseable shortcut");
                    }
                    binding
                })
                .collect();

            if parsed.is_empty() {
                warn!(action = %name, "No usable shortcuts, keeping defaults");
                continue;
            }
            keymap.bindings.insert(action, parsed);
        }
        keymap
    }

    /// Action bound to a key event, if any
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        Action::ALL.into_iter().find(|action| {
            self.bindings(*action)
                .iter()
                .any(|binding| binding.matches(key))
        })
    }

    pub fn bindings(&self, action: Action) -> &[KeyBinding] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Labels of every key for an action, joined with `/`
    pub fn hint(&self, action: Action) -> String {
        self.bindings(action)
            .iter()
            .map(KeyBinding::label)
            .collect::<Vec<_>>()
            .join("/")
    }
}
