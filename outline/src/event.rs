//! Input events delivered to the outline control.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::error::KeybindError;

/// High-level events targeted at the outline control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer button pressed inside (or near) the control
    MouseDown(PointerEvent),
    /// Key press while the control may own focus
    Key(KeyCombo),
    /// Control became the focus owner
    Focus,
    /// Control stopped being the focus owner
    Blur,
}

impl Event {
    /// Convert a raw crossterm event.
    ///
    /// Returns `None` for events the control never reacts to (releases,
    /// drags, resizes, paste).
    pub fn from_crossterm(raw: &CrosstermEvent) -> Option<Self> {
        match raw {
            CrosstermEvent::Key(key_event) => {
                // Only process key press events (not release/repeat on some terminals)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                let combo = KeyCombo::new(key_event.code.into(), key_event.modifiers.into());
                Some(Event::Key(combo.normalized()))
            }
            CrosstermEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(button) => Some(Event::MouseDown(PointerEvent {
                    x: mouse.column,
                    y: mouse.row,
                    button: button.into(),
                    modifiers: mouse.modifiers.into(),
                })),
                _ => None,
            },
            CrosstermEvent::FocusGained => Some(Event::Focus),
            CrosstermEvent::FocusLost => Some(Event::Blur),
            _ => None,
        }
    }
}

/// A pointer-down at a screen location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: u16,
    pub y: u16,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Primary button press without modifiers.
    pub fn primary(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
    }

    /// Secondary (context) button press without modifiers.
    pub fn secondary(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            button: MouseButton::Right,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored (or forwarded to the next responder).
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers. `meta` is the command key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Ctrl or command held; both toggle a row in and out of the selection.
    pub fn toggles(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub const fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    /// Lowercase character keys so `Shift+N` arriving as `'N'` matches a
    /// binding declared as `shift+n`.
    pub fn normalized(self) -> Self {
        match self.key {
            Key::Char(c) => Self {
                key: Key::Char(c.to_ascii_lowercase()),
                modifiers: self.modifiers,
            },
            _ => self,
        }
    }
}

impl fmt::Display for KeyCombo {
    /// Menu-style label, modifiers in the conventional ⌃⌥⇧⌘ order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("⌃")?;
        }
        if self.modifiers.alt {
            f.write_str("⌥")?;
        }
        if self.modifiers.shift {
            f.write_str("⇧")?;
        }
        if self.modifiers.meta {
            f.write_str("⌘")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::Enter => f.write_str("↩"),
            Key::Backspace => f.write_str("⌫"),
            Key::Delete => f.write_str("⌦"),
            Key::Tab => f.write_str("⇥"),
            Key::BackTab => f.write_str("⇤"),
            Key::Escape => f.write_str("⎋"),
            Key::Space => f.write_str("Space"),
            Key::Up => f.write_str("↑"),
            Key::Down => f.write_str("↓"),
            Key::Left => f.write_str("←"),
            Key::Right => f.write_str("→"),
            Key::Home => f.write_str("↖"),
            Key::End => f.write_str("↘"),
            Key::PageUp => f.write_str("⇞"),
            Key::PageDown => f.write_str("⇟"),
            Key::Insert => f.write_str("Ins"),
            Key::F(n) => write!(f, "F{}", n),
        }
    }
}

impl FromStr for KeyCombo {
    type Err = KeybindError;

    /// Parse shortcuts like `cmd+shift+n`, `return` or `F2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeybindError::InvalidCombo(s.to_string());
        let mut modifiers = Modifiers::NONE;
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            if key.is_some() {
                // The key must be the last segment
                return Err(invalid());
            }
            match part.to_ascii_lowercase().as_str() {
                "cmd" | "command" | "meta" | "super" => modifiers.meta = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "opt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                other => key = Some(parse_key(other).ok_or_else(invalid)?),
            }
        }

        key.map(|key| KeyCombo::new(key, modifiers)).ok_or_else(invalid)
    }
}

fn parse_key(name: &str) -> Option<Key> {
    let key = match name {
        "return" | "enter" => Key::Enter,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "tab" => Key::Tab,
        "backtab" => Key::BackTab,
        "escape" | "esc" => Key::Escape,
        "space" => Key::Space,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "insert" => Key::Insert,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                (Some('f'), Some(_)) => {
                    let n: u8 = name[1..].parse().ok()?;
                    if !(1..=12).contains(&n) {
                        return None;
                    }
                    Key::F(n)
                }
                _ => return None,
            }
        }
    };
    Some(key)
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            meta: mods.contains(KeyModifiers::SUPER) || mods.contains(KeyModifiers::META),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
