//! Key events and the normal-mode key map.
//!
//! ## Learning: Tagged Variants Instead of Callbacks
//!
//! An input source hands the editor plain values (`KeyEvent`) and the
//! editor decides what they mean with a `match`. Nothing here stores a
//! function pointer, and nothing reaches into a global input context.

use crate::config::Config;
use crate::mode::Transition;
use crate::{CoreError, CoreResult};
use std::collections::HashMap;

/// Named control keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Escape,
    Enter,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    /// Dedicated "enter insert mode" key, for hosts that have one
    Insert,
    /// Dedicated "enter select mode" key
    Select,
}

impl NamedKey {
    /// Parses a key name such as `"esc"` or `"Enter"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "esc" | "escape" => Some(NamedKey::Escape),
            "cr" | "enter" | "return" => Some(NamedKey::Enter),
            "bs" | "backspace" => Some(NamedKey::Backspace),
            "left" => Some(NamedKey::Left),
            "right" => Some(NamedKey::Right),
            "up" => Some(NamedKey::Up),
            "down" => Some(NamedKey::Down),
            "insert" | "ins" => Some(NamedKey::Insert),
            "select" => Some(NamedKey::Select),
            _ => None,
        }
    }

    /// Returns true for the four arrow keys.
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            NamedKey::Left | NamedKey::Right | NamedKey::Up | NamedKey::Down
        )
    }
}

impl std::fmt::Display for NamedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NamedKey::Escape => "Esc",
            NamedKey::Enter => "CR",
            NamedKey::Backspace => "BS",
            NamedKey::Left => "Left",
            NamedKey::Right => "Right",
            NamedKey::Up => "Up",
            NamedKey::Down => "Down",
            NamedKey::Insert => "Insert",
            NamedKey::Select => "Select",
        };
        f.write_str(name)
    }
}

/// A single discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// A typed character (may be non-printable; consumers filter)
    Character(char),
    /// A control key
    Named(NamedKey),
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        KeyEvent::Character(c)
    }
}

impl From<NamedKey> for KeyEvent {
    fn from(key: NamedKey) -> Self {
        KeyEvent::Named(key)
    }
}

impl std::fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyEvent::Character('<') => write!(f, "<lt>"),
            KeyEvent::Character(c) => write!(f, "{c}"),
            KeyEvent::Named(key) => write!(f, "<{key}>"),
        }
    }
}

/// Parses Vim-style key notation into events.
///
/// `<Esc>`, `<CR>`, `<BS>`, `<Left>` and friends become named keys, `<lt>`
/// is a literal `<`, and every other character is a `Character` event. An
/// unterminated or unknown `<...>` group is taken literally.
///
/// ```
/// use quire_core::keymap::{parse_keys, KeyEvent, NamedKey};
///
/// let keys = parse_keys(":w<CR>");
/// assert_eq!(keys, vec![
///     KeyEvent::Character(':'),
///     KeyEvent::Character('w'),
///     KeyEvent::Named(NamedKey::Enter),
/// ]);
/// ```
pub fn parse_keys(input: &str) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(end) = rest.find('>') {
                let name = &rest[1..end];
                let parsed = if name.eq_ignore_ascii_case("lt") {
                    Some(KeyEvent::Character('<'))
                } else {
                    NamedKey::parse(name).map(KeyEvent::Named)
                };
                if let Some(event) = parsed {
                    events.push(event);
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }
        events.push(KeyEvent::Character(c));
        rest = &rest[c.len_utf8()..];
    }

    events
}

/// Maps normal-mode keys to mode transitions.
///
/// Only consulted while the editor is in `Normal` mode; in every other mode
/// characters are text (or ignored).
#[derive(Debug, Clone)]
pub struct Keymap {
    by_char: HashMap<char, Transition>,
}

impl Keymap {
    /// Default bindings: `i` insert, `v` select, `:` command.
    pub fn new() -> Self {
        let mut keymap = Self {
            by_char: HashMap::new(),
        };
        keymap.bind('i', Transition::EnterInsert);
        keymap.bind('v', Transition::EnterSelect);
        keymap.bind(':', Transition::EnterCommand);
        keymap
    }

    /// Creates a keymap from configuration.
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let keyboard = &config.keyboard;
        let mut keymap = Self {
            by_char: HashMap::new(),
        };
        keymap.bind(
            Self::single_char(&keyboard.enter_insert)?,
            Transition::EnterInsert,
        );
        keymap.bind(
            Self::single_char(&keyboard.enter_select)?,
            Transition::EnterSelect,
        );
        keymap.bind(
            Self::single_char(&keyboard.command_prefix)?,
            Transition::EnterCommand,
        );
        Ok(keymap)
    }

    fn single_char(s: &str) -> CoreResult<char> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if quire_buffer::Cell::new(c).is_some() => Ok(c),
            _ => Err(CoreError::Config(crate::config::ConfigError::InvalidKey(
                s.to_string(),
            ))),
        }
    }

    /// Binds a character to a transition, replacing any previous binding.
    pub fn bind(&mut self, c: char, transition: Transition) {
        self.by_char.retain(|_, t| *t != transition);
        self.by_char.insert(c, transition);
    }

    /// Resolves an event typed in normal mode.
    pub fn resolve(&self, event: KeyEvent) -> Option<Transition> {
        match event {
            KeyEvent::Character(c) => self.by_char.get(&c).copied(),
            KeyEvent::Named(NamedKey::Insert) => Some(Transition::EnterInsert),
            KeyEvent::Named(NamedKey::Select) => Some(Transition::EnterSelect),
            KeyEvent::Named(_) => None,
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_key_parse() {
        assert_eq!(NamedKey::parse("ESC"), Some(NamedKey::Escape));
        assert_eq!(NamedKey::parse("return"), Some(NamedKey::Enter));
        assert_eq!(NamedKey::parse("bs"), Some(NamedKey::Backspace));
        assert_eq!(NamedKey::parse("f13"), None);
    }

    #[test]
    fn test_parse_keys() {
        use KeyEvent::{Character, Named};
        assert_eq!(
            parse_keys("i<lt>a<Esc><Left>"),
            vec![
                Character('i'),
                Character('<'),
                Character('a'),
                Named(NamedKey::Escape),
                Named(NamedKey::Left),
            ]
        );
    }

    #[test]
    fn test_parse_keys_unknown_group_is_literal() {
        let keys = parse_keys("<nope>");
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[0], KeyEvent::Character('<'));
        assert_eq!(parse_keys("a<"), vec!['a'.into(), '<'.into()]);
    }

    #[test]
    fn test_display_round_trips() {
        let keys = parse_keys(":wq<CR><lt><BS>");
        let shown: String = keys.iter().map(ToString::to_string).collect();
        assert_eq!(parse_keys(&shown), keys);
    }

    #[test]
    fn test_keymap_defaults() {
        let keymap = Keymap::new();
        assert_eq!(keymap.resolve('i'.into()), Some(Transition::EnterInsert));
        assert_eq!(keymap.resolve('v'.into()), Some(Transition::EnterSelect));
        assert_eq!(keymap.resolve(':'.into()), Some(Transition::EnterCommand));
        assert_eq!(keymap.resolve('x'.into()), None);
        assert_eq!(keymap.resolve(NamedKey::Enter.into()), None);
        assert_eq!(keymap.resolve(NamedKey::Escape.into()), None);
        assert_eq!(keymap.resolve(NamedKey::Insert.into()), Some(Transition::EnterInsert));
    }

    #[test]
    fn test_keymap_from_config() {
        let mut config = Config::default();
        config.keyboard.enter_insert = "a".to_string();
        config.keyboard.command_prefix = ";".to_string();

        let keymap = Keymap::from_config(&config).unwrap();
        assert_eq!(keymap.resolve('a'.into()), Some(Transition::EnterInsert));
        assert_eq!(keymap.resolve(';'.into()), Some(Transition::EnterCommand));
        assert_eq!(keymap.resolve('i'.into()), None);
        assert_eq!(keymap.resolve(':'.into()), None);
    }

    #[test]
    fn test_keymap_rejects_bad_key() {
        let mut config = Config::default();
        config.keyboard.enter_select = "vv".to_string();
        assert!(Keymap::from_config(&config).is_err());

        config.keyboard.enter_select = "\t".to_string();
        assert!(Keymap::from_config(&config).is_err());
    }
}
