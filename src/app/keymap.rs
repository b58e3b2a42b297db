//! Key mapping for millr.
//!
//! Turns configured key strings into [Key]s and maps key events to engine [Event]s. Browsing
//! and previewing have separate maps, so the same key can move the selection in one mode and
//! scroll the preview in the other.

use crate::app::engine::Event;
use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to event for each mode, built from the config
#[derive(Debug, Default)]
pub struct Keymap {
    browse: HashMap<Key, Event>,
    preview: HashMap<Key, Event>,
}

impl Keymap {
    /// Builds the keymap from the `[keys]` config section
    #[rustfmt::skip]
    pub fn from_keys(keys: &Keys) -> Self {
        let mut browse = HashMap::new();
        let mut preview = HashMap::new();

        // Browsing
        bind(keys.move_up(),        Event::MoveUp,          &mut browse);
        bind(keys.move_down(),      Event::MoveDown,        &mut browse);
        bind(keys.descend(),        Event::Descend,         &mut browse);
        bind(keys.ascend(),         Event::Ascend,          &mut browse);
        bind(keys.preview(),        Event::EnterPreview,    &mut browse);
        bind(keys.open(),           Event::Open,            &mut browse);
        bind(keys.home(),           Event::Home,            &mut browse);
        bind(keys.quit(),           Event::Quit,            &mut browse);

        // Previewing
        bind(keys.exit_preview(),   Event::ExitPreview,     &mut preview);
        bind(keys.scroll_up(),      Event::ScrollUp,        &mut preview);
        bind(keys.scroll_down(),    Event::ScrollDown,      &mut preview);
        bind(keys.page_up(),        Event::ScrollPageUp,    &mut preview);
        bind(keys.page_down(),      Event::ScrollPageDown,  &mut preview);
        bind(keys.quit(),           Event::Quit,            &mut preview);

        Keymap { browse, preview }
    }

    /// Looks up the event for a key in the given mode
    pub fn lookup(&self, key: KeyEvent, previewing: bool) -> Option<Event> {
        let map = if previewing { &self.preview } else { &self.browse };
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(event) = map.get(&k).copied() {
            return Some(event);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return map.get(&k2).copied();
        }
        None
    }
}

/// Parses a key string such as `"j"`, `"ctrl+c"`, `"<c-d>"`, `"PgUp"` or `"F5"`.
pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),
            "pgup" | "pageup" => code = Some(KeyCode::PageUp),
            "pgdown" | "pgdn" | "pagedown" => code = Some(KeyCode::PageDown),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], event: Event, map: &mut HashMap<Key, Event>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, event);
            }
            None => tracing::warn!(key = %k, ?event, "ignoring unparsable key binding"),
        }
    }
}
