//! Keyboard shortcuts for the editor commands.
//!
//! Ctrl and Cmd (meta) are interchangeable so the same bindings work on
//! every platform:
//! - Ctrl/Cmd+K clears the editor
//! - Ctrl/Cmd+Shift+C copies the editor contents
//!
//! Alt is ignored when matching, so Ctrl+Alt+K still clears.

use std::fmt;

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Alt key (Option on Mac).
    pub alt: bool,
    /// Shift key.
    pub shift: bool,
    /// Meta key (Windows key, Cmd on Mac).
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self::new(false, false, false, false);

    /// Ctrl only.
    pub const CTRL: Self = Self::new(true, false, false, false);

    /// Ctrl+Shift.
    pub const CTRL_SHIFT: Self = Self::new(true, false, true, false);

    /// Meta only.
    pub const META: Self = Self::new(false, false, false, true);

    /// Create custom modifiers.
    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            meta,
        }
    }

    /// Fold meta into ctrl and drop alt.
    pub const fn normalized(self) -> Self {
        Self {
            ctrl: self.ctrl || self.meta,
            alt: false,
            shift: self.shift,
            meta: false,
        }
    }

    /// Check if any modifier is pressed.
    pub const fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key plus modifiers. Keys are stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// The key.
    pub key: char,
    /// Modifier keys.
    pub modifiers: Modifiers,
}

impl Shortcut {
    /// Create a new shortcut.
    pub fn new(key: char, modifiers: Modifiers) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            modifiers: modifiers.normalized(),
        }
    }

    /// Create a shortcut with Ctrl (or Cmd).
    pub fn ctrl(key: char) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// Create a shortcut with Ctrl+Shift (or Cmd+Shift).
    pub fn ctrl_shift(key: char) -> Self {
        Self::new(key, Modifiers::CTRL_SHIFT)
    }

    /// Build from a browser `KeyboardEvent.key` value. Only single-character
    /// keys can form a shortcut.
    pub fn from_key_event(key: &str, modifiers: Modifiers) -> Option<Self> {
        let mut chars = key.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(c, modifiers))
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key.to_ascii_uppercase();
        if self.modifiers.any() {
            write!(f, "{}+{key}", self.modifiers)
        } else {
            write!(f, "{key}")
        }
    }
}

/// Commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    /// Empty the editor
    Clear,
    /// Copy the editor contents to the clipboard
    Copy,
}

impl EditorCommand {
    /// Button label for this command.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Copy => "Copy",
        }
    }
}

/// Bindings from shortcuts to commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutMap {
    bindings: Vec<(Shortcut, EditorCommand)>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self::empty()
            .bind(Shortcut::ctrl('k'), EditorCommand::Clear)
            .bind(Shortcut::ctrl_shift('c'), EditorCommand::Copy)
    }
}

impl ShortcutMap {
    /// Map with no bindings.
    pub const fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add or replace the binding for `shortcut`.
    pub fn bind(mut self, shortcut: Shortcut, command: EditorCommand) -> Self {
        self.bindings.retain(|(s, _)| *s != shortcut);
        self.bindings.push((shortcut, command));
        self
    }

    /// Command bound to `shortcut`, if any.
    pub fn lookup(&self, shortcut: Shortcut) -> Option<EditorCommand> {
        self.bindings
            .iter()
            .find(|(s, _)| *s == shortcut)
            .map(|(_, c)| *c)
    }

    /// Resolve a browser key event.
    pub fn resolve(&self, key: &str, modifiers: Modifiers) -> Option<EditorCommand> {
        Shortcut::from_key_event(key, modifiers).and_then(|s| self.lookup(s))
    }

    /// Shortcut bound to `command`, if any.
    pub fn shortcut_for(&self, command: EditorCommand) -> Option<Shortcut> {
        self.bindings
            .iter()
            .find(|(_, c)| *c == command)
            .map(|(s, _)| *s)
    }

    /// Tooltip for the button running `command`, e.g. `Clear (Ctrl+K)`.
    pub fn tooltip(&self, command: EditorCommand) -> String {
        match self.shortcut_for(command) {
            Some(shortcut) => format!("{} ({shortcut})", command.label()),
            None => command.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_k_clears() {
        let map = ShortcutMap::default();
        assert_eq!(map.resolve("k", Modifiers::CTRL), Some(EditorCommand::Clear));
    }

    #[test]
    fn test_cmd_k_clears() {
        let map = ShortcutMap::default();
        assert_eq!(map.resolve("k", Modifiers::META), Some(EditorCommand::Clear));
    }

    #[test]
    fn test_ctrl_shift_c_copies() {
        let map = ShortcutMap::default();
        assert_eq!(
            map.resolve("C", Modifiers::CTRL_SHIFT),
            Some(EditorCommand::Copy)
        );
        let cmd_shift = Modifiers::new(false, false, true, true);
        assert_eq!(map.resolve("C", cmd_shift), Some(EditorCommand::Copy));
    }

    #[test]
    fn test_alt_is_ignored() {
        let map = ShortcutMap::default();
        let ctrl_alt = Modifiers::new(true, true, false, false);
        assert_eq!(map.resolve("k", ctrl_alt), Some(EditorCommand::Clear));
        let ctrl_alt_shift = Modifiers::new(true, true, true, false);
        assert_eq!(map.resolve("C", ctrl_alt_shift), Some(EditorCommand::Copy));
        assert_eq!(Shortcut::new('k', ctrl_alt), Shortcut::ctrl('k'));
    }

    #[test]
    fn test_plain_ctrl_c_is_left_to_the_browser() {
        let map = ShortcutMap::default();
        assert_eq!(map.resolve("c", Modifiers::CTRL), None);
    }

    #[test]
    fn test_unmodified_keys_do_nothing() {
        let map = ShortcutMap::default();
        assert_eq!(map.resolve("k", Modifiers::NONE), None);
        assert_eq!(map.resolve("Enter", Modifiers::CTRL), None);
        assert_eq!(map.resolve("", Modifiers::CTRL), None);
    }

    #[test]
    fn test_bind_replaces_existing() {
        let map = ShortcutMap::default().bind(Shortcut::ctrl('k'), EditorCommand::Copy);
        assert_eq!(map.lookup(Shortcut::ctrl('k')), Some(EditorCommand::Copy));
    }

    #[test]
    fn test_shortcut_display() {
        let map = ShortcutMap::default();
        let copy = map.shortcut_for(EditorCommand::Copy).unwrap();
        assert_eq!(copy.to_string(), "Ctrl+Shift+C");
        assert_eq!(Shortcut::new('x', Modifiers::NONE).to_string(), "X");
    }

    #[test]
    fn test_tooltips() {
        let map = ShortcutMap::default();
        assert_eq!(map.tooltip(EditorCommand::Clear), "Clear (Ctrl+K)");
        assert_eq!(map.tooltip(EditorCommand::Copy), "Copy (Ctrl+Shift+C)");
        assert_eq!(ShortcutMap::empty().tooltip(EditorCommand::Copy), "Copy");
    }
}
