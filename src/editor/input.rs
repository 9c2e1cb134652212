//! Keyboard shortcut table.
//!
//! Keys are identified by their layout-independent DOM `code`
//! (`KeyS`, `Equal`, ...). Shortcuts are ignored while a text field has
//! focus so typing in a title box never edits the timeline.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::selection::{Modifiers, Platform};

/// Physical keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "generated/")]
pub enum KeyCode {
    KeyS,
    KeyC,
    KeyZ,
    KeyY,
    Equal,
    Minus,
    Space,
    Backspace,
    Delete,
    Escape,
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.code`. Unhandled keys give None.
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "KeyS" => KeyCode::KeyS,
            "KeyC" => KeyCode::KeyC,
            "KeyZ" => KeyCode::KeyZ,
            "KeyY" => KeyCode::KeyY,
            "Equal" => KeyCode::Equal,
            "Minus" => KeyCode::Minus,
            "Space" => KeyCode::Space,
            "Backspace" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            "Escape" => KeyCode::Escape,
            _ => return None,
        };
        Some(key)
    }
}

/// A key press as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    /// An input, textarea or contenteditable element has focus.
    pub in_text_field: bool,
}

impl KeyPress {
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            in_text_field: false,
        }
    }
}

/// What a shortcut asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum EditorAction {
    ToggleSplitMode,
    ZoomIn,
    ZoomOut,
    TogglePlayback,
    DeleteSelection,
    SplitClipAtCursor,
    ClearSelection,
    Undo,
    Redo,
}

/// Result of offering a key press to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct KeyOutcome {
    pub action: Option<EditorAction>,
    /// The host must stop the event (preventDefault + stopPropagation).
    pub consume: bool,
}

impl KeyOutcome {
    pub const IGNORED: KeyOutcome = KeyOutcome {
        action: None,
        consume: false,
    };

    pub fn handled(action: EditorAction) -> Self {
        Self {
            action: Some(action),
            consume: true,
        }
    }
}

/// Map a key press to an action.
pub fn action_for(press: &KeyPress, platform: Platform) -> Option<EditorAction> {
    if press.in_text_field {
        return None;
    }

    let mods = press.modifiers;
    let primary = mods.primary(platform);
    let bare = mods == Modifiers::NONE;

    let action = match press.code {
        KeyCode::KeyZ if primary && mods.shift => EditorAction::Redo,
        KeyCode::KeyZ if primary => EditorAction::Undo,
        KeyCode::KeyY if primary => EditorAction::Redo,
        KeyCode::Equal if primary => EditorAction::ZoomIn,
        KeyCode::Minus if primary => EditorAction::ZoomOut,
        KeyCode::KeyS if bare => EditorAction::ToggleSplitMode,
        KeyCode::Space if bare => EditorAction::TogglePlayback,
        KeyCode::Backspace => EditorAction::DeleteSelection,
        KeyCode::Delete if bare => EditorAction::DeleteSelection,
        KeyCode::KeyC if bare => EditorAction::SplitClipAtCursor,
        KeyCode::Escape if bare => EditorAction::ClearSelection,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: Modifiers) -> KeyPress {
        KeyPress::new(code, modifiers)
    }

    #[test]
    fn test_undo_redo_bindings() {
        let p = Platform::Other;
        assert_eq!(action_for(&press(KeyCode::KeyZ, Modifiers::ctrl()), p), Some(EditorAction::Undo));
        let ctrl_shift = Modifiers {
            shift: true,
            ..Modifiers::ctrl()
        };
        assert_eq!(action_for(&press(KeyCode::KeyZ, ctrl_shift), p), Some(EditorAction::Redo));
        assert_eq!(action_for(&press(KeyCode::KeyY, Modifiers::ctrl()), p), Some(EditorAction::Redo));
        assert_eq!(action_for(&press(KeyCode::KeyZ, Modifiers::NONE), p), None);
    }

    #[test]
    fn test_mod_is_cmd_on_macos() {
        let mac = Platform::MacOs;
        assert_eq!(action_for(&press(KeyCode::KeyZ, Modifiers::meta()), mac), Some(EditorAction::Undo));
        assert_eq!(action_for(&press(KeyCode::KeyZ, Modifiers::ctrl()), mac), None);
        assert_eq!(action_for(&press(KeyCode::Equal, Modifiers::meta()), mac), Some(EditorAction::ZoomIn));
    }

    #[test]
    fn test_bare_keys() {
        let p = Platform::Other;
        assert_eq!(action_for(&press(KeyCode::KeyS, Modifiers::NONE), p), Some(EditorAction::ToggleSplitMode));
        assert_eq!(action_for(&press(KeyCode::KeyS, Modifiers::ctrl()), p), None);
        assert_eq!(action_for(&press(KeyCode::Space, Modifiers::NONE), p), Some(EditorAction::TogglePlayback));
        assert_eq!(action_for(&press(KeyCode::KeyC, Modifiers::NONE), p), Some(EditorAction::SplitClipAtCursor));
        assert_eq!(action_for(&press(KeyCode::Escape, Modifiers::NONE), p), Some(EditorAction::ClearSelection));
        assert_eq!(action_for(&press(KeyCode::Minus, Modifiers::ctrl()), p), Some(EditorAction::ZoomOut));
    }

    #[test]
    fn test_delete_keys() {
        let p = Platform::Other;
        assert_eq!(action_for(&press(KeyCode::Backspace, Modifiers::shift()), p), Some(EditorAction::DeleteSelection));
        assert_eq!(action_for(&press(KeyCode::Delete, Modifiers::NONE), p), Some(EditorAction::DeleteSelection));
        assert_eq!(action_for(&press(KeyCode::Delete, Modifiers::shift()), p), None);
    }

    #[test]
    fn test_text_field_focus_ignores_shortcuts() {
        let mut key = press(KeyCode::KeyS, Modifiers::NONE);
        key.in_text_field = true;
        assert_eq!(action_for(&key, Platform::Other), None);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(KeyCode::from_code("Equal"), Some(KeyCode::Equal));
        assert_eq!(KeyCode::from_code("KeyQ"), None);
    }
}
