//! Click-to-select rules for timeline segments.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::state::{Selection, TrackKind};

/// Host platform, for picking the multi-select and shortcut modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    /// Platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// Modifier keys held during a pointer or key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "generated/")]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    /// Cmd on macOS, Ctrl elsewhere.
    pub fn primary(&self, platform: Platform) -> bool {
        match platform {
            Platform::MacOs => self.meta,
            Platform::Other => self.ctrl,
        }
    }
}

/// Selection after clicking segment `index` on track `kind`.
///
/// - shift with a selection on the same track: contiguous range from the
///   most recently selected index to `index`
/// - Cmd/Ctrl: toggle `index` in the same-track selection (empty becomes None)
/// - otherwise: just `index`
///
/// Clicking another track always starts over; tracks never mix.
pub fn apply_click(
    current: Option<&Selection>,
    kind: TrackKind,
    index: usize,
    modifiers: Modifiers,
    platform: Platform,
) -> Option<Selection> {
    let same_track = current.filter(|s| s.kind == kind && !s.indices.is_empty());

    if modifiers.shift {
        if let Some(selection) = same_track {
            let last = selection.indices[selection.indices.len() - 1];
            let (lo, hi) = (last.min(index), last.max(index));
            return Some(Selection {
                kind,
                indices: (lo..=hi).collect(),
            });
        }
    }

    if modifiers.primary(platform) {
        if let Some(selection) = same_track {
            let indices: Vec<usize> = if selection.indices.contains(&index) {
                selection.indices.iter().copied().filter(|&i| i != index).collect()
            } else {
                let mut indices = selection.indices.clone();
                indices.push(index);
                indices
            };
            return if indices.is_empty() {
                None
            } else {
                Some(Selection { kind, indices })
            };
        }
    }

    Some(Selection::single(kind, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoom(indices: &[usize]) -> Selection {
        Selection {
            kind: TrackKind::Zoom,
            indices: indices.to_vec(),
        }
    }

    #[test]
    fn test_plain_click_replaces() {
        let current = zoom(&[1, 2]);
        let next = apply_click(Some(&current), TrackKind::Zoom, 5, Modifiers::NONE, Platform::Other);
        assert_eq!(next, Some(zoom(&[5])));
    }

    #[test]
    fn test_shift_click_selects_range() {
        let current = zoom(&[2, 6]);
        let next = apply_click(Some(&current), TrackKind::Zoom, 3, Modifiers::shift(), Platform::Other);
        assert_eq!(next, Some(zoom(&[3, 4, 5, 6])));

        let next = apply_click(Some(&zoom(&[1])), TrackKind::Zoom, 4, Modifiers::shift(), Platform::Other);
        assert_eq!(next, Some(zoom(&[1, 2, 3, 4])));
    }

    #[test]
    fn test_shift_click_without_selection_is_plain() {
        let next = apply_click(None, TrackKind::Clip, 2, Modifiers::shift(), Platform::Other);
        assert_eq!(next, Some(Selection::single(TrackKind::Clip, 2)));
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let current = zoom(&[1, 3]);
        let added = apply_click(Some(&current), TrackKind::Zoom, 4, Modifiers::ctrl(), Platform::Other);
        assert_eq!(added, Some(zoom(&[1, 3, 4])));

        let removed = apply_click(Some(&current), TrackKind::Zoom, 1, Modifiers::ctrl(), Platform::Other);
        assert_eq!(removed, Some(zoom(&[3])));

        let emptied = apply_click(Some(&zoom(&[3])), TrackKind::Zoom, 3, Modifiers::ctrl(), Platform::Other);
        assert_eq!(emptied, None);
    }

    #[test]
    fn test_multi_select_modifier_is_platform_specific() {
        let current = zoom(&[1]);
        let mac = apply_click(Some(&current), TrackKind::Zoom, 2, Modifiers::meta(), Platform::MacOs);
        assert_eq!(mac, Some(zoom(&[1, 2])));

        // Ctrl on macOS is not the multi-select key.
        let mac_ctrl = apply_click(Some(&current), TrackKind::Zoom, 2, Modifiers::ctrl(), Platform::MacOs);
        assert_eq!(mac_ctrl, Some(zoom(&[2])));
    }

    #[test]
    fn test_other_track_starts_fresh() {
        let current = zoom(&[1, 2]);
        for modifiers in [Modifiers::NONE, Modifiers::shift(), Modifiers::ctrl()] {
            let next = apply_click(Some(&current), TrackKind::Scene, 0, modifiers, Platform::Other);
            assert_eq!(next, Some(Selection::single(TrackKind::Scene, 0)));
        }
    }
}
