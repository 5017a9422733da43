//! Observable save state and the indicator derived from it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::BackendError;

/// Snapshot of a coordinator's save lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveState {
    /// Edits exist that have not been confirmed saved.
    pub dirty: bool,
    /// A save call is currently outstanding.
    pub in_flight: bool,
    pub last_saved: Option<DateTime<Utc>>,
    /// Error from the most recent failed save; cleared when the next save starts.
    pub last_error: Option<BackendError>,
}

impl SaveState {
    pub fn indicator(&self) -> SaveIndicator {
        if self.last_error.is_some() {
            SaveIndicator::SaveFailed
        } else if self.in_flight {
            SaveIndicator::Saving
        } else if self.dirty {
            SaveIndicator::Unsaved
        } else if self.last_saved.is_some() {
            SaveIndicator::Saved
        } else {
            SaveIndicator::NoChanges
        }
    }

    /// Whether a manual "save now" action should be offered.
    pub fn needs_attention(&self) -> bool {
        self.dirty && !self.in_flight
    }
}

/// What a form should show next to its save button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveIndicator {
    SaveFailed,
    Saving,
    Saved,
    Unsaved,
    NoChanges,
}

impl SaveIndicator {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SaveFailed => "Save failed",
            Self::Saving => "Saving...",
            Self::Saved => "All changes saved",
            Self::Unsaved => "Unsaved changes",
            Self::NoChanges => "No changes",
        }
    }
}

impl std::fmt::Display for SaveIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_no_changes() {
        let state = SaveState::default();
        assert_eq!(state.indicator(), SaveIndicator::NoChanges);
        assert!(!state.needs_attention());
    }

    #[test]
    fn error_outranks_everything() {
        let state = SaveState {
            dirty: true,
            in_flight: true,
            last_saved: Some(Utc::now()),
            last_error: Some(BackendError::network("connection reset")),
        };
        assert_eq!(state.indicator(), SaveIndicator::SaveFailed);
        assert_eq!(state.indicator().to_string(), "Save failed");
    }

    #[test]
    fn saving_then_unsaved_then_saved() {
        let mut state = SaveState {
            dirty: true,
            in_flight: true,
            ..Default::default()
        };
        assert_eq!(state.indicator(), SaveIndicator::Saving);
        assert!(!state.needs_attention());

        state.in_flight = false;
        assert_eq!(state.indicator(), SaveIndicator::Unsaved);
        assert!(state.needs_attention());

        state.dirty = false;
        state.last_saved = Some(Utc::now());
        assert_eq!(state.indicator(), SaveIndicator::Saved);
        assert_eq!(state.indicator().label(), "All changes saved");
    }
}
