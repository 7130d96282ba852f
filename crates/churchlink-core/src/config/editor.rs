//! Editor session settings.

use serde::{Deserialize, Serialize};

/// Settings for in-memory page editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum number of snapshots kept for undo.
    #[serde(default = "default_max_undo_steps")]
    pub max_undo_steps: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_undo_steps: default_max_undo_steps(),
        }
    }
}

fn default_max_undo_steps() -> usize {
    50
}
