//! Machine translation settings.

use serde::{Deserialize, Serialize};

/// Settings for the batched translator endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Locale of the base `props` / `title` strings when a page does not
    /// declare its own default locale.
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            source_locale: default_source_locale(),
        }
    }
}

fn default_source_locale() -> String {
    "en".to_string()
}
