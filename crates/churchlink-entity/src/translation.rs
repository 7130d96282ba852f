//! Wire DTOs of the batched translator endpoint.

use churchlink_core::traits::TranslationTable;
use churchlink_core::types::LocaleCode;
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/translator/translate-multi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// Source strings, deduplicated by the caller.
    pub items: Vec<String>,
    /// Locale codes to translate into.
    pub dest_languages: Vec<String>,
    /// Locale code of the source strings.
    pub src: String,
}

impl TranslateRequest {
    pub fn new(items: &[String], dest_languages: &[LocaleCode], src: &LocaleCode) -> Self {
        Self {
            items: items.to_vec(),
            dest_languages: dest_languages.iter().map(|l| l.to_string()).collect(),
            src: src.to_string(),
        }
    }
}

/// Response of the translator: `translations[source][locale]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub translations: TranslationTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let es: LocaleCode = "es".parse().unwrap();
        let en: LocaleCode = "en".parse().unwrap();
        let req = TranslateRequest::new(&["Welcome".to_string()], &[es], &en);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"items":["Welcome"],"dest_languages":["es"],"src":"en"})
        );
    }

    #[test]
    fn test_response_tolerates_missing_table() {
        let resp: TranslateResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.translations.is_empty());
    }
}
