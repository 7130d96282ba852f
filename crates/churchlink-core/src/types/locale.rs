//! Site locale codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A validated, normalized locale code such as `en`, `es`, `pt-BR` or
/// `zh-Hant`.
///
/// The primary language subtag is 2-3 ASCII letters and is lowercased.
/// An optional second subtag (region or script) is 2-4 ASCII alphanumerics;
/// two-letter regions are uppercased and four-letter scripts are titlecased.
/// `_` is accepted as a separator and rewritten to `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Return the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`pt` for `pt-BR`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl FromStr for LocaleCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().replace('_', "-");
        let mut parts = raw.split('-');
        let language = parts.next().unwrap_or_default();
        let subtag = parts.next();

        if parts.next().is_some() {
            return Err(invalid(s));
        }
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid(s));
        }

        let mut code = language.to_ascii_lowercase();
        if let Some(subtag) = subtag {
            if !(2..=4).contains(&subtag.len())
                || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(invalid(s));
            }
            code.push('-');
            match subtag.len() {
                2 => code.push_str(&subtag.to_ascii_uppercase()),
                4 => {
                    let (head, tail) = subtag.split_at(1);
                    code.push_str(&head.to_ascii_uppercase());
                    code.push_str(&tail.to_ascii_lowercase());
                }
                _ => code.push_str(subtag),
            }
        }

        Ok(Self(code))
    }
}

fn invalid(s: &str) -> AppError {
    AppError::validation(format!(
        "Invalid locale code: '{s}'. Expected a code like 'en', 'es' or 'pt-BR'"
    ))
}

impl TryFrom<String> for LocaleCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> String {
        code.0
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
