use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
}

/// One entry of the `errors` array the API attaches to failed requests
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct ApiErrorMessage {
    #[serde(default)]
    pub message: String,
}

/// The API reports failures as `{"errors": [{"message": ...}]}` and may do
/// so on any status code, including 200. Shape is not guaranteed, so
/// extraction never fails: entries that don't look like error objects
/// collapse into a fallback message instead of being trusted.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ErrorList(pub Vec<ApiErrorMessage>);

impl ErrorList {
    const FALLBACK_MSG: &'static str = "the server reported an unrecognized error";

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.message.as_str())
    }

    /// Extracts the error list from a decoded response body. `None` means
    /// the body carries no `errors` key and can be treated as its success
    /// shape.
    pub fn from_body(body: &serde_json::Value) -> Option<Self> {
        let errors = body.get("errors")?;
        if errors.is_null() {
            return None;
        }
        let Some(entries) = errors.as_array() else {
            // `errors` was present but not a list, report it generically
            return Some(Self::fallback());
        };
        if entries.is_empty() {
            return None;
        }
        let messages = entries
            .iter()
            .map(|entry| {
                let message = entry
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or(Self::FALLBACK_MSG)
                    .to_string();
                ApiErrorMessage { message }
            })
            .collect();
        Some(Self(messages))
    }

    pub fn fallback() -> Self {
        Self(vec![ApiErrorMessage {
            message: Self::FALLBACK_MSG.to_string(),
        }])
    }
}

impl Display for ErrorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for message in self.messages() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Why a request was rejected, as far as the caller is allowed to know.
/// Authorization failures are deliberately generic (no detail beyond the
/// category leaves this type).
#[derive(Debug, Error)]
pub enum ApiRejection {
    #[error("bad login or password")]
    BadCredentials,
    #[error("this account does not have access to the admin panel")]
    NotAuthorized,
    #[error("{0}")]
    Application(ErrorList),
    #[error("connection failed: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_list_found_even_on_success_status_body() {
        let body: serde_json::Value =
            serde_json::from_str(r#"{"errors":[{"message":"item already owned"}]}"#).unwrap();

        let errors = ErrorList::from_body(&body).expect("errors should be detected");

        assert_eq!(errors.messages().collect::<Vec<_>>(), ["item already owned"]);
    }

    #[test]
    fn absent_or_null_errors_mean_success() {
        let ok: serde_json::Value = serde_json::from_str(r#"{"account":{}}"#).unwrap();
        assert_eq!(ErrorList::from_body(&ok), None);

        let null: serde_json::Value = serde_json::from_str(r#"{"errors":null}"#).unwrap();
        assert_eq!(ErrorList::from_body(&null), None);
    }

    #[test]
    fn unrecognized_error_shapes_fall_back_instead_of_panicking() {
        let not_a_list: serde_json::Value = serde_json::from_str(r#"{"errors":true}"#).unwrap();
        assert_eq!(ErrorList::from_body(&not_a_list), Some(ErrorList::fallback()));

        let odd_entries: serde_json::Value =
            serde_json::from_str(r#"{"errors":["plain string"]}"#).unwrap();
        let list = ErrorList::from_body(&odd_entries).unwrap();
        assert_eq!(list.0.len(), 1);
        assert!(!list.is_empty());
    }
}
