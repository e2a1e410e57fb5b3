/// Account record as returned by `GET /account`
///
/// `is_admin` is an integer on the wire; anything non-zero grants access to
/// the admin panel. The flag lives on the account record, not in the token,
/// so it has to be re-read from the server to be trusted.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub original_username: String,
    #[serde(default)]
    pub is_admin: i64,
    #[serde(default)]
    pub created_at: String,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.is_admin != 0
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct AccountResponse {
    pub account: Account,
}

/// Success shape of `POST /auth/login`. Both levels are optional so a
/// token-less body deserializes instead of erroring; absence of a token is
/// a rejection, not a decode failure.
#[derive(Debug, serde::Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub auth: Option<AuthBody>,
}

#[derive(Debug, serde::Deserialize)]
pub struct AuthBody {
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// The issued token, treating an empty string the same as absent
    pub fn into_token(self) -> Option<String> {
        self.auth
            .and_then(|a| a.token)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_extracted_from_login_body() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"auth":{"token":"abc123"}}"#).unwrap();
        assert_eq!(response.into_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_or_empty_token_reads_as_absent() {
        let empty: LoginResponse = serde_json::from_str(r#"{"auth":{"token":""}}"#).unwrap();
        assert_eq!(empty.into_token(), None);

        let missing: LoginResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(missing.into_token(), None);
    }
}
