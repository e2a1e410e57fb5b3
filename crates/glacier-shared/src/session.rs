use crate::account::Account;

/// The locally persisted record proving a user authenticated and was last
/// known to hold admin privilege. All seven fields are written together on
/// every save; there are no partial updates.
///
/// The serialized key names match the record the web panel stored under its
/// `auth-data` key so an existing deployment can be pointed at this client.
#[derive(serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: u64,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub email: String,
    pub username: String,
    pub original_username: String,
    pub is_admin: i64,
    pub created_at: String,
}

impl Session {
    /// Admin status as asserted by the server the last time this record was
    /// written. Gates nothing by itself, the account endpoint is the
    /// authority (see `Client::validate`).
    pub fn is_admin(&self) -> bool {
        self.is_admin != 0
    }

    pub fn from_account(account: Account, access_token: String) -> Self {
        Self {
            id: account.id,
            access_token,
            email: account.email,
            username: account.username,
            original_username: account.original_username,
            is_admin: account.is_admin,
            created_at: account.created_at,
        }
    }

    /// A refreshed copy with profile fields taken from `account` and the
    /// token carried over unchanged. Tokens are only issued by login.
    pub fn refreshed_from(&self, account: Account) -> Self {
        Self::from_account(account, self.access_token.clone())
    }
}

// Sessions end up in trace output through instrumented functions, so the
// token must not appear in the Debug form
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("has_access_token", &!self.access_token.is_empty())
            .field("email", &self.email)
            .field("username", &self.username)
            .field("original_username", &self.original_username)
            .field("is_admin", &self.is_admin)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            id: 7,
            username: "steve".to_string(),
            email: "steve@example.com".to_string(),
            original_username: "Steve".to_string(),
            is_admin: 1,
            created_at: "2023-01-15T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn refresh_preserves_token_and_overwrites_profile() {
        let session = Session::from_account(sample_account(), "tok-original".to_string());
        let mut newer = sample_account();
        newer.username = "steve2".to_string();
        newer.is_admin = 1;

        let refreshed = session.refreshed_from(newer);

        assert_eq!(refreshed.access_token, "tok-original");
        assert_eq!(refreshed.username, "steve2");
    }

    #[test]
    fn debug_form_does_not_leak_the_token() {
        let session = Session::from_account(sample_account(), "tok-secret".to_string());
        let debug = format!("{session:?}");
        assert!(!debug.contains("tok-secret"));
        assert!(debug.contains("has_access_token"));
    }

    #[test]
    fn serialized_record_uses_the_panel_key_names() {
        let session = Session::from_account(sample_account(), "tok-original".to_string());

        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["accessToken"], "tok-original");
        assert_eq!(json["original_username"], "Steve");
        assert_eq!(json["is_admin"], 1);
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn admin_flag_is_non_zero_check() {
        let mut session = Session::from_account(sample_account(), "t".to_string());
        assert!(session.is_admin());
        session.is_admin = 0;
        assert!(!session.is_admin());
    }
}
