use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use futures::channel::oneshot;
use glacier_shared::{
    account::{Account, AccountResponse, LoginResponse},
    const_config::path::{PathSpec, PATH_ACCOUNT, PATH_AUTH_LOGIN},
    errors::{ApiRejection, ErrorList},
    req_args::LoginReqArgs,
    session::Session,
};
use reqwest::StatusCode;
use secrecy::ExposeSecret as _;
use tracing::warn;

use crate::session_store::SessionStore;

pub mod api;

/// Talks to the Glacier API on behalf of a UI. All request-issuing methods
/// hand back a oneshot receiver and take a wake callback so the UI can
/// repaint once data lands.
///
/// The session lives in the injected [`SessionStore`], never in this
/// struct; every read goes back to the store so there is no cached copy to
/// go stale.
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
    session_store: Arc<dyn SessionStore>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(glacier_shared::const_config::client::CLIENT_DEFAULT_SERVER_URL.to_string())
    }
}

/// Where the stored session stands after a [`Client::validate`] pass
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// Nothing stored; no network call was made
    NoSession,
    /// The account endpoint vouched for the token and the admin flag;
    /// the stored profile fields were refreshed in place
    Valid,
    /// The lookup failed (transport or error payload); storage was cleared
    Invalid,
    /// The token works but the account is not an admin; storage was
    /// cleared
    InsufficientPrivilege,
}

impl AuthStatus {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let store = crate::session_store::FileSessionStore::default();
        #[cfg(target_arch = "wasm32")]
        let store = crate::session_store::WebSessionStore;
        Self::new_with_store(server_address, Arc::new(store))
    }

    pub fn new_with_store(server_address: String, session_store: Arc<dyn SessionStore>) -> Self {
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner { server_address })),
            session_store,
        }
    }

    /// The stored session, if any. Synchronous and network-free; says
    /// nothing about whether the server still honors it (see
    /// [`Self::validate`]).
    pub fn current_session(&self) -> Option<Session> {
        self.session_store.read()
    }

    /// Unconditionally forgets the stored session. Safe to call when no
    /// session exists.
    #[tracing::instrument]
    pub fn logout(&self) {
        self.session_store.clear();
    }

    /// Two step sign-in: authenticate for a token, then authorize against
    /// the live account record. A valid token whose account lacks the
    /// admin flag is rejected and nothing is persisted, so the second
    /// step can void the first.
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Session>> {
        let (tx, rx) = oneshot::channel();
        let body = serde_json::json!({
            "email": args.email,
            "password": args.password.expose_secret(),
        });
        let client = self.clone();
        let request = self.request(&PATH_AUTH_LOGIN).json(&body);
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_login(resp, client).await;
            send_or_log_drop(tx, msg);
            ui_notify();
        };
        reqwest_cross::fetch(request, on_done);
        rx
    }

    /// Re-checks the stored session against the account endpoint.
    ///
    /// Privilege is not encoded in the token, so the admin flag is re-read
    /// from the live account record every time instead of trusting the
    /// stored copy. Every failure path clears storage; on success the
    /// profile fields are refreshed with the token kept as-is.
    #[tracing::instrument(skip(ui_notify))]
    pub fn validate<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<AuthStatus> {
        let (tx, rx) = oneshot::channel();
        let Some(session) = self.session_store.read() else {
            // Defensive clear so a half-written record cannot linger
            self.session_store.clear();
            send_or_log_drop(tx, AuthStatus::NoSession);
            ui_notify();
            return rx;
        };
        let client = self.clone();
        let request = self
            .request(&PATH_ACCOUNT)
            .bearer_auth(&session.access_token);
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let lookup = process_account_lookup(resp).await;
            let status = apply_validation(&client.session_store, &session, lookup);
            send_or_log_drop(tx, status);
            ui_notify();
        };
        reqwest_cross::fetch(request, on_done);
        rx
    }

    fn send_request_expect_empty<F>(
        &self,
        request: reqwest::RequestBuilder,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_empty(resp).await;
            send_or_log_drop(tx, msg);
            ui_notify();
        };
        reqwest_cross::fetch(request, on_done);
        rx
    }

    /// Request without credentials (login, public stats)
    fn request(&self, path_spec: &PathSpec) -> reqwest::RequestBuilder {
        self.api_client
            .request(path_spec.method.clone(), self.path_to_url(path_spec.path))
    }

    /// Request carrying the stored bearer token. When no session is stored
    /// the request goes out bare and the server answers with its usual
    /// error payload, which is surfaced like any other rejection.
    fn authed_request(&self, path_spec: &PathSpec) -> reqwest::RequestBuilder {
        let request = self.request(path_spec);
        match self.session_store.read() {
            Some(session) => request.bearer_auth(session.access_token),
            None => request,
        }
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .server_address
        )
    }
}

/// Completes the login chain once the account lookup resolved: authorize,
/// then persist. Kept free of I/O so the decision table is unit testable.
fn apply_login(
    store: &Arc<dyn SessionStore>,
    token: String,
    lookup: anyhow::Result<Account>,
) -> anyhow::Result<Session> {
    let account = lookup?;
    if !account.is_admin() {
        // Deliberately generic: authorization failures expose no detail
        return Err(ApiRejection::NotAuthorized.into());
    }
    let session = Session::from_account(account, token);
    store.save(&session)?;
    Ok(session)
}

/// Decision table for [`Client::validate`] once the account lookup
/// resolved. Every non-valid outcome clears the store.
fn apply_validation(
    store: &Arc<dyn SessionStore>,
    prior: &Session,
    lookup: anyhow::Result<Account>,
) -> AuthStatus {
    match lookup {
        Err(err) => {
            warn!(?err, "session validation failed");
            store.clear();
            AuthStatus::Invalid
        }
        Ok(account) if !account.is_admin() => {
            store.clear();
            AuthStatus::InsufficientPrivilege
        }
        Ok(account) => {
            let refreshed = prior.refreshed_from(account);
            match store.save(&refreshed) {
                Ok(()) => AuthStatus::Valid,
                Err(err) => {
                    warn!(?err, "failed to persist refreshed session");
                    store.clear();
                    AuthStatus::Invalid
                }
            }
        }
    }
}

/// Pulls the issued token out of the login response body or classifies the
/// rejection
fn token_from_login_body(
    status: StatusCode,
    body: serde_json::Value,
) -> Result<String, ApiRejection> {
    if let Some(errors) = ErrorList::from_body(&body) {
        return Err(ApiRejection::Application(errors));
    }
    let response: LoginResponse = match serde_json::from_value(body) {
        Ok(response) => response,
        Err(_) if !status.is_success() => {
            return Err(ApiRejection::Transport(format!(
                "request failed with status code: {status}"
            )))
        }
        Err(_) => return Err(ApiRejection::BadCredentials),
    };
    response.into_token().ok_or(ApiRejection::BadCredentials)
}

#[tracing::instrument(skip(client), ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<Session> {
    let (status, body) = extract_json_body(response).await?;
    let token = token_from_login_body(status, body)?;
    // Authenticated; authorization happens against the live account record
    let lookup = client.fetch_account(&token).await;
    apply_login(&client.session_store, token, lookup)
}

impl Client {
    async fn fetch_account(&self, token: &str) -> anyhow::Result<Account> {
        let response = self
            .request(&PATH_ACCOUNT)
            .bearer_auth(token)
            .send()
            .await;
        process_account_lookup(response).await
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_account_lookup(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<Account> {
    let (status, body) = extract_json_body(response).await?;
    reject_on_errors(status, &body)?;
    let response: AccountResponse =
        serde_json::from_value(body).context("failed to parse account response")?;
    Ok(response.account)
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<()> {
    let (status, body) = extract_json_body(response).await?;
    reject_on_errors(status, &body)
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (status, body) = extract_json_body(response).await?;
    reject_on_errors(status, &body)?;
    serde_json::from_value(body).context("failed to parse result as json")
}

/// Decodes the body as JSON without assuming it succeeded. A body that is
/// not JSON decodes as `Null` so the status code decides the outcome.
async fn extract_json_body(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let response =
        response.map_err(|err| anyhow::Error::from(ApiRejection::Transport(err.to_string())))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| anyhow::Error::from(ApiRejection::Transport(err.to_string())))?;
    let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
    Ok((status, body))
}

/// The API reports failures inside the body, on any status code. The error
/// list wins over the status code; a bad status without a recognizable
/// list is still surfaced instead of being dropped.
fn reject_on_errors(status: StatusCode, body: &serde_json::Value) -> anyhow::Result<()> {
    if let Some(errors) = ErrorList::from_body(body) {
        return Err(ApiRejection::Application(errors).into());
    }
    if !status.is_success() {
        return Err(ApiRejection::Transport(format!(
            "request failed with status code: {status}"
        ))
        .into());
    }
    Ok(())
}

/// The receiver side lives in UI state and may be dropped if the page
/// closes mid flight; that loses the response on purpose but is worth a
/// log line.
fn send_or_log_drop<T: Debug>(tx: oneshot::Sender<T>, msg: T) {
    if let Err(unsent) = tx.send(msg) {
        warn!(?unsent, "response discarded, receiver was dropped");
    }
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(test)]
mod tests {
    use crate::InMemorySessionStore;

    use super::*;

    fn store() -> Arc<dyn SessionStore> {
        Arc::new(InMemorySessionStore::default())
    }

    fn admin_account() -> Account {
        Account {
            id: 1,
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            original_username: "Root".to_string(),
            is_admin: 1,
            created_at: "2021-01-01T00:00:00Z".to_string(),
        }
    }

    fn stored_session(store: &Arc<dyn SessionStore>) -> Session {
        let session = Session::from_account(admin_account(), "tok-stored".to_string());
        store.save(&session).unwrap();
        session
    }

    #[test]
    fn login_body_with_token_authenticates() {
        let body = serde_json::json!({"auth": {"token": "issued"}});
        let token = token_from_login_body(StatusCode::OK, body).unwrap();
        assert_eq!(token, "issued");
    }

    #[test]
    fn login_body_without_token_is_bad_credentials() {
        let body = serde_json::json!({"auth": {}});
        let rejection = token_from_login_body(StatusCode::OK, body).unwrap_err();
        assert!(matches!(rejection, ApiRejection::BadCredentials));
    }

    #[test]
    fn login_body_with_error_list_surfaces_each_message() {
        let body = serde_json::json!({"errors": [{"message": "account locked"}]});
        let rejection = token_from_login_body(StatusCode::OK, body).unwrap_err();
        match rejection {
            ApiRejection::Application(errors) => {
                assert_eq!(errors.messages().collect::<Vec<_>>(), ["account locked"]);
            }
            other => panic!("expected application rejection, got {other:?}"),
        }
    }

    #[test]
    fn login_with_non_admin_account_persists_nothing() {
        let store = store();
        let mut account = admin_account();
        account.is_admin = 0;

        let outcome = apply_login(&store, "issued".to_string(), Ok(account));

        assert!(matches!(
            outcome.unwrap_err().downcast::<ApiRejection>().unwrap(),
            ApiRejection::NotAuthorized
        ));
        assert_eq!(store.read(), None, "no session may be written");
    }

    #[test]
    fn login_with_admin_account_persists_the_full_session() {
        let store = store();

        let session = apply_login(&store, "issued".to_string(), Ok(admin_account())).unwrap();

        assert_eq!(session.access_token, "issued");
        assert_eq!(store.read(), Some(session));
    }

    #[test]
    fn login_failed_lookup_persists_nothing() {
        let store = store();

        let outcome = apply_login(
            &store,
            "issued".to_string(),
            Err(ApiRejection::Transport("connection reset".to_string()).into()),
        );

        assert!(outcome.is_err());
        assert_eq!(store.read(), None);
    }

    #[test]
    fn validation_against_non_admin_account_clears_storage() {
        let store = store();
        let prior = stored_session(&store);
        let mut account = admin_account();
        account.is_admin = 0;

        let status = apply_validation(&store, &prior, Ok(account));

        assert_eq!(status, AuthStatus::InsufficientPrivilege);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn validation_failure_clears_storage() {
        let store = store();
        let prior = stored_session(&store);

        let status = apply_validation(
            &store,
            &prior,
            Err(ApiRejection::Transport("timed out".to_string()).into()),
        );

        assert_eq!(status, AuthStatus::Invalid);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn validation_success_refreshes_profile_and_keeps_token() {
        let store = store();
        let prior = stored_session(&store);
        let mut account = admin_account();
        account.username = "root-renamed".to_string();

        let status = apply_validation(&store, &prior, Ok(account));

        assert!(status.is_valid());
        let refreshed = store.read().unwrap();
        assert_eq!(refreshed.access_token, prior.access_token);
        assert_eq!(refreshed.username, "root-renamed");
    }

    #[test]
    fn validate_without_a_session_resolves_immediately_without_network() {
        // The server address is unroutable on purpose: if this path ever
        // issued a request the receiver could not resolve synchronously
        let client = Client::new_with_store("http://127.0.0.1:0".to_string(), store());

        let mut rx = client.validate(|| {});

        assert_eq!(rx.try_recv().unwrap(), Some(AuthStatus::NoSession));
    }

    #[test]
    fn logout_always_leaves_no_session() {
        let client = Client::new_with_store("http://127.0.0.1:0".to_string(), store());
        client.logout(); // no prior session
        assert_eq!(client.current_session(), None);

        stored_session(&client.session_store);
        client.logout();
        assert_eq!(client.current_session(), None);
    }
}
