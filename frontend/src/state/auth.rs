//! Session store: the single source of truth for who is using the client.
//!
//! Holds the resolved identity behind Leptos signals, owns every write to the
//! persisted credential slot, and exposes the narrow set of mutation entry
//! points (restore / login / register / logout). Other stores subscribe to
//! session resets through [`on_session_reset`]; the API gateway invokes the
//! same reset when any request reports an authorization failure.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;

use crate::{
    api::{ApiClient, ApiError, RegisterRequest, User},
    utils::{nav, storage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Unresolved,
    Resolving,
    Authenticated,
    Anonymous,
}

/// Invariant: `user` is present iff `status == Authenticated`; the persisted
/// credential is present iff `status` is `Resolving` or `Authenticated`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub status: SessionStatus,
    pub user: Option<User>,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self {
            status: SessionStatus::Anonymous,
            user: None,
        }
    }

    pub fn resolving() -> Self {
        Self {
            status: SessionStatus::Resolving,
            user: None,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// True once `restore` has settled; protected affordances must not render
    /// before this to avoid a flash of anonymous state.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self.status,
            SessionStatus::Authenticated | SessionStatus::Anonymous
        )
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|user| user.id)
    }
}

pub type AuthContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

thread_local! {
    static RESET_HOOKS: RefCell<Vec<Rc<dyn Fn()>>> = const { RefCell::new(Vec::new()) };
}

/// Registers a closure run on every logout (explicit or forced). Stores use
/// this to drop authenticated-only state, so a completion arriving after the
/// reset cannot resurrect it.
pub fn on_session_reset(hook: impl Fn() + 'static) {
    RESET_HOOKS.with(|hooks| hooks.borrow_mut().push(Rc::new(hook)));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear_session_reset_hooks() {
    RESET_HOOKS.with(|hooks| hooks.borrow_mut().clear());
}

fn run_session_reset_hooks() {
    let hooks: Vec<Rc<dyn Fn()>> = RESET_HOOKS.with(|hooks| hooks.borrow().clone());
    for hook in hooks {
        hook();
    }
}

fn reset_session() {
    storage::clear_credential();
    storage::bump_session_epoch();
    run_session_reset_hooks();
}

/// Synchronous logout: clears the credential slot, invalidates in-flight
/// completions via the epoch bump, resets subscribed stores and navigates to
/// the login surface. Safe to call when already anonymous.
pub fn logout() {
    reset_session();
    nav::redirect_to_login();
}

/// Invoked by the API gateway when any request is answered 401. Identical to
/// an explicit logout, regardless of which component issued the request.
pub fn force_logout() {
    reset_session();
    nav::redirect_to_login();
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let (session, set_session) = create_signal(SessionState::default());
    on_session_reset(move || {
        let _ = set_session.try_set(SessionState::anonymous());
    });
    provide_context::<AuthContext>((session, set_session));

    let api = use_context::<ApiClient>().unwrap_or_default();
    spawn_local(async move {
        restore(&api, set_session).await;
    });

    view! { <>{children()}</> }
}

/// Resolves the persisted credential into an identity at startup. Terminates
/// in `Authenticated` or `Anonymous`; an invalid credential is cleared so the
/// next start resolves anonymously without a round trip.
pub async fn restore(api: &ApiClient, set_session: WriteSignal<SessionState>) {
    if storage::credential().is_none() {
        set_session.set(SessionState::anonymous());
        return;
    }
    set_session.set(SessionState::resolving());
    let epoch = storage::session_epoch();
    match api.get_me().await {
        Ok(user) => {
            if storage::session_epoch() == epoch {
                set_session.set(SessionState::authenticated(user));
            }
        }
        Err(_) => {
            storage::clear_credential();
            let _ = set_session.try_set(SessionState::anonymous());
        }
    }
}

/// Exchanges credentials for a bearer token, persists it, then resolves the
/// identity. Bad credentials come back as a regular error value with the
/// server's message; only transport problems are `ApiError::Transport`.
pub async fn login(
    api: &ApiClient,
    set_session: WriteSignal<SessionState>,
    username: &str,
    password: &str,
) -> Result<(), ApiError> {
    let token = api.login(username, password).await?;
    storage::set_credential(&token.access_token);
    set_session.set(SessionState::resolving());
    let epoch = storage::session_epoch();
    match api.get_me().await {
        Ok(user) => {
            if storage::session_epoch() == epoch {
                set_session.set(SessionState::authenticated(user));
            }
            Ok(())
        }
        Err(error) => {
            storage::clear_credential();
            let _ = set_session.try_set(SessionState::anonymous());
            Err(error)
        }
    }
}

/// Creates an account. Does not authenticate: the user logs in afterwards.
pub async fn register(
    api: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    api.register(&RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
    .await?;
    Ok("Регистрация успешна! Теперь вы можете войти в систему.".to_string())
}

#[derive(Debug, Clone)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

pub fn use_login_action() -> Action<LoginPayload, Result<(), ApiError>> {
    let (_session, set_session) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |payload: &LoginPayload| {
        let payload = payload.clone();
        let api = api.clone();
        async move { login(&api, set_session, &payload.username, &payload.password).await }
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;
    use leptos::*;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({
            "id": 7,
            "username": "alice",
            "email": "alice@example.com",
            "is_active": true
        })
    }

    #[tokio::test]
    async fn restore_with_rejected_credential_ends_anonymous() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/users/me");
            then.status(401).json_body(json!({ "detail": "expired" }));
        });

        clear_session_reset_hooks();
        storage::set_credential("stale-token");
        let runtime = create_runtime();
        let (session, set_session) = create_signal(SessionState::default());

        let api = ApiClient::new_with_base_url(server.base_url());
        restore(&api, set_session).await;

        assert_eq!(session.get_untracked().status, SessionStatus::Anonymous);
        assert_eq!(storage::credential(), None);
        runtime.dispose();
    }

    #[tokio::test]
    async fn restore_without_credential_resolves_anonymous_without_network() {
        clear_session_reset_hooks();
        storage::clear_credential();
        let runtime = create_runtime();
        let (session, set_session) = create_signal(SessionState::default());

        // Unreachable base URL: restore must not touch the network.
        let api = ApiClient::new_with_base_url("http://127.0.0.1:9");
        restore(&api, set_session).await;

        assert_eq!(session.get_untracked().status, SessionStatus::Anonymous);
        runtime.dispose();
    }

    #[tokio::test]
    async fn login_resolves_identity_and_logout_clears_everything() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200)
                .json_body(json!({ "access_token": "t-7", "token_type": "bearer" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/users/me");
            then.status(200).json_body(user_json());
        });

        clear_session_reset_hooks();
        storage::clear_credential();
        nav::take_last_redirect();
        let runtime = create_runtime();
        let (session, set_session) = create_signal(SessionState::default());
        on_session_reset(move || {
            let _ = set_session.try_set(SessionState::anonymous());
        });

        let api = ApiClient::new_with_base_url(server.base_url());
        login(&api, set_session, "alice", "secret").await.unwrap();
        let snapshot = session.get_untracked();
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.user_id(), Some(7));
        assert_eq!(storage::credential().as_deref(), Some("t-7"));

        logout();
        assert_eq!(session.get_untracked().status, SessionStatus::Anonymous);
        assert_eq!(storage::credential(), None);
        assert_eq!(nav::take_last_redirect().as_deref(), Some("/login"));

        // Idempotent when already anonymous.
        logout();
        assert_eq!(session.get_untracked().status, SessionStatus::Anonymous);

        clear_session_reset_hooks();
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_login_reports_message_and_stays_anonymous() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(401)
                .json_body(json!({ "detail": "Неверное имя пользователя или пароль" }));
        });

        clear_session_reset_hooks();
        storage::clear_credential();
        let runtime = create_runtime();
        let (session, set_session) = create_signal(SessionState::anonymous());

        let api = ApiClient::new_with_base_url(server.base_url());
        let error = login(&api, set_session, "alice", "wrong")
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Неверное имя пользователя или пароль"
        );
        assert_eq!(session.get_untracked().status, SessionStatus::Anonymous);
        assert_eq!(storage::credential(), None);
        runtime.dispose();
    }
}
