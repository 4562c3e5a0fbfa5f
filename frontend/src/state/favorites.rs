//! Favorite membership tracker.
//!
//! Owns the set of favorited listing ids for the authenticated identity. The
//! toggle protocol is confirm-then-apply: the local membership bit flips only
//! after the server acknowledges the mutation, so there is no rollback path.
//! Toggles on the same id are serialized through the `pending` set, and a
//! session-epoch check discards completions that outlive their session.

use std::collections::HashSet;

use leptos::*;

use crate::{
    api::{ApiClient, ApiError},
    state::auth::{self, SessionState},
    utils::storage,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesState {
    pub ids: HashSet<i64>,
    /// Ids with a toggle in flight; the control for these is disabled.
    pub pending: HashSet<i64>,
    pub loaded: bool,
    pub loading: bool,
}

impl FavoritesState {
    pub fn contains(&self, apartment_id: i64) -> bool {
        self.ids.contains(&apartment_id)
    }

    pub fn is_pending(&self, apartment_id: i64) -> bool {
        self.pending.contains(&apartment_id)
    }
}

pub type FavoritesContext = (ReadSignal<FavoritesState>, WriteSignal<FavoritesState>);

pub fn use_favorites() -> FavoritesContext {
    use_context::<FavoritesContext>().unwrap_or_else(|| create_signal(FavoritesState::default()))
}

#[component]
pub fn FavoritesProvider(children: Children) -> impl IntoView {
    let (favorites, set_favorites) = create_signal(FavoritesState::default());
    auth::on_session_reset(move || {
        let _ = set_favorites.try_set(FavoritesState::default());
    });
    provide_context::<FavoritesContext>((favorites, set_favorites));
    view! { <>{children()}</> }
}

/// Populates the membership set. A no-op (empty set, no network call) when
/// the session is not authenticated.
pub async fn load(
    api: &ApiClient,
    session: &SessionState,
    set_favorites: WriteSignal<FavoritesState>,
) -> Result<(), ApiError> {
    if !session.is_authenticated() {
        set_favorites.set(FavoritesState {
            loaded: true,
            ..FavoritesState::default()
        });
        return Ok(());
    }

    set_favorites.update(|state| state.loading = true);
    let epoch = storage::session_epoch();
    match api.list_favorites().await {
        Ok(apartments) => {
            apply_loaded(
                set_favorites,
                epoch,
                apartments.iter().map(|apartment| apartment.id).collect(),
            );
            Ok(())
        }
        Err(error) => {
            let _ = set_favorites.try_update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Applies a fetched membership set unless the session it was fetched under
/// has been reset in the meantime.
fn apply_loaded(set_favorites: WriteSignal<FavoritesState>, epoch: u64, ids: HashSet<i64>) {
    if storage::session_epoch() != epoch {
        return;
    }
    let _ = set_favorites.try_update(|state| {
        state.ids = ids;
        state.loaded = true;
        state.loading = false;
    });
}

/// Flips membership for one listing. Returns the new membership on success.
///
/// Rejected before any network call when anonymous. A second toggle for an id
/// still in flight is ignored. Removal answered 404 counts as success: the
/// listing (or the favorite row) is already gone server-side.
pub async fn toggle(
    api: &ApiClient,
    session: &SessionState,
    favorites: ReadSignal<FavoritesState>,
    set_favorites: WriteSignal<FavoritesState>,
    apartment_id: i64,
) -> Result<bool, ApiError> {
    if !session.is_authenticated() {
        return Err(ApiError::Unauthorized);
    }

    let snapshot = favorites.get_untracked();
    let currently_favorite = snapshot.contains(apartment_id);
    if snapshot.is_pending(apartment_id) {
        return Ok(currently_favorite);
    }

    set_favorites.update(|state| {
        state.pending.insert(apartment_id);
    });
    let epoch = storage::session_epoch();

    let result = if currently_favorite {
        match api.remove_favorite(apartment_id).await {
            // Already absent server-side: removal is idempotent.
            Err(error) if error.is_not_found() => Ok(()),
            other => other,
        }
    } else {
        api.add_favorite(apartment_id).await
    };

    let _ = set_favorites.try_update(|state| {
        state.pending.remove(&apartment_id);
    });

    match result {
        Ok(()) => {
            if storage::session_epoch() == epoch {
                set_favorites.update(|state| {
                    if currently_favorite {
                        state.ids.remove(&apartment_id);
                    } else {
                        state.ids.insert(apartment_id);
                    }
                });
            }
            Ok(!currently_favorite)
        }
        Err(error) => Err(error),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::User;
    use crate::utils::nav;
    use httpmock::prelude::*;
    use leptos::*;
    use serde_json::json;

    fn authenticated_session() -> SessionState {
        SessionState::authenticated(User {
            id: 7,
            username: "alice".into(),
            email: "alice@example.com".into(),
            is_active: true,
        })
    }

    fn apartment_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "owner_id": 2,
            "metro": "Таганская",
            "price": 45000.0,
            "minutes": 10,
            "way": "пешком",
            "storey": 3,
            "storeys": 9,
            "rooms": 2,
            "total_area": 54.0
        })
    }

    #[tokio::test]
    async fn load_is_a_no_op_for_anonymous_sessions() {
        auth::clear_session_reset_hooks();
        storage::clear_credential();
        let runtime = create_runtime();
        let (favorites, set_favorites) = create_signal(FavoritesState::default());

        // Unreachable base URL proves no request is made.
        let api = ApiClient::new_with_base_url("http://127.0.0.1:9");
        load(&api, &SessionState::anonymous(), set_favorites)
            .await
            .unwrap();

        let state = favorites.get_untracked();
        assert!(state.ids.is_empty());
        assert!(state.loaded);
        runtime.dispose();
    }

    #[tokio::test]
    async fn load_collects_listing_ids() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/favorites/");
            then.status(200)
                .json_body(json!([apartment_json(3), apartment_json(5)]));
        });

        auth::clear_session_reset_hooks();
        storage::set_credential("t-7");
        let runtime = create_runtime();
        let (favorites, set_favorites) = create_signal(FavoritesState::default());

        let api = ApiClient::new_with_base_url(server.base_url());
        load(&api, &authenticated_session(), set_favorites)
            .await
            .unwrap();

        let state = favorites.get_untracked();
        assert_eq!(state.ids, HashSet::from([3, 5]));
        assert!(state.loaded);
        storage::clear_credential();
        runtime.dispose();
    }

    #[tokio::test]
    async fn anonymous_toggle_is_rejected_before_any_network_call() {
        auth::clear_session_reset_hooks();
        storage::clear_credential();
        let runtime = create_runtime();
        let (favorites, set_favorites) = create_signal(FavoritesState::default());

        let api = ApiClient::new_with_base_url("http://127.0.0.1:9");
        let error = toggle(&api, &SessionState::anonymous(), favorites, set_favorites, 5)
            .await
            .unwrap_err();
        assert_eq!(error, ApiError::Unauthorized);
        assert!(favorites.get_untracked().ids.is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn membership_flips_only_after_server_confirmation() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/favorites/");
            then.status(201)
                .json_body(json!({ "id": 1, "user_id": 7, "apartment_id": 5 }));
        });

        auth::clear_session_reset_hooks();
        storage::set_credential("t-7");
        let runtime = create_runtime();
        let (favorites, set_favorites) = create_signal(FavoritesState::default());

        let api = ApiClient::new_with_base_url(server.base_url());
        let session = authenticated_session();
        let now_favorite = toggle(&api, &session, favorites, set_favorites, 5)
            .await
            .unwrap();
        assert!(now_favorite);
        let state = favorites.get_untracked();
        assert!(state.contains(5));
        assert!(!state.is_pending(5));
        storage::clear_credential();
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_toggle_leaves_membership_unchanged() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/favorites/");
            then.status(500).json_body(json!({}));
        });

        auth::clear_session_reset_hooks();
        storage::set_credential("t-7");
        let runtime = create_runtime();
        let (favorites, set_favorites) = create_signal(FavoritesState::default());

        let api = ApiClient::new_with_base_url(server.base_url());
        let session = authenticated_session();
        let error = toggle(&api, &session, favorites, set_favorites, 5)
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Transport(_)));
        let state = favorites.get_untracked();
        assert!(!state.contains(5));
        assert!(!state.is_pending(5));
        storage::clear_credential();
        runtime.dispose();
    }

    #[tokio::test]
    async fn removing_an_already_absent_favorite_is_success() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/favorites/5");
            then.status(404).json_body(json!({ "detail": "Favorite not found" }));
        });

        auth::clear_session_reset_hooks();
        storage::set_credential("t-7");
        let runtime = create_runtime();
        let (favorites, set_favorites) = create_signal(FavoritesState {
            ids: HashSet::from([5]),
            ..FavoritesState::default()
        });

        let api = ApiClient::new_with_base_url(server.base_url());
        let session = authenticated_session();
        let now_favorite = toggle(&api, &session, favorites, set_favorites, 5)
            .await
            .unwrap();
        assert!(!now_favorite);
        assert!(!favorites.get_untracked().contains(5));
        storage::clear_credential();
        runtime.dispose();
    }

    #[tokio::test]
    async fn unauthorized_toggle_forces_logout_and_discards_the_flip() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/favorites/");
            then.status(401).json_body(json!({ "detail": "expired" }));
        });

        auth::clear_session_reset_hooks();
        storage::set_credential("t-expired");
        nav::take_last_redirect();
        let runtime = create_runtime();
        let (session_signal, set_session) = create_signal(authenticated_session());
        auth::on_session_reset(move || {
            let _ = set_session.try_set(SessionState::anonymous());
        });
        let (favorites, set_favorites) = create_signal(FavoritesState::default());
        auth::on_session_reset(move || {
            let _ = set_favorites.try_set(FavoritesState::default());
        });

        let api = ApiClient::new_with_base_url(server.base_url());
        let session = session_signal.get_untracked();
        let error = toggle(&api, &session, favorites, set_favorites, 5)
            .await
            .unwrap_err();

        assert_eq!(error, ApiError::Unauthorized);
        assert!(!session_signal.get_untracked().is_authenticated());
        assert_eq!(storage::credential(), None);
        assert!(favorites.get_untracked().ids.is_empty());
        assert!(favorites.get_untracked().pending.is_empty());
        assert_eq!(nav::take_last_redirect().as_deref(), Some("/login"));

        auth::clear_session_reset_hooks();
        runtime.dispose();
    }

    #[tokio::test]
    async fn load_result_arriving_after_logout_is_discarded() {
        auth::clear_session_reset_hooks();
        let runtime = create_runtime();
        let (favorites, set_favorites) = create_signal(FavoritesState::default());

        // A fetch dispatched under the old epoch completes after the session
        // was reset: its result must not repopulate the set.
        let stale_epoch = storage::session_epoch();
        storage::bump_session_epoch();
        apply_loaded(set_favorites, stale_epoch, HashSet::from([3]));
        assert!(favorites.get_untracked().ids.is_empty());
        assert!(!favorites.get_untracked().loaded);

        // A fetch from the current session applies normally.
        apply_loaded(set_favorites, storage::session_epoch(), HashSet::from([3]));
        assert_eq!(favorites.get_untracked().ids, HashSet::from([3]));
        runtime.dispose();
    }
}
