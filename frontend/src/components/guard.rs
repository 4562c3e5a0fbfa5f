use crate::{
    api::Apartment, components::layout::LoadingSpinner, state::auth::use_auth,
    state::auth::SessionState, utils::nav,
};
use leptos::*;

/// Wraps a protected page. Children render only for an authenticated session;
/// an anonymous visitor is sent to the login page once the session restore has
/// settled. While the restore is still in flight nothing is decided yet, so a
/// spinner is shown instead of a premature redirect.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_auth();
    let is_authenticated = create_memo(move |_| session.get().is_authenticated());
    let is_resolved = create_memo(move |_| session.get().is_resolved());
    create_effect(move |_| {
        let state = session.get();
        if !state.is_resolved() || state.is_authenticated() {
            return;
        }
        nav::redirect_to_login();
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_resolved.get())
            fallback=move || {
                if !is_resolved.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_resolved: bool) -> bool {
    is_authenticated && is_resolved
}

/// Ownership check for listing mutations: only the owner may edit or delete.
/// An anonymous or unresolved session can never mutate.
pub fn can_mutate(listing: &Apartment, session: &SessionState) -> bool {
    session
        .user_id()
        .map(|id| id == listing.owner_id)
        .unwrap_or(false)
}

/// Three-valued ownership decision for surfaces that load the listing and the
/// session independently. `None` means "not decided yet": either side is
/// still loading and neither allow nor deny may be shown.
pub fn mutation_decision(listing: Option<&Apartment>, session: &SessionState) -> Option<bool> {
    if !session.is_resolved() {
        return None;
    }
    let listing = listing?;
    Some(can_mutate(listing, session))
}

#[cfg(test)]
mod tests {
    use super::{can_mutate, mutation_decision, should_render_children};
    use crate::state::auth::SessionState;
    use crate::test_support::helpers::{sample_apartment, sample_user};

    #[test]
    fn guard_blocks_until_session_settles() {
        assert!(!should_render_children(false, false));
        assert!(!should_render_children(false, true));
        assert!(!should_render_children(true, false));
        assert!(should_render_children(true, true));
    }

    #[test]
    fn only_the_owner_may_mutate() {
        let listing = sample_apartment(1, 7);
        assert!(can_mutate(
            &listing,
            &SessionState::authenticated(sample_user(7))
        ));
        assert!(!can_mutate(
            &listing,
            &SessionState::authenticated(sample_user(8))
        ));
        assert!(!can_mutate(&listing, &SessionState::anonymous()));
        assert!(!can_mutate(&listing, &SessionState::resolving()));
        assert!(!can_mutate(&listing, &SessionState::default()));
    }

    #[test]
    fn mutation_decision_defers_while_either_side_loads() {
        let listing = sample_apartment(1, 7);
        let owner = SessionState::authenticated(sample_user(7));

        assert_eq!(mutation_decision(None, &SessionState::resolving()), None);
        assert_eq!(mutation_decision(Some(&listing), &SessionState::resolving()), None);
        assert_eq!(mutation_decision(None, &owner), None);
        assert_eq!(mutation_decision(Some(&listing), &owner), Some(true));
        assert_eq!(
            mutation_decision(Some(&listing), &SessionState::authenticated(sample_user(8))),
            Some(false)
        );
        assert_eq!(
            mutation_decision(Some(&listing), &SessionState::anonymous()),
            Some(false)
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::RequireAuth;
    use crate::test_support::helpers::{provide_session, sample_user};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(7)));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_for_anonymous_session() {
        let html = render_to_string(move || {
            provide_session(None);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_auth_shows_spinner_while_session_is_unresolved() {
        let html = render_to_string(move || {
            let (session, set_session) =
                create_signal(crate::state::auth::SessionState::resolving());
            provide_context((session, set_session));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("spinner-border"));
        assert!(!html.contains("protected-content"));
    }
}
