use leptos::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{guard::RequireAuth, layout::Layout},
    pages::{
        AddApartmentPage, ApartmentDetailPage, ApartmentsPage, EditApartmentPage, FavoritesPage,
        HomePage, LoginPage, NotFoundPage, ProfilePage, RegisterPage,
    },
    state::{
        auth::{use_auth, AuthProvider},
        favorites::{self, FavoritesProvider},
    },
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/apartments",
    "/apartments/:id",
    "/apartments/:id/edit",
    "/login",
    "/register",
    "/profile",
    "/add-apartment",
    "/favorites",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/apartments/:id/edit",
    "/profile",
    "/add-apartment",
    "/favorites",
];

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    view! {
        <AuthProvider>
            <FavoritesProvider>
                <FavoritesLoader/>
                <Layout>
                    <Router>
                        <Routes>
                            <Route path="/" view=HomePage/>
                            <Route path="/apartments" view=ApartmentsPage/>
                            <Route path="/apartments/:id" view=ApartmentDetailPage/>
                            <Route path="/apartments/:id/edit" view=ProtectedEditApartment/>
                            <Route path="/login" view=LoginPage/>
                            <Route path="/register" view=RegisterPage/>
                            <Route path="/profile" view=ProtectedProfile/>
                            <Route path="/add-apartment" view=ProtectedAddApartment/>
                            <Route path="/favorites" view=ProtectedFavorites/>
                            <Route path="/*any" view=NotFoundPage/>
                        </Routes>
                    </Router>
                </Layout>
            </FavoritesProvider>
        </AuthProvider>
    }
}

/// Pulls the membership set once the session resolves to an identity.
#[component]
fn FavoritesLoader() -> impl IntoView {
    let (session, _) = use_auth();
    let (favorites, set_favorites) = favorites::use_favorites();
    let api = use_context::<ApiClient>().unwrap_or_default();
    create_effect(move |_| {
        let state = session.get();
        if !state.is_authenticated() {
            return;
        }
        let snapshot = favorites.get_untracked();
        if snapshot.loaded || snapshot.loading {
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            let _ = favorites::load(&api, &state, set_favorites).await;
        });
    });
    view! { <></> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}

#[component]
fn ProtectedAddApartment() -> impl IntoView {
    view! { <RequireAuth><AddApartmentPage/></RequireAuth> }
}

#[component]
fn ProtectedEditApartment() -> impl IntoView {
    view! { <RequireAuth><EditApartmentPage/></RequireAuth> }
}

#[component]
fn ProtectedFavorites() -> impl IntoView {
    view! { <RequireAuth><FavoritesPage/></RequireAuth> }
}
