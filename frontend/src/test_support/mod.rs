#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{Apartment, User};
    use crate::state::auth::{AuthContext, SessionState};
    use crate::state::favorites::{FavoritesContext, FavoritesState};
    use leptos::*;
    use serde_json::json;

    pub fn sample_user(id: i64) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            is_active: true,
        }
    }

    pub fn sample_apartment(id: i64, owner_id: i64) -> Apartment {
        serde_json::from_value(json!({
            "id": id,
            "owner_id": owner_id,
            "metro": "Таганская",
            "price": 45000.0,
            "minutes": 10,
            "way": "пешком",
            "storey": 3,
            "storeys": 9,
            "rooms": 2,
            "total_area": 54.0,
            "living_area": 32.0,
            "kitchen_area": 10.0
        }))
        .expect("fixture apartment")
    }

    pub fn provide_session(user: Option<User>) -> AuthContext {
        let state = match user {
            Some(user) => SessionState::authenticated(user),
            None => SessionState::anonymous(),
        };
        let (session, set_session) = create_signal(state);
        provide_context::<AuthContext>((session, set_session));
        (session, set_session)
    }

    pub fn provide_favorites(ids: &[i64]) -> FavoritesContext {
        let state = FavoritesState {
            ids: ids.iter().copied().collect(),
            loaded: true,
            ..Default::default()
        };
        let (favorites, set_favorites) = create_signal(state);
        provide_context::<FavoritesContext>((favorites, set_favorites));
        (favorites, set_favorites)
    }
}
