use leptos::*;
use leptos_router::use_params_map;

use crate::{
    api::{Apartment, ApiClient, ApiError},
    utils::nav,
};

#[derive(Clone)]
pub struct ApartmentDetailViewModel {
    pub apartment: Resource<Option<i64>, Option<Result<Apartment, ApiError>>>,
    pub similar: Resource<Option<i64>, Vec<Apartment>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
    pub delete_error: RwSignal<Option<String>>,
}

pub fn parse_listing_id(raw: Option<&String>) -> Option<i64> {
    raw.and_then(|raw| raw.parse().ok())
}

pub fn use_apartment_detail_view_model() -> ApartmentDetailViewModel {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let params = use_params_map();
    let listing_id = create_memo(move |_| parse_listing_id(params.get().get("id")));

    let apartment = {
        let api = api.clone();
        create_local_resource(
            move || listing_id.get(),
            move |id| {
                let api = api.clone();
                async move {
                    match id {
                        Some(id) => Some(api.get_apartment(id).await),
                        None => None,
                    }
                }
            },
        )
    };

    // A failed similar-listings fetch degrades to an empty strip.
    let similar = {
        let api = api.clone();
        create_local_resource(
            move || listing_id.get(),
            move |id| {
                let api = api.clone();
                async move {
                    match id {
                        Some(id) => api.similar_apartments(id).await.unwrap_or_default(),
                        None => Vec::new(),
                    }
                }
            },
        )
    };

    let delete_error = create_rw_signal(None::<String>);
    let delete_action = create_action(move |id: &i64| {
        let api = api.clone();
        let id = *id;
        async move { api.delete_apartment(id).await }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            match result {
                Ok(_) => nav::redirect("/apartments"),
                Err(err) => delete_error.set(Some(err.to_string())),
            }
        }
    });

    ApartmentDetailViewModel {
        apartment,
        similar,
        delete_action,
        delete_error,
    }
}
