use leptos::*;

use crate::{
    api::{Apartment, ApiClient},
    state::{auth::use_auth, favorites},
    utils::{format, nav},
};

/// Listing card for the grid views. The favorite control is shown only for an
/// authenticated session and stays disabled while its toggle is in flight.
#[component]
pub fn ApartmentCard(apartment: Apartment) -> impl IntoView {
    let detail_href = format!("/apartments/{}", apartment.id);
    let price = format!("{} ₽/мес.", format::format_price(apartment.price));
    let rooms = format::pluralize_rooms(apartment.rooms);
    let commute = format::commute_label(apartment.minutes, &apartment.way);
    let storeys = format!("{}/{} этаж", apartment.storey, apartment.storeys);
    let area = format!("{} м²", apartment.total_area);
    let apartment_id = apartment.id;

    view! {
        <div class="card h-100 shadow-sm">
            <div class="card-body d-flex flex-column">
                <div class="d-flex justify-content-between align-items-start">
                    <h5 class="card-title">{format!("м. {}", apartment.metro)}</h5>
                    <FavoriteButton apartment_id=apartment_id />
                </div>
                <p class="card-text fs-5 fw-bold mb-1">{price}</p>
                <p class="card-text text-muted mb-1">{rooms}", "{area}", "{storeys}</p>
                <p class="card-text text-muted">{commute}</p>
                <a href=detail_href class="btn btn-outline-primary mt-auto">
                    "Подробнее"
                </a>
            </div>
        </div>
    }
}

#[component]
pub fn FavoriteButton(apartment_id: i64) -> impl IntoView {
    let (session, _) = use_auth();
    let (favorites, set_favorites) = favorites::use_favorites();
    let api = use_context::<ApiClient>().unwrap_or_default();

    let is_favorite = create_memo(move |_| favorites.get().contains(apartment_id));
    let is_pending = create_memo(move |_| favorites.get().is_pending(apartment_id));
    let show = create_memo(move |_| session.get().is_authenticated());

    // Callback is Copy, so the Show children below stay Fn.
    let on_toggle = Callback::new(move |_| {
        let state = session.get_untracked();
        if !state.is_authenticated() {
            nav::redirect_to_login();
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            let _ = favorites::toggle(&api, &state, favorites, set_favorites, apartment_id).await;
        });
    });

    view! {
        <Show when=move || show.get()>
            <button
                type="button"
                class="btn btn-link p-0 fs-4 text-danger"
                aria-pressed=move || if is_favorite.get() { "true" } else { "false" }
                aria-label=move || {
                    if is_favorite.get() {
                        "Убрать из избранного"
                    } else {
                        "В избранное"
                    }
                }
                disabled=move || is_pending.get()
                on:click=move |ev| on_toggle.call(ev)
            >
                {move || if is_favorite.get() { "♥" } else { "♡" }}
            </button>
        </Show>
    }
}
