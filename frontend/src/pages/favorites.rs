use leptos::*;

use crate::{
    api::{Apartment, ApiClient, ApiError},
    components::{cards::ApartmentCard, layout::LoadingSpinner},
    state::favorites::use_favorites,
};

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let (favorites, _) = use_favorites();

    // The card grid shows the full listings; the membership set alone only
    // has ids. Re-resolve the page when a toggle removes a membership.
    let ids = create_memo(move |_| {
        let mut ids: Vec<i64> = favorites.get().ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    });
    let listings = create_local_resource(
        move || ids.get(),
        move |ids| {
            let api = api.clone();
            async move {
                api.list_favorites().await.map(|all| {
                    all.into_iter()
                        .filter(|apartment| ids.contains(&apartment.id))
                        .collect::<Vec<_>>()
                })
            }
        },
    );

    view! {
        <div>
            <h1 class="mb-4">"Избранное"</h1>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || {
                    listings
                        .get()
                        .map(|result| view! { <FavoritesContent result=result /> })
                }}
            </Suspense>
        </div>
    }
}

/// A failed fetch keeps the error visible in place of the grid; an empty
/// membership set is not an error.
#[component]
fn FavoritesContent(result: Result<Vec<Apartment>, ApiError>) -> impl IntoView {
    match result {
        Err(err) => view! {
            <div class="alert alert-danger" role="alert">{err.to_string()}</div>
        }
        .into_view(),
        Ok(apartments) if apartments.is_empty() => view! {
            <p class="text-muted">
                "В избранном пока пусто. "
                <a href="/apartments">"Посмотреть квартиры"</a>
            </p>
        }
        .into_view(),
        Ok(apartments) => view! {
            <div class="row row-cols-1 row-cols-md-3 g-4">
                {apartments
                    .into_iter()
                    .map(|apartment| {
                        view! {
                            <div class="col">
                                <ApartmentCard apartment=apartment />
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_view(),
    }
}
