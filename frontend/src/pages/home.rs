use leptos::*;

use crate::{
    api::ApiClient,
    components::{cards::ApartmentCard, layout::LoadingSpinner},
};

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let latest = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.latest_apartments().await }
        },
    );

    view! {
        <div>
            <div class="p-5 mb-4 bg-light rounded-3 text-center">
                <h1 class="display-5 fw-bold">"Аренда недвижимости"</h1>
                <p class="lead">"Найдите квартиру своей мечты"</p>
                <a href="/apartments" class="btn btn-primary btn-lg">
                    "Смотреть квартиры"
                </a>
            </div>
            <h2 class="mb-3">"Новые объявления"</h2>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || {
                    latest
                        .get()
                        .map(|result| match result {
                            Ok(apartments) if apartments.is_empty() => view! {
                                <p class="text-muted">"Пока нет объявлений"</p>
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
                            Err(err) => view! {
                                <div class="alert alert-danger" role="alert">
                                    {err.to_string()}
                                </div>
                            }
                            .into_view(),
                        })
                }}
            </Suspense>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_favorites, provide_session};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn home_page_renders_hero_and_latest_section() {
        let html = render_to_string(move || {
            provide_session(None);
            provide_favorites(&[]);
            view! { <HomePage /> }
        });
        assert!(html.contains("Найдите квартиру своей мечты"));
        assert!(html.contains("Новые объявления"));
    }
}
