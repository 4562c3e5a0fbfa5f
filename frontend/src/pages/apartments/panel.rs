use leptos::*;

use crate::{
    api::ApiClient,
    components::{cards::ApartmentCard, layout::LoadingSpinner},
    pages::apartments::components::filter::FilterForm,
    state::listings::ListingsController,
};

#[component]
pub fn ApartmentsPanel() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let controller = ListingsController::new();
    let (listings, _) = controller.state;
    let query = controller.query;

    // Re-resolve whenever the filter or the page changes. Stale completions
    // are discarded inside the controller.
    {
        let controller = controller.clone();
        let api = api.clone();
        create_effect(move |_| {
            let _ = query.get();
            let controller = controller.clone();
            let api = api.clone();
            spawn_local(async move {
                let _ = controller.fetch(&api).await;
            });
        });
    }

    let on_apply = {
        let controller = controller.clone();
        Callback::new(move |filter| controller.set_filters(filter))
    };
    let prev_page = {
        let controller = controller.clone();
        move |_| {
            let page = query.get_untracked().page;
            if page > 1 {
                controller.set_page(page - 1);
            }
        }
    };
    let next_page = {
        let controller = controller.clone();
        move |_| {
            let page = query.get_untracked().page;
            controller.set_page(page + 1);
        }
    };

    let page_label = move || format!("Страница {}", listings.get().page.max(1));
    let prev_disabled = move || listings.get().loading || query.get().page <= 1;
    let next_disabled = move || {
        let state = listings.get();
        state.loading || state.last_page
    };

    view! {
        <div>
            <h1 class="mb-4">"Квартиры"</h1>
            <FilterForm on_apply=on_apply />
            {move || {
                listings
                    .get()
                    .error
                    .map(|msg| view! { <div class="alert alert-danger" role="alert">{msg}</div> })
            }}
            <Show
                when=move || !listings.get().loading
                fallback=move || view! { <LoadingSpinner /> }
            >
                {move || {
                    let state = listings.get();
                    if state.items.is_empty() {
                        view! { <p class="text-muted">"Ничего не найдено"</p> }.into_view()
                    } else {
                        view! {
                            <div class="row row-cols-1 row-cols-md-3 g-4">
                                {state
                                    .items
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
                        .into_view()
                    }
                }}
            </Show>
            <nav class="d-flex justify-content-center align-items-center gap-3 mt-4">
                <button
                    type="button"
                    class="btn btn-outline-primary"
                    disabled=prev_disabled
                    on:click=prev_page
                >
                    "Назад"
                </button>
                <span>{page_label}</span>
                <button
                    type="button"
                    class="btn btn-outline-primary"
                    disabled=next_disabled
                    on:click=next_page
                >
                    "Вперёд"
                </button>
            </nav>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_favorites, provide_session};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn apartments_panel_renders_filter_and_pagination() {
        let html = render_to_string(move || {
            provide_session(None);
            provide_favorites(&[]);
            view! { <ApartmentsPanel /> }
        });
        assert!(html.contains("Квартиры"));
        assert!(html.contains("Метро"));
        assert!(html.contains("Назад"));
        assert!(html.contains("Вперёд"));
    }
}
