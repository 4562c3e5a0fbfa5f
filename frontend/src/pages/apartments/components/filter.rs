use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

use crate::{api::ApartmentFilter, pages::apartments::utils};

#[component]
pub fn FilterForm(on_apply: Callback<ApartmentFilter>) -> impl IntoView {
    let (metro, set_metro) = create_signal(String::new());
    let (rooms, set_rooms) = create_signal(String::new());
    let (min_price, set_min_price) = create_signal(String::new());
    let (max_price, set_max_price) = create_signal(String::new());
    let (min_area, set_min_area) = create_signal(String::new());

    let apply = move || {
        on_apply.call(utils::build_filter(
            &metro.get_untracked(),
            &rooms.get_untracked(),
            &min_price.get_untracked(),
            &max_price.get_untracked(),
            &min_area.get_untracked(),
        ));
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        apply();
    };

    let handle_reset = move |_| {
        set_metro.set(String::new());
        set_rooms.set(String::new());
        set_min_price.set(String::new());
        set_max_price.set(String::new());
        set_min_area.set(String::new());
        on_apply.call(ApartmentFilter::default());
    };

    view! {
        <form class="card card-body mb-4" on:submit=handle_submit>
            <div class="row g-3 align-items-end">
                <div class="col-md-3">
                    <label class="form-label" for="filter-metro">"Метро"</label>
                    <input
                        id="filter-metro"
                        type="text"
                        class="form-control"
                        prop:value=metro
                        on:input=move |ev| {
                            let target = event_target::<HtmlInputElement>(&ev);
                            set_metro.set(target.value());
                        }
                    />
                </div>
                <div class="col-md-2">
                    <label class="form-label" for="filter-rooms">"Комнат"</label>
                    <input
                        id="filter-rooms"
                        type="number"
                        min="1"
                        class="form-control"
                        prop:value=rooms
                        on:input=move |ev| {
                            let target = event_target::<HtmlInputElement>(&ev);
                            set_rooms.set(target.value());
                        }
                    />
                </div>
                <div class="col-md-2">
                    <label class="form-label" for="filter-min-price">"Цена от"</label>
                    <input
                        id="filter-min-price"
                        type="number"
                        min="0"
                        class="form-control"
                        prop:value=min_price
                        on:input=move |ev| {
                            let target = event_target::<HtmlInputElement>(&ev);
                            set_min_price.set(target.value());
                        }
                    />
                </div>
                <div class="col-md-2">
                    <label class="form-label" for="filter-max-price">"Цена до"</label>
                    <input
                        id="filter-max-price"
                        type="number"
                        min="0"
                        class="form-control"
                        prop:value=max_price
                        on:input=move |ev| {
                            let target = event_target::<HtmlInputElement>(&ev);
                            set_max_price.set(target.value());
                        }
                    />
                </div>
                <div class="col-md-2">
                    <label class="form-label" for="filter-min-area">"Площадь от"</label>
                    <input
                        id="filter-min-area"
                        type="number"
                        min="0"
                        class="form-control"
                        prop:value=min_area
                        on:input=move |ev| {
                            let target = event_target::<HtmlInputElement>(&ev);
                            set_min_area.set(target.value());
                        }
                    />
                </div>
                <div class="col-md-1 d-grid gap-2">
                    <button type="submit" class="btn btn-primary">"Найти"</button>
                    <button type="button" class="btn btn-outline-secondary" on:click=handle_reset>
                        "Сброс"
                    </button>
                </div>
            </div>
        </form>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn filter_form_renders_every_criterion() {
        let html = render_to_string(move || {
            view! { <FilterForm on_apply=Callback::new(|_| {}) /> }
        });
        assert!(html.contains("Метро"));
        assert!(html.contains("Комнат"));
        assert!(html.contains("Цена от"));
        assert!(html.contains("Цена до"));
        assert!(html.contains("Площадь от"));
    }
}
