use leptos::{ev::SubmitEvent, *};
use leptos_router::use_params_map;
use web_sys::HtmlInputElement;

use crate::{
    api::{Apartment, ApiClient},
    components::{guard::mutation_decision, layout::LoadingSpinner},
    pages::add_apartment::{
        components::predictor::PricePredictor,
        utils::ApartmentForm,
        view_model::{use_apartment_form_view_model, FormMode},
    },
    pages::apartment_detail::view_model::parse_listing_id,
    state::auth::use_auth,
};

#[component]
pub fn AddApartmentPanel() -> impl IntoView {
    let vm = use_apartment_form_view_model(FormMode::Create);
    view! {
        <ApartmentFormView
            title="Добавить квартиру"
            submit_label="Опубликовать"
            form=vm.form
            error=vm.error
            submit_action=vm.submit_action
        />
    }
}

#[component]
pub fn EditApartmentPanel() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let params = use_params_map();
    let listing_id = create_memo(move |_| parse_listing_id(params.get().get("id")));

    let listing = create_local_resource(
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
    );

    view! {
        <Suspense fallback=move || view! { <LoadingSpinner /> }>
            {move || {
                listing
                    .get()
                    .map(|loaded| match loaded {
                        Some(Ok(apartment)) => {
                            view! { <EditApartmentGate apartment=apartment /> }.into_view()
                        }
                        Some(Err(err)) if err.is_not_found() => view! {
                            <div class="alert alert-warning" role="alert">
                                "Объявление не найдено"
                            </div>
                        }
                        .into_view(),
                        Some(Err(err)) => view! {
                            <div class="alert alert-danger" role="alert">{err.to_string()}</div>
                        }
                        .into_view(),
                        None => view! {
                            <div class="alert alert-warning" role="alert">
                                "Объявление не найдено"
                            </div>
                        }
                        .into_view(),
                    })
            }}
        </Suspense>
    }
}

/// Shows the form only to the owner. A non-owner gets a blocking message with
/// a way back to the listing; nothing is decided while the session resolves.
#[component]
fn EditApartmentGate(apartment: Apartment) -> impl IntoView {
    let (session, _) = use_auth();
    let listing_href = format!("/apartments/{}", apartment.id);
    move || match mutation_decision(Some(&apartment), &session.get()) {
        None => view! { <LoadingSpinner /> }.into_view(),
        Some(true) => view! {
            <EditApartmentForm
                apartment_id=apartment.id
                initial=ApartmentForm::from_apartment(&apartment)
            />
        }
        .into_view(),
        Some(false) => view! {
            <div class="alert alert-danger" role="alert">
                "Вы не можете редактировать чужое объявление. "
                <a href=listing_href.clone() class="alert-link">
                    "Вернуться к объявлению"
                </a>
            </div>
        }
        .into_view(),
    }
}

#[component]
fn EditApartmentForm(apartment_id: i64, initial: ApartmentForm) -> impl IntoView {
    let vm = use_apartment_form_view_model(FormMode::Edit(apartment_id));
    vm.form.set(initial);
    view! {
        <ApartmentFormView
            title="Редактирование объявления"
            submit_label="Сохранить"
            form=vm.form
            error=vm.error
            submit_action=vm.submit_action
        />
    }
}

#[component]
fn ApartmentFormView(
    title: &'static str,
    submit_label: &'static str,
    form: RwSignal<ApartmentForm>,
    error: RwSignal<Option<String>>,
    submit_action: Action<ApartmentForm, Result<crate::api::Apartment, crate::api::ApiError>>,
) -> impl IntoView {
    let pending = submit_action.pending();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        if let Err(msg) = current.to_create() {
            error.set(Some(msg));
            return;
        }
        error.set(None);
        submit_action.dispatch(current);
    };

    view! {
        <div class="row justify-content-center">
            <div class="col-lg-8">
                <h1 class="mb-4">{title}</h1>
                {move || {
                    error
                        .get()
                        .map(|msg| {
                            view! { <div class="alert alert-danger" role="alert">{msg}</div> }
                        })
                }}
                <form on:submit=handle_submit>
                    <div class="row g-3">
                        <div class="col-md-6">
                            <FormField
                                id="metro"
                                label="Станция метро"
                                value=Signal::derive(move || form.get().metro)
                                on_input=Callback::new(move |v| form.update(|f| f.metro = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="minutes"
                                label="Минут до метро"
                                input_type="number"
                                value=Signal::derive(move || form.get().minutes)
                                on_input=Callback::new(move |v| form.update(|f| f.minutes = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="way"
                                label="Способ (пешком/транспортом)"
                                value=Signal::derive(move || form.get().way)
                                on_input=Callback::new(move |v| form.update(|f| f.way = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="rooms"
                                label="Комнат"
                                input_type="number"
                                value=Signal::derive(move || form.get().rooms)
                                on_input=Callback::new(move |v| form.update(|f| f.rooms = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="storey"
                                label="Этаж"
                                input_type="number"
                                value=Signal::derive(move || form.get().storey)
                                on_input=Callback::new(move |v| form.update(|f| f.storey = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="storeys"
                                label="Этажей в доме"
                                input_type="number"
                                value=Signal::derive(move || form.get().storeys)
                                on_input=Callback::new(move |v| form.update(|f| f.storeys = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="total-area"
                                label="Общая площадь, м²"
                                input_type="number"
                                value=Signal::derive(move || form.get().total_area)
                                on_input=Callback::new(move |v| form.update(|f| f.total_area = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="living-area"
                                label="Жилая площадь, м²"
                                input_type="number"
                                value=Signal::derive(move || form.get().living_area)
                                on_input=Callback::new(move |v| form.update(|f| f.living_area = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="kitchen-area"
                                label="Площадь кухни, м²"
                                input_type="number"
                                value=Signal::derive(move || form.get().kitchen_area)
                                on_input=Callback::new(move |v| {
                                    form.update(|f| f.kitchen_area = v)
                                })
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="provider"
                                label="Агентство"
                                value=Signal::derive(move || form.get().provider)
                                on_input=Callback::new(move |v| form.update(|f| f.provider = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="fee-percent"
                                label="Комиссия, %"
                                input_type="number"
                                value=Signal::derive(move || form.get().fee_percent)
                                on_input=Callback::new(move |v| form.update(|f| f.fee_percent = v))
                            />
                        </div>
                        <div class="col-md-3">
                            <FormField
                                id="price"
                                label="Цена, ₽/мес."
                                input_type="number"
                                value=Signal::derive(move || form.get().price)
                                on_input=Callback::new(move |v| form.update(|f| f.price = v))
                            />
                        </div>
                    </div>
                    <div class="mt-4">
                        <PricePredictor form=form />
                    </div>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Сохранение..." } else { submit_label }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[component]
fn FormField(
    id: &'static str,
    label: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="form-label" for=id>{label}</label>
        <input
            id=id
            type=input_type.unwrap_or("text")
            class="form-control"
            value=move || value.get()
            prop:value=value
            on:input=move |ev| {
                let target = event_target::<HtmlInputElement>(&ev);
                on_input.call(target.value());
            }
        />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_session, sample_apartment, sample_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn add_panel_renders_form_and_predictor() {
        let html = render_to_string(move || view! { <AddApartmentPanel /> });
        assert!(html.contains("Добавить квартиру"));
        assert!(html.contains("Станция метро"));
        assert!(html.contains("Оценка стоимости"));
        assert!(html.contains("Опубликовать"));
    }

    #[test]
    fn edit_form_is_prefilled_from_the_listing() {
        let html = render_to_string(move || {
            let apartment = sample_apartment(5, 7);
            view! {
                <EditApartmentForm
                    apartment_id=5
                    initial=ApartmentForm::from_apartment(&apartment)
                />
            }
        });
        assert!(html.contains("Редактирование объявления"));
        assert!(html.contains("Сохранить"));
        assert!(html.contains("Таганская"));
    }

    #[test]
    fn owner_reaches_the_edit_form_through_the_gate() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(7)));
            view! { <EditApartmentGate apartment=sample_apartment(5, 7) /> }
        });
        assert!(html.contains("Редактирование объявления"));
        assert!(html.contains("Таганская"));
    }

    #[test]
    fn non_owner_is_blocked_with_a_way_back_to_the_listing() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(8)));
            view! { <EditApartmentGate apartment=sample_apartment(5, 7) /> }
        });
        assert!(html.contains("Вы не можете редактировать чужое объявление"));
        assert!(html.contains("/apartments/5"));
        assert!(!html.contains("Сохранить"));
    }

    #[test]
    fn gate_shows_a_spinner_while_the_session_resolves() {
        let html = render_to_string(move || {
            let (session, set_session) =
                create_signal(crate::state::auth::SessionState::resolving());
            provide_context((session, set_session));
            view! { <EditApartmentGate apartment=sample_apartment(5, 7) /> }
        });
        assert!(html.contains("spinner-border"));
        assert!(!html.contains("Сохранить"));
    }
}
