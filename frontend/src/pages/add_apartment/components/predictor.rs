use leptos::*;

use crate::{
    api::{ApiClient, PredictionResponse},
    pages::add_apartment::utils::ApartmentForm,
    utils::format,
};

/// Estimates a market price for the listing currently described by the form.
/// The estimate can be copied into the price field with one click.
#[component]
pub fn PricePredictor(form: RwSignal<ApartmentForm>) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let (prediction, set_prediction) = create_signal(None::<PredictionResponse>);
    let (error, set_error) = create_signal(None::<String>);
    let (pending, set_pending) = create_signal(false);

    let on_predict = move |_| {
        if pending.get_untracked() {
            return;
        }
        let request = match form.get_untracked().to_prediction_request() {
            Ok(request) => request,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_error.set(None);
        set_pending.set(true);
        let api = api.clone();
        spawn_local(async move {
            match api.predict_price(&request).await {
                Ok(response) => {
                    set_pending.set(false);
                    set_prediction.set(Some(response));
                }
                Err(err) => {
                    set_pending.set(false);
                    set_error.set(Some(err.to_string()));
                }
            }
        });
    };

    let on_apply = move |_| {
        if let Some(response) = prediction.get_untracked() {
            form.update(|form| form.price = response.predicted_price.round().to_string());
        }
    };

    view! {
        <div class="card bg-light mb-3">
            <div class="card-body">
                <h5 class="card-title">"Оценка стоимости"</h5>
                {move || {
                    error
                        .get()
                        .map(|msg| {
                            view! { <div class="alert alert-warning" role="alert">{msg}</div> }
                        })
                }}
                {move || {
                    prediction
                        .get()
                        .map(|response| {
                            view! {
                                <p class="mb-2">
                                    {format!(
                                        "Рекомендуемая цена: {} ₽/мес.",
                                        format::format_price(response.predicted_price),
                                    )}
                                </p>
                                <p class="text-muted small">{response.message}</p>
                            }
                        })
                }}
                <div class="d-flex gap-2">
                    <button
                        type="button"
                        class="btn btn-outline-primary"
                        disabled=move || pending.get()
                        on:click=on_predict
                    >
                        {move || if pending.get() { "Оценка..." } else { "Оценить" }}
                    </button>
                    <Show when=move || prediction.get().is_some()>
                        <button type="button" class="btn btn-outline-success" on:click=on_apply>
                            "Подставить цену"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
