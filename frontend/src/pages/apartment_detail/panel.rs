use leptos::*;

use crate::{
    api::{Apartment, ApiClient, ApiError},
    components::{
        cards::{ApartmentCard, FavoriteButton},
        confirm_dialog::ConfirmDialog,
        guard::mutation_decision,
        layout::LoadingSpinner,
    },
    pages::apartment_detail::view_model::use_apartment_detail_view_model,
    state::auth::use_auth,
    utils::format,
};

#[component]
pub fn ApartmentDetailPanel() -> impl IntoView {
    let vm = use_apartment_detail_view_model();
    let apartment = vm.apartment;
    let similar = vm.similar;

    view! {
        <Suspense fallback=move || view! { <LoadingSpinner /> }>
            {move || {
                apartment
                    .get()
                    .map(|result| match result {
                        Some(Ok(listing)) => view! {
                            <ApartmentDetails
                                apartment=listing
                                delete_action=vm.delete_action
                                delete_error=vm.delete_error
                            />
                        }
                        .into_view(),
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
        <Suspense fallback=|| ()>
            {move || {
                similar.get().map(|apartments| {
                    if apartments.is_empty() {
                        ().into_view()
                    } else {
                        view! {
                            <div class="mt-5">
                                <h3 class="mb-3">"Похожие квартиры"</h3>
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
                            </div>
                        }
                        .into_view()
                    }
                })
            }}
        </Suspense>
    }
}

#[component]
fn ApartmentDetails(
    apartment: Apartment,
    delete_action: Action<i64, Result<(), ApiError>>,
    delete_error: RwSignal<Option<String>>,
) -> impl IntoView {
    let (session, _) = use_auth();
    let (confirm_open, set_confirm_open) = create_signal(false);

    // Owner lookup is best-effort; the row is simply omitted on failure.
    let owner_id = apartment.owner_id;
    let owner = {
        let api = use_context::<ApiClient>().unwrap_or_default();
        create_local_resource(
            move || owner_id,
            move |id| {
                let api = api.clone();
                async move { api.get_user(id).await.ok() }
            },
        )
    };

    let listing = apartment.clone();
    let owner_controls = create_memo(move |_| {
        mutation_decision(Some(&listing), &session.get()).unwrap_or(false)
    });

    let listing_id = apartment.id;
    let edit_href = format!("/apartments/{}/edit", listing_id);
    let price = format!("{} ₽/мес.", format::format_price(apartment.price));
    let commute = format::commute_label(apartment.minutes, &apartment.way);
    let deleting = delete_action.pending();

    let on_delete = move |_| {
        delete_action.dispatch(listing_id);
        set_confirm_open.set(false);
    };

    view! {
        <div class="card shadow-sm">
            <div class="card-body p-4">
                <div class="d-flex justify-content-between align-items-start">
                    <h1 class="card-title">{format!("м. {}", apartment.metro)}</h1>
                    <FavoriteButton apartment_id=listing_id />
                </div>
                <p class="fs-3 fw-bold">{price}</p>
                <dl class="row">
                    <dt class="col-sm-3">"Комнат"</dt>
                    <dd class="col-sm-9">{format::pluralize_rooms(apartment.rooms)}</dd>
                    <dt class="col-sm-3">"Общая площадь"</dt>
                    <dd class="col-sm-9">{format!("{} м²", apartment.total_area)}</dd>
                    {apartment
                        .living_area
                        .map(|area| {
                            view! {
                                <dt class="col-sm-3">"Жилая площадь"</dt>
                                <dd class="col-sm-9">{format!("{} м²", area)}</dd>
                            }
                        })}
                    {apartment
                        .kitchen_area
                        .map(|area| {
                            view! {
                                <dt class="col-sm-3">"Площадь кухни"</dt>
                                <dd class="col-sm-9">{format!("{} м²", area)}</dd>
                            }
                        })}
                    <dt class="col-sm-3">"Этаж"</dt>
                    <dd class="col-sm-9">
                        {format!("{}/{}", apartment.storey, apartment.storeys)}
                    </dd>
                    <dt class="col-sm-3">"До метро"</dt>
                    <dd class="col-sm-9">{commute}</dd>
                    {move || {
                        owner
                            .get()
                            .flatten()
                            .map(|user| {
                                view! {
                                    <dt class="col-sm-3">"Владелец"</dt>
                                    <dd class="col-sm-9">{user.username}</dd>
                                }
                            })
                    }}
                    {apartment
                        .created_at
                        .map(|created| {
                            view! {
                                <dt class="col-sm-3">"Опубликовано"</dt>
                                <dd class="col-sm-9">
                                    {created.format("%d.%m.%Y").to_string()}
                                </dd>
                            }
                        })}
                    {apartment
                        .provider
                        .clone()
                        .map(|provider| {
                            let fee = apartment.fee_percent.unwrap_or(0.0);
                            view! {
                                <dt class="col-sm-3">"Агентство"</dt>
                                <dd class="col-sm-9">
                                    {format!("{} (комиссия {}%)", provider, fee)}
                                </dd>
                            }
                        })}
                </dl>
                <Show when=move || owner_controls.get()>
                    {move || {
                        delete_error
                            .get()
                            .map(|msg| {
                                view! {
                                    <div class="alert alert-danger" role="alert">{msg}</div>
                                }
                            })
                    }}
                    <div class="d-flex gap-2">
                        <a href=edit_href.clone() class="btn btn-outline-primary">
                            "Редактировать"
                        </a>
                        <button
                            type="button"
                            class="btn btn-outline-danger"
                            disabled=move || deleting.get()
                            on:click=move |_| set_confirm_open.set(true)
                        >
                            "Удалить"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
        <ConfirmDialog
            is_open=confirm_open.into()
            title="Удаление объявления"
            message="Вы уверены, что хотите удалить это объявление?"
            on_confirm=Callback::new(on_delete)
            on_cancel=Callback::new(move |_| set_confirm_open.set(false))
            destructive=true
        />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_favorites, provide_session, sample_apartment, sample_user};
    use crate::test_support::ssr::render_to_string;

    fn render_details(owner_id: i64, viewer: Option<i64>) -> String {
        render_to_string(move || {
            provide_session(viewer.map(sample_user));
            provide_favorites(&[]);
            let delete_action =
                create_action(|_: &i64| async move { Ok::<(), crate::api::ApiError>(()) });
            let delete_error = create_rw_signal(None::<String>);
            view! {
                <ApartmentDetails
                    apartment=sample_apartment(5, owner_id)
                    delete_action=delete_action
                    delete_error=delete_error
                />
            }
        })
    }

    #[test]
    fn owner_sees_mutation_controls() {
        let html = render_details(7, Some(7));
        assert!(html.contains("Редактировать"));
        assert!(html.contains("Удалить"));
    }

    #[test]
    fn non_owner_sees_no_mutation_controls() {
        let html = render_details(7, Some(8));
        assert!(!html.contains("Редактировать"));
        assert!(!html.contains("Удалить"));
    }

    #[test]
    fn anonymous_visitor_sees_no_mutation_controls() {
        let html = render_details(7, None);
        assert!(!html.contains("Редактировать"));
        assert!(html.contains("м. Таганская"));
        assert!(html.contains("2 комнаты"));
    }
}
