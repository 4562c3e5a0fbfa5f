use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

use crate::{
    api::{Apartment, ApiClient, ApiError, UserUpdate},
    components::{cards::ApartmentCard, layout::LoadingSpinner},
    state::auth::{use_auth, SessionState},
};

/// Builds the partial update from the form; only changed fields are sent.
pub fn build_profile_update(
    current_email: &str,
    email: &str,
    password: &str,
) -> Result<Option<UserUpdate>, String> {
    let email = email.trim();
    let password = password.trim();
    let mut update = UserUpdate::default();
    if !email.is_empty() && email != current_email {
        if !email.contains('@') {
            return Err("Введите корректный email".into());
        }
        update.email = Some(email.to_string());
    }
    if !password.is_empty() {
        if password.len() < 6 {
            return Err("Пароль должен содержать не менее 6 символов".into());
        }
        update.password = Some(password.to_string());
    }
    if update.email.is_none() && update.password.is_none() {
        Ok(None)
    } else {
        Ok(Some(update))
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let (session, set_session) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (notice, set_notice) = create_signal(None::<String>);
    let (pending, set_pending) = create_signal(false);

    let username = move || {
        session
            .get()
            .user
            .map(|user| user.username)
            .unwrap_or_default()
    };
    let current_email = move || {
        session
            .get()
            .user
            .map(|user| user.email)
            .unwrap_or_default()
    };

    let handle_submit = {
        let api = api.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            if pending.get_untracked() {
                return;
            }
            let update = match build_profile_update(
                &current_email(),
                &email.get_untracked(),
                &password.get_untracked(),
            ) {
                Ok(Some(update)) => update,
                Ok(None) => {
                    set_notice.set(Some("Нет изменений для сохранения".into()));
                    return;
                }
                Err(msg) => {
                    set_error.set(Some(msg));
                    return;
                }
            };
            set_error.set(None);
            set_notice.set(None);
            set_pending.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api.update_me(&update).await {
                    Ok(user) => {
                        set_pending.set(false);
                        set_password.set(String::new());
                        set_notice.set(Some("Профиль обновлён".into()));
                        let _ = set_session.try_set(SessionState::authenticated(user));
                    }
                    Err(err) => {
                        set_pending.set(false);
                        set_error.set(Some(err.to_string()));
                    }
                }
            });
        }
    };

    let my_listings = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move { api.my_apartments().await }
            },
        )
    };
    let recommended = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.personalized_recommendations().await.unwrap_or_default() }
        },
    );

    view! {
        <div>
            <h1 class="mb-4">"Профиль"</h1>
            <div class="row g-4">
                <div class="col-lg-5">
                    <div class="card shadow-sm">
                        <div class="card-body">
                            <h5 class="card-title">{username}</h5>
                            <p class="text-muted">{current_email}</p>
                            {move || {
                                error
                                    .get()
                                    .map(|msg| {
                                        view! {
                                            <div class="alert alert-danger" role="alert">{msg}</div>
                                        }
                                    })
                            }}
                            {move || {
                                notice
                                    .get()
                                    .map(|msg| {
                                        view! {
                                            <div class="alert alert-success" role="alert">{msg}</div>
                                        }
                                    })
                            }}
                            <form on:submit=handle_submit>
                                <div class="mb-3">
                                    <label class="form-label" for="profile-email">"Новый email"</label>
                                    <input
                                        id="profile-email"
                                        type="email"
                                        class="form-control"
                                        prop:value=email
                                        on:input=move |ev| {
                                            let target = event_target::<HtmlInputElement>(&ev);
                                            set_email.set(target.value());
                                        }
                                    />
                                </div>
                                <div class="mb-3">
                                    <label class="form-label" for="profile-password">
                                        "Новый пароль"
                                    </label>
                                    <input
                                        id="profile-password"
                                        type="password"
                                        class="form-control"
                                        prop:value=password
                                        on:input=move |ev| {
                                            let target = event_target::<HtmlInputElement>(&ev);
                                            set_password.set(target.value());
                                        }
                                    />
                                </div>
                                <button
                                    type="submit"
                                    class="btn btn-primary"
                                    disabled=move || pending.get()
                                >
                                    {move || if pending.get() { "Сохранение..." } else { "Сохранить" }}
                                </button>
                            </form>
                        </div>
                    </div>
                </div>
                <div class="col-lg-7">
                    <h4 class="mb-3">"Мои объявления"</h4>
                    <Suspense fallback=move || view! { <LoadingSpinner /> }>
                        {move || {
                            my_listings
                                .get()
                                .map(|result| view! { <MyListingsSection result=result /> })
                        }}
                    </Suspense>
                </div>
            </div>
            <Suspense fallback=|| ()>
                {move || {
                    recommended.get().map(|apartments| {
                        if apartments.is_empty() {
                            ().into_view()
                        } else {
                            view! {
                                <div class="mt-5">
                                    <h4 class="mb-3">"Рекомендации для вас"</h4>
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
        </div>
    }
}

/// A failed fetch of the user's own listings stays visible as an error; only
/// an empty result means "no listings yet".
#[component]
fn MyListingsSection(result: Result<Vec<Apartment>, ApiError>) -> impl IntoView {
    match result {
        Err(err) => view! {
            <div class="alert alert-danger" role="alert">{err.to_string()}</div>
        }
        .into_view(),
        Ok(apartments) if apartments.is_empty() => view! {
            <p class="text-muted">
                "У вас нет объявлений. "
                <a href="/add-apartment">"Добавить квартиру"</a>
            </p>
        }
        .into_view(),
        Ok(apartments) => view! {
            <div class="row row-cols-1 row-cols-md-2 g-4">
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

#[cfg(test)]
mod tests {
    use super::build_profile_update;

    #[test]
    fn unchanged_form_produces_no_update() {
        assert_eq!(
            build_profile_update("a@b.ru", "", "").unwrap().is_none(),
            true
        );
        assert!(build_profile_update("a@b.ru", "a@b.ru", "")
            .unwrap()
            .is_none());
    }

    #[test]
    fn changed_fields_are_sent_selectively() {
        let update = build_profile_update("a@b.ru", "new@b.ru", "")
            .unwrap()
            .unwrap();
        assert_eq!(update.email.as_deref(), Some("new@b.ru"));
        assert!(update.password.is_none());

        let update = build_profile_update("a@b.ru", "", "secret1").unwrap().unwrap();
        assert!(update.email.is_none());
        assert_eq!(update.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn invalid_fields_are_rejected() {
        assert!(build_profile_update("a@b.ru", "not-an-email", "").is_err());
        assert!(build_profile_update("a@b.ru", "", "short").is_err());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_favorites, provide_session, sample_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn profile_page_shows_identity_and_sections() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(7)));
            provide_favorites(&[]);
            view! { <ProfilePage /> }
        });
        assert!(html.contains("user7"));
        assert!(html.contains("user7@example.com"));
        assert!(html.contains("Мои объявления"));
    }

    #[test]
    fn my_listings_failure_shows_an_error_instead_of_the_empty_state() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(7)));
            provide_favorites(&[]);
            view! {
                <MyListingsSection result=Err(crate::api::ApiError::Transport(
                    "connection refused".into(),
                )) />
            }
        });
        assert!(html.contains("alert-danger"));
        assert!(html.contains("Сервис недоступен"));
        assert!(!html.contains("У вас нет объявлений"));
    }

    #[test]
    fn my_listings_empty_state_offers_the_publish_link() {
        let html = render_to_string(move || {
            provide_session(Some(sample_user(7)));
            provide_favorites(&[]);
            view! { <MyListingsSection result=Ok(Vec::new()) /> }
        });
        assert!(html.contains("У вас нет объявлений"));
        assert!(html.contains("/add-apartment"));
    }
}
