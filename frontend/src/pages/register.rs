use crate::{api::ApiClient, state::auth, utils::nav};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Введите имя пользователя".into());
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err("Введите корректный email".into());
    }
    if password.len() < 6 {
        return Err("Пароль должен содержать не менее 6 символов".into());
    }
    if password != password_confirm {
        return Err("Пароли не совпадают".into());
    }
    Ok(())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (password_confirm, set_password_confirm) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (pending, set_pending) = create_signal(false);

    let api = use_context::<ApiClient>().unwrap_or_default();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let uname = username.get_untracked();
        let mail = email.get_untracked();
        let pword = password.get_untracked();
        let confirm = password_confirm.get_untracked();

        if let Err(msg) = validate_registration(&uname, &mail, &pword, &confirm) {
            set_error.set(Some(msg));
            return;
        }

        set_error.set(None);
        set_pending.set(true);
        let api = api.clone();
        spawn_local(async move {
            match auth::register(&api, &uname, &mail, &pword).await {
                Ok(_) => {
                    set_pending.set(false);
                    nav::redirect("/login");
                }
                Err(err) => {
                    set_pending.set(false);
                    set_error.set(Some(err.to_string()));
                }
            }
        });
    };

    view! {
        <div class="row justify-content-center">
            <div class="col-md-5">
                <div class="card shadow-sm">
                    <div class="card-body p-4">
                        <h2 class="card-title text-center mb-4">"Регистрация"</h2>
                        {move || {
                            error
                                .get()
                                .map(|msg| {
                                    view! {
                                        <div class="alert alert-danger" role="alert">{msg}</div>
                                    }
                                })
                        }}
                        <form on:submit=handle_submit>
                            <div class="mb-3">
                                <label class="form-label" for="username">"Имя пользователя"</label>
                                <input
                                    id="username"
                                    type="text"
                                    class="form-control"
                                    required
                                    prop:value=username
                                    on:input=move |ev| {
                                        let target = event_target::<HtmlInputElement>(&ev);
                                        set_username.set(target.value());
                                    }
                                />
                            </div>
                            <div class="mb-3">
                                <label class="form-label" for="email">"Email"</label>
                                <input
                                    id="email"
                                    type="email"
                                    class="form-control"
                                    required
                                    prop:value=email
                                    on:input=move |ev| {
                                        let target = event_target::<HtmlInputElement>(&ev);
                                        set_email.set(target.value());
                                    }
                                />
                            </div>
                            <div class="mb-3">
                                <label class="form-label" for="password">"Пароль"</label>
                                <input
                                    id="password"
                                    type="password"
                                    class="form-control"
                                    required
                                    prop:value=password
                                    on:input=move |ev| {
                                        let target = event_target::<HtmlInputElement>(&ev);
                                        set_password.set(target.value());
                                    }
                                />
                            </div>
                            <div class="mb-3">
                                <label class="form-label" for="password-confirm">
                                    "Подтверждение пароля"
                                </label>
                                <input
                                    id="password-confirm"
                                    type="password"
                                    class="form-control"
                                    required
                                    prop:value=password_confirm
                                    on:input=move |ev| {
                                        let target = event_target::<HtmlInputElement>(&ev);
                                        set_password_confirm.set(target.value());
                                    }
                                />
                            </div>
                            <button
                                type="submit"
                                class="btn btn-primary w-100"
                                disabled=move || pending.get()
                            >
                                {move || {
                                    if pending.get() {
                                        "Регистрация..."
                                    } else {
                                        "Зарегистрироваться"
                                    }
                                }}
                            </button>
                        </form>
                        <p class="text-center mt-3 mb-0">
                            "Уже есть аккаунт? "
                            <a href="/login">"Войти"</a>
                        </p>
                    </div>
                </div>
            </div>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn register_page_renders_all_fields() {
        let html = render_to_string(move || view! { <RegisterPage /> });
        assert!(html.contains("Имя пользователя"));
        assert!(html.contains("Email"));
        assert!(html.contains("Подтверждение пароля"));
        assert!(html.contains("Зарегистрироваться"));
    }
}
