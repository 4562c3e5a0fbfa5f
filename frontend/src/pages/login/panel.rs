use crate::{
    pages::login::utils,
    state::auth::{self, LoginPayload},
    utils::nav,
};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    set_error.set(None);
                    nav::redirect("/");
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let uname = username.get_untracked();
        let pword = password.get_untracked();

        if let Err(msg) = utils::validate_credentials(&uname, &pword) {
            set_error.set(Some(msg));
            return;
        }

        set_error.set(None);
        login_action.dispatch(LoginPayload {
            username: uname,
            password: pword,
        });
    };

    view! {
        <div class="row justify-content-center">
            <div class="col-md-5">
                <div class="card shadow-sm">
                    <div class="card-body p-4">
                        <h2 class="card-title text-center mb-4">"Вход"</h2>
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
                                    name="username"
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
                                <label class="form-label" for="password">"Пароль"</label>
                                <input
                                    id="password"
                                    name="password"
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
                            <button
                                type="submit"
                                class="btn btn-primary w-100"
                                disabled=move || pending.get()
                            >
                                {move || if pending.get() { "Вход..." } else { "Войти" }}
                            </button>
                        </form>
                        <p class="text-center mt-3 mb-0">
                            "Нет аккаунта? "
                            <a href="/register">"Зарегистрироваться"</a>
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
    use crate::test_support::helpers::provide_session;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_panel_renders_credential_form() {
        let html = render_to_string(move || {
            provide_session(None);
            view! { <LoginPanel /> }
        });
        assert!(html.contains("Имя пользователя"));
        assert!(html.contains("Пароль"));
        assert!(html.contains("Войти"));
        assert!(html.contains("/register"));
    }
}
