use crate::state::auth::{self, use_auth};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let (session, _set_session) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let is_authenticated = create_memo(move |_| session.get().is_authenticated());
    let username = move || {
        session
            .get()
            .user
            .map(|user| user.username)
            .unwrap_or_default()
    };
    let on_logout = move |_| {
        set_menu_open.set(false);
        auth::logout();
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);
    let close_menu = move |_| set_menu_open.set(false);
    view! {
        <nav class="navbar navbar-expand-lg navbar-dark bg-dark">
            <div class="container">
                <a class="navbar-brand" href="/">"Аренда недвижимости"</a>
                <button
                    type="button"
                    class="navbar-toggler"
                    aria-expanded=move || menu_open.get()
                    aria-controls="main-nav"
                    aria-label="Переключить меню"
                    on:click=toggle_menu
                >
                    <span class="navbar-toggler-icon"></span>
                </button>
                <div
                    id="main-nav"
                    class=move || {
                        if menu_open.get() {
                            "collapse navbar-collapse show"
                        } else {
                            "collapse navbar-collapse"
                        }
                    }
                >
                    <ul class="navbar-nav me-auto">
                        <li class="nav-item">
                            <a class="nav-link" href="/apartments" on:click=close_menu>
                                "Квартиры"
                            </a>
                        </li>
                        <Show when=move || is_authenticated.get()>
                            <li class="nav-item">
                                <a class="nav-link" href="/favorites" on:click=close_menu>
                                    "Избранное"
                                </a>
                            </li>
                            <li class="nav-item">
                                <a class="nav-link" href="/add-apartment" on:click=close_menu>
                                    "Добавить квартиру"
                                </a>
                            </li>
                        </Show>
                    </ul>
                    <ul class="navbar-nav ms-auto">
                        <Show
                            when=move || is_authenticated.get()
                            fallback=move || {
                                view! {
                                    <li class="nav-item">
                                        <a class="nav-link" href="/login">"Войти"</a>
                                    </li>
                                    <li class="nav-item">
                                        <a class="nav-link" href="/register">"Регистрация"</a>
                                    </li>
                                }
                            }
                        >
                            <li class="nav-item">
                                <a class="nav-link" href="/profile" on:click=close_menu>
                                    {username}
                                </a>
                            </li>
                            <li class="nav-item">
                                <button class="btn btn-link nav-link" on:click=on_logout>
                                    "Выйти"
                                </button>
                            </li>
                        </Show>
                    </ul>
                </div>
            </div>
        </nav>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="d-flex flex-column min-vh-100">
            <Header/>
            <main class="container py-4 flex-grow-1">{children()}</main>
            <Footer/>
        </div>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-dark text-light py-3 mt-auto">
            <div class="container text-center">
                <span class="text-muted">"© 2024 Аренда недвижимости"</span>
            </div>
        </footer>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="d-flex justify-content-center p-5">
            <div class="spinner-border text-primary" role="status">
                <span class="visually-hidden">"Загрузка..."</span>
            </div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="alert alert-danger" role="alert">
            {message}
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="alert alert-success" role="alert">
            {message}
        </div>
    }
}
