use leptos::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="text-center py-5">
            <h1 class="display-1">"404"</h1>
            <p class="lead">"Страница не найдена"</p>
            <a href="/" class="btn btn-primary">"На главную"</a>
        </div>
    }
}
