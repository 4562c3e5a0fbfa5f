use leptos::*;

pub mod components;
pub mod utils;

mod panel;

pub use panel::ApartmentsPanel;

#[component]
pub fn ApartmentsPage() -> impl IntoView {
    view! { <ApartmentsPanel /> }
}
