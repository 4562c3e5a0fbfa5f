use leptos::*;

pub mod view_model;

mod panel;

pub use panel::ApartmentDetailPanel;

#[component]
pub fn ApartmentDetailPage() -> impl IntoView {
    view! { <ApartmentDetailPanel /> }
}
