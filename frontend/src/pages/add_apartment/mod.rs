use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::{AddApartmentPanel, EditApartmentPanel};

#[component]
pub fn AddApartmentPage() -> impl IntoView {
    view! { <AddApartmentPanel /> }
}

#[component]
pub fn EditApartmentPage() -> impl IntoView {
    view! { <EditApartmentPanel /> }
}
