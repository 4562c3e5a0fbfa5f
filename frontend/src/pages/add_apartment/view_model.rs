use leptos::*;

use crate::{
    api::{Apartment, ApartmentUpdate, ApiClient, ApiError},
    pages::add_apartment::utils::ApartmentForm,
    utils::nav,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Clone)]
pub struct ApartmentFormViewModel {
    pub form: RwSignal<ApartmentForm>,
    pub error: RwSignal<Option<String>>,
    pub submit_action: Action<ApartmentForm, Result<Apartment, ApiError>>,
}

pub fn full_update(form: &ApartmentForm) -> Result<ApartmentUpdate, String> {
    let create = form.to_create()?;
    Ok(ApartmentUpdate {
        metro: Some(create.metro),
        price: Some(create.price),
        minutes: Some(create.minutes),
        way: Some(create.way),
        provider: create.provider,
        fee_percent: Some(create.fee_percent),
        storey: Some(create.storey),
        storeys: Some(create.storeys),
        rooms: Some(create.rooms),
        total_area: Some(create.total_area),
        living_area: create.living_area,
        kitchen_area: create.kitchen_area,
    })
}

pub fn use_apartment_form_view_model(mode: FormMode) -> ApartmentFormViewModel {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let form = create_rw_signal(ApartmentForm::default());
    let error = create_rw_signal(None::<String>);

    let submit_action = create_action(move |form: &ApartmentForm| {
        let api = api.clone();
        let form = form.clone();
        async move {
            match mode {
                FormMode::Create => {
                    let payload = form.to_create().map_err(ApiError::Validation)?;
                    api.create_apartment(&payload).await
                }
                FormMode::Edit(id) => {
                    let payload = full_update(&form).map_err(ApiError::Validation)?;
                    api.update_apartment(id, &payload).await
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(apartment) => {
                    error.set(None);
                    nav::redirect(&format!("/apartments/{}", apartment.id));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        }
    });

    ApartmentFormViewModel {
        form,
        error,
        submit_action,
    }
}
