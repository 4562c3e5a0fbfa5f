use crate::api::{Apartment, ApartmentCreate, PredictionRequest};

/// Raw form state. Everything is kept as entered; parsing and validation
/// happen in one place when the form is submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApartmentForm {
    pub metro: String,
    pub price: String,
    pub minutes: String,
    pub way: String,
    pub provider: String,
    pub fee_percent: String,
    pub storey: String,
    pub storeys: String,
    pub rooms: String,
    pub total_area: String,
    pub living_area: String,
    pub kitchen_area: String,
}

fn required_i32(raw: &str, label: &str) -> Result<i32, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("Поле «{}» должно быть целым числом", label))
}

fn required_f64(raw: &str, label: &str) -> Result<f64, String> {
    raw.trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("Поле «{}» должно быть числом", label))
}

fn optional_f64(raw: &str, label: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    required_f64(trimmed, label).map(Some)
}

impl ApartmentForm {
    pub fn from_apartment(apartment: &Apartment) -> Self {
        Self {
            metro: apartment.metro.clone(),
            price: apartment.price.to_string(),
            minutes: apartment.minutes.to_string(),
            way: apartment.way.clone(),
            provider: apartment.provider.clone().unwrap_or_default(),
            fee_percent: apartment
                .fee_percent
                .map(|v| v.to_string())
                .unwrap_or_default(),
            storey: apartment.storey.to_string(),
            storeys: apartment.storeys.to_string(),
            rooms: apartment.rooms.to_string(),
            total_area: apartment.total_area.to_string(),
            living_area: apartment
                .living_area
                .map(|v| v.to_string())
                .unwrap_or_default(),
            kitchen_area: apartment
                .kitchen_area
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn to_create(&self) -> Result<ApartmentCreate, String> {
        if self.metro.trim().is_empty() {
            return Err("Укажите станцию метро".into());
        }
        let way = if self.way.trim().is_empty() {
            "пешком".to_string()
        } else {
            self.way.trim().to_string()
        };
        let price = required_f64(&self.price, "Цена")?;
        if price <= 0.0 {
            return Err("Цена должна быть больше нуля".into());
        }
        let storey = required_i32(&self.storey, "Этаж")?;
        let storeys = required_i32(&self.storeys, "Этажей в доме")?;
        if storey < 1 || storeys < 1 || storey > storeys {
            return Err("Этаж не может быть выше этажности дома".into());
        }
        let provider = {
            let trimmed = self.provider.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        let fee_percent = if self.fee_percent.trim().is_empty() {
            0.0
        } else {
            required_f64(&self.fee_percent, "Комиссия")?
        };
        let rooms = required_i32(&self.rooms, "Комнат")?;
        if rooms < 1 {
            return Err("Количество комнат должно быть не меньше одной".into());
        }
        let total_area = required_f64(&self.total_area, "Общая площадь")?;
        if total_area <= 0.0 {
            return Err("Общая площадь должна быть больше нуля".into());
        }
        let living_area = optional_f64(&self.living_area, "Жилая площадь")?;
        if living_area.is_some_and(|area| area <= 0.0) {
            return Err("Жилая площадь должна быть больше нуля".into());
        }
        let kitchen_area = optional_f64(&self.kitchen_area, "Площадь кухни")?;
        if kitchen_area.is_some_and(|area| area <= 0.0) {
            return Err("Площадь кухни должна быть больше нуля".into());
        }
        Ok(ApartmentCreate {
            metro: self.metro.trim().to_string(),
            price,
            minutes: required_i32(&self.minutes, "Минут до метро")?,
            way,
            provider,
            fee_percent,
            storey,
            storeys,
            rooms,
            total_area,
            living_area,
            kitchen_area,
        })
    }

    /// The predictor needs the location and size facts but not the price.
    pub fn to_prediction_request(&self) -> Result<PredictionRequest, String> {
        let create = Self {
            price: "1".into(),
            ..self.clone()
        }
        .to_create()?;
        Ok(PredictionRequest {
            metro: create.metro,
            minutes: create.minutes,
            way: create.way,
            rooms: create.rooms,
            total_area: create.total_area,
            living_area: create.living_area,
            kitchen_area: create.kitchen_area,
            storey: create.storey,
            storeys: create.storeys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ApartmentForm;
    use crate::test_support::helpers::sample_apartment;

    fn valid_form() -> ApartmentForm {
        ApartmentForm {
            metro: "Таганская".into(),
            price: "45000".into(),
            minutes: "10".into(),
            way: "пешком".into(),
            storey: "3".into(),
            storeys: "9".into(),
            rooms: "2".into(),
            total_area: "54".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_parses_into_create_payload() {
        let create = valid_form().to_create().unwrap();
        assert_eq!(create.metro, "Таганская");
        assert_eq!(create.price, 45000.0);
        assert_eq!(create.rooms, 2);
        assert_eq!(create.provider, None);
        assert_eq!(create.fee_percent, 0.0);
    }

    #[test]
    fn storey_must_fit_the_building() {
        let mut form = valid_form();
        form.storey = "12".into();
        assert!(form.to_create().is_err());
    }

    #[test]
    fn price_must_be_positive() {
        let mut form = valid_form();
        form.price = "0".into();
        assert!(form.to_create().is_err());
        form.price = "не число".into();
        assert!(form.to_create().is_err());
    }

    #[test]
    fn rooms_must_be_at_least_one() {
        let mut form = valid_form();
        form.rooms = "0".into();
        assert!(form.to_create().is_err());
        form.rooms = "-2".into();
        assert!(form.to_create().is_err());
        form.rooms = "1".into();
        assert!(form.to_create().is_ok());
    }

    #[test]
    fn areas_must_be_positive() {
        let mut form = valid_form();
        form.total_area = "0".into();
        assert!(form.to_create().is_err());
        form.total_area = "-5".into();
        assert!(form.to_create().is_err());

        let mut form = valid_form();
        form.living_area = "0".into();
        assert!(form.to_create().is_err());

        let mut form = valid_form();
        form.kitchen_area = "-1".into();
        assert!(form.to_create().is_err());
        form.kitchen_area = "10,5".into();
        assert!(form.to_create().is_ok());
    }

    #[test]
    fn decimal_comma_is_accepted() {
        let mut form = valid_form();
        form.total_area = "54,5".into();
        assert_eq!(form.to_create().unwrap().total_area, 54.5);
    }

    #[test]
    fn form_round_trips_from_existing_listing() {
        let apartment = sample_apartment(5, 7);
        let form = ApartmentForm::from_apartment(&apartment);
        assert_eq!(form.metro, "Таганская");
        assert_eq!(form.price, "45000");
        let create = form.to_create().unwrap();
        assert_eq!(create.total_area, apartment.total_area);
    }

    #[test]
    fn prediction_request_does_not_require_a_price() {
        let mut form = valid_form();
        form.price = String::new();
        let request = form.to_prediction_request().unwrap();
        assert_eq!(request.metro, "Таганская");
        assert_eq!(request.rooms, 2);
    }
}
