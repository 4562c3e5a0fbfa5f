use crate::api::ApartmentFilter;

/// Blank or unparsable form input means "no constraint".
fn parse_i32(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn parse_f64(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse().ok().filter(|v| *v >= 0.0)
}

fn parse_metro(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Collects the raw form fields into filter criteria.
pub fn build_filter(
    metro: &str,
    rooms: &str,
    min_price: &str,
    max_price: &str,
    min_area: &str,
) -> ApartmentFilter {
    ApartmentFilter {
        metro: parse_metro(metro),
        rooms: parse_i32(rooms),
        min_price: parse_f64(min_price),
        max_price: parse_f64(max_price),
        min_area: parse_f64(min_area),
    }
}
