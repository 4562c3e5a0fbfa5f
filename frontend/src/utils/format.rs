//! Presentation helpers for listing cards and detail views.

/// Grouped ruble amount, e.g. `45 000`. Separator is a non-breaking space.
pub fn format_price(price: f64) -> String {
    let rounded = price.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Russian plural form for room counts: `1 комната`, `2 комнаты`, `5 комнат`.
pub fn pluralize_rooms(rooms: i32) -> String {
    let n = rooms.unsigned_abs() % 100;
    let tail = n % 10;
    let word = if (11..=14).contains(&n) {
        "комнат"
    } else if tail == 1 {
        "комната"
    } else if (2..=4).contains(&tail) {
        "комнаты"
    } else {
        "комнат"
    };
    format!("{} {}", rooms, word)
}

/// Commute label, e.g. `7 мин. пешком`.
pub fn commute_label(minutes: i32, way: &str) -> String {
    format!("{} мин. {}", minutes, way)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(45000.0), "45\u{a0}000");
        assert_eq!(format_price(1234567.4), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn room_plurals_follow_russian_rules() {
        assert_eq!(pluralize_rooms(1), "1 комната");
        assert_eq!(pluralize_rooms(2), "2 комнаты");
        assert_eq!(pluralize_rooms(5), "5 комнат");
        assert_eq!(pluralize_rooms(11), "11 комнат");
        assert_eq!(pluralize_rooms(21), "21 комната");
    }

    #[test]
    fn commute_labels_include_way() {
        assert_eq!(commute_label(7, "пешком"), "7 мин. пешком");
    }
}
