/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Title-case every whitespace-separated word: first letter upper, rest lower.
///
/// Inner whitespace runs collapse to a single space and the result is trimmed.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a menu category key: trimmed, lower-case, words joined by `_`.
pub fn category_key(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Trim an optional string, mapping blank values to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("  marco   rossi "), "Marco Rossi");
        assert_eq!(title_case("TIRAMISU maison"), "Tiramisu Maison");
        assert_eq!(title_case("léa"), "Léa");
        assert_eq!(title_case("élodie"), "Élodie");
        assert_eq!(title_case("   "), "");
    }

    #[test]
    fn test_category_key() {
        assert_eq!(category_key(" Liked Dishes "), "liked_dishes");
        assert_eq!(category_key("atmosphere"), "atmosphere");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ")), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
