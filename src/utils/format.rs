use regex::Regex;
use std::sync::OnceLock;

fn non_digits() -> &'static Regex {
    static NON_DIGITS: OnceLock<Regex> = OnceLock::new();
    NON_DIGITS.get_or_init(|| Regex::new(r"[^0-9]").expect("static pattern"))
}

pub fn digits_only(phone: &str) -> String {
    non_digits().replace_all(phone, "").into_owned()
}

/// 北美號碼格式化為 `(416) 555-1234`，其他格式原樣返回
pub fn format_phone(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }

    let digits = digits_only(phone);
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            format!("({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
        }
        _ => phone.to_string(),
    }
}

pub fn phone_href(phone: &str) -> String {
    if phone.is_empty() {
        return "#".to_string();
    }
    format!("tel:+{}", digits_only(phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ten_digit_phone() {
        assert_eq!(format_phone("4165551234"), "(416) 555-1234");
        assert_eq!(format_phone("416.555.1234"), "(416) 555-1234");
    }

    #[test]
    fn test_format_eleven_digit_phone_drops_country_code() {
        assert_eq!(format_phone("+1 416 555 1234"), "(416) 555-1234");
    }

    #[test]
    fn test_format_unknown_shape_is_unchanged() {
        assert_eq!(format_phone("555-1234"), "555-1234");
        assert_eq!(format_phone("24165551234"), "24165551234");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_phone_href() {
        assert_eq!(phone_href("(416) 555-1234"), "tel:+4165551234");
        assert_eq!(phone_href(""), "#");
    }
}
