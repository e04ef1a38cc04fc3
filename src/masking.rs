//! Input masking and display grouping helpers
//!
//! Pure string transforms used by the step forms. The canonical stored value
//! is always the digit-only string; `currency` and `virtual_account` are
//! display-only groupings and never feed back into stored state.

/// Strip every non-digit character
pub fn only_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Group a digit string into thousands with `.` separators, right-aligned:
/// `"1500000"` becomes `"1.500.000"`
pub fn currency(s: &str) -> String {
    let digits = only_digits(s);
    if digits.is_empty() {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Group a digit string into 4-digit blocks, left-aligned:
/// `"8808123456789012"` becomes `"8808 1234 5678 9012"`
pub fn virtual_account(s: &str) -> String {
    let digits = only_digits(s);
    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_digits() {
        assert_eq!(only_digits("12a3-4 5"), "12345");
        assert_eq!(only_digits("Rp 1.500"), "1500");
        assert_eq!(only_digits("abc"), "");
        assert_eq!(only_digits(""), "");
    }

    #[test]
    fn test_only_digits_idempotent() {
        for s in ["8808 1234", "1.500.000", "x9y8", "", "000"] {
            let once = only_digits(s);
            assert_eq!(only_digits(&once), once);
        }
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(currency("0"), "0");
        assert_eq!(currency("100"), "100");
        assert_eq!(currency("1000"), "1.000");
        assert_eq!(currency("150000"), "150.000");
        assert_eq!(currency("1500000"), "1.500.000");
        assert_eq!(currency(""), "");
    }

    #[test]
    fn test_currency_strips_before_grouping() {
        assert_eq!(currency("1.500.000"), "1.500.000");
        assert_eq!(currency("Rp1500000"), "1.500.000");
    }

    #[test]
    fn test_currency_round_trips_through_only_digits() {
        for s in ["7", "4200", "999999999", "12.345"] {
            let canonical = only_digits(s);
            let shown = currency(s);
            assert!(shown.chars().all(|c| c.is_ascii_digit() || c == '.'));
            assert_eq!(only_digits(&shown), canonical);
        }
    }

    #[test]
    fn test_virtual_account_grouping() {
        assert_eq!(virtual_account("8808123456789012"), "8808 1234 5678 9012");
        assert_eq!(virtual_account("880812"), "8808 12");
        assert_eq!(virtual_account("88"), "88");
        assert_eq!(virtual_account(""), "");
    }

    #[test]
    fn test_virtual_account_strips_before_grouping() {
        assert_eq!(virtual_account("8808 1234 56"), "8808 1234 56");
    }
}
