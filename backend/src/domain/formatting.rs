//! Display formatting for currency amounts.
//!
//! Amounts are whole currency units; the display form groups thousands with
//! commas and has no decimal places ("13,000", "-5,000").

/// Format an amount with thousands separators
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(100), "100");
        assert_eq!(format_amount(999), "999");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_amount(1_000), "1,000");
        assert_eq!(format_amount(13_000), "13,000");
        assert_eq!(format_amount(100_000), "100,000");
        assert_eq!(format_amount(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_negative_amounts() {
        assert_eq!(format_amount(-5_000), "-5,000");
        assert_eq!(format_amount(i64::MIN), "-9,223,372,036,854,775,808");
    }
}
