//! Ruble display formatting.

/// Format whole rubles the way the site renders every price: thousands
/// grouped with a non-breaking space, then a regular space and the ruble
/// sign. `14990` becomes `14\u{a0}990 ₽`.
#[must_use]
pub fn format_rub(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }
    grouped.push_str(" ₽");
    grouped
}
