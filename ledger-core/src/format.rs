//! Display formatting: Indian-locale money and percentages.

use crate::finance::Transaction;

pub const CURRENCY_SYMBOL: &str = "₹";

/// Format a number with en-IN digit grouping (`12,34,567.891`).
///
/// At most three fraction digits are shown and trailing zeros are dropped. Ties round
/// half away from zero on the shortest decimal form of the value (`1.0625` -> `1.063`).
pub fn group_en_in(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (whole, fraction) = round_fraction(&value.abs().to_string(), FRACTION_DIGITS);
    let frac = fraction.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (whole != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_indian_digits(&whole));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

const FRACTION_DIGITS: usize = 3;

/// Round a plain decimal string (`"1234.5625"`) to `places` fraction digits, half away
/// from zero. Returns the integer and fraction digits separately.
fn round_fraction(decimal: &str, places: usize) -> (String, String) {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    if frac_part.len() <= places {
        return (int_part.to_string(), frac_part.to_string());
    }

    let round_up = frac_part.as_bytes()[places] >= b'5';
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..places].bytes())
        .map(|b| b - b'0')
        .collect();

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let (int_digits, frac_digits) = text.split_at(text.len() - places);
    (int_digits.to_string(), frac_digits.to_string())
}

fn group_indian_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut pairs = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        pairs.push(t);
        rest = h;
    }
    pairs.push(rest);
    pairs.reverse();

    format!("{},{}", pairs.join(","), tail)
}

/// `₹` followed by the grouped value, sign included (`₹-4.5`).
pub fn money(value: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, group_en_in(value))
}

/// Row amount: sign from the transaction type, magnitude from `|amount|`.
pub fn signed_amount(t: &Transaction) -> String {
    format!("{}{}", t.kind.sign(), money(t.amount.abs()))
}

/// Round half up, the way the progress label is rounded.
pub fn round_percent(progress: f64) -> i64 {
    (progress + 0.5).floor() as i64
}

pub fn percent_label(progress: f64) -> String {
    format!("{}%", round_percent(progress))
}
