use serde_json::Value;

use super::{primary, render};

/// Headline figures, most specific first.
const PRIORITY_KEYS: [&str; 6] = [
    "theoretical_price",
    "accrued_interest",
    "present_value",
    "contract_value",
    "initial_margin_amount",
    "symbol",
];

/// Print just the headline number of a command's output.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = primary(value);

    match result {
        Value::Object(map) => {
            let priority = PRIORITY_KEYS
                .iter()
                .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
            match priority {
                Some(val) => render(val, "null"),
                None => match map.iter().next() {
                    Some((key, val)) => format!("{}: {}", key, render(val, "null")),
                    None => String::new(),
                },
            }
        }
        // A coupon schedule: one payment per line.
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(cf) => format!(
                    "{} {}",
                    render(cf.get("payment_date").unwrap_or(&Value::Null), ""),
                    render(cf.get("amount").unwrap_or(&Value::Null), "")
                ),
                other => render(other, "null"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => render(other, "null"),
    }
}
