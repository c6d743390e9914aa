use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::render;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => println!("{}", field_table(map)),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => println!("{}", field_table(res_map)),
        other => println!("{}", render(other, "null")),
    }

    // create-future reports how pricing went next to the display row
    if let Some(Value::Object(pricing)) = envelope.get("pricing") {
        let status = pricing.get("status").map(|s| render(s, "")).unwrap_or_default();
        match pricing.get("reason").or_else(|| pricing.get("error")) {
            Some(detail) => println!("\nPricing: {} ({})", status, render(detail, "")),
            None => println!("\nPricing: {}", status),
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column table; nested objects such as price components are expanded
/// with dotted keys.
fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    push_fields(&mut builder, "", map);
    builder.build()
}

fn push_fields(builder: &mut Builder, prefix: &str, map: &Map<String, Value>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) if !inner.is_empty() && prefix.is_empty() => {
                push_fields(builder, &name, inner);
            }
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(|v| render(v, "null")).collect();
                builder.push_record([name, joined.join(", ")]);
            }
            other => {
                builder.push_record([name, render(other, "null")]);
            }
        }
    }
}

fn print_rows(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        if arr.is_empty() {
            println!("(empty)");
        }
        for item in arr {
            println!("{}", render(item, "null"));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h).map(|v| render(v, "null")).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", builder.build());
}
