//! Field-level change summaries for audit entries

use serde_json::Value;

const MAX_STRING_CHARS: usize = 50;

/// Summarise top-level field changes between two JSON objects
///
/// Returns `None` when nothing changed. Fields that only carry bookkeeping
/// (`updated_at`) are left out.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if key == "updated_at" {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"name": "Milk", "quantity": "1", "purchased": false});
        let after = json!({"name": "Milk", "quantity": "2", "purchased": true});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("quantity: \"1\" -> \"2\""));
        assert!(diff.contains("purchased: false -> true"));
        assert!(!diff.contains("name"));
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"notes": "organic"});
        let after = json!({"purchase_date": "2025-03-01"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("notes: \"organic\" -> (removed)"));
        assert!(diff.contains("purchase_date: (added) -> \"2025-03-01\""));
    }

    #[test]
    fn test_updated_at_ignored() {
        let before = json!({"updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"updated_at": "2025-01-02T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_long_multibyte_string_truncated() {
        let before = json!({"notes": "₹".repeat(80)});
        let after = json!({"notes": "short"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(generate_diff(&json!("a"), &json!("a")).is_none());
        assert_eq!(format_value(&json!([1, 2])), "[2 items]");
    }
}
