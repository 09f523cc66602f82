use serde_json::Value;

/// Print just the key answer from the output.
///
/// Comparisons print the three verdicts; other results print the first
/// well-known field present, falling back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(comparison) = result_obj.get("comparison") {
        println!("{}", verdict_line(comparison));
        return;
    }
    if result_obj.get("best_by_rate").is_some() {
        println!("{}", verdict_line(result_obj));
        return;
    }

    let priority_keys = [
        "category",
        "first_installment",
        "fixed_bid",
        "installment",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn verdict_line(comparison: &Value) -> String {
    let winner = |metric: &str| {
        comparison
            .get(metric)
            .and_then(|m| m.get("winner"))
            .map(format_minimal)
            .unwrap_or_else(|| "n/a".to_string())
    };
    format!(
        "rate: {}, installment: {}, total_cost: {}",
        winner("best_by_rate"),
        winner("best_by_installment"),
        winner("best_by_total_cost")
    )
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verdict_line() {
        let v = json!({
            "best_by_rate": {"winner": "consortium"},
            "best_by_installment": {"winner": "tie"},
            "best_by_total_cost": {"winner": "loan"}
        });
        assert_eq!(
            verdict_line(&v),
            "rate: consortium, installment: tie, total_cost: loan"
        );
    }

    #[test]
    fn test_verdict_line_missing_metric() {
        assert_eq!(
            verdict_line(&json!({})),
            "rate: n/a, installment: n/a, total_cost: n/a"
        );
    }
}
