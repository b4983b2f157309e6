use chrono::NaiveDate;
use serde_json::Value;

/// Placeholder for fields the service did not send
pub const NOT_AVAILABLE: &str = "N/A";

/// Render a JSON field for a table cell. Strings are shown without quotes.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Reformat a `YYYY-MM-DD` date as `Mon, DD YYYY`.
/// Anything else is returned as-is.
pub fn convert_date(value: Option<&Value>) -> String {
    let raw = display_value(value);
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => date.format("%b, %d %Y").to_string(),
        Err(_) => raw,
    }
}

/// CPU cores as millicores, e.g. `0.5` -> `500m`. Fractions of a millicore are truncated.
pub fn cpu_millis(value: Option<&Value>) -> String {
    let cores = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match cores {
        Some(cores) => format!("{}m", (cores * 1000.0).trunc() as i64),
        None => display_value(value),
    }
}

/// Append a unit suffix to a value, e.g. `512` + `Mi` -> `512Mi`.
pub fn with_unit(value: Option<&Value>, unit: &str) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(_) => format!("{}{}", display_value(value), unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_date() {
        assert_eq!(convert_date(Some(&json!("2024-01-05"))), "Jan, 05 2024");
        assert_eq!(convert_date(Some(&json!("2023-12-31"))), "Dec, 31 2023");
        assert_eq!(convert_date(Some(&json!("not a date"))), "not a date");
        assert_eq!(convert_date(None), "N/A");
    }

    #[test]
    fn test_cpu_millis() {
        assert_eq!(cpu_millis(Some(&json!(0.5))), "500m");
        assert_eq!(cpu_millis(Some(&json!(2))), "2000m");
        assert_eq!(cpu_millis(Some(&json!("0.25"))), "250m");
        assert_eq!(cpu_millis(Some(&json!(0.0015))), "1m");
        assert_eq!(cpu_millis(None), "N/A");
    }

    #[test]
    fn test_with_unit() {
        assert_eq!(with_unit(Some(&json!(512)), "Mi"), "512Mi");
        assert_eq!(with_unit(Some(&json!("10")), "Gi"), "10Gi");
        assert_eq!(with_unit(None, "Mi"), "N/A");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(Some(&json!("team-a"))), "team-a");
        assert_eq!(display_value(Some(&json!(42))), "42");
        assert_eq!(display_value(Some(&Value::Null)), "N/A");
    }
}
