use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a currency amount with thousands separators, e.g. `12,345.67`.
pub fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        int_grouped,
        frac_part
    )
}

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(exists: |v: Value| !v.is_null());
    handlebars.register_helper("exists", Box::new(exists));

    handlebars_helper!(isnull: |v: Value| v.is_null());
    handlebars.register_helper("isnull", Box::new(isnull));

    handlebars_helper!(stringeq: |s1: String, s2: String| s1.eq(&s2));
    handlebars.register_helper("stringeq", Box::new(stringeq));

    handlebars_helper!(money: |v: f64| format_money(v));
    handlebars.register_helper("money", Box::new(money));

    handlebars_helper!(round1: |v: f64| format!("{:.1}", v));
    handlebars.register_helper("round1", Box::new(round1));

    handlebars_helper!(round2: |v: f64| format!("{:.2}", v));
    handlebars.register_helper("round2", Box::new(round2));

    handlebars_helper!(json: |v: Value| serde_json::to_string(&v).unwrap_or_default());
    handlebars.register_helper("json", Box::new(json));

    handlebars
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn handlebars_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("Hello {{name}}", &json!({"name": "foo"}))
            .expect("This to render");
        assert_eq!(res, "Hello foo");
    }

    #[test]
    fn handlebars_can_iterate_objects() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#each crops as |crop|}}
{{crop.name}}: {{crop.confidence}}
{{/each}}"#,
                &json!({"crops": [
                    {"name": "Lettuce", "confidence": 87.5},
                    {"name": "Kale", "confidence": 61.2},
                ]}),
            )
            .expect("This to render");
        assert_eq!(res, "Lettuce: 87.5\nKale: 61.2\n");
    }

    #[test]
    fn handlebars_helper_stringeq_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#if (stringeq "Excellent" crop.suitability) }}
  {{crop.name}};
{{/if}}"#,
                &json!({
                    "crop": {
                        "name": "Lettuce",
                        "suitability": "Excellent",
                    }
                }),
            )
            .expect("This to render");
        assert_eq!(res, "  Lettuce;\n");
    }

    #[test]
    fn handlebars_helper_money_groups_thousands() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("${{money total}}", &json!({"total": 1234567.891}))
            .expect("This to render");
        assert_eq!(res, "$1,234,567.89");
    }

    #[test]
    fn format_money_handles_small_and_negative_amounts() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(999.9), "999.90");
        assert_eq!(format_money(1000.0), "1,000.00");
        assert_eq!(format_money(-2500.5), "-2,500.50");
    }

    #[test]
    fn handlebars_helper_round1_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("{{round1 v}}", &json!({"v": 3.14159}))
            .expect("This to render");
        assert_eq!(res, "3.1");
    }

    #[test]
    fn handlebars_helper_json_inlines_values() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("{{{json v}}}", &json!({"v": {"a": 1}}))
            .expect("This to render");
        assert_eq!(res, r#"{"a":1}"#);
    }
}
