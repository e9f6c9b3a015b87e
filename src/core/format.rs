//! printf-style message formatting.
//!
//! Directives: `%s` string, `%d` number, `%i` integer, `%f` float, `%j` JSON,
//! `%o`/`%O` object, `%c` (consumes an argument, renders nothing) and `%%`.
//! A directive with no argument left stays verbatim. Arguments beyond the last
//! directive are appended, separated by single spaces.
//!
//! Numbers print the way JavaScript prints them: integral values without a
//! fraction, and magnitudes from `1e21` up or below `1e-6` in exponent form
//! (`1e+21`), so `%i` of `1e21` reads the leading `1`.

use serde_json::Value;

/// Formats `template` with positional `args`.
///
/// With no arguments the template is returned untouched, including any `%%`.
#[must_use]
pub fn format_message(template: &str, args: &[Value]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut pending = args.len();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let Some(&directive) = chars.peek() else {
            out.push('%');
            break;
        };

        if directive == '%' {
            chars.next();
            out.push('%');
            continue;
        }

        if pending == 0 || !is_directive(directive) {
            out.push('%');
            continue;
        }

        chars.next();
        let Some(arg) = remaining.next() else {
            break;
        };
        pending -= 1;
        render_directive(&mut out, directive, arg);
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&render_plain(arg));
    }

    out
}

/// Formats a full argument list whose first element may not be a string.
///
/// A string head is used as the template; otherwise every value is rendered
/// and the results are joined with spaces.
#[must_use]
pub fn format_values(values: &[Value]) -> String {
    match values.split_first() {
        None => String::new(),
        Some((Value::String(template), rest)) => format_message(template, rest),
        Some(_) => values
            .iter()
            .map(render_plain)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn is_directive(c: char) -> bool {
    matches!(c, 's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O' | 'c')
}

fn render_directive(out: &mut String, directive: char, arg: &Value) {
    match directive {
        's' => out.push_str(&render_plain(arg)),
        'd' => out.push_str(&js_number(to_number(arg))),
        'i' => out.push_str(&js_number(parse_int(&render_plain(arg)))),
        'f' => out.push_str(&js_number(parse_float(&render_plain(arg)))),
        'j' | 'o' | 'O' => out.push_str(&arg.to_string()),
        // %c
        _ => {}
    }
}

/// Strings render raw, numbers the way JavaScript prints them, everything else
/// as compact JSON.
fn render_plain(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if !number.is_i64() && !number.is_u64() => js_number(float),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null => 0.0,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn parse_int(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let (negative, digits) = split_sign(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<f64>() {
        Ok(value) if end > 0 => {
            if negative {
                -value
            } else {
                value
            }
        }
        _ => f64::NAN,
    }
}

fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let (negative, body) = split_sign(trimmed);
    let magnitude = if body.starts_with("Infinity") {
        f64::INFINITY
    } else {
        let end = decimal_prefix_len(body);
        if end == 0 {
            return f64::NAN;
        }
        body[..end].parse::<f64>().unwrap_or(f64::NAN)
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Length of the leading decimal literal: digits with an optional fraction,
/// then an exponent only when digits follow the `e`. Zero when no mantissa
/// digit is present.
fn decimal_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut index: usize| {
        while bytes.get(index).is_some_and(u8::is_ascii_digit) {
            index += 1;
        }
        index
    };

    let mut end = digits_from(0);
    let mut mantissa_digits = end;
    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        mantissa_digits += fraction_end - end - 1;
        end = fraction_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_end = digits_from(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    end
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value != 0.0 && (value.abs() >= 1e21 || value.abs() < 1e-6) {
        js_exponent(value)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Exponent notation with an explicit sign, e.g. `1e+21`, `1.5e-7`.
fn js_exponent(value: f64) -> String {
    let rendered = format!("{value:e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitutes_string_directive() {
        assert_eq!(format_message("hello %s", &[json!("world")]), "hello world");
        assert_eq!(
            format_message("email has been sent to %s.", &[json!("ana")]),
            "email has been sent to ana."
        );
    }

    #[test]
    fn numeric_directives_coerce() {
        assert_eq!(format_message("%d items", &[json!(3)]), "3 items");
        assert_eq!(format_message("%d", &[json!("42")]), "42");
        assert_eq!(format_message("%d", &[json!("abc")]), "NaN");
        assert_eq!(format_message("%i", &[json!(42.9)]), "42");
        assert_eq!(format_message("%i", &[json!("-7px")]), "-7");
        assert_eq!(format_message("%f", &[json!("1.5rem")]), "1.5");
        assert_eq!(format_message("%f", &[json!("x")]), "NaN");
    }

    #[test]
    fn json_directive_renders_compact_json() {
        assert_eq!(
            format_message("payload=%j", &[json!({ "id": 1 })]),
            r#"payload={"id":1}"#
        );
    }

    #[test]
    fn percent_escape_and_unknown_directives() {
        assert_eq!(format_message("100%% of %s", &[json!("runs")]), "100% of runs");
        assert_eq!(format_message("%x %s", &[json!("a")]), "%x a");
        assert_eq!(format_message("trailing %", &[json!("a")]), "trailing % a");
    }

    #[test]
    fn missing_arguments_leave_directives() {
        assert_eq!(format_message("%s and %s", &[json!("one")]), "one and %s");
    }

    #[test]
    fn extra_arguments_are_appended() {
        assert_eq!(
            format_message("saved", &[json!("draft"), json!(2), json!({ "k": true })]),
            r#"saved draft 2 {"k":true}"#
        );
    }

    #[test]
    fn no_arguments_returns_template_verbatim() {
        assert_eq!(format_message("50%% off %s", &[]), "50%% off %s");
    }

    #[test]
    fn non_string_head_joins_values() {
        assert_eq!(
            format_values(&[json!({ "a": 1 }), json!("b"), json!(2.5)]),
            r#"{"a":1} b 2.5"#
        );
        assert_eq!(format_values(&[json!("%s!"), json!("hi")]), "hi!");
        assert_eq!(format_values(&[]), "");
    }

    #[test]
    fn large_and_tiny_numbers_use_exponent_form() {
        assert_eq!(format_message("%s", &[json!(1e21)]), "1e+21");
        assert_eq!(format_message("%d", &[json!(1.5e22)]), "1.5e+22");
        assert_eq!(format_message("%d", &[json!(1e-7)]), "1e-7");
        assert_eq!(format_message("%i", &[json!(1e21)]), "1");
        assert_eq!(format_message("%d", &[json!(123456789012.0)]), "123456789012");
    }

    #[test]
    fn float_directive_reads_leading_literal() {
        assert_eq!(format_message("%f", &[json!("2.5e3px")]), "2500");
        assert_eq!(format_message("%f", &[json!("1e")]), "1");
        assert_eq!(format_message("%f", &[json!(".5")]), "0.5");
        assert_eq!(format_message("%f", &[json!("-Infinity")]), "-Infinity");
        assert_eq!(format_message("%f", &[json!(".e5")]), "NaN");

        let long = format!("{}x", "9".repeat(100_000));
        assert_eq!(format_message("%f", &[json!(long)]), "Infinity");
    }

    #[test]
    fn float_numbers_print_like_javascript() {
        assert_eq!(format_message("%s", &[json!(2.0)]), "2");
        assert_eq!(format_message("%d", &[json!(0.25)]), "0.25");
    }
}
