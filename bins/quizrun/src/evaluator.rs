/// Result Evaluator - Output Comparison
///
/// **Core Responsibility:**
/// Judge raw captured stdout against the question's expected value.
///
/// **Critical Properties:**
/// - Knows nothing about processes or templates
/// - Pure function: (expected value, raw stdout) → bool
/// - Never fails: output that cannot be coerced simply does not match
///
/// **Coercion Rules (dispatched on the expected value's type):**
/// - Integer: `parseInt` semantics. Leading whitespace and an optional sign,
///   then the longest run of digits; trailing text is ignored. No digits → no match
/// - Float: trimmed text parsed as f64, exact equality
/// - Boolean: trimmed text is `true` or `false`
/// - Text: one trailing line ending removed, otherwise exact
/// - Structured: trimmed text parsed as JSON, structural equality

use quizrun_common::types::{ExpectedOutput, TestCase};
use serde_json::Value;

/// Integer coercion; `None` plays the role of NaN
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = match s.as_bytes().first() {
        Some(b'-' | b'+') => 1,
        _ => 0,
    };

    let digits_len = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // Sign and digits parse together so i64::MIN stays representable
    s[..sign_len + digits_len].parse().ok()
}

fn strip_line_ending(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}

/// Compare captured output with the expected value
pub fn compare(expected: &ExpectedOutput, raw: &str) -> bool {
    match expected {
        ExpectedOutput::Integer(want) => parse_int(raw) == Some(*want),
        ExpectedOutput::Float(want) => raw.trim().parse::<f64>().is_ok_and(|got| got == *want),
        ExpectedOutput::Boolean(want) => match raw.trim() {
            "true" => *want,
            "false" => !*want,
            _ => false,
        },
        ExpectedOutput::Text(want) => strip_line_ending(raw) == want,
        ExpectedOutput::Structured(want) => serde_json::from_str::<Value>(raw.trim())
            .is_ok_and(|got| got == *want),
    }
}

/// Evaluate a test case against captured output
pub fn evaluate(case: &TestCase, raw: &str) -> bool {
    compare(&case.expected, raw)
}
