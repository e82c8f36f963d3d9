// Call-expression building
// Arguments are rendered as JSON literals, which are valid literal syntax for the JS runtime.
// No arity or type checking: mismatches surface when the artifact runs.

use serde_json::Value;

/// Build the parenthesized argument list appended to the function name
pub fn build_call(args: &[Value]) -> String {
    let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("({})", rendered.join(", "))
}

/// Full call site, e.g. `sum(1, 2)`
pub fn call_site(function_name: &str, args: &[Value]) -> String {
    format!("{}{}", function_name, build_call(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_call_numbers() {
        assert_eq!(build_call(&[json!(1), json!(2), json!(3)]), "(1, 2, 3)");
    }

    #[test]
    fn test_build_call_empty() {
        assert_eq!(build_call(&[]), "()");
    }

    #[test]
    fn test_build_call_single() {
        assert_eq!(build_call(&[json!(-7)]), "(-7)");
    }

    #[test]
    fn test_build_call_literals() {
        let args = [
            json!("he said \"hi\""),
            json!([1, [2, 3]]),
            json!({"k": true}),
            json!(null),
            json!(1.5),
        ];
        assert_eq!(
            build_call(&args),
            r#"("he said \"hi\"", [1,[2,3]], {"k":true}, null, 1.5)"#
        );
    }

    #[test]
    fn test_call_site() {
        assert_eq!(call_site("sum", &[json!(40), json!(2)]), "sum(40, 2)");
    }
}
