use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GradeError, Result};

/// A submission after its function name has been extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub code: String,
    pub function_name: String,
}

/// A persisted grading fixture.
///
/// `input[i]` holds the argument list for the case whose expected value is
/// `output[i]`. Only the first case is ever graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(skip)]
    pub name: String,
    pub input: Vec<Vec<Value>>,
    pub output: Vec<Value>,
}

impl Question {
    /// The graded case, with both sequences bounds-checked.
    pub fn first_case(&self) -> Result<TestCase> {
        let args = self
            .input
            .first()
            .ok_or_else(|| GradeError::malformed(&self.name, "input is empty"))?;
        let expected = self
            .output
            .first()
            .ok_or_else(|| GradeError::malformed(&self.name, "output is empty"))?;

        Ok(TestCase {
            args: args.clone(),
            expected: ExpectedOutput::from_value(&self.name, expected)?,
        })
    }
}

/// One argument list paired with the value the candidate must print.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub args: Vec<Value>,
    pub expected: ExpectedOutput,
}

/// Expected value tagged by the type the captured output is coerced to.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedOutput {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    /// Arrays and objects, compared structurally after parsing stdout as JSON
    Structured(Value),
}

impl ExpectedOutput {
    pub fn from_value(question: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Err(GradeError::malformed(question, "expected output is null")),
            Value::Bool(b) => Ok(ExpectedOutput::Boolean(*b)),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(ExpectedOutput::Integer(i)),
                (None, Some(f)) => Ok(ExpectedOutput::Float(f)),
                (None, None) => Err(GradeError::malformed(
                    question,
                    format!("expected output {} is out of range", n),
                )),
            },
            Value::String(s) => Ok(ExpectedOutput::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Ok(ExpectedOutput::Structured(value.clone())),
        }
    }
}

/// Final judgment for one question/submission pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub question: String,
    pub solved: bool,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.solved { "Pass" } else { "Fail" };
        write!(f, "[{}] {}", self.question, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(input: Vec<Vec<Value>>, output: Vec<Value>) -> Question {
        Question {
            name: "sum".to_string(),
            input,
            output,
        }
    }

    #[test]
    fn test_first_case_uses_index_zero() {
        let q = question(
            vec![vec![json!(1), json!(2)], vec![json!(5), json!(5)]],
            vec![json!(3), json!(10)],
        );

        let case = q.first_case().unwrap();

        assert_eq!(case.args, vec![json!(1), json!(2)]);
        assert_eq!(case.expected, ExpectedOutput::Integer(3));
    }

    #[test]
    fn test_first_case_empty_input() {
        let q = question(vec![], vec![json!(3)]);
        let err = q.first_case().unwrap_err();
        assert!(matches!(err, GradeError::MalformedQuestion { .. }));
        assert!(err.to_string().contains("input is empty"));
    }

    #[test]
    fn test_first_case_empty_output() {
        let q = question(vec![vec![json!(1)]], vec![]);
        let err = q.first_case().unwrap_err();
        assert!(err.to_string().contains("output is empty"));
    }

    #[test]
    fn test_expected_output_tags() {
        assert_eq!(
            ExpectedOutput::from_value("q", &json!(42)).unwrap(),
            ExpectedOutput::Integer(42)
        );
        assert_eq!(
            ExpectedOutput::from_value("q", &json!(2.5)).unwrap(),
            ExpectedOutput::Float(2.5)
        );
        assert_eq!(
            ExpectedOutput::from_value("q", &json!(true)).unwrap(),
            ExpectedOutput::Boolean(true)
        );
        assert_eq!(
            ExpectedOutput::from_value("q", &json!("abc")).unwrap(),
            ExpectedOutput::Text("abc".to_string())
        );
        assert_eq!(
            ExpectedOutput::from_value("q", &json!([1, 2])).unwrap(),
            ExpectedOutput::Structured(json!([1, 2]))
        );
        assert!(ExpectedOutput::from_value("q", &Value::Null).is_err());
    }

    #[test]
    fn test_verdict_display() {
        let pass = Verdict {
            question: "sum".to_string(),
            solved: true,
        };
        let fail = Verdict {
            question: "sum".to_string(),
            solved: false,
        };
        assert_eq!(pass.to_string(), "[sum] Pass");
        assert_eq!(fail.to_string(), "[sum] Fail");
    }
}
