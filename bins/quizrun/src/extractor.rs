/// Function-Name Extractor
///
/// **Core Responsibility:**
/// Find the identifier of the function under test inside raw submission text.
///
/// The pattern comes from configuration, so any declaration style can be
/// supported as long as capture group 1 is the function name.

use quizrun_common::types::Metadata;
use quizrun_common::{GradeError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

pub struct FunctionNameExtractor {
    regex: Regex,
}

impl FunctionNameExtractor {
    /// Compile the configured pattern once
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| GradeError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Return the first capture group of the first match in `code`
    pub fn extract(&self, code: &str) -> Result<String> {
        self.regex
            .captures(code)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| GradeError::Extraction {
                input: code.to_string(),
                pattern: self.regex.as_str().to_string(),
            })
    }

    /// Read a submission file and extract its metadata
    pub fn extract_metadata(&self, submission_path: &Path) -> Result<Metadata> {
        let code = fs::read_to_string(submission_path).map_err(|e| {
            GradeError::io(
                format!("Failed to read submission {}", submission_path.display()),
                e,
            )
        })?;
        let function_name = self.extract(&code)?;

        debug!(
            function = %function_name,
            source_size = code.len(),
            "Extracted function name"
        );

        Ok(Metadata {
            code,
            function_name,
        })
    }
}
