// Question fixture loading
// Layout: <root>/<question>/params.json holding { "params": { "input": [[...]], "output": [...] } }

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{GradeError, Result};
use crate::types::Question;

pub const PARAMS_FILE: &str = "params.json";

#[derive(Debug, Deserialize)]
struct ParamsFile {
    params: Question,
}

/// Reads question fixtures from a directory tree
#[derive(Debug, Clone)]
pub struct QuestionLoader {
    root: PathBuf,
}

impl QuestionLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load and parse the fixture for `name`
    pub fn load(&self, name: &str) -> Result<Question> {
        let question_dir = self.question_dir(name)?;
        if !question_dir.is_dir() {
            return Err(GradeError::QuestionNotFound(name.to_string()));
        }

        let params_path = question_dir.join(PARAMS_FILE);
        let content = fs::read_to_string(&params_path).map_err(|e| {
            GradeError::io(format!("Failed to read {}", params_path.display()), e)
        })?;

        let parsed: ParamsFile = serde_json::from_str(&content)
            .map_err(|e| GradeError::malformed(name, format!("invalid {}: {}", PARAMS_FILE, e)))?;

        let mut question = parsed.params;
        question.name = name.to_string();
        Ok(question)
    }

    // A name is a single plain path segment; anything else could leave the root.
    fn question_dir(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(GradeError::QuestionNotFound(name.to_string())),
        }
    }
}
