/// Code Injector
///
/// **Core Responsibility:**
/// Merge candidate source, a call site and the template into one runnable artifact.
///
/// **Artifact Layout:**
/// `<candidate code> <template with placeholder replaced by name(args)>`
///
/// **Artifact Path:**
/// `<scratch_dir>/<function_name>.<ext>` by default. Two runs grading functions
/// with the same name write the same file, so they must not overlap unless
/// `unique_artifacts` is enabled.

use crate::call::call_site;
use quizrun_common::config::GraderConfig;
use quizrun_common::types::{Metadata, Question};
use quizrun_common::{GradeError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Template split at its injection point, validated on load
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    placeholder: String,
    replace_all: bool,
}

impl Template {
    pub fn load(path: &Path, placeholder: &str, replace_all: bool) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GradeError::TemplateNotFound(path.to_path_buf()),
            _ => GradeError::io(format!("Failed to read template {}", path.display()), e),
        })?;
        Self::parse(path, source, placeholder, replace_all)
    }

    pub fn parse(path: &Path, source: String, placeholder: &str, replace_all: bool) -> Result<Self> {
        if placeholder.is_empty() || !source.contains(placeholder) {
            return Err(GradeError::PlaceholderMissing {
                path: path.to_path_buf(),
                placeholder: placeholder.to_string(),
            });
        }
        Ok(Self {
            source,
            placeholder: placeholder.to_string(),
            replace_all,
        })
    }

    pub fn render(&self, call_site: &str) -> String {
        if self.replace_all {
            self.source.replace(&self.placeholder, call_site)
        } else {
            self.source.replacen(&self.placeholder, call_site, 1)
        }
    }
}

pub struct Injector {
    template_path: PathBuf,
    placeholder: String,
    replace_all: bool,
    scratch_dir: PathBuf,
    extension: String,
    unique: bool,
}

impl Injector {
    pub fn new(config: &GraderConfig) -> Self {
        Self {
            template_path: config.template_path(),
            placeholder: config.placeholder.clone(),
            replace_all: config.replace_all,
            scratch_dir: config.scratch_dir.clone(),
            extension: config.artifact_extension.clone(),
            unique: config.unique_artifacts,
        }
    }

    /// Write the injected artifact for the question's first case
    ///
    /// ## Returns
    /// Path of the written artifact. The caller owns it and must delete it.
    pub fn inject(&self, question: &Question, metadata: &Metadata) -> Result<PathBuf> {
        let case = question.first_case()?;
        let template = Template::load(&self.template_path, &self.placeholder, self.replace_all)?;

        let call = call_site(&metadata.function_name, &case.args);
        let artifact = format!("{} {}", metadata.code, template.render(&call));

        let path = self.artifact_path(&metadata.function_name)?;
        if let Err(e) = fs::write(&path, artifact) {
            // A partial write is never handed to the engine, so remove it here
            let _ = fs::remove_file(&path);
            return Err(GradeError::io(
                format!("Failed to write artifact {}", path.display()),
                e,
            ));
        }

        debug!(artifact = %path.display(), call = %call, "Artifact written");
        Ok(path)
    }

    /// Resolve the artifact path, creating the scratch directory if needed
    pub fn artifact_path(&self, function_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.scratch_dir).map_err(|e| {
            GradeError::io(
                format!("Failed to create scratch directory {}", self.scratch_dir.display()),
                e,
            )
        })?;

        let stem = if self.unique {
            format!("{}-{}", function_name, uuid::Uuid::new_v4())
        } else {
            function_name.to_string()
        };

        Ok(self.scratch_dir.join(format!("{}.{}", stem, self.extension)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn config_in(tmp: &Path) -> GraderConfig {
        GraderConfig {
            template_dir: tmp.join("template"),
            scratch_dir: tmp.join("scratch"),
            ..GraderConfig::default()
        }
    }

    fn write_template(config: &GraderConfig, content: &str) {
        fs::create_dir_all(&config.template_dir).unwrap();
        fs::write(config.template_path(), content).unwrap();
    }

    fn sum_question() -> Question {
        Question {
            name: "sum".to_string(),
            input: vec![vec![json!(40), json!(2)], vec![json!(1), json!(1)]],
            output: vec![json!(42), json!(2)],
        }
    }

    fn sum_metadata() -> Metadata {
        Metadata {
            code: "function sum(a, b) { return a + b; }".to_string(),
            function_name: "sum".to_string(),
        }
    }

    #[test]
    fn test_template_render_first_only() {
        let t = Template::parse(Path::new("t"), "A __X__ B __X__".to_string(), "__X__", false).unwrap();
        assert_eq!(t.render("f()"), "A f() B __X__");
    }

    #[test]
    fn test_template_render_all() {
        let t = Template::parse(Path::new("t"), "A __X__ B __X__".to_string(), "__X__", true).unwrap();
        assert_eq!(t.render("f()"), "A f() B f()");
    }

    #[test]
    fn test_template_missing_placeholder() {
        let err = Template::parse(Path::new("t.js"), "console.log(1)".to_string(), "__X__", false)
            .unwrap_err();
        assert!(matches!(err, GradeError::PlaceholderMissing { .. }));
    }

    #[test]
    fn test_template_not_found() {
        let err = Template::load(Path::new("/no/such/template.js"), "__X__", false).unwrap_err();
        assert!(matches!(err, GradeError::TemplateNotFound(_)));
    }

    #[test]
    fn test_inject_writes_artifact() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());
        write_template(&config, "console.log(__INJECT__);\n");

        let path = Injector::new(&config)
            .inject(&sum_question(), &sum_metadata())
            .unwrap();

        assert_eq!(path, tmp.path().join("scratch").join("sum.js"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "function sum(a, b) { return a + b; } console.log(sum(40, 2));\n"
        );
    }

    #[test]
    fn test_inject_overwrites_same_path() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());
        write_template(&config, "__INJECT__");
        let injector = Injector::new(&config);

        let first = injector.inject(&sum_question(), &sum_metadata()).unwrap();
        let second = injector.inject(&sum_question(), &sum_metadata()).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(&config.scratch_dir).unwrap().count(), 1);
    }

    #[test]
    fn test_inject_unique_paths() {
        let tmp = TempDir::new().unwrap();
        let config = GraderConfig {
            unique_artifacts: true,
            ..config_in(tmp.path())
        };
        write_template(&config, "__INJECT__");
        let injector = Injector::new(&config);

        let first = injector.inject(&sum_question(), &sum_metadata()).unwrap();
        let second = injector.inject(&sum_question(), &sum_metadata()).unwrap();

        assert_ne!(first, second);
        let name = first.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("sum-") && name.ends_with(".js"));
    }

    #[test]
    fn test_inject_write_failure_leaves_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());
        write_template(&config, "__INJECT__");
        // A directory squatting on the artifact path makes the write fail
        fs::create_dir_all(config.scratch_dir.join("sum.js")).unwrap();

        let err = Injector::new(&config)
            .inject(&sum_question(), &sum_metadata())
            .unwrap_err();

        assert!(matches!(err, GradeError::Io { .. }));
        assert!(!config.scratch_dir.join("sum.js").is_file());
    }

    #[test]
    fn test_inject_empty_input_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());
        write_template(&config, "__INJECT__");
        let question = Question {
            input: vec![],
            ..sum_question()
        };

        let err = Injector::new(&config).inject(&question, &sum_metadata()).unwrap_err();

        assert!(matches!(err, GradeError::MalformedQuestion { .. }));
        assert!(!config.scratch_dir.exists());
    }

    #[test]
    fn test_inject_missing_template() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(tmp.path());

        let err = Injector::new(&config)
            .inject(&sum_question(), &sum_metadata())
            .unwrap_err();

        assert!(matches!(err, GradeError::TemplateNotFound(_)));
        assert!(!config.scratch_dir.exists());
    }
}
