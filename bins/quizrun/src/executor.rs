/// Grading Executor - High-Level Orchestration
///
/// **Responsibility:**
/// Sequence one question/submission pair through the pipeline and produce a verdict.
///
/// **Order:**
/// 1. Load the question (an unknown question aborts before anything else)
/// 2. Extract metadata from the submission (aborts before any scratch write)
/// 3. Inject the call site into the template and write the artifact
/// 4. Run the artifact (the artifact is removed whatever the outcome)
/// 5. Compare captured stdout against the expected value
///
/// No retries: any error aborts the run and no verdict is produced.

use crate::engine::ProcessEngine;
use crate::evaluator;
use crate::extractor::FunctionNameExtractor;
use crate::injector::Injector;
use quizrun_common::config::GraderConfig;
use quizrun_common::questions::QuestionLoader;
use quizrun_common::types::Verdict;
use quizrun_common::Result;
use std::path::Path;
use tracing::{info, instrument};

pub struct Executor {
    questions: QuestionLoader,
    extractor: FunctionNameExtractor,
    injector: Injector,
    engine: ProcessEngine,
    config: GraderConfig,
}

impl Executor {
    pub fn new(config: &GraderConfig) -> Result<Self> {
        Ok(Self {
            questions: QuestionLoader::new(&config.questions_dir),
            extractor: FunctionNameExtractor::new(&config.function_name_regex)?,
            injector: Injector::new(config),
            engine: ProcessEngine::new(config),
            config: config.clone(),
        })
    }

    /// Grade one submission against one question
    #[instrument(skip(self, submission), fields(submission = %submission.display()))]
    pub async fn grade(&self, question_name: &str, submission: &Path) -> Result<Verdict> {
        let question = self.questions.load(question_name)?;
        let case = question.first_case()?;

        let metadata = self
            .extractor
            .extract_metadata(&self.config.submission_path(submission))?;

        info!(
            function = %metadata.function_name,
            args = case.args.len(),
            expected = ?case.expected,
            "Grading submission"
        );

        let artifact = self.injector.inject(&question, &metadata)?;
        let stdout = self.engine.run(artifact).await?;

        let solved = evaluator::evaluate(&case, &stdout);

        info!(solved, stdout = %stdout.trim_end(), "Evaluation complete");

        Ok(Verdict {
            question: question_name.to_string(),
            solved,
        })
    }
}
