//! Configuration service: the interactive `init` flow and key access

use crate::AppError;
use crate::core::prompt::Prompter;
use crate::storage::config::Config;
use std::io::{BufRead, Write};
use std::path::Path;

/// Keys prompted by `init`, with their labels
pub const INIT_PROMPTS: [(&str, &str); 5] = [
    ("helm.kube_context", "Kubernetes context"),
    ("helm.tiller_host", "Tiller host"),
    ("helm.namespace", "Namespace"),
    ("helm.repo", "Chart repository alias"),
    ("helm.chart_repo", "Chart repository URL"),
];

/// Configuration service for managing application configuration
pub struct ConfigService {
    config: Config,
}

impl ConfigService {
    /// Create new ConfigService instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Prompt for every init key, using stored values as defaults.
    /// Nothing is applied until all answers are in.
    pub fn collect_answers<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Vec<(String, String)>, AppError> {
        let mut answers = Vec::with_capacity(INIT_PROMPTS.len());
        for (key, label) in INIT_PROMPTS {
            let current = self.config.get(key)?;
            let answer = prompter.ask(label, current)?;
            answers.push((key.to_string(), answer));
        }
        Ok(answers)
    }

    /// Run the init flow and persist the result to `path`
    pub fn run_init<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        path: &Path,
    ) -> Result<(), AppError> {
        let answers = self.collect_answers(prompter)?;

        let mut updated = self.config.clone();
        for (key, value) in answers {
            updated.set(&key, value)?;
        }
        updated.save(path)?;

        self.config = updated;
        Ok(())
    }
}
