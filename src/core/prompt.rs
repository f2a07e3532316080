use crate::error::{AppError, CliError};
use crate::utils::error_helpers::convert_prompt_error;
use std::io::{self, BufRead, Write};

/// Line-oriented interactive prompt
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for `label`, showing `default` in brackets. An empty answer keeps
    /// the default; end of input is an error.
    pub fn ask(&mut self, label: &str, default: Option<&str>) -> Result<String, AppError> {
        let written = match default {
            Some(default) if !default.is_empty() => {
                write!(self.output, "{} [{}]: ", label, default)
            }
            _ => write!(self.output, "{}: ", label),
        };
        written
            .and_then(|_| self.output.flush())
            .map_err(|e| convert_prompt_error(e, label))?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| convert_prompt_error(e, label))?;
        if read == 0 {
            return Err(CliError::InputAborted {
                field: label.to_string(),
            }
            .into());
        }

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_uses_answer() {
        let mut prompter = Prompter::new(Cursor::new("staging\n"), Vec::new());
        let answer = prompter.ask("helm.namespace", Some("default")).expect("answer");
        assert_eq!(answer, "staging");
        let output = String::from_utf8(prompter.into_output()).expect("utf8");
        assert_eq!(output, "helm.namespace [default]: ");
    }

    #[test]
    fn test_ask_empty_answer_keeps_default() {
        let mut prompter = Prompter::new(Cursor::new("\n  \n"), Vec::new());
        assert_eq!(
            prompter.ask("helm.repo", Some("myrepo")).expect("answer"),
            "myrepo"
        );
        assert_eq!(prompter.ask("helm.repo", None).expect("answer"), "");
    }

    #[test]
    fn test_ask_without_default() {
        let mut prompter = Prompter::new(Cursor::new("x\n"), Vec::new());
        prompter.ask("helm.tiller_host", Some("")).expect("answer");
        let output = String::from_utf8(prompter.into_output()).expect("utf8");
        assert_eq!(output, "helm.tiller_host: ");
    }

    #[test]
    fn test_ask_end_of_input() {
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        let result = prompter.ask("helm.kube_context", None);
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::InputAborted { .. }))
        ));
    }
}
