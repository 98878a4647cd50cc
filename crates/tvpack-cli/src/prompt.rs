//! Input providers: terminal prompts and defaults-only answering.

use std::sync::Arc;

use console::Term;
use tracing::debug;
use tvpack_core::{
    application::{ApplicationError, ports::InputProvider},
    domain::{Answers, FieldDescriptor},
    error::PackResult,
};

/// Pick the provider for this run.
///
/// Prompts need a terminal on stdin; without one, or with
/// `--non-interactive`, every field takes its default.
pub fn select(non_interactive: bool) -> Arc<dyn InputProvider> {
    #[cfg(feature = "interactive")]
    if attended(non_interactive) {
        return Arc::new(DialoguerInput::new());
    }
    debug!(non_interactive, "Prompts disabled; using defaults");
    Arc::new(DefaultsInput::new())
}

/// Whether someone can answer on stdin, either a prompt of ours or one the
/// SDK prints while signing.
pub fn attended(non_interactive: bool) -> bool {
    !non_interactive && std::io::IsTerminal::is_terminal(&std::io::stdin())
}

fn input_failed(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::InputFailed {
        reason: e.to_string(),
    }
}

fn show_on_stderr(lines: &[String]) -> PackResult<()> {
    let term = Term::stderr();
    for line in lines {
        term.write_line(line).map_err(input_failed)?;
    }
    Ok(())
}

// ── defaults ──────────────────────────────────────────────────────────────────

/// Answers every field with its default.
///
/// A default that fails its validator is an error; there is nobody to ask
/// again. Confirmations take their default.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultsInput;

impl DefaultsInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputProvider for DefaultsInput {
    fn ask(&self, fields: &[FieldDescriptor]) -> PackResult<Answers> {
        let mut answers = Answers::new();
        for field in fields {
            let value = field.default.clone().unwrap_or_default();
            field.check(&value)?;
            debug!(field = field.name, %value, "Accepted default");
            answers.insert(field.name, value);
        }
        Ok(answers)
    }

    fn confirm(&self, message: &str, default: bool) -> PackResult<bool> {
        debug!(message, default, "Confirmation answered with default");
        Ok(default)
    }

    fn show(&self, lines: &[String]) -> PackResult<()> {
        show_on_stderr(lines)
    }
}

// ── dialoguer ─────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
pub use interactive::DialoguerInput;

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
    use tvpack_core::{
        application::ports::InputProvider,
        domain::{Answers, FieldDescriptor, FieldKind},
        error::PackResult,
    };

    use super::{input_failed, show_on_stderr};

    /// Terminal prompts. Invalid answers are rejected inline and asked again.
    pub struct DialoguerInput {
        theme: ColorfulTheme,
    }

    impl DialoguerInput {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }

        fn ask_text(&self, field: &FieldDescriptor) -> PackResult<String> {
            let mut input = Input::<String>::with_theme(&self.theme)
                .with_prompt(field.prompt.as_str())
                .allow_empty(true)
                .validate_with(|value: &String| -> Result<(), String> {
                    field.check(value).map_err(|e| e.to_string())
                });
            if let Some(default) = &field.default {
                input = input.default(default.clone());
            }
            Ok(input.interact_text().map_err(input_failed)?)
        }

        fn ask_choice(&self, field: &FieldDescriptor, choices: &[String]) -> PackResult<String> {
            let start = field
                .default
                .as_ref()
                .and_then(|d| choices.iter().position(|c| c == d))
                .unwrap_or(0);
            loop {
                let index = Select::with_theme(&self.theme)
                    .with_prompt(field.prompt.as_str())
                    .items(choices)
                    .default(start)
                    .interact()
                    .map_err(input_failed)?;
                let value = &choices[index];
                match field.check(value) {
                    Ok(()) => return Ok(value.clone()),
                    Err(e) => show_on_stderr(&[e.to_string()])?,
                }
            }
        }
    }

    impl Default for DialoguerInput {
        fn default() -> Self {
            Self::new()
        }
    }

    impl InputProvider for DialoguerInput {
        fn ask(&self, fields: &[FieldDescriptor]) -> PackResult<Answers> {
            let mut answers = Answers::new();
            for field in fields {
                let value = match &field.kind {
                    FieldKind::Text => self.ask_text(field)?,
                    FieldKind::Choice(choices) => self.ask_choice(field, choices)?,
                };
                answers.insert(field.name, value);
            }
            Ok(answers)
        }

        fn confirm(&self, message: &str, default: bool) -> PackResult<bool> {
            Ok(Confirm::with_theme(&self.theme)
                .with_prompt(message)
                .default(default)
                .interact()
                .map_err(input_failed)?)
        }

        fn show(&self, lines: &[String]) -> PackResult<()> {
            show_on_stderr(lines)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvpack_core::domain::{DomainValidator, ProjectDefaults, webos_fields};

    #[test]
    fn defaults_answer_every_field() {
        let fields = webos_fields(&ProjectDefaults {
            name: "Player".into(),
            ..ProjectDefaults::default()
        });
        let answers = DefaultsInput.ask(&fields).unwrap();
        assert_eq!(answers.len(), fields.len());
        assert_eq!(answers.get("name"), Some("Player"));
        assert_eq!(answers.get("vendor"), Some("My Company"));
    }

    #[test]
    fn invalid_default_is_an_error_not_a_retry() {
        let fields = [FieldDescriptor::text("name", "Name", DomainValidator::webos_name)
            .with_default("my-app")];
        let err = DefaultsInput.ask(&fields).unwrap_err();
        assert!(err.as_domain().is_some());
    }

    #[test]
    fn missing_default_is_checked_as_empty() {
        let fields = [FieldDescriptor::text("vendor", "Vendor", DomainValidator::non_empty)];
        assert!(DefaultsInput.ask(&fields).is_err());

        let optional = [FieldDescriptor::text("description", "Description", DomainValidator::any)];
        let answers = DefaultsInput.ask(&optional).unwrap();
        assert_eq!(answers.get("description"), Some(""));
    }

    #[test]
    fn confirm_takes_default() {
        assert!(DefaultsInput.confirm("Reuse?", true).unwrap());
        assert!(!DefaultsInput.confirm("Reuse?", false).unwrap());
    }

    #[test]
    fn non_interactive_flag_selects_defaults() {
        // no way to tell the trait objects apart; the call must simply answer
        let input = select(true);
        assert!(input.confirm("Reuse?", true).unwrap());
    }
}
