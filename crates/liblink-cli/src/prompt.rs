use dialoguer::Input;
use liblink_core::error::{LinkError, Result};
use liblink_core::policy::is_affirmative;
use liblink_core::resolve::Prompt;

/// Terminal prompt backed by dialoguer. Empty answers resolve to the
/// offered default when there is one, `None` otherwise; the resolver's
/// bounded loop handles re-asking for required fields.
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn ask(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>> {
        let mut input = Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true);
        if let Some(d) = default {
            input = input.default(d.to_string());
        }
        let answer = input
            .interact_text()
            .map_err(|e| LinkError::Prompt(e.to_string()))?;
        if answer.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer))
        }
    }
}

/// Free-text yes/no confirmation. Anything that is not an affirmative
/// answer counts as no.
pub fn confirm(question: &str) -> Result<bool> {
    let answer = Input::<String>::new()
        .with_prompt(format!("{question} [y/N]"))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| LinkError::Prompt(e.to_string()))?;
    Ok(is_affirmative(&answer))
}
