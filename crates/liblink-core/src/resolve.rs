//! Merging CLI arguments, persisted defaults, and interactive prompts into
//! final path values.
//!
//! Precedence per field: an explicit CLI value wins; otherwise the persisted
//! value is offered as the prompt default; in non-interactive mode a missing
//! required field is fatal. Every value from every source passes through
//! [`crate::sanitize::sanitize`] before acceptance.

use crate::error::{LinkError, Result};
use crate::sanitize::sanitize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PACKAGE_NAME: &str = "@infinity/spa-library";

/// Re-prompt bound for required fields. Replaces the unbounded
/// retry-by-recursion of interactive shells: after this many empty answers
/// the field is treated as missing.
const MAX_PROMPT_ATTEMPTS: u32 = 8;

/// Seam between the resolver and the terminal. The CLI implements this with
/// dialoguer; tests implement it with scripted answers.
pub trait Prompt {
    /// Ask for a value. `default` is shown and returned on an empty answer.
    /// `Ok(None)` means the user gave no value.
    fn ask(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>>;
}

/// Prompt source for `--non-interactive` runs: never asks the terminal,
/// silently accepts the offered default (the persisted value). A required
/// field with no default is then reported as missing.
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn ask(&mut self, _label: &str, default: Option<&str>) -> Result<Option<String>> {
        Ok(default.map(String::from))
    }
}

/// The raw (sanitized, pre-normalization) values a run settled on. These are
/// what the save policy compares and what gets persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInputs {
    pub library_path: String,
    pub infinity_path: String,
    /// Raw delimited text, exactly as persisted. `None` when no additional
    /// consumers were given.
    pub additional_raw: Option<String>,
    pub package_name: String,
}

/// Final, normalized paths the command phases operate on.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub library_path: PathBuf,
    pub infinity_path: PathBuf,
    pub additional_paths: Vec<PathBuf>,
    pub package_name: String,
}

/// Resolve one required field: explicit → prompt (persisted as default) →
/// error naming the field.
pub fn resolve_required(
    field: &'static str,
    label: &str,
    explicit: Option<&str>,
    persisted: Option<&str>,
    prompt: &mut dyn Prompt,
) -> Result<String> {
    if let Some(v) = sanitize(explicit) {
        return Ok(v);
    }
    let default = sanitize(persisted);
    for _ in 0..MAX_PROMPT_ATTEMPTS {
        let answer = prompt.ask(label, default.as_deref())?;
        if let Some(v) = sanitize(answer.as_deref()) {
            return Ok(v);
        }
    }
    Err(LinkError::MissingRequiredPath { field })
}

/// Resolve one optional field: explicit → prompt (persisted as default) →
/// `None`. A single ask, no retry — empty means "none".
pub fn resolve_optional(
    label: &str,
    explicit: Option<&str>,
    persisted: Option<&str>,
    prompt: &mut dyn Prompt,
) -> Result<Option<String>> {
    if let Some(v) = sanitize(explicit) {
        return Ok(Some(v));
    }
    let default = sanitize(persisted);
    let answer = prompt.ask(label, default.as_deref())?;
    Ok(sanitize(answer.as_deref()))
}

/// Split a raw delimited additional-paths string on `,` or `;`, sanitizing
/// each token. Order is preserved, empties dropped, duplicates kept.
pub fn split_additional(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split([',', ';'])
        .filter_map(|tok| sanitize(Some(tok)))
        .collect()
}

/// Best-effort absolutization. Canonicalization only succeeds for paths that
/// exist; for anything else the sanitized literal is kept as-is and the
/// existence check that follows decides whether that is fatal.
pub fn normalize(raw: &str) -> PathBuf {
    std::fs::canonicalize(raw).unwrap_or_else(|_| PathBuf::from(raw))
}

/// Fatal existence check for a required root.
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(LinkError::PathNotFound(path.to_path_buf()))
    }
}

/// Normalize and validate the additional roots. Each entry is judged
/// independently: with `skip_missing`, a missing root is logged and dropped
/// without affecting its siblings; without it, the first missing root is
/// fatal.
pub fn normalize_additional(tokens: &[String], skip_missing: bool) -> Result<Vec<PathBuf>> {
    let mut out = Vec::with_capacity(tokens.len());
    for tok in tokens {
        let path = normalize(tok);
        if path.is_dir() {
            out.push(path);
        } else if skip_missing {
            tracing::warn!("skipping missing additional path: {}", path.display());
        } else {
            return Err(LinkError::MissingAdditionalPath(path));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Scripted prompt: pops answers front-to-back, records what it was
    /// asked, `None` answers model an empty response.
    struct Scripted {
        answers: Vec<Option<String>>,
        asked: Vec<(String, Option<String>)>,
    }

    impl Scripted {
        fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.map(String::from)).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for Scripted {
        fn ask(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>> {
            self.asked
                .push((label.to_string(), default.map(String::from)));
            if self.answers.is_empty() {
                Ok(None)
            } else {
                Ok(self.answers.remove(0))
            }
        }
    }

    #[test]
    fn explicit_value_wins_without_prompting() {
        let mut prompt = Scripted::new(&[]);
        let v = resolve_required(
            "library-path",
            "Library path",
            Some(" \"/dev/lib/\" "),
            Some("/old/lib"),
            &mut prompt,
        )
        .unwrap();
        assert_eq!(v, "/dev/lib");
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn persisted_value_offered_as_prompt_default() {
        let mut prompt = Scripted::new(&[Some("/new/lib")]);
        let v = resolve_required(
            "library-path",
            "Library path",
            None,
            Some("/old/lib/"),
            &mut prompt,
        )
        .unwrap();
        assert_eq!(v, "/new/lib");
        assert_eq!(prompt.asked[0].1.as_deref(), Some("/old/lib"));
    }

    #[test]
    fn required_field_reprompts_until_nonempty() {
        let mut prompt = Scripted::new(&[None, Some("   "), Some("/dev/lib")]);
        let v = resolve_required("library-path", "Library path", None, None, &mut prompt).unwrap();
        assert_eq!(v, "/dev/lib");
        assert_eq!(prompt.asked.len(), 3);
    }

    #[test]
    fn required_field_missing_in_non_interactive_mode() {
        let err =
            resolve_required("infinity-path", "Infinity path", None, None, &mut NoPrompt)
                .unwrap_err();
        match err {
            LinkError::MissingRequiredPath { field } => assert_eq!(field, "infinity-path"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_interactive_accepts_persisted_default() {
        let v = resolve_required(
            "library-path",
            "Library path",
            None,
            Some("'/dev/lib/'"),
            &mut NoPrompt,
        )
        .unwrap();
        assert_eq!(v, "/dev/lib");
    }

    #[test]
    fn optional_field_resolves_to_none() {
        let v = resolve_optional("Additional paths", None, None, &mut NoPrompt).unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn split_preserves_order_and_duplicates() {
        assert_eq!(split_additional(Some("a;b,c")), vec!["a", "b", "c"]);
        assert_eq!(split_additional(Some("a;a")), vec!["a", "a"]);
        assert_eq!(split_additional(Some(" ;, ")), Vec::<String>::new());
        assert_eq!(split_additional(None), Vec::<String>::new());
        assert_eq!(
            split_additional(Some("\"/x/\" ; /y")),
            vec!["/x", "/y"]
        );
    }

    #[test]
    fn normalize_keeps_literal_for_nonexistent_path() {
        let p = normalize("/no/such/dir/for/liblink");
        assert_eq!(p, PathBuf::from("/no/such/dir/for/liblink"));
    }

    #[test]
    fn normalize_canonicalizes_existing_path() {
        let dir = TempDir::new().unwrap();
        let p = normalize(dir.path().to_str().unwrap());
        assert!(p.is_absolute());
        assert!(p.is_dir());
    }

    #[test]
    fn require_dir_rejects_missing() {
        assert!(require_dir(Path::new("/no/such/dir/for/liblink")).is_err());
        let dir = TempDir::new().unwrap();
        assert!(require_dir(dir.path()).is_ok());
    }

    #[test]
    fn missing_additional_path_fatal_by_default() {
        let dir = TempDir::new().unwrap();
        let tokens = vec![
            dir.path().to_string_lossy().into_owned(),
            "/no/such/dir/for/liblink".to_string(),
        ];
        let err = normalize_additional(&tokens, false).unwrap_err();
        assert!(matches!(err, LinkError::MissingAdditionalPath(_)));
    }

    #[test]
    fn missing_additional_path_skipped_independently() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let tokens = vec![
            a.path().to_string_lossy().into_owned(),
            "/no/such/dir/for/liblink".to_string(),
            b.path().to_string_lossy().into_owned(),
        ];
        let out = normalize_additional(&tokens, true).unwrap();
        assert_eq!(out.len(), 2);
    }
}
