//! The save policy: the one place where prior state (what was persisted
//! before) and new state (what this run resolved) are reconciled.

use crate::config::PersistedConfig;
use crate::resolve::ResolvedInputs;
use crate::sanitize::same_after_sanitize;
use regex::Regex;
use std::sync::OnceLock;

/// Override flags feeding the decision, straight from the CLI surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveFlags {
    pub force_save: bool,
    pub no_save: bool,
    pub interactive: bool,
}

/// What to do with the resolved values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    /// Write the config without asking.
    Save,
    /// Leave the config alone, no prompt.
    Skip,
    /// Interactive confirmation required; the answer is matched with
    /// [`is_affirmative`].
    Ask,
}

/// True when any of the four comparable fields differs from the persisted
/// record. Both sides are sanitized first, so cosmetic differences (quotes,
/// trailing separators, whitespace) never count.
pub fn changed(prev: &PersistedConfig, new: &ResolvedInputs) -> bool {
    !same_after_sanitize(prev.library_path.as_deref(), Some(&new.library_path))
        || !same_after_sanitize(prev.infinity_path.as_deref(), Some(&new.infinity_path))
        || !same_after_sanitize(
            prev.additional_spa_paths.as_deref(),
            new.additional_raw.as_deref(),
        )
        || !same_after_sanitize(prev.package_name.as_deref(), Some(&new.package_name))
}

/// Decide whether to persist, in priority order: no-save always wins, then
/// force-save, then "new or changed values ask the user" — but only when
/// interaction is allowed. An unchanged existing config is never rewritten.
pub fn decide(existed: bool, changed: bool, flags: SaveFlags) -> SaveDecision {
    if flags.no_save {
        return SaveDecision::Skip;
    }
    if flags.force_save {
        return SaveDecision::Save;
    }
    if !existed || changed {
        if flags.interactive {
            SaveDecision::Ask
        } else {
            SaveDecision::Skip
        }
    } else {
        SaveDecision::Skip
    }
}

static AFFIRMATIVE_RE: OnceLock<Regex> = OnceLock::new();

fn affirmative_re() -> &'static Regex {
    AFFIRMATIVE_RE.get_or_init(|| Regex::new(r"(?i)^\s*y(es)?\s*$").unwrap())
}

/// Free-text confirmation check: "y" / "yes", any case, surrounding
/// whitespace allowed. Anything else is a no.
pub fn is_affirmative(answer: &str) -> bool {
    affirmative_re().is_match(answer)
}
