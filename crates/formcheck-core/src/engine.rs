// File: src/engine.rs
// Purpose: Run an ordered rule set against one field value

use crate::rules::{FieldRule, RuleContext};
use crate::verdict::Verdict;

/// Result of running a rule set over a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutcome {
    /// First failing verdict, or a pass
    pub verdict: Verdict,
    /// Value after every rule that ran had its say
    pub value: String,
    /// Whether `value` differs from the input and must be written back
    pub changed: bool,
}

/// Evaluate `rules` in order, stopping at the first failure
///
/// Each rule sees the value as normalized by the rules before it. A failing
/// sanitizing rule still contributes its cleaned value.
pub fn run_rules(
    value: &str,
    rules: &[FieldRule],
    field_name: &str,
    ctx: &RuleContext,
) -> EngineOutcome {
    let mut current = value.to_string();

    for rule in rules {
        let outcome = rule.evaluate(&current, field_name, ctx);
        if let Some(normalized) = outcome.normalized {
            current = normalized;
        }
        if !outcome.verdict.is_valid() {
            let changed = current != value;
            return EngineOutcome {
                verdict: outcome.verdict,
                value: current,
                changed,
            };
        }
    }

    let changed = current != value;
    EngineOutcome {
        verdict: Verdict::pass(),
        value: current,
        changed,
    }
}
