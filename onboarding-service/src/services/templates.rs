//! Built-in onboarding prompt templates.
//!
//! Placeholders use `{field}` syntax and are filled from the user's
//! onboarding answers by [`crate::services::formatter::PromptFormatter`].
//! `{{` and `}}` stand for literal braces.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MUSCLE_GAIN_FEEDBACK: &str = "muscle_gain_feedback";
pub const GOAL_REALITY_CHECK: &str = "goal_reality_check";

const MUSCLE_GAIN_FEEDBACK_TEMPLATE: &str = r#"
SYSTEM: High-performance Human Performance Specialist.
Tone: Clinical, authoritative, concise.

USER PROFILE:
- Age: {age_group}
- Current: {current_body_type}
- Goal: {target_body_type}
- Motivation: {motivation}

TASK:
Provide a master insight under 20 words.
Connect {age_group} physiology and {current_body_type} to the need for precision.
Reject generic advice.

EXAMPLE:
"Your 30s metabolic signaling requires precise recovery windows; generic plans ignore hormonal shifts, stalling biomechanical efficiency."

CONSTRAINTS:
- MAX 20 WORDS.
- No advice.
- No fluff.
"#;

const GOAL_REALITY_CHECK_TEMPLATE: &str = r#"
SYSTEM: Cybernetic Fitness Analyst.
Tone: Clinical, cold, insightful.

USER:
- Goal: {goal}
- Context: {current_body_type} to {target_body_type}
- Barrier: {main_barrier}

TASK:
Reflect on this profile in under 20 words.
Validate the barrier as structural, not personal.
End with a sharp question.

CONSTRAINTS:
- MAX 20 WORDS.
- No advice.
- Pure insight.
"#;

static SHARED: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::builtin);

/// Read-only mapping from template key to template text.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<&'static str, &'static str>,
}

impl TemplateRegistry {
    /// The fixed set of templates the onboarding flow references.
    pub fn builtin() -> Self {
        let templates = HashMap::from([
            (MUSCLE_GAIN_FEEDBACK, MUSCLE_GAIN_FEEDBACK_TEMPLATE),
            (GOAL_REALITY_CHECK, GOAL_REALITY_CHECK_TEMPLATE),
        ]);
        Self { templates }
    }

    /// Process-wide instance of [`TemplateRegistry::builtin`].
    pub fn shared() -> &'static TemplateRegistry {
        &SHARED
    }

    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.templates.get(key).copied()
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            templates: entries.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_has_both_onboarding_templates() {
        let registry = TemplateRegistry::builtin();
        assert!(registry.get(MUSCLE_GAIN_FEEDBACK).is_some());
        assert!(registry.get(GOAL_REALITY_CHECK).is_some());
    }

    #[test]
    fn unknown_key_is_not_found() {
        assert!(TemplateRegistry::shared().get("weight_loss_feedback").is_none());
    }

    #[test]
    fn templates_reference_their_profile_fields() {
        let registry = TemplateRegistry::builtin();

        let muscle = registry.get(MUSCLE_GAIN_FEEDBACK).unwrap();
        for field in ["{age_group}", "{current_body_type}", "{target_body_type}", "{motivation}"] {
            assert!(muscle.contains(field), "missing {field}");
        }

        let reality = registry.get(GOAL_REALITY_CHECK).unwrap();
        for field in ["{goal}", "{current_body_type}", "{target_body_type}", "{main_barrier}"] {
            assert!(reality.contains(field), "missing {field}");
        }
    }
}
