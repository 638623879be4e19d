//! Prompt construction from templates and onboarding answers.
//!
//! [`render`] is the strict, pure substitution step. [`PromptFormatter::format`]
//! wraps it so that an unknown key, a missing field or a malformed template
//! always yields a usable prompt instead of an error.

use crate::dtos::{FieldValue, InputData};
use crate::services::templates::TemplateRegistry;
use thiserror::Error;

/// Error type for template substitution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Missing key for template formatting: {0}")]
    MissingField(String),

    #[error("Malformed template: {0}")]
    Malformed(String),
}

enum Segment<'a> {
    Text(String),
    Field(&'a str),
}

/// Split a template into literal text and `{field}` references.
fn parse(template: &str) -> Result<Vec<Segment<'_>>, RenderError> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    text.push('{');
                    continue;
                }

                let start = i + 1;
                let end = loop {
                    match chars.next() {
                        Some((j, '}')) => break j,
                        Some((_, '{')) => {
                            return Err(RenderError::Malformed(format!(
                                "unexpected '{{' inside placeholder at byte {}",
                                i
                            )))
                        }
                        Some(_) => {}
                        None => {
                            return Err(RenderError::Malformed(format!(
                                "unclosed placeholder at byte {}",
                                i
                            )))
                        }
                    }
                };

                let name = &template[start..end];
                if name.is_empty() {
                    return Err(RenderError::Malformed(format!(
                        "empty placeholder at byte {}",
                        i
                    )));
                }

                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Field(name));
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    text.push('}');
                } else {
                    return Err(RenderError::Malformed(format!(
                        "single '}}' at byte {}",
                        i
                    )));
                }
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    Ok(segments)
}

/// Substitute `data` into `template`.
///
/// Every placeholder is checked against `data` before any output is built.
/// List values are joined with `", "`. Fields the template does not
/// reference are ignored.
pub fn render(template: &str, data: &InputData) -> Result<String, RenderError> {
    let segments = parse(template)?;

    if let Some(missing) = segments.iter().find_map(|s| match s {
        Segment::Field(name) if !data.contains_key(*name) => Some(*name),
        _ => None,
    }) {
        return Err(RenderError::MissingField(missing.to_string()));
    }

    let mut out = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(&text),
            Segment::Field(name) => {
                if let Some(value) = data.get(name) {
                    out.push_str(&value.to_string());
                }
            }
        }
    }

    Ok(out)
}

fn goal_or(data: &InputData, default: &str) -> String {
    data.get("goal")
        .map(FieldValue::to_string)
        .unwrap_or_else(|| default.to_string())
}

/// Prompt used when the requested template does not exist.
pub fn unknown_template_fallback(data: &InputData) -> String {
    format!("Help the user with their {} goal.", goal_or(data, "fitness"))
}

/// Prompt used when the template cannot be filled from the answers.
pub fn missing_field_fallback(data: &InputData) -> String {
    format!("Analyze the user's goal: {}", goal_or(data, "unknown"))
}

/// Turns a template key plus onboarding answers into a prompt string.
#[derive(Debug, Clone, Copy)]
pub struct PromptFormatter {
    registry: &'static TemplateRegistry,
}

impl PromptFormatter {
    pub fn new(registry: &'static TemplateRegistry) -> Self {
        Self { registry }
    }

    /// Build the prompt for `key`. Never fails: unresolvable input falls
    /// back to a generic prompt built from the `goal` answer.
    pub fn format(&self, key: &str, data: &InputData) -> String {
        let Some(template) = self.registry.get(key) else {
            tracing::warn!(prompt_key = %key, "Template key not found");
            return unknown_template_fallback(data);
        };

        match render(template, data) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!(prompt_key = %key, error = %e, "Failed to format prompt template");
                missing_field_fallback(data)
            }
        }
    }
}

impl Default for PromptFormatter {
    fn default() -> Self {
        Self::new(TemplateRegistry::shared())
    }
}
