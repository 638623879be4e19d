use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Onboarding answers keyed by the field name a step stores them under.
pub type InputData = HashMap<String, FieldValue>;

/// A single onboarding answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    /// Multi-choice answers, e.g. `target_zones`.
    List(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiFeedbackRequest {
    pub step_id: String,
    pub prompt_key: String,
    #[serde(default)]
    pub input_data: InputData,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AiFeedbackResponse {
    pub text: String,
}
