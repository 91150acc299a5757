//! The accumulating profile record built from committed answers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A committed answer for one profile field.
///
/// Serialized untagged so a `Single` answer is a plain JSON string and a
/// `Multiple` answer a JSON array, matching the profile document shape the
/// platform backend stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Answer of a single-choice or dropdown step.
    Single(String),
    /// Answers of a multi-choice step, in selection order.
    Multiple(Vec<String>),
}

impl AnswerValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v),
            Self::Multiple(_) => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::Multiple(v) => Some(v),
        }
    }
}

/// Field-keyed mapping of committed answers.
///
/// Contains exactly the fields of steps already confirmed; each step owns a
/// distinct field, so every key is written once per session run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRecord {
    answers: HashMap<String, AnswerValue>,
}

impl ProfileRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_id: impl Into<String>, value: AnswerValue) {
        let field_id = field_id.into();
        if self.answers.insert(field_id.clone(), value).is_some() {
            // One write per field is the invariant; a second write means the
            // controller advanced past this step twice.
            tracing::warn!(field = %field_id, "Profile field overwritten");
        }
    }

    pub fn get(&self, field_id: &str) -> Option<&AnswerValue> {
        self.answers.get(field_id)
    }

    pub fn contains_field(&self, field_id: &str) -> bool {
        self.answers.contains_key(field_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}
