//! Step definitions and the validated step registry.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// The answer-collection mode of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// One option, committed by the same click that selects it.
    SingleChoice,
    /// Several options toggled on/off, committed by an explicit confirm.
    MultiChoice,
    /// One option picked from a long list; commit semantics of SingleChoice.
    Dropdown,
    /// MultiChoice over a list large enough to need a search box.
    SearchableMultiChoice,
}

impl StepKind {
    /// Whether this kind accumulates multiple selections before a confirm.
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::MultiChoice | Self::SearchableMultiChoice)
    }

    /// Whether selection and confirmation are a single user action.
    pub fn is_one_shot(&self) -> bool {
        !self.is_multi()
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SingleChoice => "single_choice",
            Self::MultiChoice => "multi_choice",
            Self::Dropdown => "dropdown",
            Self::SearchableMultiChoice => "searchable_multi_choice",
        };
        write!(f, "{s}")
    }
}

/// One question unit of the wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Position in the flow; assigned by the registry.
    pub order: usize,
    /// The question text the bot sends when this step becomes current.
    pub prompt: String,
    /// Profile field this step's answer is committed under.
    pub field_id: String,
    pub kind: StepKind,
    /// Candidate answers, in catalog order. Never empty.
    pub options: Vec<String>,
}

impl StepDefinition {
    pub fn new(
        prompt: impl Into<String>,
        field_id: impl Into<String>,
        kind: StepKind,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            order: 0,
            prompt: prompt.into(),
            field_id: field_id.into(),
            kind,
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `option` is one of this step's candidates.
    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Immutable, ordered catalog of steps, validated at construction.
///
/// Shared across sessions behind an `Arc`; never mutated after `new`.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepDefinition>,
}

impl StepRegistry {
    /// Build a registry, assigning `order` by position.
    ///
    /// Rejects empty catalogs, steps without options, duplicate field ids,
    /// and repeated options within a step.
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut fields = HashSet::new();
        for step in &steps {
            if step.options.is_empty() {
                return Err(CatalogError::NoOptions {
                    field: step.field_id.clone(),
                });
            }
            if !fields.insert(step.field_id.clone()) {
                return Err(CatalogError::DuplicateField {
                    field: step.field_id.clone(),
                });
            }
            let mut seen = HashSet::new();
            for option in &step.options {
                if !seen.insert(option.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        field: step.field_id.clone(),
                        option: option.clone(),
                    });
                }
            }
        }

        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(order, mut step)| {
                step.order = order;
                step
            })
            .collect();

        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false — empty catalogs are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }
}
