//! Onboarding wizard — the step-driven conversational flow.
//!
//! A fixed catalog of question steps is walked one at a time. Each step
//! collects its answer in one of four modes (single choice, multi choice,
//! dropdown, searchable multi choice); confirmed answers accumulate in a
//! profile record while the exchange is mirrored into an append-only chat
//! transcript, bot prompts arriving behind a simulated typing delay.

pub mod catalog;
pub mod controller;
pub mod profile;
pub mod search;
pub mod session;
pub mod step;
pub mod transcript;

pub use controller::{WizardController, WizardEvent, WizardSnapshot};
pub use profile::{AnswerValue, ProfileRecord};
pub use search::filter_options;
pub use session::{SelectionBuffer, WizardSession};
pub use step::{StepDefinition, StepKind, StepRegistry};
pub use transcript::{Sender, TranscriptEntry, TranscriptLog};
