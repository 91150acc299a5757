//! Configuration types.

use std::time::Duration;

/// Wizard timing configuration.
///
/// All bot messages arrive after a simulated "typing" pause so the chat feels
/// conversational. The defaults mirror the production UI timings.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Pause before the very first bot prompt after `start()`.
    pub first_prompt_delay: Duration,
    /// Pause between a confirmed answer and the typing indicator for the
    /// next prompt (or the completion message).
    pub advance_delay: Duration,
    /// Duration of the simulated typing indicator before a bot message lands.
    pub typing_delay: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            first_prompt_delay: Duration::from_millis(500),
            advance_delay: Duration::from_millis(1000),
            typing_delay: Duration::from_millis(800),
        }
    }
}

impl WizardConfig {
    /// Zero-delay configuration, useful for non-interactive hosts.
    pub fn immediate() -> Self {
        Self {
            first_prompt_delay: Duration::ZERO,
            advance_delay: Duration::ZERO,
            typing_delay: Duration::ZERO,
        }
    }
}
