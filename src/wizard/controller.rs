//! WizardController — drives the onboarding session state machine.
//!
//! The controller is the sole writer of the [`WizardSession`]. User input
//! mutates the selection buffer; a confirm commits the buffered value into
//! the profile, appends the user's answer to the transcript, and advances
//! the step pointer, which schedules the next bot prompt behind a simulated
//! typing delay. The delayed append is a single tokio task whose handle is
//! held by the session, so `reset()` can cancel it deterministically.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use crate::auth::User;
use crate::config::WizardConfig;
use crate::error::WizardError;

use super::profile::{AnswerValue, ProfileRecord};
use super::search::filter_options;
use super::session::WizardSession;
use super::step::{StepDefinition, StepRegistry};
use super::transcript::{Sender, TranscriptEntry};

/// Separator used when echoing multi-choice answers into the transcript.
const ANSWER_SEPARATOR: &str = ", ";

/// Events emitted to external collaborators.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    /// The completion message landed in the transcript; the profile is final.
    Completed {
        session_id: Uuid,
        profile: ProfileRecord,
    },
}

/// Read-only state handed to the rendering collaborator each frame.
#[derive(Debug, Clone)]
pub struct WizardSnapshot {
    pub transcript: Vec<TranscriptEntry>,
    /// The step awaiting an answer; `None` once the session is completed.
    pub current_step: Option<StepDefinition>,
    /// In-progress selections, in the order they were toggled in.
    pub selection: Vec<String>,
    /// True while a bot message is scheduled but not yet delivered; the UI
    /// uses this to hold further input.
    pub is_typing: bool,
    /// 1-based step position out of the catalog length.
    pub progress: (usize, usize),
    pub completed: bool,
}

/// Drives one onboarding session over a shared, immutable step catalog.
pub struct WizardController {
    registry: Arc<StepRegistry>,
    config: WizardConfig,
    user: User,
    session: Arc<RwLock<WizardSession>>,
    events: broadcast::Sender<WizardEvent>,
}

impl WizardController {
    pub fn new(registry: Arc<StepRegistry>, config: WizardConfig, user: User) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            registry,
            config,
            user,
            session: Arc::new(RwLock::new(WizardSession::new())),
            events,
        }
    }

    /// Subscribe to completion events (dashboard handoff).
    pub fn subscribe(&self) -> broadcast::Receiver<WizardEvent> {
        self.events.subscribe()
    }

    pub fn registry(&self) -> &Arc<StepRegistry> {
        &self.registry
    }

    pub async fn session_id(&self) -> Uuid {
        self.session.read().await.id
    }

    /// Begin the flow: schedule the personalized greeting plus the first
    /// step's prompt. Calling on an already-active session is refused.
    pub async fn start(&self) -> Result<(), WizardError> {
        let mut session = self.session.write().await;
        if session.started {
            return Err(WizardError::InvalidState {
                action: "start".to_string(),
                phase: "already active".to_string(),
            });
        }
        session.started = true;

        // Empty catalogs are rejected at registry construction, so step 0
        // always exists.
        let first_prompt = self
            .registry
            .get(0)
            .map(|step| {
                format!(
                    "Great to meet you, {}! 👋 Let's build your profile. {}",
                    self.user.name, step.prompt
                )
            })
            .unwrap_or_default();

        tracing::info!(session_id = %session.id, user = %self.user.name, "Onboarding started");
        self.schedule_bot_message(&mut session, first_prompt, self.config.first_prompt_delay, None);
        Ok(())
    }

    /// Toggle an option on a multi-choice or searchable step.
    ///
    /// No transcript or profile effect; the change lives in the selection
    /// buffer until `confirm()`.
    pub async fn toggle_selection(&self, option: &str) -> Result<(), WizardError> {
        let mut session = self.session.write().await;
        let step = self.current_step(&session, "toggle a selection")?;

        if !step.kind.is_multi() {
            return Err(WizardError::InvalidState {
                action: "toggle a selection".to_string(),
                phase: format!("on a {} step", step.kind),
            });
        }
        if !step.offers(option) {
            return Err(WizardError::InvalidOption {
                field: step.field_id.clone(),
                option: option.to_string(),
            });
        }

        let field = step.field_id.clone();
        let selected = session.selection.toggle(option);
        tracing::debug!(field = %field, option, selected, "Selection toggled");
        Ok(())
    }

    /// Answer a single-choice or dropdown step. Selection and confirmation
    /// are the same user action for these kinds.
    pub async fn choose_single(&self, option: &str) -> Result<(), WizardError> {
        let mut session = self.session.write().await;
        let step = self.current_step(&session, "choose an option")?;

        if step.kind.is_multi() {
            return Err(WizardError::InvalidState {
                action: "choose a single option".to_string(),
                phase: format!("on a {} step", step.kind),
            });
        }
        if !step.offers(option) {
            return Err(WizardError::InvalidOption {
                field: step.field_id.clone(),
                option: option.to_string(),
            });
        }

        session.selection.clear();
        session.selection.toggle(option);
        self.commit(&mut session);
        Ok(())
    }

    /// Commit the buffered selections of a multi-choice step.
    pub async fn confirm(&self) -> Result<(), WizardError> {
        let mut session = self.session.write().await;
        let step = self.current_step(&session, "confirm")?;

        if !step.kind.is_multi() {
            return Err(WizardError::InvalidState {
                action: "confirm".to_string(),
                phase: format!("on a {} step", step.kind),
            });
        }
        if session.selection.is_empty() {
            return Err(WizardError::EmptySelection {
                field: step.field_id.clone(),
            });
        }

        self.commit(&mut session);
        Ok(())
    }

    /// Cancel any pending bot message and return the session to its initial
    /// state. Used on logout and for edit-profile re-entry.
    pub async fn reset(&self) {
        let mut session = self.session.write().await;
        session.clear();
        tracing::info!(session_id = %session.id, "Session reset");
    }

    /// Candidate options of the current step, narrowed by `query` for the
    /// searchable kind. Other kinds ignore the query; a completed session
    /// has no candidates.
    pub async fn filtered_options(&self, query: &str) -> Vec<String> {
        let session = self.session.read().await;
        let Some(step) = self.registry.get(session.current_index) else {
            return Vec::new();
        };
        if step.kind == super::step::StepKind::SearchableMultiChoice {
            filter_options(&step.options, query)
                .into_iter()
                .map(String::from)
                .collect()
        } else {
            step.options.clone()
        }
    }

    /// Read-only snapshot for the rendering collaborator.
    pub async fn snapshot(&self) -> WizardSnapshot {
        let session = self.session.read().await;
        let total = self.registry.len();
        WizardSnapshot {
            transcript: session.transcript.entries().to_vec(),
            current_step: self.registry.get(session.current_index).cloned(),
            selection: session.selection.items().to_vec(),
            is_typing: session.is_typing,
            progress: ((session.current_index + 1).min(total), total),
            completed: session.completed,
        }
    }

    /// The finalized profile, if the session has completed.
    pub async fn finished_profile(&self) -> Option<ProfileRecord> {
        let session = self.session.read().await;
        session.completed.then(|| session.profile.clone())
    }

    /// Resolve the step the session is currently on, refusing input on
    /// unstarted or completed sessions.
    fn current_step(
        &self,
        session: &WizardSession,
        action: &str,
    ) -> Result<StepDefinition, WizardError> {
        if !session.started {
            return Err(WizardError::InvalidState {
                action: action.to_string(),
                phase: "not started".to_string(),
            });
        }
        if session.completed {
            return Err(WizardError::InvalidState {
                action: action.to_string(),
                phase: "completed".to_string(),
            });
        }
        self.registry
            .get(session.current_index)
            .cloned()
            .ok_or_else(|| WizardError::InvalidState {
                action: action.to_string(),
                phase: "completed".to_string(),
            })
    }

    /// Move the buffered value into the profile, echo the answer into the
    /// transcript, clear the buffer, and advance. Caller has validated the
    /// buffer against the current step.
    fn commit(&self, session: &mut WizardSession) {
        let Some(step) = self.registry.get(session.current_index).cloned() else {
            return;
        };

        let selections = session.selection.items().to_vec();
        let echoed = selections.join(ANSWER_SEPARATOR);
        let value = if step.kind.is_multi() {
            AnswerValue::Multiple(selections)
        } else {
            AnswerValue::Single(echoed.clone())
        };

        session.profile.insert(step.field_id.clone(), value);
        session.transcript.append(Sender::User, &echoed);
        session.selection.clear();

        tracing::debug!(field = %step.field_id, answer = %echoed, "Answer committed");
        self.advance(session);
    }

    /// Advance the step pointer and schedule the next bot message. The user
    /// entry that triggered this is already in the transcript, so prompt
    /// ordering follows from append order under the same lock.
    fn advance(&self, session: &mut WizardSession) {
        session.current_index += 1;

        if let Some(next) = self.registry.get(session.current_index) {
            let prompt = next.prompt.clone();
            tracing::debug!(step = session.current_index, field = %next.field_id, "Advanced to next step");
            self.schedule_bot_message(session, prompt, self.config.advance_delay, None);
        } else {
            session.completed = true;
            let profile = session.profile.clone();
            tracing::info!(session_id = %session.id, answers = profile.len(), "Onboarding complete");
            self.schedule_bot_message(
                session,
                super::catalog::COMPLETION_MESSAGE.to_string(),
                self.config.advance_delay,
                Some(profile),
            );
        }
    }

    /// Schedule a single delayed bot append. Any stale pending task is
    /// aborted first, keeping at most one timer outstanding per session.
    fn schedule_bot_message(
        &self,
        session: &mut WizardSession,
        text: String,
        lead_delay: std::time::Duration,
        completion: Option<ProfileRecord>,
    ) {
        session.cancel_pending();
        session.is_typing = true;

        let delay = lead_delay + self.config.typing_delay;
        let shared = Arc::clone(&self.session);
        let events = self.events.clone();
        let session_id = session.id;

        session.pending_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut session = shared.write().await;
            session.transcript.append(Sender::Bot, &text);
            session.is_typing = false;
            session.pending_timer = None;
            if let Some(profile) = completion {
                // No subscribers is fine; the host may poll finished_profile.
                let _ = events.send(WizardEvent::Completed {
                    session_id,
                    profile,
                });
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::wizard::step::StepKind;

    fn registry(steps: Vec<StepDefinition>) -> Arc<StepRegistry> {
        Arc::new(StepRegistry::new(steps).unwrap())
    }

    fn controller(steps: Vec<StepDefinition>) -> WizardController {
        WizardController::new(
            registry(steps),
            WizardConfig::default(),
            User::new("Priya", "priya@example.com"),
        )
    }

    fn single_step() -> Vec<StepDefinition> {
        vec![StepDefinition::new(
            "How many sessions per week?",
            "sessions",
            StepKind::SingleChoice,
            vec!["1-2", "3-4"],
        )]
    }

    fn multi_step() -> Vec<StepDefinition> {
        vec![StepDefinition::new(
            "How would you like to connect?",
            "formats",
            StepKind::MultiChoice,
            vec!["Video", "Chat"],
        )]
    }

    /// Let spawned timer tasks run after virtual time has advanced.
    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    async fn wait(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        settle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn start_delivers_personalized_greeting() {
        let wizard = controller(single_step());
        wizard.start().await.unwrap();

        assert!(wizard.snapshot().await.is_typing);
        assert!(wizard.snapshot().await.transcript.is_empty());

        wait(1400).await; // 500ms lead + 800ms typing
        let snapshot = wizard.snapshot().await;
        assert!(!snapshot.is_typing);
        assert_eq!(snapshot.transcript.len(), 1);
        assert_eq!(snapshot.transcript[0].sender, Sender::Bot);
        assert!(snapshot.transcript[0].text.contains("Priya"));
        assert!(snapshot.transcript[0].text.contains("How many sessions per week?"));
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_is_refused() {
        let wizard = controller(single_step());
        wizard.start().await.unwrap();
        let err = wizard.start().await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidState { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn single_choice_commits_and_completes() {
        let wizard = controller(single_step());
        wizard.start().await.unwrap();
        wait(1400).await;

        wizard.choose_single("1-2").await.unwrap();
        wait(1900).await;

        let snapshot = wizard.snapshot().await;
        assert!(snapshot.completed);
        assert!(snapshot.current_step.is_none());
        let profile = wizard.finished_profile().await.unwrap();
        assert_eq!(profile.get("sessions").unwrap().as_single(), Some("1-2"));

        let texts: Vec<(Sender, &str)> = snapshot
            .transcript
            .iter()
            .map(|e| (e.sender, e.text.as_str()))
            .collect();
        assert_eq!(
            texts,
            [
                (Sender::Bot, "Great to meet you, Priya! 👋 Let's build your profile. How many sessions per week?"),
                (Sender::User, "1-2"),
                (Sender::Bot, super::super::catalog::COMPLETION_MESSAGE),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn choose_single_rejects_unknown_option() {
        let wizard = controller(single_step());
        wizard.start().await.unwrap();
        wait(1400).await;

        let before = wizard.snapshot().await;
        let err = wizard.choose_single("5+").await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::InvalidOption { field, option } if field == "sessions" && option == "5+"
        ));

        let after = wizard.snapshot().await;
        assert_eq!(after.transcript.len(), before.transcript.len());
        assert!(!after.completed);
        assert!(wizard.finished_profile().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_twice_restores_prior_buffer() {
        let wizard = controller(multi_step());
        wizard.start().await.unwrap();
        wait(1400).await;

        wizard.toggle_selection("Video").await.unwrap();
        wizard.toggle_selection("Chat").await.unwrap();
        wizard.toggle_selection("Video").await.unwrap();

        let snapshot = wizard.snapshot().await;
        assert_eq!(snapshot.selection, ["Chat"]);

        wizard.confirm().await.unwrap();
        wait(1900).await;
        let profile = wizard.finished_profile().await.unwrap();
        assert_eq!(
            profile.get("formats").unwrap().as_multiple().unwrap(),
            ["Chat"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_on_single_choice_step_is_invalid_state() {
        let wizard = controller(single_step());
        wizard.start().await.unwrap();
        wait(1400).await;

        let err = wizard.toggle_selection("1-2").await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidState { .. }));
        assert!(wizard.snapshot().await.selection.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_rejects_unknown_option() {
        let wizard = controller(multi_step());
        wizard.start().await.unwrap();
        wait(1400).await;

        let err = wizard.toggle_selection("Telepathy").await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidOption { .. }));
        assert!(wizard.snapshot().await.selection.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_with_empty_buffer_leaves_session_unchanged() {
        let wizard = controller(multi_step());
        wizard.start().await.unwrap();
        wait(1400).await;

        let before = wizard.snapshot().await;
        let err = wizard.confirm().await.unwrap_err();
        assert!(matches!(err, WizardError::EmptySelection { field } if field == "formats"));

        let after = wizard.snapshot().await;
        assert_eq!(after.transcript.len(), before.transcript.len());
        assert_eq!(after.progress, before.progress);
        assert!(!after.completed);
        assert!(wizard.finished_profile().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_on_dropdown_step_is_invalid_state() {
        let wizard = controller(vec![StepDefinition::new(
            "Pick a timezone:",
            "timezone",
            StepKind::Dropdown,
            vec!["GMT-08:00 (PST)", "GMT+05:30 (IST)"],
        )]);
        wizard.start().await.unwrap();
        wait(1400).await;

        let err = wizard.confirm().await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidState { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn search_query_never_touches_selection() {
        let wizard = controller(vec![StepDefinition::new(
            "What can you teach?",
            "skills_to_teach",
            StepKind::SearchableMultiChoice,
            vec!["JavaScript", "Java", "Piano"],
        )]);
        wizard.start().await.unwrap();
        wait(1400).await;

        wizard.toggle_selection("Piano").await.unwrap();

        // "Piano" is filtered out of view but stays selected
        let visible = wizard.filtered_options("java").await;
        assert_eq!(visible, ["JavaScript", "Java"]);
        assert_eq!(wizard.snapshot().await.selection, ["Piano"]);

        let all = wizard.filtered_options("").await;
        assert_eq!(all.len(), 3);
        assert_eq!(wizard.snapshot().await.selection, ["Piano"]);
    }

    #[tokio::test(start_paused = true)]
    async fn profile_contains_exactly_the_confirmed_fields() {
        let wizard = controller(vec![
            StepDefinition::new("q0", "first", StepKind::SingleChoice, vec!["a", "b"]),
            StepDefinition::new("q1", "second", StepKind::MultiChoice, vec!["c", "d"]),
            StepDefinition::new("q2", "third", StepKind::Dropdown, vec!["e"]),
        ]);
        wizard.start().await.unwrap();
        wait(1400).await;

        let fields = ["first", "second", "third"];
        let check = |profile: ProfileRecord, confirmed: usize| {
            for (i, field) in fields.iter().enumerate() {
                assert_eq!(profile.contains_field(field), i < confirmed, "field {field}");
            }
        };

        check(wizard.snapshot_profile().await, 0);

        wizard.choose_single("a").await.unwrap();
        wait(1900).await;
        check(wizard.snapshot_profile().await, 1);
        assert_eq!(wizard.snapshot().await.progress, (2, 3));

        wizard.toggle_selection("d").await.unwrap();
        wizard.confirm().await.unwrap();
        wait(1900).await;
        check(wizard.snapshot_profile().await, 2);

        wizard.choose_single("e").await.unwrap();
        wait(1900).await;
        check(wizard.snapshot_profile().await, 3);
        assert!(wizard.snapshot().await.completed);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_event_carries_final_profile() {
        let wizard = controller(single_step());
        let mut events = wizard.subscribe();
        wizard.start().await.unwrap();
        wait(1400).await;

        wizard.choose_single("3-4").await.unwrap();
        wait(1900).await;

        let event = events.try_recv().unwrap();
        let WizardEvent::Completed { session_id, profile } = event;
        assert_eq!(session_id, wizard.session_id().await);
        assert_eq!(profile.get("sessions").unwrap().as_single(), Some("3-4"));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_pending_bot_message() {
        let wizard = controller(single_step());
        wizard.start().await.unwrap();
        wait(1400).await;

        wizard.choose_single("1-2").await.unwrap();
        // Completion message is pending; reset before it lands.
        wizard.reset().await;

        wait(10_000).await;
        let snapshot = wizard.snapshot().await;
        assert!(snapshot.transcript.is_empty());
        assert!(!snapshot.is_typing);
        assert!(!snapshot.completed);
        assert_eq!(snapshot.progress, (1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn input_before_start_is_refused() {
        let wizard = controller(multi_step());
        let err = wizard.toggle_selection("Video").await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidState { .. }));
        let err = wizard.confirm().await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidState { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn input_after_completion_is_refused() {
        let wizard = controller(multi_step());
        wizard.start().await.unwrap();
        wait(1400).await;
        wizard.toggle_selection("Video").await.unwrap();
        wizard.confirm().await.unwrap();
        wait(1900).await;

        let err = wizard.toggle_selection("Chat").await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidState { phase, .. } if phase == "completed"));
    }

    impl WizardController {
        /// Test helper: current profile contents regardless of completion.
        async fn snapshot_profile(&self) -> ProfileRecord {
            self.session.read().await.profile.clone()
        }
    }
}
