//! Reducer for the submission state machine.

use super::confirmation::resolve_confirmation;
use super::idempotency::idempotency_key;
use super::types::CheckoutPhase;
use super::{CheckoutAction, CheckoutEnvironment, CheckoutSession};
use cinebook_core::{effect::Effect, reducer::Reducer};
use smallvec::{SmallVec, smallvec};

/// Reducer driving one checkout session
///
/// Transitions: `Idle → Submitting → {Confirmed | Failed}`, with
/// `Failed → Submitting` on an explicit retry. `Submit` while `Submitting`
/// or `Confirmed` is a no-op, which is what makes a double-click harmless
/// before the idempotency key even comes into play.
pub struct CheckoutReducer;

impl CheckoutReducer {
    /// Create a new checkout reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CheckoutReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for CheckoutReducer {
    type State = CheckoutSession;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::Submit { purchaser, card } => {
                match state.phase {
                    CheckoutPhase::Idle | CheckoutPhase::Failed(_) => {}
                    CheckoutPhase::Submitting | CheckoutPhase::Confirmed(_) => {
                        tracing::debug!("submit ignored: not idle");
                        return smallvec![Effect::None];
                    }
                }

                state.phase = CheckoutPhase::Submitting;

                let gateway = env.gateway();
                let draft = state.draft.clone();
                smallvec![Effect::future(async move {
                    Some(match gateway.submit(&draft, purchaser, card).await {
                        Ok(receipt) => CheckoutAction::SubmissionSucceeded(receipt),
                        Err(error) => CheckoutAction::SubmissionFailed(error),
                    })
                })]
            }

            CheckoutAction::SubmissionSucceeded(receipt) => {
                let confirmation = resolve_confirmation(&state.draft, &receipt);
                tracing::info!(
                    idempotency_key = %idempotency_key(&state.draft),
                    "purchase confirmed"
                );
                state.phase = CheckoutPhase::Confirmed(confirmation);

                // The slot is cleared only after the phase flips, so a crash
                // mid-clear leaves a draft whose replay the backend dedupes.
                let drafts = env.drafts();
                smallvec![Effect::future(async move {
                    if let Err(error) = drafts.clear() {
                        tracing::warn!(%error, "failed to clear draft slot");
                    }
                    None
                })]
            }

            CheckoutAction::SubmissionFailed(error) => {
                // Draft stays in the slot; an explicit retry replays the
                // byte-identical request.
                tracing::warn!(%error, "purchase failed");
                state.phase = CheckoutPhase::Failed(error);
                smallvec![Effect::None]
            }

            CheckoutAction::Reset => {
                if matches!(state.phase, CheckoutPhase::Failed(_)) {
                    state.phase = CheckoutPhase::Idle;
                }
                smallvec![Effect::None]
            }
        }
    }
}
