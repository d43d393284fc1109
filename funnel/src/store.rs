//! Store runtime: state container plus effect execution.
//!
//! A store owns one reducer, its state behind an async `RwLock`, and the
//! environment. `dispatch` runs the reducer, releases the state lock, then
//! executes the returned effects; actions fed back by `Future` effects are
//! queued and reduced in turn until the queue drains. The write lock is
//! never held across an await, so reads stay responsive while a fetch or
//! submission is in flight.

use crate::checkout::{CheckoutEnvironment, CheckoutReducer, CheckoutSession};
use crate::draft::OrderDraft;
use crate::error::FunnelError;
use crate::selection::{SelectionEnvironment, SelectionReducer, SelectionState};
use cinebook_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Generic store for a reducer, its state, and its environment
pub struct Store<R: Reducer> {
    state: Arc<RwLock<R::State>>,
    reducer: R,
    env: R::Environment,
}

impl<R> Store<R>
where
    R: Reducer,
    R::State: Clone + Send + Sync,
    R::Action: Send,
    R::Environment: Sync,
{
    /// Create a store with the given initial state
    pub fn new(reducer: R, initial_state: R::State, env: R::Environment) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            env,
        }
    }

    /// Dispatch an action and execute its effects to completion
    ///
    /// Feedback actions produced by `Future` effects are reduced in arrival
    /// order; dispatch returns once no effect produced a further action.
    pub async fn dispatch(&self, action: R::Action) {
        let mut actions = VecDeque::new();
        actions.push_back(action);

        while let Some(next) = actions.pop_front() {
            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut state, next, &self.env)
            };
            self.run_effects(effects.into_iter().collect(), &mut actions)
                .await;
        }
    }

    /// Get a snapshot of the current state
    pub async fn state(&self) -> R::State {
        self.state.read().await.clone()
    }

    /// The environment this store was built with
    pub const fn env(&self) -> &R::Environment {
        &self.env
    }

    async fn run_effects(
        &self,
        effects: Vec<Effect<R::Action>>,
        actions: &mut VecDeque<R::Action>,
    ) {
        // Composite effects are flattened in place instead of recursing,
        // which keeps the future non-recursive and Send.
        let mut pending: VecDeque<Effect<R::Action>> = effects.into();
        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::None => {}
                Effect::Parallel(inner) | Effect::Sequential(inner) => {
                    for nested in inner.into_iter().rev() {
                        pending.push_front(nested);
                    }
                }
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    actions.push_back(*action);
                }
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        actions.push_back(action);
                    }
                }
            }
        }
    }
}

/// Store driving the cascading selection chain
pub type SelectionStore = Store<SelectionReducer>;

impl Store<SelectionReducer> {
    /// Create a selection store with an empty chain
    #[must_use]
    pub fn selection(env: SelectionEnvironment) -> Self {
        Self::new(SelectionReducer::new(), SelectionState::new(), env)
    }
}

/// Store driving one checkout session
pub type CheckoutStore = Store<CheckoutReducer>;

impl Store<CheckoutReducer> {
    /// Begin checkout for a freshly built draft
    ///
    /// The draft is persisted to the slot before the session becomes
    /// visible, so a reload between here and submission resumes it.
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Storage`] when the slot cannot be written.
    pub fn begin(env: CheckoutEnvironment, draft: OrderDraft) -> Result<Self, FunnelError> {
        env.drafts().save(&draft)?;
        Ok(Self::new(
            CheckoutReducer::new(),
            CheckoutSession::new(draft),
            env,
        ))
    }

    /// Resume checkout from the stored draft, if the slot holds one
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Storage`] on slot I/O failure and
    /// [`FunnelError::Decode`] when the slot holds unparsable JSON.
    pub fn resume(env: CheckoutEnvironment) -> Result<Option<Self>, FunnelError> {
        let Some(draft) = env.drafts().load()? else {
            return Ok(None);
        };
        Ok(Some(Self::new(
            CheckoutReducer::new(),
            CheckoutSession::new(draft),
            env,
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::checkout::{
        CheckoutAction, PurchaseFuture, PurchaseGateway, PurchaseReceipt,
    };
    use crate::draft::{DraftStore, InMemoryDraftStore};
    use crate::pricing::DraftPricing;
    use crate::types::{
        CardDetails, CinemaId, Currency, HallName, Money, MovieId, Purchaser, SeatCode, ShowDate,
        ShowTime,
    };
    use smallvec::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default)]
    struct CounterState {
        count: u32,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Bump,
        BumpAsync,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                CounterAction::Bump => {
                    state.count += 1;
                    smallvec![Effect::None]
                }
                CounterAction::BumpAsync => {
                    smallvec![Effect::future(async { Some(CounterAction::Bump) })]
                }
            }
        }
    }

    struct AlwaysOkGateway;

    impl PurchaseGateway for AlwaysOkGateway {
        fn submit(
            &self,
            _draft: &OrderDraft,
            _purchaser: Purchaser,
            _card: CardDetails,
        ) -> PurchaseFuture {
            Box::pin(async { Ok(PurchaseReceipt::default()) })
        }
    }

    fn sample_draft() -> OrderDraft {
        OrderDraft {
            cinema_id: CinemaId::new(5),
            movie_id: MovieId::new(9),
            cinema_name: "Grand Central".to_string(),
            movie_title: "Arrival".to_string(),
            date: ShowDate::new("2025-06-01"),
            time: ShowTime::new("19:30:00"),
            hall: HallName::new("Hall 1"),
            seats: vec![SeatCode::new("A1")],
            pricing: DraftPricing::new(Money::from_cents(999), Currency::Usd, 1),
        }
    }

    #[tokio::test]
    async fn dispatch_executes_future_effects_to_completion() {
        let store = Store::new(CounterReducer, CounterState::default(), ());
        store.dispatch(CounterAction::BumpAsync).await;
        assert_eq!(store.state().await.count, 1);
    }

    #[tokio::test]
    async fn begin_persists_the_draft_before_exposing_state() {
        let drafts = Arc::new(InMemoryDraftStore::new());
        let env = CheckoutEnvironment::new(Arc::new(AlwaysOkGateway), drafts.clone());

        let store = CheckoutStore::begin(env, sample_draft()).unwrap();

        assert_eq!(drafts.load().unwrap(), Some(sample_draft()));
        assert_eq!(store.state().await.draft, sample_draft());
    }

    #[tokio::test]
    async fn resume_restores_the_stored_draft() {
        let drafts = Arc::new(InMemoryDraftStore::new());
        drafts.save(&sample_draft()).unwrap();
        let env = CheckoutEnvironment::new(Arc::new(AlwaysOkGateway), drafts.clone());

        let store = CheckoutStore::resume(env)
            .unwrap()
            .expect("slot should hold a draft");
        assert_eq!(store.state().await.draft, sample_draft());
    }

    #[tokio::test]
    async fn resume_with_an_empty_slot_yields_none() {
        let env = CheckoutEnvironment::new(
            Arc::new(AlwaysOkGateway),
            Arc::new(InMemoryDraftStore::new()),
        );
        assert!(CheckoutStore::resume(env).unwrap().is_none());
    }

    #[tokio::test]
    async fn submission_through_the_store_clears_the_slot() {
        let drafts = Arc::new(InMemoryDraftStore::new());
        let env = CheckoutEnvironment::new(Arc::new(AlwaysOkGateway), drafts.clone());
        let store = CheckoutStore::begin(env, sample_draft()).unwrap();

        store
            .dispatch(CheckoutAction::Submit {
                purchaser: Purchaser {
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                    phone: "+1-555-0100".to_string(),
                    email: "ada@example.com".to_string(),
                },
                card: CardDetails {
                    holder: "Ada Lovelace".to_string(),
                    number: "4111111111111111".to_string(),
                    expiry_month: 12,
                    expiry_year: 2030,
                    cvv: "123".to_string(),
                },
            })
            .await;

        assert!(store.state().await.confirmation().is_some());
        assert_eq!(drafts.load().unwrap(), None);
    }
}
