//! Cascading selection state machine.
//!
//! The funnel narrows `country → city → cinema → date → movie → hall → time
//! → seats` down to a single bookable session. The chain is strictly
//! ordered: a field is meaningful only when everything upstream of it is
//! set, and editing an upstream field resets every strictly-downstream
//! field through one transition helper rather than per-field special cases.
//!
//! Availability fetches are reducer effects: a `Select*` action returns an
//! [`cinebook_core::effect::Effect::Future`] that calls the catalog and
//! feeds the `*Loaded` action back in. A failed fetch surfaces inline and
//! never corrupts the in-progress selection.

mod actions;
mod environment;
mod reducer;
mod types;


pub use actions::SelectionAction;
pub use environment::SelectionEnvironment;
pub use reducer::SelectionReducer;
pub use types::{SelectionField, SelectionState};
