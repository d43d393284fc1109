//! Order draft and the single-slot draft store.
//!
//! The draft is the immutable snapshot handed across the page boundary:
//! built once when hall, time and seats are all confirmed, consumed on
//! purchase success, retained on purchase failure. The store holds at most
//! one draft; a new selection replaces the old draft wholesale, it never
//! mutates one in place.
//!
//! The store is an injected repository rather than an ambient singleton so
//! tests substitute an in-memory slot and the "single active draft"
//! invariant lives in one place. It is explicitly not safe across two
//! concurrent browsing contexts: last `save` wins.

use crate::error::{FunnelError, ValidationError};
use crate::pricing::DraftPricing;
use crate::selection::SelectionState;
use crate::types::{CinemaId, Currency, HallName, Money, MovieId, SeatCode, ShowDate, ShowTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

/// The immutable snapshot of a fully-specified, not-yet-purchased booking
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Selected cinema
    pub cinema_id: CinemaId,
    /// Selected movie
    pub movie_id: MovieId,
    /// Cinema display name, captured for the confirmation page
    pub cinema_name: String,
    /// Movie display title, captured for the confirmation page
    pub movie_title: String,
    /// Selected show date
    pub date: ShowDate,
    /// Selected show time
    pub time: ShowTime,
    /// Selected hall
    pub hall: HallName,
    /// Seat codes picked in the seat map
    pub seats: Vec<SeatCode>,
    /// Captured pricing block
    pub pricing: DraftPricing,
}

impl OrderDraft {
    /// Snapshot a completed selection into a draft
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any of cinema, movie, date, hall or
    /// time is still unset, or when no seats are selected. This is the
    /// "continue" gate: no draft, no navigation, no network call.
    pub fn from_selection(
        selection: &SelectionState,
        unit_price: Money,
        currency: Currency,
    ) -> Result<Self, ValidationError> {
        let cinema = selection
            .cinema
            .as_ref()
            .ok_or(ValidationError::IncompleteSelection("cinema"))?;
        let movie = selection
            .movie
            .as_ref()
            .ok_or(ValidationError::IncompleteSelection("movie"))?;
        let date = selection
            .date
            .clone()
            .ok_or(ValidationError::IncompleteSelection("date"))?;
        let hall = selection
            .hall
            .clone()
            .ok_or(ValidationError::IncompleteSelection("hall"))?;
        let time = selection
            .time
            .clone()
            .ok_or(ValidationError::IncompleteSelection("time"))?;
        if selection.seats.is_empty() {
            return Err(ValidationError::NoSeats);
        }

        Ok(Self {
            cinema_id: cinema.id,
            movie_id: movie.id,
            cinema_name: cinema.name.clone(),
            movie_title: movie.title.clone(),
            date,
            time,
            hall,
            seats: selection.seats.clone(),
            pricing: DraftPricing::new(unit_price, currency, selection.seats.len()),
        })
    }
}

/// The single-slot draft repository
///
/// `load` never mutates the slot; `clear` is idempotent. Implementations
/// serialize the draft as one JSON object under one well-known slot.
pub trait DraftStore: Send + Sync {
    /// Persist the draft, unconditionally overwriting any prior draft
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Storage`] when the slot cannot be written.
    fn save(&self, draft: &OrderDraft) -> Result<(), FunnelError>;

    /// Read the stored draft, or `None` when the slot is empty
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Storage`] on slot I/O failure and
    /// [`FunnelError::Decode`] when the slot holds unparsable JSON.
    fn load(&self) -> Result<Option<OrderDraft>, FunnelError>;

    /// Empty the slot; clearing an already-empty slot is not an error
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Storage`] when the slot cannot be removed.
    fn clear(&self) -> Result<(), FunnelError>;
}

/// In-memory single-slot store
///
/// The draft round-trips through its JSON form even in memory, so the slot
/// behaves exactly like the serialized page-boundary handoff.
#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    slot: Mutex<Option<String>>,
}

impl InMemoryDraftStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> std::sync::Arc<dyn DraftStore> {
        std::sync::Arc::new(Self::new())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, FunnelError> {
        self.slot
            .lock()
            .map_err(|_| FunnelError::Storage("draft slot lock poisoned".to_string()))
    }
}

impl DraftStore for InMemoryDraftStore {
    fn save(&self, draft: &OrderDraft) -> Result<(), FunnelError> {
        let json =
            serde_json::to_string(draft).map_err(|e| FunnelError::Storage(e.to_string()))?;
        *self.lock()? = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<OrderDraft>, FunnelError> {
        let slot = self.lock()?;
        match slot.as_deref() {
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| FunnelError::Decode(e.to_string())),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), FunnelError> {
        *self.lock()? = None;
        Ok(())
    }
}

/// File-backed single-slot store
///
/// Same contract as [`InMemoryDraftStore`] but the slot survives a process
/// boundary: one JSON object at one well-known path.
#[derive(Debug, Clone)]
pub struct JsonFileDraftStore {
    path: PathBuf,
}

impl JsonFileDraftStore {
    /// Create a store using the given slot path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DraftStore for JsonFileDraftStore {
    fn save(&self, draft: &OrderDraft) -> Result<(), FunnelError> {
        let json =
            serde_json::to_string(draft).map_err(|e| FunnelError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| FunnelError::Storage(e.to_string()))
    }

    fn load(&self) -> Result<Option<OrderDraft>, FunnelError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| FunnelError::Decode(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FunnelError::Storage(e.to_string())),
        }
    }

    fn clear(&self) -> Result<(), FunnelError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FunnelError::Storage(e.to_string())),
        }
    }
}
