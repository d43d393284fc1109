//! Purchase endpoint client.
//!
//! One POST per checkout, carrying the draft's display fields, seat
//! breakdown, pricing snapshot, purchaser and card data, plus the derived
//! `Idempotency-Key` header. Status mapping follows the endpoint's
//! contract: any `2xx` confirms the purchase, `401` is an authorization
//! failure, other `4xx` are business rejections carrying the server
//! message, `5xx` are retry-safe server failures.

use super::idempotency::{IDEMPOTENCY_HEADER, idempotency_key};
use crate::draft::OrderDraft;
use crate::error::FunnelError;
use crate::pricing::DraftPricing;
use crate::types::{CardDetails, Purchaser};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use super::types::PurchaseReceipt;

/// Purchase call result
pub type PurchaseResult = Result<PurchaseReceipt, FunnelError>;

/// Boxed future returned by [`PurchaseGateway::submit`]
pub type PurchaseFuture = Pin<Box<dyn Future<Output = PurchaseResult> + Send>>;

// ============================================================================
// Wire types
// ============================================================================

/// One seat in the purchase request, split into row and number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatInformation {
    /// Row letters, e.g. `"A"`
    pub seat_letter: String,
    /// Seat number within the row
    pub seat_number: u32,
}

/// Body of the purchase POST
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequestBody {
    /// Movie display title
    pub movie_name: String,
    /// Cinema display name
    pub cinema: String,
    /// Hall name
    pub hall: String,
    /// Show date, `YYYY-MM-DD`
    pub date: String,
    /// Show time, `HH:MM:SS`
    pub showtime: String,
    /// Selected seats, split into row and number
    pub seat_information: Vec<SeatInformation>,
    /// Pricing snapshot taken when the draft was created
    pub pricing: DraftPricing,
    /// Contact details
    pub purchaser: Purchaser,
    /// Payment instrument, request-scoped only
    pub card: CardDetails,
}

impl PurchaseRequestBody {
    /// Build the request body from a draft and the entered details
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Validation`] when a seat code cannot be split
    /// into row letters and a number.
    pub fn from_draft(
        draft: &OrderDraft,
        purchaser: Purchaser,
        card: CardDetails,
    ) -> Result<Self, FunnelError> {
        let seat_information = draft
            .seats
            .iter()
            .map(|seat| {
                let (seat_letter, seat_number) = seat.parts()?;
                Ok(SeatInformation {
                    seat_letter,
                    seat_number,
                })
            })
            .collect::<Result<Vec<_>, crate::error::ValidationError>>()?;

        Ok(Self {
            movie_name: draft.movie_title.clone(),
            cinema: draft.cinema_name.clone(),
            hall: draft.hall.to_string(),
            date: draft.date.to_string(),
            showtime: draft.time.to_string(),
            seat_information,
            pricing: draft.pricing.clone(),
            purchaser,
            card,
        })
    }
}

/// The error payload the endpoint may return alongside a `4xx`/`5xx`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// ============================================================================
// Trait
// ============================================================================

/// Submission access to the purchase endpoint
///
/// Abstraction over the purchase HTTP API so the checkout reducer can be
/// exercised against a stub in tests.
pub trait PurchaseGateway: Send + Sync {
    /// Submit a draft, with the idempotency key derived from it
    fn submit(&self, draft: &OrderDraft, purchaser: Purchaser, card: CardDetails)
    -> PurchaseFuture;
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// HTTP purchase gateway backed by reqwest
#[derive(Clone)]
pub struct HttpPurchaseGateway {
    client: Client,
    base_url: String,
}

impl HttpPurchaseGateway {
    /// Create a new gateway against the given base URL
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Network`] when the underlying HTTP client
    /// cannot be built (e.g. TLS backend initialization fails).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FunnelError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FunnelError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Creates an Arc-wrapped instance for sharing
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Network`] when the underlying HTTP client
    /// cannot be built.
    pub fn shared(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn PurchaseGateway>, FunnelError> {
        Ok(Arc::new(Self::new(base_url, timeout)?))
    }

    async fn post_purchase(
        client: Client,
        url: String,
        key: String,
        body: PurchaseRequestBody,
    ) -> PurchaseResult {
        // The body carries card data; only the key and status are logged.
        tracing::info!(idempotency_key = %key, "submitting purchase");

        let response = client
            .post(&url)
            .header(IDEMPOTENCY_HEADER, key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| FunnelError::Network(e.to_string()))?;

        let status = response.status();
        match status {
            status if status.is_success() => {
                // An empty or unparsable success body still confirms the
                // purchase; the receipt just carries no tokens.
                let text = response
                    .text()
                    .await
                    .map_err(|e| FunnelError::Decode(e.to_string()))?;
                let receipt = serde_json::from_str(&text).unwrap_or_default();
                Ok(receipt)
            }
            StatusCode::UNAUTHORIZED => {
                tracing::warn!(idempotency_key = %key, "purchase unauthorized");
                Err(FunnelError::Unauthorized)
            }
            status if status.is_client_error() => {
                let message = Self::server_message(response).await;
                tracing::warn!(
                    idempotency_key = %key,
                    status = status.as_u16(),
                    %message,
                    "purchase rejected"
                );
                Err(FunnelError::Rejected {
                    status: status.as_u16(),
                    message,
                })
            }
            status => {
                let message = Self::server_message(response).await;
                tracing::warn!(
                    idempotency_key = %key,
                    status = status.as_u16(),
                    "purchase endpoint failed"
                );
                Err(FunnelError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Extract the server's `message` field, falling back to a generic one
    async fn server_message(response: reqwest::Response) -> String {
        let parsed = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty());
        parsed.unwrap_or_else(|| "purchase could not be completed".to_string())
    }
}

impl PurchaseGateway for HttpPurchaseGateway {
    fn submit(
        &self,
        draft: &OrderDraft,
        purchaser: Purchaser,
        card: CardDetails,
    ) -> PurchaseFuture {
        let key = idempotency_key(draft);
        let body = match PurchaseRequestBody::from_draft(draft, purchaser, card) {
            Ok(body) => body,
            Err(error) => return Box::pin(async move { Err(error) }),
        };
        let client = self.client.clone();
        let url = format!("{}/purchase", self.base_url);
        Box::pin(Self::post_purchase(client, url, key, body))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{CinemaId, Currency, HallName, Money, MovieId, SeatCode, ShowDate, ShowTime};

    fn sample_draft() -> OrderDraft {
        OrderDraft {
            cinema_id: CinemaId::new(5),
            movie_id: MovieId::new(9),
            cinema_name: "Grand Central".to_string(),
            movie_title: "Arrival".to_string(),
            date: ShowDate::new("2025-06-01"),
            time: ShowTime::new("19:30:00"),
            hall: HallName::new("Hall 1"),
            seats: vec![SeatCode::new("A1"), SeatCode::new("B12")],
            pricing: DraftPricing::new(Money::from_cents(999), Currency::Usd, 2),
        }
    }

    fn sample_purchaser() -> Purchaser {
        Purchaser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "+1-555-0100".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn sample_card() -> CardDetails {
        CardDetails {
            holder: "Ada Lovelace".to_string(),
            number: "4111111111111111".to_string(),
            expiry_month: 12,
            expiry_year: 2030,
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn request_body_splits_seats_into_letter_and_number() {
        let body =
            PurchaseRequestBody::from_draft(&sample_draft(), sample_purchaser(), sample_card())
                .unwrap();

        assert_eq!(body.seat_information.len(), 2);
        assert_eq!(body.seat_information[0].seat_letter, "A");
        assert_eq!(body.seat_information[0].seat_number, 1);
        assert_eq!(body.seat_information[1].seat_letter, "B");
        assert_eq!(body.seat_information[1].seat_number, 12);
    }

    #[test]
    fn request_body_rejects_malformed_seat_codes() {
        let mut draft = sample_draft();
        draft.seats = vec![SeatCode::new("12A")];
        let result =
            PurchaseRequestBody::from_draft(&draft, sample_purchaser(), sample_card());
        assert!(matches!(result, Err(FunnelError::Validation(_))));
    }

    #[test]
    fn request_body_serializes_with_camel_case_field_names() {
        let body =
            PurchaseRequestBody::from_draft(&sample_draft(), sample_purchaser(), sample_card())
                .unwrap();
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["movieName"], "Arrival");
        assert_eq!(json["cinema"], "Grand Central");
        assert_eq!(json["showtime"], "19:30:00");
        assert_eq!(json["seatInformation"][0]["seatLetter"], "A");
        assert_eq!(json["seatInformation"][0]["seatNumber"], 1);
        assert_eq!(json["pricing"]["unitPrice"], 9.99);
    }

    #[test]
    fn receipt_defaults_when_body_is_empty_json() {
        let receipt: PurchaseReceipt = serde_json::from_str("{}").unwrap();
        assert_eq!(receipt, PurchaseReceipt::default());
    }
}
