//! Domain types for the StayScout storefront.
//!
//! Catalog entities (hotels, rooms), per-user bookings, identity sessions,
//! and the navigation page state. The page state is a tagged union so that
//! each page carries only its own, strongly-typed payload - a payment page
//! cannot exist without both a hotel and a room.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a hotel (backend document key, e.g. `del_leela`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotelId(String);

impl HotelId {
    /// Create a `HotelId` from a backend document key
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a room (backend document key, e.g. `room_leela_std`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a `RoomId` from a backend document key
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a resolved identity, issued by the auth provider
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a `SessionId` from a provider-issued identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random `BookingId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Identity
// ============================================================================

/// How the current session was established
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthKind {
    /// Anonymous fallback sign-in
    Anonymous,
    /// Pre-issued token sign-in (non-interactive environments)
    Token,
    /// Interactive (redirect/popup) sign-in
    Interactive,
}

/// A resolved identity used to scope bookings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-issued identifier
    pub id: SessionId,
    /// Display name, when the provider knows one
    pub display_name: Option<String>,
    /// How this session was established
    pub kind: AuthKind,
}

impl Session {
    /// Name to greet the user with, falling back like the storefront header
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Friend")
    }
}

// ============================================================================
// Catalog entities
// ============================================================================

/// Normalized (lowercased, trimmed) form of a hotel location, used for
/// exact-match search
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey(String);

impl LocationKey {
    /// Normalize a free-text destination into a location key
    ///
    /// Lowercases and trims surrounding whitespace; no fuzzy or partial
    /// matching exists beyond this.
    #[must_use]
    pub fn normalize(destination: &str) -> Self {
        Self(destination.trim().to_lowercase())
    }

    /// Whether the normalized key is empty (blank destination)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hotel in the catalog
///
/// Created only by the sample-data seeding operation and immutable
/// thereafter; there are no edit or delete flows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Document key
    pub id: HotelId,
    /// Display name
    pub name: String,
    /// Display location, e.g. "New Delhi, India"
    pub location: String,
    /// Normalized location used for exact-match search
    pub location_key: LocationKey,
    /// Nightly base price
    pub price: u32,
    /// Guest rating out of 5
    pub rating: f32,
    /// Image reference
    pub image: String,
    /// Free-text description
    pub description: String,
    /// Amenity labels
    pub amenities: Vec<String>,
}

/// A room belonging to exactly one hotel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Document key
    pub id: RoomId,
    /// Owning hotel
    pub hotel_id: HotelId,
    /// Room-type label, e.g. "Standard Room"
    pub room_type: String,
    /// Nightly price
    pub price: u32,
    /// Sleeping capacity
    pub capacity: u32,
    /// Image reference
    pub image: String,
}

// ============================================================================
// Bookings
// ============================================================================

/// Point-in-time copy of the booked hotel
///
/// Deliberately denormalized: a booking's displayed hotel data survives
/// later catalog changes and must never be re-joined against live records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSnapshot {
    /// Hotel key at booking time
    pub id: HotelId,
    /// Hotel name at booking time
    pub name: String,
    /// Display location at booking time
    pub location: String,
    /// Image reference at booking time
    pub image: String,
}

impl From<&Hotel> for HotelSnapshot {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id.clone(),
            name: hotel.name.clone(),
            location: hotel.location.clone(),
            image: hotel.image.clone(),
        }
    }
}

/// Point-in-time copy of the booked room
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// Room key at booking time
    pub id: RoomId,
    /// Room-type label at booking time
    pub room_type: String,
    /// Nightly price at booking time
    pub price: u32,
    /// Sleeping capacity at booking time
    pub capacity: u32,
}

impl From<&Room> for RoomSnapshot {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            room_type: room.room_type.clone(),
            price: room.price,
            capacity: room.capacity,
        }
    }
}

/// Booking status
///
/// Fixed at `Confirmed` in this scope; no cancellation flow exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// The booking is confirmed
    Confirmed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// An immutable record of a completed simulated purchase, scoped to one
/// session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Snapshot of the booked hotel
    pub hotel: HotelSnapshot,
    /// Snapshot of the booked room
    pub room: RoomSnapshot,
    /// Always `Confirmed` in this scope
    pub status: BookingStatus,
    /// When the booking was recorded
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Capture a booking snapshot from live catalog records
    #[must_use]
    pub fn capture(hotel: &Hotel, room: &Room, created_at: DateTime<Utc>) -> Self {
        Self {
            id: BookingId::new(),
            hotel: hotel.into(),
            room: room.into(),
            status: BookingStatus::Confirmed,
            created_at,
        }
    }
}

// ============================================================================
// Search and payment forms
// ============================================================================

/// User-entered search criteria
///
/// Check-in/check-out dates and guest count are collected but deliberately
/// unused in filtering - they are display-only in this scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text destination
    pub destination: String,
    /// Check-in date (display only)
    pub check_in: Option<NaiveDate>,
    /// Check-out date (display only)
    pub check_out: Option<NaiveDate>,
    /// Guest count (display only)
    pub guests: u32,
}

impl SearchCriteria {
    /// Criteria with only a destination, one guest, no dates
    #[must_use]
    pub fn for_destination(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            check_in: None,
            check_out: None,
            guests: 1,
        }
    }
}

/// Card form fields for the simulated payment processor
///
/// All four fields are required; they are validated by presence only -
/// no Luhn or format checking, since no real charge ever happens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardForm {
    /// Cardholder name
    pub name: String,
    /// Card number
    pub number: String,
    /// Expiry, e.g. "12/27"
    pub expiry: String,
    /// Card verification code
    pub cvc: String,
}

impl CardForm {
    /// Names of required fields that are blank, in display order
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.number.trim().is_empty() {
            missing.push("number");
        }
        if self.expiry.trim().is_empty() {
            missing.push("expiry");
        }
        if self.cvc.trim().is_empty() {
            missing.push("CVC");
        }
        missing
    }

    /// Whether all required fields are present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Number of nights in the payment summary
///
/// Hard-coded to 1 regardless of the selected check-in/check-out span;
/// preserved literally from the shipped behavior.
pub const SUMMARY_NIGHTS: u32 = 1;

/// Line items shown on the payment page before submission
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Nights charged (always [`SUMMARY_NIGHTS`])
    pub nights: u32,
    /// Nightly room price
    pub nightly_price: u32,
    /// Total charged
    pub total: u32,
}

impl PaymentSummary {
    /// Build the summary for a selected room
    #[must_use]
    pub const fn for_room(room: &Room) -> Self {
        Self {
            nights: SUMMARY_NIGHTS,
            nightly_price: room.price,
            total: room.price * SUMMARY_NIGHTS,
        }
    }
}

// ============================================================================
// Page state
// ============================================================================

/// Data a page is waiting on, has, or could not get
#[derive(Clone, Debug, PartialEq)]
pub enum Loadable<T> {
    /// A request is in flight
    Loading,
    /// The data arrived
    Ready(T),
    /// The request failed; loading has ended
    Failed(String),
    /// No backend is configured; no request was attempted
    Unavailable,
}

impl<T> Loadable<T> {
    /// The loaded value, if any
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Payment page phase
#[derive(Clone, Debug, PartialEq)]
pub enum PaymentPhase {
    /// Card form is editable; `error` holds the last validation or charge
    /// failure message
    Editing {
        /// Inline error, if any
        error: Option<String>,
    },
    /// Simulated charge / booking persistence in flight
    Processing,
    /// The charge succeeded but persistence failed - a distinct error
    /// class that must direct the user to support and never auto-retry
    PersistFailed {
        /// User-visible support message
        message: String,
    },
}

/// The payment page payload
///
/// Cannot be constructed without both a hotel and a room; partial
/// navigation payloads land on [`Page::PaymentUnavailable`] instead.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentPage {
    /// Hotel being booked
    pub hotel: Hotel,
    /// Room being booked
    pub room: Room,
    /// Current phase of the simulated payment
    pub phase: PaymentPhase,
}

/// The navigation state: which view is active and what data it requires
#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    /// Landing page with the featured-hotels listing
    Home {
        /// Up to three featured hotels
        featured: Loadable<Vec<Hotel>>,
    },
    /// Search results for the submitted criteria
    SearchResults {
        /// The criteria the results answer
        criteria: SearchCriteria,
        /// Matching hotels
        results: Loadable<Vec<Hotel>>,
        /// Whether a "show all" action is offered (first page came back
        /// full, so there may be more)
        can_show_all: bool,
    },
    /// A hotel with its room listing
    HotelDetails {
        /// The requested hotel
        hotel_id: HotelId,
        /// Hotel and rooms, once loaded
        details: Loadable<(Hotel, Vec<Room>)>,
    },
    /// The referenced hotel no longer exists (stale deep link)
    HotelNotFound {
        /// The identifier that failed to resolve
        hotel_id: HotelId,
    },
    /// Static about page
    About,
    /// The current session's bookings
    Bookings {
        /// Bookings scoped to the session
        bookings: Loadable<Vec<Booking>>,
    },
    /// Simulated payment for a selected hotel and room
    Payment(PaymentPage),
    /// "No room selected" error view, with a link back home; the user must
    /// consciously restart - there is no automatic redirect
    PaymentUnavailable,
}

impl Page {
    /// Short name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home { .. } => "home",
            Self::SearchResults { .. } => "search-results",
            Self::HotelDetails { .. } => "hotel-details",
            Self::HotelNotFound { .. } => "hotel-not-found",
            Self::About => "about",
            Self::Bookings { .. } => "bookings",
            Self::Payment(_) => "payment",
            Self::PaymentUnavailable => "payment-unavailable",
        }
    }
}

/// A navigation request, as issued by a view or a deep link
///
/// Unlike [`Page`], a request may carry a partial payment payload; the
/// reducer validates it and routes incomplete payloads to the error view.
#[derive(Clone, Debug, PartialEq)]
pub enum NavRequest {
    /// Go to the landing page
    Home,
    /// Go to the about page
    About,
    /// Go to the current session's bookings
    Bookings,
    /// Submit a search and show its results
    SearchResults {
        /// The criteria to search with
        criteria: SearchCriteria,
    },
    /// Open a hotel's detail page
    HotelDetails {
        /// Hotel to open
        hotel_id: HotelId,
    },
    /// Open the payment page; either payload half may be missing when the
    /// request comes from outside the room-selection flow
    Payment {
        /// Selected hotel, if any
        hotel: Option<Hotel>,
        /// Selected room, if any
        room: Option<Room>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn hotel() -> Hotel {
        Hotel {
            id: HotelId::new("del_leela"),
            name: "The Leela Palace".to_string(),
            location: "New Delhi, India".to_string(),
            location_key: LocationKey::normalize("Delhi"),
            price: 430,
            rating: 4.9,
            image: "https://placehold.co/600x400?text=Leela".to_string(),
            description: "Art-filled palace hotel".to_string(),
            amenities: vec!["Spa".to_string(), "Pool".to_string()],
        }
    }

    fn room() -> Room {
        Room {
            id: RoomId::new("room_leela_std"),
            hotel_id: HotelId::new("del_leela"),
            room_type: "Standard Room".to_string(),
            price: 430,
            capacity: 2,
            image: "https://placehold.co/600x400?text=Standard".to_string(),
        }
    }

    #[test]
    fn location_key_normalizes_case_and_whitespace() {
        assert_eq!(
            LocationKey::normalize("  Mumbai "),
            LocationKey::normalize("mumbai")
        );
        assert!(LocationKey::normalize("   ").is_empty());
    }

    #[test]
    fn booking_capture_snapshots_hotel_and_room() {
        let booking = Booking::capture(&hotel(), &room(), Utc::now());
        assert_eq!(booking.hotel.name, "The Leela Palace");
        assert_eq!(booking.room.price, 430);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[test]
    fn card_form_reports_missing_fields() {
        let form = CardForm {
            name: "A. Traveler".to_string(),
            number: String::new(),
            expiry: "12/27".to_string(),
            cvc: "   ".to_string(),
        };
        assert_eq!(form.missing_fields(), vec!["number", "CVC"]);
        assert!(!form.is_complete());
    }

    #[test]
    fn payment_summary_charges_one_night() {
        let summary = PaymentSummary::for_room(&room());
        assert_eq!(summary.nights, 1);
        assert_eq!(summary.total, 430);
    }

    #[test]
    fn booking_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap_or_default();
        assert_eq!(json, "\"confirmed\"");
    }
}
