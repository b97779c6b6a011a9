//! Catalog and booking storage.
//!
//! The storefront reads hotels, rooms, and per-session bookings through
//! the [`CatalogStore`] trait. Document paths mirror the backend layout:
//! public catalog data under `artifacts/{app_id}/public/data/` and
//! bookings under `artifacts/{app_id}/users/{session}/bookings/`.

use crate::types::{Booking, Hotel, HotelId, LocationKey, Room, Session, SessionId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use stayscout_core::environment::Clock;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

/// Catalog errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No backend is configured; no request was attempted
    #[error("catalog backend is not configured")]
    Unavailable,
    /// The referenced document does not exist
    #[error("document not found: {path}")]
    NotFound {
        /// Backend document path that failed to resolve
        path: String,
    },
    /// The backend rejected or failed the request
    #[error("catalog backend error: {message}")]
    Backend {
        /// Backend-reported failure
        message: String,
    },
}

/// Result alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Boxed future returned by store operations
pub type CatalogFuture<T> = Pin<Box<dyn Future<Output = CatalogResult<T>> + Send>>;

/// Backend document paths
pub mod paths {
    use crate::types::{BookingId, HotelId, SessionId};

    /// Collection holding the public hotel catalog
    #[must_use]
    pub fn hotels_collection(app_id: &str) -> String {
        format!("artifacts/{app_id}/public/data/hotels")
    }

    /// A single hotel document
    #[must_use]
    pub fn hotel(app_id: &str, hotel_id: &HotelId) -> String {
        format!("{}/{hotel_id}", hotels_collection(app_id))
    }

    /// The rooms collection under a hotel document
    #[must_use]
    pub fn rooms_collection(app_id: &str, hotel_id: &HotelId) -> String {
        format!("{}/rooms", hotel(app_id, hotel_id))
    }

    /// The bookings collection scoped to one session
    #[must_use]
    pub fn bookings_collection(app_id: &str, session: &SessionId) -> String {
        format!("artifacts/{app_id}/users/{session}/bookings")
    }

    /// A single booking document
    #[must_use]
    pub fn booking(app_id: &str, session: &SessionId, booking_id: &BookingId) -> String {
        format!("{}/{booking_id}", bookings_collection(app_id, session))
    }
}

/// Live subscription to the featured-hotels listing
///
/// Delivers the current listing immediately, then a fresh listing after
/// every catalog write. Dropping or closing the handle detaches it from
/// the store; no further snapshots are delivered.
pub struct FeaturedSubscription {
    receiver: mpsc::UnboundedReceiver<Vec<Hotel>>,
    closed: Arc<AtomicBool>,
}

impl FeaturedSubscription {
    /// Next snapshot of the featured listing, or `None` once closed
    pub async fn next(&mut self) -> Option<Vec<Hotel>> {
        if self.closed.load(Ordering::SeqCst) {
            return None;
        }
        self.receiver.recv().await
    }

    /// Detach from the store
    pub fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        self.receiver.close();
    }
}

impl Drop for FeaturedSubscription {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// The catalog and booking store
///
/// Object-safe: operations return boxed futures so stores can live
/// behind `Arc<dyn CatalogStore>` in the environment.
pub trait CatalogStore: Send + Sync {
    /// List hotels in insertion order, up to `limit` when given
    fn list_hotels(&self, limit: Option<usize>) -> CatalogFuture<Vec<Hotel>>;

    /// Fetch one hotel by id
    fn get_hotel(&self, hotel_id: HotelId) -> CatalogFuture<Hotel>;

    /// List the rooms belonging to a hotel
    fn list_rooms(&self, hotel_id: HotelId) -> CatalogFuture<Vec<Room>>;

    /// Hotels whose location key exactly matches `key`, up to `limit`
    fn search_hotels(&self, key: LocationKey, limit: Option<usize>) -> CatalogFuture<Vec<Hotel>>;

    /// Bookings scoped to one session, newest first
    fn list_bookings(&self, session: SessionId) -> CatalogFuture<Vec<Booking>>;

    /// Record a booking snapshot for a session
    fn create_booking(&self, session: Session, hotel: Hotel, room: Room)
    -> CatalogFuture<Booking>;

    /// Write the sample catalog; returns the number of records written
    ///
    /// Not idempotent: running it twice appends duplicate records. That
    /// matches the shipped behavior and is surfaced, not papered over.
    fn seed_sample_data(&self) -> CatalogFuture<usize>;

    /// Open a live subscription to the first `limit` hotels
    fn subscribe_featured(&self, limit: usize) -> CatalogFuture<FeaturedSubscription>;
}

struct FeaturedWatcher {
    sender: mpsc::UnboundedSender<Vec<Hotel>>,
    limit: usize,
    closed: Arc<AtomicBool>,
}

#[derive(Default)]
struct CatalogData {
    /// Insertion order is the listing order
    hotels: Vec<Hotel>,
    rooms: HashMap<HotelId, Vec<Room>>,
    bookings: HashMap<SessionId, Vec<Booking>>,
    watchers: Vec<FeaturedWatcher>,
}

impl CatalogData {
    fn notify_watchers(&mut self) {
        self.watchers.retain(|watcher| {
            if watcher.closed.load(Ordering::SeqCst) {
                return false;
            }
            let snapshot: Vec<Hotel> = self.hotels.iter().take(watcher.limit).cloned().collect();
            watcher.sender.send(snapshot).is_ok()
        });
    }
}

/// In-memory catalog store
///
/// Backs the storefront when a backend config is present; supports
/// one-shot write-failure injection for exercising the distinct
/// "charge succeeded, persistence failed" error path.
pub struct InMemoryCatalog {
    data: Arc<Mutex<CatalogData>>,
    fail_next_write: Arc<AtomicBool>,
    clock: Arc<dyn Clock>,
    app_id: String,
}

impl InMemoryCatalog {
    /// Empty catalog namespaced under `app_id`
    #[must_use]
    pub fn new(app_id: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            data: Arc::new(Mutex::new(CatalogData::default())),
            fail_next_write: Arc::new(AtomicBool::new(false)),
            clock,
            app_id: app_id.into(),
        }
    }

    /// Make the next booking write fail with a backend error
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }
}

impl CatalogStore for InMemoryCatalog {
    fn list_hotels(&self, limit: Option<usize>) -> CatalogFuture<Vec<Hotel>> {
        let data = Arc::clone(&self.data);
        Box::pin(async move {
            let data = data.lock().await;
            let hotels = match limit {
                Some(limit) => data.hotels.iter().take(limit).cloned().collect(),
                None => data.hotels.clone(),
            };
            Ok(hotels)
        })
    }

    fn get_hotel(&self, hotel_id: HotelId) -> CatalogFuture<Hotel> {
        let data = Arc::clone(&self.data);
        let path = paths::hotel(&self.app_id, &hotel_id);
        Box::pin(async move {
            let data = data.lock().await;
            data.hotels
                .iter()
                .find(|hotel| hotel.id == hotel_id)
                .cloned()
                .ok_or(CatalogError::NotFound { path })
        })
    }

    fn list_rooms(&self, hotel_id: HotelId) -> CatalogFuture<Vec<Room>> {
        let data = Arc::clone(&self.data);
        Box::pin(async move {
            let data = data.lock().await;
            Ok(data.rooms.get(&hotel_id).cloned().unwrap_or_default())
        })
    }

    fn search_hotels(&self, key: LocationKey, limit: Option<usize>) -> CatalogFuture<Vec<Hotel>> {
        let data = Arc::clone(&self.data);
        Box::pin(async move {
            let data = data.lock().await;
            let matches = data
                .hotels
                .iter()
                .filter(|hotel| hotel.location_key == key)
                .take(limit.unwrap_or(usize::MAX))
                .cloned()
                .collect();
            Ok(matches)
        })
    }

    fn list_bookings(&self, session: SessionId) -> CatalogFuture<Vec<Booking>> {
        let data = Arc::clone(&self.data);
        Box::pin(async move {
            let data = data.lock().await;
            let mut bookings = data.bookings.get(&session).cloned().unwrap_or_default();
            bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(bookings)
        })
    }

    fn create_booking(
        &self,
        session: Session,
        hotel: Hotel,
        room: Room,
    ) -> CatalogFuture<Booking> {
        let data = Arc::clone(&self.data);
        let fail_next_write = Arc::clone(&self.fail_next_write);
        let app_id = self.app_id.clone();
        let now = self.clock.now();
        Box::pin(async move {
            if fail_next_write.swap(false, Ordering::SeqCst) {
                warn!(session = %session.id, hotel = %hotel.id, "injected booking write failure");
                return Err(CatalogError::Backend {
                    message: "booking write rejected".to_string(),
                });
            }
            let booking = Booking::capture(&hotel, &room, now);
            let path = paths::booking(&app_id, &session.id, &booking.id);
            let mut data = data.lock().await;
            data.bookings
                .entry(session.id.clone())
                .or_default()
                .push(booking.clone());
            info!(%path, hotel = %hotel.id, room = %room.id, "booking recorded");
            Ok(booking)
        })
    }

    fn seed_sample_data(&self) -> CatalogFuture<usize> {
        let data = Arc::clone(&self.data);
        let app_id = self.app_id.clone();
        Box::pin(async move {
            let (hotels, rooms) = crate::seed::sample_catalog();
            let mut written = 0;
            let mut data = data.lock().await;
            for hotel in hotels {
                debug!(path = %paths::hotel(&app_id, &hotel.id), "seeding hotel");
                data.hotels.push(hotel);
                written += 1;
            }
            for room in rooms {
                data.rooms
                    .entry(room.hotel_id.clone())
                    .or_default()
                    .push(room);
                written += 1;
            }
            info!(written, "sample catalog seeded");
            data.notify_watchers();
            Ok(written)
        })
    }

    fn subscribe_featured(&self, limit: usize) -> CatalogFuture<FeaturedSubscription> {
        let data = Arc::clone(&self.data);
        Box::pin(async move {
            let (sender, receiver) = mpsc::unbounded_channel();
            let closed = Arc::new(AtomicBool::new(false));
            let mut data = data.lock().await;
            let snapshot: Vec<Hotel> = data.hotels.iter().take(limit).cloned().collect();
            // initial snapshot; receiver is still open, send cannot fail here
            let _ = sender.send(snapshot);
            data.watchers.push(FeaturedWatcher {
                sender,
                limit,
                closed: Arc::clone(&closed),
            });
            Ok(FeaturedSubscription { receiver, closed })
        })
    }
}

/// Store used when no backend config is present
///
/// Every operation fails with [`CatalogError::Unavailable`]; the
/// storefront renders its degraded views instead of hanging.
pub struct UnavailableCatalog;

impl CatalogStore for UnavailableCatalog {
    fn list_hotels(&self, _limit: Option<usize>) -> CatalogFuture<Vec<Hotel>> {
        Box::pin(async { Err(CatalogError::Unavailable) })
    }

    fn get_hotel(&self, _hotel_id: HotelId) -> CatalogFuture<Hotel> {
        Box::pin(async { Err(CatalogError::Unavailable) })
    }

    fn list_rooms(&self, _hotel_id: HotelId) -> CatalogFuture<Vec<Room>> {
        Box::pin(async { Err(CatalogError::Unavailable) })
    }

    fn search_hotels(&self, _key: LocationKey, _limit: Option<usize>) -> CatalogFuture<Vec<Hotel>> {
        Box::pin(async { Err(CatalogError::Unavailable) })
    }

    fn list_bookings(&self, _session: SessionId) -> CatalogFuture<Vec<Booking>> {
        Box::pin(async { Err(CatalogError::Unavailable) })
    }

    fn create_booking(
        &self,
        _session: Session,
        _hotel: Hotel,
        _room: Room,
    ) -> CatalogFuture<Booking> {
        Box::pin(async { Err(CatalogError::Unavailable) })
    }

    fn seed_sample_data(&self) -> CatalogFuture<usize> {
        Box::pin(async { Err(CatalogError::Unavailable) })
    }

    fn subscribe_featured(&self, _limit: usize) -> CatalogFuture<FeaturedSubscription> {
        Box::pin(async { Err(CatalogError::Unavailable) })
    }
}
