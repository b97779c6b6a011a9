//! The storefront state machine.
//!
//! One reducer owns navigation, search, identity hand-offs, and the
//! booking flow. All transitions are pure state updates; anything async
//! (catalog reads, sign-in, the simulated charge) runs as an effect that
//! feeds a completion action back in. Every accepted navigation scrolls
//! the viewport to the top.

use crate::catalog::{CatalogError, CatalogStore};
use crate::identity::{AuthProvider, resolve_initial_session};
use crate::payment::PaymentGateway;
use crate::search::{self, ALL_DESTINATIONS_LIMIT, FIRST_PAGE_LIMIT, SearchScope};
use crate::types::{
    Booking, CardForm, Hotel, HotelId, Loadable, NavRequest, Page, PaymentPage, PaymentPhase,
    PaymentSummary, Room, SearchCriteria, Session,
};
use std::sync::Arc;
use stayscout_core::effect::{self, Effect};
use stayscout_core::environment::{Clock, Viewport};
use stayscout_core::reducer::{Effects, Reducer};
use stayscout_core::smallvec;
use tracing::{debug, info, warn};

/// Injected dependencies for the storefront reducer
#[derive(Clone)]
pub struct StorefrontEnvironment {
    /// Time source for booking timestamps
    pub clock: Arc<dyn Clock>,
    /// Identity backend
    pub auth: Arc<dyn AuthProvider>,
    /// Catalog and booking store
    pub catalog: Arc<dyn CatalogStore>,
    /// Simulated payment processor
    pub payments: Arc<dyn PaymentGateway>,
    /// Scroll target for page transitions
    pub viewport: Arc<dyn Viewport>,
    /// Pre-issued auth token, if the host supplied one
    pub auth_token: Option<String>,
}

/// Whether initial session resolution has finished
///
/// `Resolving` renders the blocking "authenticating" view; the fallback
/// chain guarantees it always ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    /// The startup fallback chain is still running
    Resolving,
    /// Resolution finished (possibly with no session)
    Ready,
}

/// Complete storefront state
#[derive(Clone, Debug, PartialEq)]
pub struct StorefrontState {
    /// Active page and its data
    pub page: Page,
    /// Current identity, if any
    pub session: Option<Session>,
    /// Startup session-resolution phase
    pub auth_phase: AuthPhase,
    /// Whether a catalog backend is configured
    pub catalog_available: bool,
    /// Sequence number of the newest submitted search; completions
    /// carrying an older number are stale and discarded
    pub search_seq: u64,
    /// Transient banner message, if any
    pub notice: Option<String>,
}

impl StorefrontState {
    /// Initial state, on the home page with session resolution pending
    #[must_use]
    pub fn new(catalog_available: bool) -> Self {
        Self {
            page: Page::Home {
                featured: if catalog_available {
                    Loadable::Loading
                } else {
                    Loadable::Unavailable
                },
            },
            session: None,
            auth_phase: AuthPhase::Resolving,
            catalog_available,
            search_seq: 0,
            notice: None,
        }
    }
}

/// Everything that can happen in the storefront
#[derive(Clone, Debug)]
pub enum StorefrontAction {
    /// The app started; kick off session resolution and the featured load
    AppStarted,
    /// The startup fallback chain finished
    SessionResolved {
        /// The resolved session, or `None` if every arm failed
        session: Option<Session>,
    },
    /// The auth provider reported a session change from outside the app
    SessionChanged {
        /// The new session, or `None` on sign-out
        session: Option<Session>,
    },
    /// The user asked to sign in interactively
    SignInRequested,
    /// Interactive sign-in finished
    SignInCompleted {
        /// The signed-in session
        session: Session,
    },
    /// Interactive sign-in failed or was dismissed
    SignInFailed {
        /// User-visible reason
        reason: String,
    },
    /// The user asked to sign out
    SignOutRequested,
    /// Sign-out finished
    SignOutCompleted,
    /// A view or deep link requested a page
    Navigate(NavRequest),
    /// A featured-hotels listing arrived, from the one-shot load or a
    /// live subscription snapshot; applied only while home is showing
    FeaturedLoaded {
        /// Loaded hotels or the failure
        result: Result<Vec<Hotel>, CatalogError>,
    },
    /// The user submitted the search form
    SearchSubmitted {
        /// Form contents
        criteria: SearchCriteria,
    },
    /// The user asked to expand a truncated result set
    ShowAllRequested,
    /// A search query finished
    SearchCompleted {
        /// Sequence number of the search this answers
        seq: u64,
        /// Limit the query ran with
        limit: Option<usize>,
        /// Matching hotels or the failure
        result: Result<Vec<Hotel>, CatalogError>,
    },
    /// The hotel-details load finished
    HotelDetailsLoaded {
        /// Hotel the load was for
        hotel_id: HotelId,
        /// Hotel and its rooms, or the failure
        result: Result<(Hotel, Vec<Room>), CatalogError>,
    },
    /// The user picked a room on the details page
    RoomSelected {
        /// Hotel being booked
        hotel: Hotel,
        /// Chosen room
        room: Room,
    },
    /// The user submitted the card form
    PaymentSubmitted {
        /// Form contents
        card: CardForm,
    },
    /// The simulated charge was declined; no money moved, retry is safe
    ChargeFailed {
        /// User-visible reason
        reason: String,
    },
    /// The charge succeeded and the booking was persisted
    BookingRecorded {
        /// The recorded booking
        booking: Booking,
    },
    /// The charge succeeded but persistence failed; never auto-retried
    BookingPersistFailed {
        /// Backend failure detail
        message: String,
    },
    /// The bookings-page load finished
    BookingsLoaded {
        /// Session bookings or the failure
        result: Result<Vec<Booking>, CatalogError>,
    },
    /// The user asked to seed the sample catalog
    SeedRequested,
    /// Seeding finished
    SeedCompleted {
        /// Records written, or the failure
        result: Result<usize, CatalogError>,
    },
}

/// The storefront reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct StorefrontReducer;

impl Reducer for StorefrontReducer {
    type State = StorefrontState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            StorefrontAction::AppStarted => {
                debug!(catalog_available = state.catalog_available, "app started");
                let auth = Arc::clone(&env.auth);
                let token = env.auth_token.clone();
                let mut effects: Effects<StorefrontAction> = smallvec![effect::future(async move {
                    let session = resolve_initial_session(&auth, token.as_deref()).await;
                    Some(StorefrontAction::SessionResolved { session })
                })];
                if state.catalog_available {
                    effects.push(load_featured(env));
                }
                effects
            }

            StorefrontAction::SessionResolved { session } => {
                state.auth_phase = AuthPhase::Ready;
                state.session = session;
                Effects::new()
            }

            StorefrontAction::SessionChanged { session } => {
                state.session = session;
                Effects::new()
            }

            StorefrontAction::SignInRequested => sign_in_interactively(env),

            StorefrontAction::SignInCompleted { session } => {
                info!(session = %session.id, "interactive sign-in completed");
                state.notice = None;
                state.session = Some(session);
                Effects::new()
            }

            StorefrontAction::SignInFailed { reason } => {
                warn!(%reason, "interactive sign-in failed");
                state.notice = Some(format!("Sign-in failed: {reason}"));
                Effects::new()
            }

            StorefrontAction::SignOutRequested => {
                let auth = Arc::clone(&env.auth);
                smallvec![effect::future(async move {
                    auth.sign_out().await;
                    Some(StorefrontAction::SignOutCompleted)
                })]
            }

            StorefrontAction::SignOutCompleted => {
                state.session = None;
                navigate(state, NavRequest::Home, env)
            }

            StorefrontAction::Navigate(request) => navigate(state, request, env),

            StorefrontAction::FeaturedLoaded { result } => {
                if let Page::Home { featured } = &mut state.page {
                    *featured = match result {
                        Ok(hotels) => Loadable::Ready(hotels),
                        Err(CatalogError::Unavailable) => Loadable::Unavailable,
                        Err(error) => Loadable::Failed(error.to_string()),
                    };
                }
                Effects::new()
            }

            StorefrontAction::SearchSubmitted { criteria } => {
                submit_search(state, criteria, Some(FIRST_PAGE_LIMIT), env)
            }

            StorefrontAction::ShowAllRequested => {
                let Page::SearchResults { criteria, .. } = &state.page else {
                    return Effects::new();
                };
                submit_search(state, criteria.clone(), None, env)
            }

            StorefrontAction::SearchCompleted { seq, limit, result } => {
                if seq != state.search_seq {
                    debug!(seq, current = state.search_seq, "discarding stale search result");
                    return Effects::new();
                }
                if let Page::SearchResults {
                    results,
                    can_show_all,
                    ..
                } = &mut state.page
                {
                    match result {
                        Ok(hotels) => {
                            *can_show_all = search::can_show_all(limit, hotels.len());
                            *results = Loadable::Ready(hotels);
                        }
                        Err(CatalogError::Unavailable) => {
                            *can_show_all = false;
                            *results = Loadable::Unavailable;
                        }
                        Err(error) => {
                            *can_show_all = false;
                            *results = Loadable::Failed(error.to_string());
                        }
                    }
                }
                Effects::new()
            }

            StorefrontAction::HotelDetailsLoaded { hotel_id, result } => {
                let Page::HotelDetails {
                    hotel_id: current, ..
                } = &state.page
                else {
                    return Effects::new();
                };
                if *current != hotel_id {
                    return Effects::new();
                }
                state.page = match result {
                    Ok(details) => Page::HotelDetails {
                        hotel_id,
                        details: Loadable::Ready(details),
                    },
                    Err(CatalogError::NotFound { .. }) => Page::HotelNotFound { hotel_id },
                    Err(error) => Page::HotelDetails {
                        hotel_id,
                        details: Loadable::Failed(error.to_string()),
                    },
                };
                Effects::new()
            }

            StorefrontAction::RoomSelected { hotel, room } => navigate(
                state,
                NavRequest::Payment {
                    hotel: Some(hotel),
                    room: Some(room),
                },
                env,
            ),

            StorefrontAction::PaymentSubmitted { card } => submit_payment(state, card, env),

            StorefrontAction::ChargeFailed { reason } => {
                if let Page::Payment(payment) = &mut state.page {
                    payment.phase = PaymentPhase::Editing {
                        error: Some(reason),
                    };
                }
                Effects::new()
            }

            StorefrontAction::BookingRecorded { booking } => {
                info!(booking = %booking.id, hotel = %booking.hotel.id, "booking recorded");
                state.notice = Some("Booking confirmed!".to_string());
                navigate(state, NavRequest::Bookings, env)
            }

            StorefrontAction::BookingPersistFailed { message } => {
                warn!(%message, "charge succeeded but booking persistence failed");
                if let Page::Payment(payment) = &mut state.page {
                    payment.phase = PaymentPhase::PersistFailed {
                        message: format!(
                            "Your payment went through, but we could not record the booking. \
                             Please contact support before retrying. ({message})"
                        ),
                    };
                }
                Effects::new()
            }

            StorefrontAction::BookingsLoaded { result } => {
                if let Page::Bookings { bookings } = &mut state.page {
                    *bookings = match result {
                        Ok(list) => Loadable::Ready(list),
                        Err(CatalogError::Unavailable) => Loadable::Unavailable,
                        Err(error) => Loadable::Failed(error.to_string()),
                    };
                }
                Effects::new()
            }

            StorefrontAction::SeedRequested => {
                if !state.catalog_available {
                    state.notice = Some("Cannot seed: no catalog backend is configured.".to_string());
                    return Effects::new();
                }
                let catalog = Arc::clone(&env.catalog);
                smallvec![effect::future(async move {
                    let result = catalog.seed_sample_data().await;
                    Some(StorefrontAction::SeedCompleted { result })
                })]
            }

            StorefrontAction::SeedCompleted { result } => {
                match result {
                    Ok(written) => {
                        state.notice = Some(format!("Sample catalog seeded ({written} records)."));
                    }
                    Err(error) => {
                        state.notice = Some(format!("Seeding failed: {error}"));
                    }
                }
                Effects::new()
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Transition helpers
// ----------------------------------------------------------------------------

/// Apply a navigation request
///
/// Guards run first: bookings without a session redirects home, payment
/// without a session starts interactive sign-in without leaving the
/// current page. Every accepted transition scrolls the viewport to the
/// top.
fn navigate(
    state: &mut StorefrontState,
    request: NavRequest,
    env: &StorefrontEnvironment,
) -> Effects<StorefrontAction> {
    match request {
        NavRequest::Home => {
            state.page = Page::Home {
                featured: if state.catalog_available {
                    Loadable::Loading
                } else {
                    Loadable::Unavailable
                },
            };
            env.viewport.scroll_to_top();
            if state.catalog_available {
                smallvec![load_featured(env)]
            } else {
                Effects::new()
            }
        }

        NavRequest::About => {
            state.page = Page::About;
            env.viewport.scroll_to_top();
            Effects::new()
        }

        NavRequest::Bookings => {
            if state.session.is_none() {
                debug!("bookings requested without a session, redirecting home");
                return navigate(state, NavRequest::Home, env);
            }
            if !state.catalog_available {
                state.page = Page::Bookings {
                    bookings: Loadable::Unavailable,
                };
                env.viewport.scroll_to_top();
                return Effects::new();
            }
            state.page = Page::Bookings {
                bookings: Loadable::Loading,
            };
            env.viewport.scroll_to_top();
            let catalog = Arc::clone(&env.catalog);
            let Some(session) = state.session.clone() else {
                return Effects::new();
            };
            smallvec![effect::future(async move {
                let result = catalog.list_bookings(session.id).await;
                Some(StorefrontAction::BookingsLoaded { result })
            })]
        }

        NavRequest::SearchResults { criteria } => {
            submit_search(state, criteria, Some(FIRST_PAGE_LIMIT), env)
        }

        NavRequest::HotelDetails { hotel_id } => {
            state.page = Page::HotelDetails {
                hotel_id: hotel_id.clone(),
                details: if state.catalog_available {
                    Loadable::Loading
                } else {
                    Loadable::Unavailable
                },
            };
            env.viewport.scroll_to_top();
            if !state.catalog_available {
                return Effects::new();
            }
            let catalog = Arc::clone(&env.catalog);
            smallvec![effect::future(async move {
                let result = async {
                    let hotel = catalog.get_hotel(hotel_id.clone()).await?;
                    let rooms = catalog.list_rooms(hotel_id.clone()).await?;
                    Ok((hotel, rooms))
                }
                .await;
                Some(StorefrontAction::HotelDetailsLoaded { hotel_id, result })
            })]
        }

        NavRequest::Payment { hotel, room } => {
            if state.session.is_none() {
                debug!("payment requested without a session, starting interactive sign-in");
                return sign_in_interactively(env);
            }
            match (hotel, room) {
                (Some(hotel), Some(room)) => {
                    state.page = Page::Payment(PaymentPage {
                        hotel,
                        room,
                        phase: PaymentPhase::Editing { error: None },
                    });
                }
                _ => {
                    debug!("payment requested without a selection");
                    state.page = Page::PaymentUnavailable;
                }
            }
            env.viewport.scroll_to_top();
            Effects::new()
        }
    }
}

/// Validate and dispatch a search
fn submit_search(
    state: &mut StorefrontState,
    criteria: SearchCriteria,
    limit: Option<usize>,
    env: &StorefrontEnvironment,
) -> Effects<StorefrontAction> {
    let scope = match search::plan(&criteria) {
        Ok(scope) => scope,
        Err(message) => {
            state.notice = Some(message);
            return Effects::new();
        }
    };

    state.search_seq += 1;
    let seq = state.search_seq;
    state.notice = None;
    state.page = Page::SearchResults {
        criteria,
        results: if state.catalog_available {
            Loadable::Loading
        } else {
            Loadable::Unavailable
        },
        can_show_all: false,
    };
    env.viewport.scroll_to_top();

    if !state.catalog_available {
        return Effects::new();
    }

    let catalog = Arc::clone(&env.catalog);
    match scope {
        SearchScope::Location(key) => {
            debug!(%key, ?limit, seq, "searching by location");
            smallvec![effect::future(async move {
                let result = catalog.search_hotels(key, limit).await;
                Some(StorefrontAction::SearchCompleted { seq, limit, result })
            })]
        }
        SearchScope::All => {
            debug!(seq, "listing the catalog");
            smallvec![effect::future(async move {
                let result = catalog.list_hotels(Some(ALL_DESTINATIONS_LIMIT)).await;
                Some(StorefrontAction::SearchCompleted {
                    seq,
                    limit: Some(ALL_DESTINATIONS_LIMIT),
                    result,
                })
            })]
        }
    }
}

/// Validate the card form and run the charge-then-persist sequence
///
/// The charge and the booking write are one effect: a declined charge
/// reports [`StorefrontAction::ChargeFailed`] (retry is safe, no money
/// moved); a write failure after a successful charge reports the
/// distinct [`StorefrontAction::BookingPersistFailed`] and is never
/// retried automatically.
fn submit_payment(
    state: &mut StorefrontState,
    card: CardForm,
    env: &StorefrontEnvironment,
) -> Effects<StorefrontAction> {
    let Page::Payment(payment) = &mut state.page else {
        return Effects::new();
    };
    if matches!(payment.phase, PaymentPhase::Processing) {
        return Effects::new();
    }

    let missing = card.missing_fields();
    if !missing.is_empty() {
        payment.phase = PaymentPhase::Editing {
            error: Some(format!("Please fill in: {}.", missing.join(", "))),
        };
        return Effects::new();
    }

    let Some(session) = state.session.clone() else {
        payment.phase = PaymentPhase::Editing {
            error: Some("Please sign in before paying.".to_string()),
        };
        return Effects::new();
    };

    let hotel = payment.hotel.clone();
    let room = payment.room.clone();
    let amount = PaymentSummary::for_room(&room).total;
    payment.phase = PaymentPhase::Processing;

    let payments = Arc::clone(&env.payments);
    let catalog = Arc::clone(&env.catalog);
    smallvec![effect::future(async move {
        if let Err(error) = payments.charge(card, amount).await {
            return Some(StorefrontAction::ChargeFailed {
                reason: error.to_string(),
            });
        }
        match catalog.create_booking(session, hotel, room).await {
            Ok(booking) => Some(StorefrontAction::BookingRecorded { booking }),
            Err(error) => Some(StorefrontAction::BookingPersistFailed {
                message: error.to_string(),
            }),
        }
    })]
}

/// Start the interactive sign-in effect without a page transition
fn sign_in_interactively(env: &StorefrontEnvironment) -> Effects<StorefrontAction> {
    let auth = Arc::clone(&env.auth);
    smallvec![effect::future(async move {
        match auth.sign_in_interactive().await {
            Ok(session) => Some(StorefrontAction::SignInCompleted { session }),
            Err(error) => Some(StorefrontAction::SignInFailed {
                reason: error.to_string(),
            }),
        }
    })]
}

/// Load the featured-hotels listing for the home page
fn load_featured(env: &StorefrontEnvironment) -> Effect<StorefrontAction> {
    let catalog = Arc::clone(&env.catalog);
    effect::future(async move {
        let result = catalog.list_hotels(Some(FIRST_PAGE_LIMIT)).await;
        Some(StorefrontAction::FeaturedLoaded { result })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::identity::InMemoryAuthProvider;
    use crate::payment::SimulatedGateway;
    use crate::types::{AuthKind, SessionId};
    use stayscout_testing::ReducerTest;
    use stayscout_testing::assertions::{
        assert_effects_count, assert_has_future_effect, assert_no_effects,
    };
    use stayscout_testing::mocks::{RecordingViewport, test_clock};

    fn env_with_viewport(viewport: Arc<RecordingViewport>) -> StorefrontEnvironment {
        let clock: Arc<dyn Clock> = Arc::new(test_clock());
        StorefrontEnvironment {
            clock: Arc::clone(&clock),
            auth: Arc::new(InMemoryAuthProvider::new()),
            catalog: Arc::new(InMemoryCatalog::new("test-app", Arc::clone(&clock))),
            payments: Arc::new(SimulatedGateway::instant()),
            viewport,
            auth_token: None,
        }
    }

    fn env() -> StorefrontEnvironment {
        env_with_viewport(RecordingViewport::shared())
    }

    fn session() -> Session {
        Session {
            id: SessionId::new("session-1"),
            display_name: None,
            kind: AuthKind::Anonymous,
        }
    }

    #[test]
    fn blank_search_is_rejected_without_a_transition() {
        let env = env();
        let mut state = StorefrontState::new(true);
        let effects = StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::SearchSubmitted {
                criteria: SearchCriteria::for_destination("   "),
            },
            &env,
        );
        assert!(effects.is_empty());
        assert!(matches!(state.page, Page::Home { .. }));
        assert!(state.notice.is_some());
    }

    #[test]
    fn stale_search_completion_is_discarded() {
        let env = env();
        let mut state = StorefrontState::new(true);
        StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::SearchSubmitted {
                criteria: SearchCriteria::for_destination("Delhi"),
            },
            &env,
        );
        StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::SearchSubmitted {
                criteria: SearchCriteria::for_destination("Mumbai"),
            },
            &env,
        );

        // completion for the first (superseded) search
        StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::SearchCompleted {
                seq: 1,
                limit: Some(FIRST_PAGE_LIMIT),
                result: Ok(vec![]),
            },
            &env,
        );
        let Page::SearchResults { results, .. } = &state.page else {
            panic!("expected search results page");
        };
        assert_eq!(*results, Loadable::Loading);
    }

    #[test]
    fn bookings_without_a_session_redirects_home() {
        let env = env();
        let mut state = StorefrontState::new(true);
        state.page = Page::About;
        StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::Navigate(NavRequest::Bookings),
            &env,
        );
        assert!(matches!(state.page, Page::Home { .. }));
    }

    #[test]
    fn payment_without_a_session_signs_in_without_leaving_the_page() {
        let env = env();
        let mut state = StorefrontState::new(true);
        state.page = Page::About;
        let effects = StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::Navigate(NavRequest::Payment {
                hotel: None,
                room: None,
            }),
            &env,
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(state.page, Page::About);
    }

    #[test]
    fn partial_payment_payload_lands_on_the_error_view() {
        let env = env();
        let mut state = StorefrontState::new(true);
        state.session = Some(session());
        StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::Navigate(NavRequest::Payment {
                hotel: None,
                room: None,
            }),
            &env,
        );
        assert_eq!(state.page, Page::PaymentUnavailable);
    }

    #[test]
    fn every_accepted_transition_scrolls_to_top() {
        let viewport = RecordingViewport::shared();
        let env = env_with_viewport(Arc::clone(&viewport));
        let mut state = StorefrontState::new(true);
        state.session = Some(session());

        StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::Navigate(NavRequest::About),
            &env,
        );
        StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::Navigate(NavRequest::Bookings),
            &env,
        );
        StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::Navigate(NavRequest::Home),
            &env,
        );
        assert_eq!(viewport.scroll_count(), 3);
    }

    #[test]
    fn incomplete_card_form_is_rejected_inline() {
        let env = env();
        let mut state = StorefrontState::new(true);
        state.session = Some(session());
        let (hotels, rooms) = crate::seed::sample_catalog();
        state.page = Page::Payment(PaymentPage {
            hotel: hotels[0].clone(),
            room: rooms[0].clone(),
            phase: PaymentPhase::Editing { error: None },
        });

        let effects = StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::PaymentSubmitted {
                card: CardForm::default(),
            },
            &env,
        );
        assert!(effects.is_empty());
        let Page::Payment(payment) = &state.page else {
            panic!("expected payment page");
        };
        assert!(matches!(
            &payment.phase,
            PaymentPhase::Editing { error: Some(_) }
        ));
    }

    #[test]
    fn persist_failure_is_terminal_on_the_payment_page() {
        let env = env();
        let mut state = StorefrontState::new(true);
        state.session = Some(session());
        let (hotels, rooms) = crate::seed::sample_catalog();
        state.page = Page::Payment(PaymentPage {
            hotel: hotels[0].clone(),
            room: rooms[0].clone(),
            phase: PaymentPhase::Processing,
        });

        let effects = StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::BookingPersistFailed {
                message: "write rejected".to_string(),
            },
            &env,
        );
        assert!(effects.is_empty());
        let Page::Payment(payment) = &state.page else {
            panic!("expected payment page");
        };
        let PaymentPhase::PersistFailed { message } = &payment.phase else {
            panic!("expected persist-failed phase");
        };
        assert!(message.contains("contact support"));
    }

    #[test]
    fn about_navigation_is_a_pure_transition() {
        ReducerTest::new(StorefrontReducer)
            .with_env(env())
            .given_state(StorefrontState::new(true))
            .when_action(StorefrontAction::Navigate(NavRequest::About))
            .then_state(|state| assert_eq!(state.page, Page::About))
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn app_start_resolves_the_session_and_loads_featured() {
        ReducerTest::new(StorefrontReducer)
            .with_env(env())
            .given_state(StorefrontState::new(true))
            .when_action(StorefrontAction::AppStarted)
            .then_state(|state| assert_eq!(state.auth_phase, AuthPhase::Resolving))
            .then_effects(|effects| assert_effects_count(effects, 2))
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn submitted_search_issues_a_single_query_effect() {
        ReducerTest::new(StorefrontReducer)
            .with_env(env())
            .given_state(StorefrontState::new(true))
            .when_action(StorefrontAction::SearchSubmitted {
                criteria: SearchCriteria::for_destination("Delhi"),
            })
            .then_state(|state| {
                assert_eq!(state.search_seq, 1);
                assert!(matches!(
                    state.page,
                    Page::SearchResults {
                        results: Loadable::Loading,
                        ..
                    }
                ));
            })
            .then_effects(|effects| assert_effects_count(effects, 1))
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn sign_out_returns_home() {
        let env = env();
        let mut state = StorefrontState::new(true);
        state.session = Some(session());
        state.page = Page::About;
        StorefrontReducer.reduce(&mut state, StorefrontAction::SignOutCompleted, &env);
        assert!(state.session.is_none());
        assert!(matches!(state.page, Page::Home { .. }));
    }

    #[test]
    fn unavailable_catalog_issues_no_search_effect() {
        let env = env();
        let mut state = StorefrontState::new(false);
        let effects = StorefrontReducer.reduce(
            &mut state,
            StorefrontAction::SearchSubmitted {
                criteria: SearchCriteria::for_destination("Delhi"),
            },
            &env,
        );
        assert!(effects.is_empty());
        let Page::SearchResults { results, .. } = &state.page else {
            panic!("expected search results page");
        };
        assert_eq!(*results, Loadable::Unavailable);
    }
}
