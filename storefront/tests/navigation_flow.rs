//! Navigation guards and transitions: session-gated pages, the payment
//! error view, scroll-to-top, sign-out, hotel deep links, and the
//! degraded no-backend mode.

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use common::harness;
use std::sync::Arc;
use stayscout::bootstrap;
use stayscout::config::Config;
use stayscout::identity::{AuthProvider, InMemoryAuthProvider};
use stayscout::reducer::{AuthPhase, StorefrontAction};
use stayscout::types::{HotelId, Loadable, NavRequest, Page};

#[tokio::test]
async fn bookings_without_a_session_redirects_home() {
    let harness = harness();
    // no start(): no session has been resolved yet
    harness
        .send_and_settle(StorefrontAction::Navigate(NavRequest::Bookings))
        .await;

    harness
        .store
        .state(|state| assert!(matches!(state.page, Page::Home { .. })))
        .await;
}

#[tokio::test]
async fn payment_without_a_session_triggers_interactive_sign_in() {
    let harness = harness();
    harness
        .send_and_settle(StorefrontAction::Navigate(NavRequest::Payment {
            hotel: None,
            room: None,
        }))
        .await;

    harness
        .store
        .state(|state| {
            // signed in, but still on the page the user was on
            assert!(state.session.is_some());
            assert!(matches!(state.page, Page::Home { .. }));
        })
        .await;
}

#[tokio::test]
async fn dismissed_sign_in_surfaces_a_notice() {
    let harness = harness();
    harness.auth.deny_interactive_sign_in();

    harness
        .send_and_settle(StorefrontAction::Navigate(NavRequest::Payment {
            hotel: None,
            room: None,
        }))
        .await;

    harness
        .store
        .state(|state| {
            assert!(state.session.is_none());
            assert!(
                state
                    .notice
                    .as_deref()
                    .is_some_and(|n| n.contains("Sign-in failed"))
            );
        })
        .await;
}

#[tokio::test]
async fn payment_with_a_partial_payload_shows_the_error_view() {
    let harness = harness();
    harness.start().await;

    harness
        .send_and_settle(StorefrontAction::Navigate(NavRequest::Payment {
            hotel: None,
            room: None,
        }))
        .await;

    harness
        .store
        .state(|state| assert_eq!(state.page, Page::PaymentUnavailable))
        .await;
}

#[tokio::test]
async fn every_transition_scrolls_to_top() {
    let harness = harness();
    harness.start().await;
    let before = harness.viewport.scroll_count();

    for request in [NavRequest::About, NavRequest::Home, NavRequest::About] {
        harness
            .send_and_settle(StorefrontAction::Navigate(request))
            .await;
    }
    assert_eq!(harness.viewport.scroll_count() - before, 3);
}

#[tokio::test]
async fn sign_out_clears_the_session_and_returns_home() {
    let harness = harness();
    harness.start().await;
    harness
        .send_and_settle(StorefrontAction::Navigate(NavRequest::About))
        .await;

    harness
        .send_and_settle(StorefrontAction::SignOutRequested)
        .await;

    harness
        .store
        .state(|state| {
            assert!(state.session.is_none());
            assert!(matches!(state.page, Page::Home { .. }));
        })
        .await;
    assert!(harness.auth.current_session().is_none());
}

#[tokio::test]
async fn unknown_hotel_deep_link_shows_not_found() {
    let harness = harness();
    harness.start().await;
    harness.seed().await;

    harness
        .send_and_settle(StorefrontAction::Navigate(NavRequest::HotelDetails {
            hotel_id: HotelId::new("hotel_that_never_existed"),
        }))
        .await;

    harness
        .store
        .state(|state| {
            assert_eq!(
                state.page,
                Page::HotelNotFound {
                    hotel_id: HotelId::new("hotel_that_never_existed")
                }
            );
        })
        .await;
}

#[tokio::test]
async fn hotel_details_load_hotel_and_rooms() {
    let harness = harness();
    harness.start().await;
    harness.seed().await;

    harness
        .send_and_settle(StorefrontAction::Navigate(NavRequest::HotelDetails {
            hotel_id: HotelId::new("del_leela"),
        }))
        .await;

    harness
        .store
        .state(|state| {
            let Page::HotelDetails {
                details: Loadable::Ready((hotel, rooms)),
                ..
            } = &state.page
            else {
                panic!("expected loaded details, got {:?}", state.page);
            };
            assert_eq!(hotel.name, "The Leela Palace");
            assert_eq!(rooms.len(), 2);
        })
        .await;
}

#[tokio::test]
async fn no_backend_renders_degraded_pages_without_requests() {
    let store = bootstrap::build_store(&Config::from_vars(|_| None));
    let mut handle = store
        .send(StorefrontAction::AppStarted)
        .await
        .expect("startup");
    handle.wait().await;
    let mut handle = store
        .send(StorefrontAction::SeedRequested)
        .await
        .expect("send");
    handle.wait().await;

    store
        .state(|state| {
            assert_eq!(state.auth_phase, AuthPhase::Ready);
            let Page::Home { featured } = &state.page else {
                panic!("expected home page");
            };
            assert_eq!(*featured, Loadable::Unavailable);
            assert!(
                state
                    .notice
                    .as_deref()
                    .is_some_and(|n| n.contains("Cannot seed"))
            );
        })
        .await;
}

#[tokio::test]
async fn startup_always_leaves_the_authenticating_view() {
    // even with every sign-in arm failing, resolution still finishes
    let auth = InMemoryAuthProvider::new();
    auth.deny_token_sign_in();
    auth.deny_anonymous_sign_in();

    let harness = common::harness_with_auth(Arc::new(auth));
    harness.start().await;

    harness
        .store
        .state(|state| {
            assert_eq!(state.auth_phase, AuthPhase::Ready);
            assert!(state.session.is_none());
        })
        .await;
}
