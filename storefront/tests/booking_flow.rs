//! The booking flow end to end: room selection, card validation, the
//! simulated charge, booking persistence, and both failure classes.

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use common::{Harness, harness, harness_with_gateway};
use std::sync::Arc;
use stayscout::catalog::CatalogStore;
use stayscout::payment::SimulatedGateway;
use stayscout::reducer::StorefrontAction;
use stayscout::types::{
    BookingStatus, CardForm, Hotel, HotelId, Loadable, Page, PaymentPhase, PaymentSummary, Room,
    SUMMARY_NIGHTS,
};

fn valid_card() -> CardForm {
    CardForm {
        name: "A. Traveler".to_string(),
        number: "4242 4242 4242 4242".to_string(),
        expiry: "12/27".to_string(),
        cvc: "123".to_string(),
    }
}

async fn open_payment_page(harness: &Harness, hotel_id: &str) -> (Hotel, Room) {
    let hotel = harness
        .catalog
        .get_hotel(HotelId::new(hotel_id))
        .await
        .expect("seeded hotel");
    let rooms = harness
        .catalog
        .list_rooms(hotel.id.clone())
        .await
        .expect("seeded rooms");
    let room = rooms.first().expect("at least one room").clone();

    harness
        .send_and_settle(StorefrontAction::RoomSelected {
            hotel: hotel.clone(),
            room: room.clone(),
        })
        .await;
    (hotel, room)
}

async fn session_bookings(harness: &Harness) -> Vec<stayscout::types::Booking> {
    let session_id = harness
        .store
        .state(|state| state.session.as_ref().map(|s| s.id.clone()))
        .await
        .expect("session");
    harness
        .catalog
        .list_bookings(session_id)
        .await
        .expect("bookings")
}

#[tokio::test]
async fn booking_records_a_denormalized_snapshot() {
    let harness = harness();
    harness.start().await;
    harness.seed().await;
    let (hotel, room) = open_payment_page(&harness, "del_leela").await;

    harness
        .send_and_settle(StorefrontAction::PaymentSubmitted { card: valid_card() })
        .await;
    // the bookings page load is a second-level effect
    harness
        .wait_for_state(|state| {
            matches!(
                state.page,
                Page::Bookings {
                    bookings: Loadable::Ready(_)
                }
            )
        })
        .await;

    harness
        .store
        .state(|state| {
            let Page::Bookings {
                bookings: Loadable::Ready(bookings),
            } = &state.page
            else {
                panic!("expected loaded bookings, got {:?}", state.page);
            };
            assert_eq!(bookings.len(), 1);
            let booking = &bookings[0];
            assert_eq!(booking.status, BookingStatus::Confirmed);
            assert_eq!(booking.hotel.id, hotel.id);
            assert_eq!(booking.hotel.name, hotel.name);
            assert_eq!(booking.room.id, room.id);
            assert_eq!(booking.room.price, room.price);
        })
        .await;
}

#[tokio::test]
async fn total_charges_exactly_one_night() {
    // the summary is hard-coded to one night regardless of the date span
    let harness = harness();
    harness.start().await;
    harness.seed().await;
    let (_, room) = open_payment_page(&harness, "del_leela").await;

    let summary = PaymentSummary::for_room(&room);
    assert_eq!(summary.nights, SUMMARY_NIGHTS);
    assert_eq!(summary.total, room.price);
    assert_eq!(room.price, 430);
}

#[tokio::test]
async fn missing_card_fields_block_the_charge() {
    let harness = harness();
    harness.start().await;
    harness.seed().await;
    open_payment_page(&harness, "del_leela").await;

    harness
        .send_and_settle(StorefrontAction::PaymentSubmitted {
            card: CardForm {
                cvc: String::new(),
                ..valid_card()
            },
        })
        .await;

    harness
        .store
        .state(|state| {
            let Page::Payment(payment) = &state.page else {
                panic!("expected payment page");
            };
            let PaymentPhase::Editing { error: Some(error) } = &payment.phase else {
                panic!("expected inline validation error, got {:?}", payment.phase);
            };
            assert!(error.contains("CVC"));
        })
        .await;
    assert!(session_bookings(&harness).await.is_empty());
}

#[tokio::test]
async fn declined_charge_returns_to_editing() {
    let harness = harness_with_gateway(Arc::new(SimulatedGateway::declining()));
    harness.start().await;
    harness.seed().await;
    open_payment_page(&harness, "del_leela").await;

    harness
        .send_and_settle(StorefrontAction::PaymentSubmitted { card: valid_card() })
        .await;

    harness
        .store
        .state(|state| {
            let Page::Payment(payment) = &state.page else {
                panic!("expected payment page");
            };
            assert!(matches!(
                &payment.phase,
                PaymentPhase::Editing { error: Some(_) }
            ));
        })
        .await;
    assert!(session_bookings(&harness).await.is_empty());
}

#[tokio::test]
async fn persist_failure_after_charge_is_terminal_and_not_retried() {
    let harness = harness();
    harness.start().await;
    harness.seed().await;
    open_payment_page(&harness, "del_leela").await;

    harness.catalog.fail_next_write();
    harness
        .send_and_settle(StorefrontAction::PaymentSubmitted { card: valid_card() })
        .await;

    harness
        .store
        .state(|state| {
            let Page::Payment(payment) = &state.page else {
                panic!("expected payment page");
            };
            let PaymentPhase::PersistFailed { message } = &payment.phase else {
                panic!("expected persist-failed phase, got {:?}", payment.phase);
            };
            assert!(message.contains("contact support"));
        })
        .await;

    // no automatic retry: the catalog never saw a second write
    assert!(session_bookings(&harness).await.is_empty());
}

#[tokio::test]
async fn snapshot_survives_later_catalog_changes() {
    let harness = harness();
    harness.start().await;
    harness.seed().await;
    let (hotel, _) = open_payment_page(&harness, "del_leela").await;

    harness
        .send_and_settle(StorefrontAction::PaymentSubmitted { card: valid_card() })
        .await;

    // re-seeding appends duplicate catalog records; the booking snapshot
    // is untouched by catalog writes
    harness.seed().await;

    let bookings = session_bookings(&harness).await;
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].hotel.name, hotel.name);
}
