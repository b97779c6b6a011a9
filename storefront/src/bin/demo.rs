//! Scripted storefront walkthrough.
//!
//! Seeds the sample catalog, searches Delhi, expands the results, opens
//! a hotel, books a room through the simulated payment flow, and prints
//! the resulting bookings list.

use anyhow::{Context, Result, bail};
use std::sync::Arc;
use std::time::Duration;
use stayscout::bootstrap::{self, StorefrontStore};
use stayscout::config::{BackendConfig, Config};
use stayscout::reducer::{StorefrontAction, StorefrontReducer, StorefrontState};
use stayscout::types::{CardForm, HotelId, Loadable, NavRequest, Page, SearchCriteria};
use stayscout_runtime::Store;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut config = Config::from_env();
    if config.backend.is_none() {
        info!("no backend configured, using a local demo backend");
        config.backend = Some(BackendConfig {
            project_id: "stayscout-demo".to_string(),
            api_key: "demo".to_string(),
        });
    }

    let environment = bootstrap::build_environment(&config);
    let auth = Arc::clone(&environment.auth);
    let catalog = Arc::clone(&environment.catalog);
    let store = Store::new(
        StorefrontState::new(config.backend.is_some()),
        StorefrontReducer,
        environment,
    );
    let session_watcher = bootstrap::watch_sessions(store.clone(), auth);
    let featured_watcher = bootstrap::watch_featured(store.clone(), catalog);

    send_and_settle(&store, StorefrontAction::AppStarted).await?;
    let greeting = store
        .state(|state| {
            state
                .session
                .as_ref()
                .map(|session| session.greeting_name().to_string())
        })
        .await;
    println!(
        "signed in as: {}",
        greeting.unwrap_or_else(|| "nobody".to_string())
    );

    send_and_settle(&store, StorefrontAction::SeedRequested).await?;

    send_and_settle(
        &store,
        StorefrontAction::SearchSubmitted {
            criteria: SearchCriteria::for_destination("Delhi"),
        },
    )
    .await?;
    print_results(&store, "first page").await;

    send_and_settle(&store, StorefrontAction::ShowAllRequested).await?;
    print_results(&store, "all results").await;

    send_and_settle(
        &store,
        StorefrontAction::Navigate(NavRequest::HotelDetails {
            hotel_id: HotelId::new("del_leela"),
        }),
    )
    .await?;

    let selection = store
        .state(|state| {
            if let Page::HotelDetails { details, .. } = &state.page {
                details
                    .ready()
                    .and_then(|(hotel, rooms)| Some((hotel.clone(), rooms.first()?.clone())))
            } else {
                None
            }
        })
        .await;
    let Some((hotel, room)) = selection else {
        bail!("hotel details did not load");
    };
    println!("booking {} at {}", room.room_type, hotel.name);

    send_and_settle(&store, StorefrontAction::RoomSelected { hotel, room }).await?;
    send_and_settle(
        &store,
        StorefrontAction::PaymentSubmitted {
            card: CardForm {
                name: "A. Traveler".to_string(),
                number: "4242 4242 4242 4242".to_string(),
                expiry: "12/27".to_string(),
                cvc: "123".to_string(),
            },
        },
    )
    .await?;

    // the bookings page loads as a follow-up effect of the recorded booking
    let bookings = wait_for_bookings(&store).await?;
    println!("bookings:");
    for booking in &bookings {
        println!(
            "  {} - {} ({}) [{}]",
            booking.hotel.name, booking.room.room_type, booking.room.price, booking.status
        );
    }

    store.shutdown(Duration::from_secs(2)).await?;
    session_watcher.abort();
    featured_watcher.abort();
    Ok(())
}

/// Send an action and wait for its direct effects to finish reducing
async fn send_and_settle(store: &StorefrontStore, action: StorefrontAction) -> Result<()> {
    let mut handle = store.send(action).await.context("store send")?;
    handle.wait().await;
    Ok(())
}

async fn wait_for_bookings(store: &StorefrontStore) -> Result<Vec<stayscout::types::Booking>> {
    for _ in 0..100 {
        let bookings = store
            .state(|state| {
                if let Page::Bookings {
                    bookings: Loadable::Ready(bookings),
                } = &state.page
                {
                    Some(bookings.clone())
                } else {
                    None
                }
            })
            .await;
        if let Some(bookings) = bookings {
            return Ok(bookings);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    bail!("bookings page did not load")
}

async fn print_results(store: &StorefrontStore, label: &str) {
    let summary = store
        .state(|state| {
            if let Page::SearchResults {
                results: Loadable::Ready(hotels),
                can_show_all,
                ..
            } = &state.page
            {
                Some((hotels.len(), *can_show_all))
            } else {
                None
            }
        })
        .await;
    match summary {
        Some((count, can_show_all)) => {
            println!("{label}: {count} hotels (show all offered: {can_show_all})");
        }
        None => println!("{label}: no results"),
    }
}
