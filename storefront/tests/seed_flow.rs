//! Sample-data seeding through the store, and the live featured-hotels
//! subscription.

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use common::harness;
use stayscout::catalog::CatalogStore;
use stayscout::types::{Loadable, Page};

#[tokio::test]
async fn seeding_twice_duplicates_the_catalog() {
    let harness = harness();
    harness.start().await;

    harness.seed().await;
    harness.seed().await;

    let hotels = harness.catalog.list_hotels(None).await.expect("hotels");
    assert_eq!(hotels.len(), 20);
    let duplicates = hotels
        .iter()
        .filter(|h| h.id.as_str() == "del_leela")
        .count();
    assert_eq!(duplicates, 2);
}

#[tokio::test]
async fn seeding_refreshes_the_home_featured_listing() {
    let harness = harness();
    harness.start().await;

    harness
        .store
        .state(|state| {
            let Page::Home { featured } = &state.page else {
                panic!("expected home page");
            };
            assert_eq!(*featured, Loadable::Ready(vec![]));
        })
        .await;

    harness.seed().await;
    // the listing refresh arrives through the live subscription
    harness
        .wait_for_state(|state| {
            matches!(
                &state.page,
                Page::Home {
                    featured: Loadable::Ready(hotels)
                } if hotels.len() == 3
            )
        })
        .await;
}

#[tokio::test]
async fn featured_subscription_tracks_catalog_writes_until_closed() {
    let harness = harness();
    harness.start().await;

    let mut subscription = harness
        .catalog
        .subscribe_featured(3)
        .await
        .expect("subscription");
    assert!(subscription.next().await.expect("initial snapshot").is_empty());

    harness.seed().await;
    let after_seed = subscription.next().await.expect("post-seed snapshot");
    assert_eq!(after_seed.len(), 3);

    subscription.close();
    harness.seed().await;
    assert!(subscription.next().await.is_none());
}
