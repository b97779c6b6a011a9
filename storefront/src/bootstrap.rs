//! Startup wiring.
//!
//! Builds the environment from configuration and assembles the store.
//! The backend choice is made exactly once here: a present backend
//! config yields the in-memory catalog, an absent one yields the
//! unavailable store and the app runs in its degraded mode.

use crate::catalog::{CatalogStore, InMemoryCatalog, UnavailableCatalog};
use crate::config::Config;
use crate::identity::InMemoryAuthProvider;
use crate::payment::SimulatedGateway;
use crate::reducer::{StorefrontEnvironment, StorefrontReducer, StorefrontState};
use crate::search::FIRST_PAGE_LIMIT;
use std::sync::Arc;
use stayscout_core::environment::{Clock, NullViewport, SystemClock};
use stayscout_runtime::Store;
use tracing::info;

/// The fully-typed storefront store
pub type StorefrontStore =
    Store<StorefrontState, crate::reducer::StorefrontAction, StorefrontEnvironment, StorefrontReducer>;

/// Build the environment for a configuration
#[must_use]
pub fn build_environment(config: &Config) -> StorefrontEnvironment {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let catalog: Arc<dyn CatalogStore> = match &config.backend {
        Some(backend) => {
            info!(project_id = %backend.project_id, app_id = %config.app_id, "catalog backend configured");
            Arc::new(InMemoryCatalog::new(config.app_id.clone(), Arc::clone(&clock)))
        }
        None => {
            info!("no catalog backend configured, running degraded");
            Arc::new(UnavailableCatalog)
        }
    };
    StorefrontEnvironment {
        clock,
        auth: Arc::new(InMemoryAuthProvider::new()),
        catalog,
        payments: Arc::new(SimulatedGateway::new()),
        viewport: Arc::new(NullViewport),
        auth_token: config.initial_auth_token.clone(),
    }
}

/// Assemble the store for a configuration
#[must_use]
pub fn build_store(config: &Config) -> StorefrontStore {
    let environment = build_environment(config);
    let state = StorefrontState::new(config.backend.is_some());
    Store::new(state, StorefrontReducer, environment)
}

/// Forward provider-side session changes into the store
///
/// Covers sessions that change outside the reducer's own sign-in and
/// sign-out effects, such as a provider-initiated expiry. The task ends
/// when the provider or the store goes away.
pub fn watch_sessions(
    store: StorefrontStore,
    auth: Arc<dyn crate::identity::AuthProvider>,
) -> tokio::task::JoinHandle<()> {
    let mut sessions = auth.subscribe();
    tokio::spawn(async move {
        while sessions.changed().await.is_ok() {
            let session = sessions.borrow_and_update().clone();
            if store
                .send(crate::reducer::StorefrontAction::SessionChanged { session })
                .await
                .is_err()
            {
                break;
            }
        }
    })
}

/// Forward live featured-listing snapshots into the store
///
/// The subscription delivers the current first-page listing right away
/// and a fresh one after every catalog write; each snapshot becomes a
/// `FeaturedLoaded` action, which the reducer applies only while the
/// home page is showing. Without a backend there is nothing to watch
/// and the task ends immediately.
pub fn watch_featured(
    store: StorefrontStore,
    catalog: Arc<dyn CatalogStore>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let Ok(mut featured) = catalog.subscribe_featured(FIRST_PAGE_LIMIT).await else {
            return;
        };
        while let Some(hotels) = featured.next().await {
            if store
                .send(crate::reducer::StorefrontAction::FeaturedLoaded {
                    result: Ok(hotels),
                })
                .await
                .is_err()
            {
                break;
            }
        }
    })
}
