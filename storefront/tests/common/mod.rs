//! Shared harness for storefront integration tests.

#![allow(dead_code)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;
use stayscout::bootstrap::{self, StorefrontStore};
use stayscout::catalog::InMemoryCatalog;
use stayscout::identity::InMemoryAuthProvider;
use stayscout::payment::{PaymentGateway, SimulatedGateway};
use stayscout::reducer::{
    StorefrontAction, StorefrontEnvironment, StorefrontReducer, StorefrontState,
};
use stayscout_core::environment::Clock;
use stayscout_runtime::Store;
use stayscout_testing::mocks::{RecordingViewport, test_clock};

/// A store wired to inspectable in-memory services
pub struct Harness {
    pub store: StorefrontStore,
    pub catalog: Arc<InMemoryCatalog>,
    pub auth: Arc<InMemoryAuthProvider>,
    pub viewport: Arc<RecordingViewport>,
}

/// Harness with an instantly-approving payment gateway
pub fn harness() -> Harness {
    harness_with(
        Arc::new(SimulatedGateway::instant()),
        Arc::new(InMemoryAuthProvider::new()),
    )
}

/// Harness with a caller-chosen payment gateway
pub fn harness_with_gateway(payments: Arc<dyn PaymentGateway>) -> Harness {
    harness_with(payments, Arc::new(InMemoryAuthProvider::new()))
}

/// Harness with a caller-prepared auth provider
pub fn harness_with_auth(auth: Arc<InMemoryAuthProvider>) -> Harness {
    harness_with(Arc::new(SimulatedGateway::instant()), auth)
}

fn harness_with(payments: Arc<dyn PaymentGateway>, auth: Arc<InMemoryAuthProvider>) -> Harness {
    let clock: Arc<dyn Clock> = Arc::new(test_clock());
    let catalog = Arc::new(InMemoryCatalog::new("test-app", Arc::clone(&clock)));
    let viewport = RecordingViewport::shared();
    let environment = StorefrontEnvironment {
        clock,
        auth: Arc::clone(&auth) as _,
        catalog: Arc::clone(&catalog) as _,
        payments,
        viewport: Arc::clone(&viewport) as _,
        auth_token: None,
    };
    let store = Store::new(StorefrontState::new(true), StorefrontReducer, environment);
    // production wiring: live featured snapshots flow into the store
    bootstrap::watch_featured(store.clone(), Arc::clone(&catalog) as _);
    Harness {
        store,
        catalog,
        auth,
        viewport,
    }
}

impl Harness {
    /// Send an action and wait until its direct effects (and their
    /// feedback reductions) have landed in state
    pub async fn send_and_settle(&self, action: StorefrontAction) {
        let mut handle = self.store.send(action).await.expect("send");
        handle.wait().await;
    }

    /// Run startup: resolve the session and finish the featured load
    pub async fn start(&self) {
        self.send_and_settle(StorefrontAction::AppStarted).await;
    }

    /// Seed the sample catalog through the reducer
    pub async fn seed(&self) {
        self.send_and_settle(StorefrontAction::SeedRequested).await;
    }

    /// Poll until a state condition holds; for assertions that depend on
    /// second-level effects, which the send handle does not track
    pub async fn wait_for_state<F>(&self, mut check: F)
    where
        F: FnMut(&StorefrontState) -> bool,
    {
        for _ in 0..500 {
            if self.store.state(|state| check(state)).await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("state condition not met within timeout");
    }
}
