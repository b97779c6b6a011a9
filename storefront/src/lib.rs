//! StayScout - a hotel-booking storefront built on a reducer-driven
//! state machine.
//!
//! The application is a single [`reducer::StorefrontReducer`] owning all
//! navigation, search, identity, and booking behavior, driven through
//! the [`stayscout_runtime::Store`] and wired to injected services: an
//! [`identity::AuthProvider`], a [`catalog::CatalogStore`], and a
//! simulated [`payment::PaymentGateway`].
//!
//! ```no_run
//! use stayscout::bootstrap;
//! use stayscout::config::Config;
//! use stayscout::reducer::StorefrontAction;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = bootstrap::build_store(&Config::from_env());
//! let mut handle = store.send(StorefrontAction::AppStarted).await?;
//! handle.wait().await;
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod identity;
pub mod payment;
pub mod reducer;
pub mod search;
pub mod seed;
pub mod types;
