//! Identity session management.
//!
//! The auth provider is injected behind a trait so the reducer and tests
//! never touch a concrete backend. Session resolution follows a strict
//! fallback chain and always terminates in a ready state: a failed
//! sign-in degrades to no session, never to a hung "authenticating" view.

use crate::types::{AuthKind, Session, SessionId};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Auth provider errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The provider rejected the supplied token
    #[error("auth token rejected: {0}")]
    TokenRejected(String),
    /// Interactive sign-in was cancelled or refused
    #[error("interactive sign-in failed: {0}")]
    InteractiveFailed(String),
    /// Anonymous sign-in is not available
    #[error("anonymous sign-in unavailable: {0}")]
    AnonymousUnavailable(String),
}

/// Outcome of checking for a pending interactive-redirect result at startup
///
/// Explicitly three-valued: a resumed session, a clean "nothing pending",
/// and a failed resumption are distinct and drive different fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// A redirect flow completed and yielded a session
    Resumed(Session),
    /// No redirect flow was in progress
    NoPendingRedirect,
    /// A redirect flow was in progress but failed to yield a session
    Error(String),
}

/// Boxed future returned by provider operations
pub type AuthFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// An identity backend
///
/// Object-safe: operations return boxed futures so providers can live
/// behind `Arc<dyn AuthProvider>` in the environment.
pub trait AuthProvider: Send + Sync {
    /// Check for and consume a pending interactive-redirect result
    fn resume_redirect(&self) -> AuthFuture<RedirectOutcome>;

    /// The session as currently known, without waiting
    fn current_session(&self) -> Option<Session>;

    /// Watch session changes; yields the current value immediately on
    /// first read and every change thereafter
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;

    /// Sign in with a pre-issued token
    fn sign_in_with_token(&self, token: String) -> AuthFuture<Result<Session, AuthError>>;

    /// Sign in anonymously
    fn sign_in_anonymously(&self) -> AuthFuture<Result<Session, AuthError>>;

    /// Start an interactive sign-in and wait for it to complete
    fn sign_in_interactive(&self) -> AuthFuture<Result<Session, AuthError>>;

    /// Sign out, clearing the current session
    fn sign_out(&self) -> AuthFuture<()>;
}

/// Resolve the initial session with the startup fallback chain
///
/// Order: pending redirect result, then ambient session, then the
/// pre-issued token, then anonymous sign-in. Every arm that fails falls
/// through; the chain always returns, possibly with no session.
pub async fn resolve_initial_session(
    auth: &Arc<dyn AuthProvider>,
    token: Option<&str>,
) -> Option<Session> {
    match auth.resume_redirect().await {
        RedirectOutcome::Resumed(session) => {
            info!(session = %session.id, "resumed interactive sign-in from redirect");
            return Some(session);
        }
        RedirectOutcome::NoPendingRedirect => {}
        RedirectOutcome::Error(reason) => {
            warn!(%reason, "pending redirect failed to resume, falling back");
        }
    }

    if let Some(session) = auth.current_session() {
        debug!(session = %session.id, "reusing ambient session");
        return Some(session);
    }

    if let Some(token) = token {
        match auth.sign_in_with_token(token.to_string()).await {
            Ok(session) => {
                info!(session = %session.id, "signed in with pre-issued token");
                return Some(session);
            }
            Err(error) => {
                warn!(%error, "token sign-in failed, falling back to anonymous");
            }
        }
    }

    match auth.sign_in_anonymously().await {
        Ok(session) => {
            info!(session = %session.id, "signed in anonymously");
            Some(session)
        }
        Err(error) => {
            warn!(%error, "anonymous sign-in failed, continuing without a session");
            None
        }
    }
}

/// In-memory auth provider
///
/// Issues locally-numbered sessions and supports failure injection for
/// exercising the fallback chain.
pub struct InMemoryAuthProvider {
    session: watch::Sender<Option<Session>>,
    pending_redirect: tokio::sync::Mutex<Option<RedirectOutcome>>,
    next_id: AtomicU64,
    deny_token: AtomicBool,
    deny_anonymous: AtomicBool,
    deny_interactive: AtomicBool,
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthProvider {
    /// Provider with no ambient session and no pending redirect
    #[must_use]
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            session,
            pending_redirect: tokio::sync::Mutex::new(None),
            next_id: AtomicU64::new(1),
            deny_token: AtomicBool::new(false),
            deny_anonymous: AtomicBool::new(false),
            deny_interactive: AtomicBool::new(false),
        }
    }

    /// Provider that will report `outcome` from the next redirect check
    #[must_use]
    pub fn with_pending_redirect(outcome: RedirectOutcome) -> Self {
        let provider = Self::new();
        if let Ok(mut pending) = provider.pending_redirect.try_lock() {
            *pending = Some(outcome);
        }
        provider
    }

    /// Reject the next token sign-in attempts
    pub fn deny_token_sign_in(&self) {
        self.deny_token.store(true, Ordering::SeqCst);
    }

    /// Reject anonymous sign-in attempts
    pub fn deny_anonymous_sign_in(&self) {
        self.deny_anonymous.store(true, Ordering::SeqCst);
    }

    /// Reject interactive sign-in attempts
    pub fn deny_interactive_sign_in(&self) {
        self.deny_interactive.store(true, Ordering::SeqCst);
    }

    fn issue(&self, display_name: Option<String>, kind: AuthKind) -> Session {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let session = Session {
            id: SessionId::new(format!("session-{n}")),
            display_name,
            kind,
        };
        self.session.send_replace(Some(session.clone()));
        session
    }
}

impl AuthProvider for InMemoryAuthProvider {
    fn resume_redirect(&self) -> AuthFuture<RedirectOutcome> {
        let session = self.session.clone();
        let outcome = {
            // try_lock is safe here: nothing holds the lock across await
            match self.pending_redirect.try_lock() {
                Ok(mut pending) => pending.take(),
                Err(_) => None,
            }
        };
        Box::pin(async move {
            match outcome {
                Some(RedirectOutcome::Resumed(resumed)) => {
                    session.send_replace(Some(resumed.clone()));
                    RedirectOutcome::Resumed(resumed)
                }
                Some(other) => other,
                None => RedirectOutcome::NoPendingRedirect,
            }
        })
    }

    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    fn sign_in_with_token(&self, token: String) -> AuthFuture<Result<Session, AuthError>> {
        if self.deny_token.load(Ordering::SeqCst) {
            return Box::pin(async { Err(AuthError::TokenRejected("token denied".to_string())) });
        }
        if token.trim().is_empty() {
            return Box::pin(async { Err(AuthError::TokenRejected("empty token".to_string())) });
        }
        let session = self.issue(None, AuthKind::Token);
        Box::pin(async move { Ok(session) })
    }

    fn sign_in_anonymously(&self) -> AuthFuture<Result<Session, AuthError>> {
        if self.deny_anonymous.load(Ordering::SeqCst) {
            return Box::pin(async {
                Err(AuthError::AnonymousUnavailable(
                    "anonymous sign-in denied".to_string(),
                ))
            });
        }
        let session = self.issue(None, AuthKind::Anonymous);
        Box::pin(async move { Ok(session) })
    }

    fn sign_in_interactive(&self) -> AuthFuture<Result<Session, AuthError>> {
        if self.deny_interactive.load(Ordering::SeqCst) {
            return Box::pin(async {
                Err(AuthError::InteractiveFailed(
                    "sign-in window dismissed".to_string(),
                ))
            });
        }
        let session = self.issue(Some("Traveler".to_string()), AuthKind::Interactive);
        Box::pin(async move { Ok(session) })
    }

    fn sign_out(&self) -> AuthFuture<()> {
        self.session.send_replace(None);
        Box::pin(async {})
    }
}
