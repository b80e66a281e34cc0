use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwapOption;
use blog_api_sdk::AuthApi;
use inkpost_security::{Principal, Role};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Current principal, or none for an anonymous visitor.
///
/// Reads are lock-free and never block. Every write swaps in a complete
/// [`Principal`], so readers never see a half-updated identity.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    current: ArcSwapOption<Principal>,
    /// Shared by concurrent first callers of [`SessionStore::bootstrap`].
    first_check: OnceCell<()>,
    bootstrapped: AtomicBool,
}

impl SessionStore {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            current: ArcSwapOption::empty(),
            first_check: OnceCell::new(),
            bootstrapped: AtomicBool::new(false),
        }
    }

    /// Run the startup identity check once.
    ///
    /// Later calls, and calls racing the first one, wait for the same check
    /// and do not hit the network again. Never fails: an absent or expired
    /// session leaves the store anonymous.
    pub async fn bootstrap(&self) {
        self.first_check
            .get_or_init(|| self.check_identity())
            .await;
    }

    /// Repeat the identity check regardless of earlier runs.
    pub async fn rebootstrap(&self) {
        self.check_identity().await;
    }

    /// Ask the server who we are. The answer is dropped if the store was
    /// written while the request was in flight, so a late 401 cannot undo
    /// a login that finished first.
    #[tracing::instrument(skip_all)]
    async fn check_identity(&self) {
        let before = self.current.load_full();
        let next = match self.api.current_user().await {
            Ok(user) => {
                info!(user.id = %user.id, role = %user.role, "session restored");
                Some(Arc::new(user))
            }
            Err(e) => {
                debug!(error = %e, "no active session; continuing as anonymous");
                None
            }
        };
        let previous = self.current.compare_and_swap(&before, next);
        if !same_snapshot((*previous).as_ref(), before.as_ref()) {
            debug!("session changed during the identity check; keeping the newer value");
        }
        self.bootstrapped.store(true, Ordering::Release);
    }

    /// Whether the startup check has finished, so role-gated views can tell
    /// "anonymous" from "not known yet".
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.load(Ordering::Acquire)
    }

    /// Replace the principal wholesale. `None` signs the session out locally.
    pub fn set(&self, principal: Option<Principal>) {
        self.current.store(principal.map(Arc::new));
    }

    #[must_use]
    pub fn get(&self) -> Option<Arc<Principal>> {
        self.current.load_full()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current.load().as_ref().map(|p| p.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.load().is_some()
    }
}

fn same_snapshot(a: Option<&Arc<Principal>>, b: Option<&Arc<Principal>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
