#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use blog_api_sdk::{ApiError, AuthApi, Credentials};
use inkpost_security::{Principal, Role};
use tokio::sync::Notify;

use super::SessionStore;

/// Identity endpoint double: answers every `me` call with a fixed result.
struct FixedIdentity {
    answer: Result<Principal, ApiError>,
    calls: AtomicUsize,
}

impl FixedIdentity {
    fn new(answer: Result<Principal, ApiError>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AuthApi for FixedIdentity {
    async fn current_user(&self) -> Result<Principal, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.answer.clone()
    }

    async fn login(&self, _credentials: &Credentials) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }

    async fn logout(&self) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }

    async fn update_profile_picture(&self, _url: &str) -> Result<Principal, ApiError> {
        unimplemented!("not used by the store")
    }

    async fn change_password(&self, _old: &str, _new: &str) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }

    async fn resend_confirmation_email(&self, _email: &str) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }
}

/// Identity endpoint that answers 401 only once released.
struct HeldIdentity {
    release: Notify,
}

#[async_trait]
impl AuthApi for HeldIdentity {
    async fn current_user(&self) -> Result<Principal, ApiError> {
        self.release.notified().await;
        Err(ApiError::unauthorized("Not authenticated"))
    }

    async fn login(&self, _credentials: &Credentials) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }

    async fn logout(&self) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }

    async fn update_profile_picture(&self, _url: &str) -> Result<Principal, ApiError> {
        unimplemented!("not used by the store")
    }

    async fn change_password(&self, _old: &str, _new: &str) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }

    async fn resend_confirmation_email(&self, _email: &str) -> Result<(), ApiError> {
        unimplemented!("not used by the store")
    }
}

fn ada() -> Principal {
    Principal::new("u1", "ada", "ada@example.com", Role::Admin)
}

#[tokio::test]
async fn bootstrap_stores_returned_principal() {
    let api = FixedIdentity::new(Ok(ada()));
    let store = SessionStore::new(api.clone());
    assert!(!store.is_bootstrapped());

    store.bootstrap().await;

    assert!(store.is_bootstrapped());
    assert_eq!(store.get().as_deref(), Some(&ada()));
    assert_eq!(store.role(), Some(Role::Admin));
}

#[tokio::test]
async fn unauthorized_bootstrap_is_anonymous() {
    let api = FixedIdentity::new(Err(ApiError::unauthorized("Not authenticated")));
    let store = SessionStore::new(api);

    store.bootstrap().await;

    assert!(store.is_bootstrapped());
    assert!(store.get().is_none());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn network_failure_during_bootstrap_is_anonymous() {
    let api = FixedIdentity::new(Err(ApiError::network("connection refused")));
    let store = SessionStore::new(api);

    store.bootstrap().await;

    assert!(store.get().is_none());
}

#[tokio::test]
async fn bootstrap_runs_once() {
    let api = FixedIdentity::new(Ok(ada()));
    let store = SessionStore::new(api.clone());

    tokio::join!(store.bootstrap(), store.bootstrap(), store.bootstrap());
    store.bootstrap().await;

    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rebootstrap_checks_again() {
    let api = FixedIdentity::new(Ok(ada()));
    let store = SessionStore::new(api.clone());

    store.bootstrap().await;
    store.set(None);
    store.rebootstrap().await;

    assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.role(), Some(Role::Admin));
}

#[test]
fn set_replaces_whole_principal() {
    let store = SessionStore::new(FixedIdentity::new(Ok(ada())));

    store.set(Some(ada().with_profile_picture("https://img.example.com/a.png")));
    let before = store.get().unwrap();

    store.set(Some(Principal::new("u1", "ada", "ada@example.com", Role::User)));
    let after = store.get().unwrap();

    assert_eq!(after.profile_picture, None);
    assert_eq!(after.role, Role::User);
    // earlier snapshots are untouched
    assert_eq!(before.role, Role::Admin);
    assert!(before.profile_picture.is_some());

    store.set(None);
    assert!(store.get().is_none());
}

#[tokio::test]
async fn late_anonymous_answer_keeps_a_newer_login() {
    let api = Arc::new(HeldIdentity {
        release: Notify::new(),
    });
    let store = SessionStore::new(api.clone());

    tokio::join!(store.bootstrap(), async {
        // let the identity request start first
        tokio::task::yield_now().await;
        store.set(Some(ada()));
        api.release.notify_one();
    });

    assert!(store.is_bootstrapped());
    assert_eq!(store.get().as_deref(), Some(&ada()));
}
