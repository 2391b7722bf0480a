//! Access-gating proxy.
//!
//! A [`Proxy`] has the same interface as the [`Subject`] it wraps. Each
//! request first passes an access check; only when access is granted is
//! the call forwarded and then logged.

use crate::output::Emitter;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Operations shared by real subjects and their proxies.
pub trait Subject {
    fn request(&self);
}

/// The subject doing the actual work.
pub struct RealSubject {
    emitter: Arc<dyn Emitter>,
}

impl RealSubject {
    pub fn new(emitter: Arc<dyn Emitter>) -> Self {
        Self { emitter }
    }
}

impl Subject for RealSubject {
    fn request(&self) {
        self.emitter.emit("RealSubject: Handling request.");
    }
}

/// Decides whether a proxied request may proceed.
pub trait AccessPolicy: Send + Sync {
    fn allows(&self) -> bool;
}

/// Grants every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn allows(&self) -> bool {
        true
    }
}

/// Refuses every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl AccessPolicy for DenyAll {
    fn allows(&self) -> bool {
        false
    }
}

/// Number of access times a proxy keeps unless configured otherwise.
pub const DEFAULT_ACCESS_LOG_LIMIT: usize = 1024;

/// Stand-in for a subject that checks access before forwarding and
/// records the time of every forwarded request.
///
/// Only the most recent [`DEFAULT_ACCESS_LOG_LIMIT`] times are kept; see
/// [`with_access_log_limit`](Self::with_access_log_limit).
///
/// # Example
///
/// ```rust
/// use statecraft::output::Recorder;
/// use statecraft::proxy::{Proxy, RealSubject, Subject};
/// use std::sync::Arc;
///
/// let recorder = Arc::new(Recorder::new());
/// let proxy = Proxy::new(RealSubject::new(recorder.clone()), recorder.clone());
///
/// proxy.request();
///
/// assert_eq!(proxy.access_log().len(), 1);
/// assert!(recorder.contains("RealSubject: Handling request."));
/// ```
pub struct Proxy<S: Subject, P: AccessPolicy = AllowAll> {
    subject: S,
    policy: P,
    emitter: Arc<dyn Emitter>,
    access_log: Mutex<VecDeque<DateTime<Utc>>>,
    log_limit: usize,
}

impl<S: Subject> Proxy<S, AllowAll> {
    pub fn new(subject: S, emitter: Arc<dyn Emitter>) -> Self {
        Self::with_policy(subject, AllowAll, emitter)
    }
}

impl<S: Subject, P: AccessPolicy> Proxy<S, P> {
    pub fn with_policy(subject: S, policy: P, emitter: Arc<dyn Emitter>) -> Self {
        Self {
            subject,
            policy,
            emitter,
            access_log: Mutex::new(VecDeque::new()),
            log_limit: DEFAULT_ACCESS_LOG_LIMIT,
        }
    }

    /// Keep at most `limit` access times (at least one), dropping the oldest.
    pub fn with_access_log_limit(mut self, limit: usize) -> Self {
        self.log_limit = limit.max(1);
        self
    }

    pub fn check_access(&self) -> bool {
        self.emitter
            .emit("Proxy: Checking access prior to firing a real request.");
        self.policy.allows()
    }

    pub fn log_access(&self) {
        let at = Utc::now();
        self.emitter.emit("Proxy: Logging the time of request.");
        info!(%at, "proxied request");

        let mut log = self.log();
        log.push_back(at);
        while log.len() > self.log_limit {
            log.pop_front();
        }
    }

    /// Times of the retained forwarded requests, oldest first.
    pub fn access_log(&self) -> Vec<DateTime<Utc>> {
        self.log().iter().copied().collect()
    }

    pub fn subject(&self) -> &S {
        &self.subject
    }

    fn log(&self) -> MutexGuard<'_, VecDeque<DateTime<Utc>>> {
        self.access_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Subject, P: AccessPolicy> Subject for Proxy<S, P> {
    fn request(&self) {
        if self.check_access() {
            self.subject.request();
            self.log_access();
        }
    }
}

/// Client code that only knows about the [`Subject`] interface.
pub fn client_code(subject: &dyn Subject) {
    subject.request();
}
