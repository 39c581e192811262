//! Readable values that can be registered for publishing
//!
//! Anything implementing [`Var`] can be registered. The publisher calls
//! [`Var::render`] from its own task once per pass, so implementations must
//! be cheap and safe to call concurrently with the owning application.

use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// A value that can render its current state as text
pub trait Var: Send + Sync {
    /// Current value as it should appear on the wire
    fn render(&self) -> String;
}

impl<F> Var for F
where
    F: Fn() -> String + Send + Sync,
{
    fn render(&self) -> String {
        self()
    }
}

/// Integer counter/gauge
#[derive(Debug, Default)]
pub struct Int(AtomicI64);

impl Int {
    pub fn new(value: i64) -> Self {
        Self(AtomicI64::new(value))
    }

    pub fn add(&self, delta: i64) {
        self.0.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn set(&self, value: i64) {
        self.0.store(value, Ordering::Relaxed);
    }

    pub fn value(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Var for Int {
    fn render(&self) -> String {
        self.value().to_string()
    }
}

/// Floating point gauge, stored as raw bits
#[derive(Debug, Default)]
pub struct Float(AtomicU64);

impl Float {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn add(&self, delta: f64) {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

impl Var for Float {
    fn render(&self) -> String {
        self.value().to_string()
    }
}

/// Free-form text value
#[derive(Debug, Default)]
pub struct Text(RwLock<String>);

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self(RwLock::new(value.into()))
    }

    pub fn set(&self, value: impl Into<String>) {
        // A poisoned lock still holds a usable String
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        *guard = value.into();
    }

    pub fn value(&self) -> String {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Var for Text {
    fn render(&self) -> String {
        self.value()
    }
}
