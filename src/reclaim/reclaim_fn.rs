//! # Function-backed reclaimer (`ReclaimFn`)
//!
//! [`ReclaimFn`] wraps a plain closure `F: Fn(Arc<T>)` so it can be used
//! wherever a [`Reclaim`] trait object is expected, without writing a
//! manual impl.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use fanoutq::{ReclaimFn, ReclaimerRef};
//!
//! let r: ReclaimerRef<String> = ReclaimFn::arc("printer", |msg: Arc<String>| {
//!     let _ = msg; // println!("reclaimed: {msg}");
//! });
//! assert_eq!(r.name(), "printer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use super::reclaim::Reclaim;

/// Function-backed reclaimer implementation.
///
/// The closure is invoked once per fully-delivered message.
pub struct ReclaimFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ReclaimFn<F> {
    /// Creates a new function-backed reclaimer.
    ///
    /// Prefer [`ReclaimFn::arc`] when you immediately need a
    /// [`ReclaimerRef`](crate::ReclaimerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the reclaimer and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, T> Reclaim<T> for ReclaimFn<F>
where
    F: Fn(Arc<T>) + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    async fn reclaim(&self, msg: Arc<T>) {
        (self.f)(msg);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_closure_is_invoked_with_message() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let r = ReclaimFn::new("recorder", move |msg: Arc<String>| {
            sink.lock().unwrap().push(msg.as_str().to_owned());
        });

        r.reclaim(Arc::new("hello".to_string())).await;
        r.reclaim(Arc::new("world".to_string())).await;

        assert_eq!(*seen.lock().unwrap(), vec!["hello", "world"]);
    }

    #[test]
    fn test_name_is_preserved() {
        let r = ReclaimFn::new("recorder", |_msg: Arc<u32>| {});
        let r: &dyn Reclaim<u32> = &r;
        assert_eq!(r.name(), "recorder");
    }
}
