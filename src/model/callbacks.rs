//! Session load/unload subscribers

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::engine::TrackHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    TrackLoaded(TrackHandle),
    TrackUnloaded,
}

/// Opaque value handed back to a subscriber on every dispatch.
///
/// Two contexts are equal when they share the same allocation (or are both
/// empty), not when their contents compare equal.
#[derive(Clone, Default)]
pub struct UserData(Option<Arc<dyn Any + Send + Sync>>);

impl UserData {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|value| value.downcast_ref())
    }

    fn same_as(&self, other: &UserData) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "UserData({:p})", Arc::as_ptr(value)),
            None => write!(f, "UserData(None)"),
        }
    }
}

/// Subscriber callback; identity is the `Arc` allocation.
pub type SessionCallback = Arc<dyn Fn(&SessionEvent, &UserData) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subscription {
    Added,
    AlreadyPresent,
}

struct Subscriber {
    callback: SessionCallback,
    user_data: UserData,
}

/// Set of (callback, user data) pairs, newest first.
#[derive(Default)]
pub struct CallbackRegistry {
    subscribers: Vec<Subscriber>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: SessionCallback, user_data: UserData) -> Subscription {
        let present = self.subscribers.iter().any(|s| {
            Arc::ptr_eq(&s.callback, &callback) && s.user_data.same_as(&user_data)
        });
        if present {
            return Subscription::AlreadyPresent;
        }

        self.subscribers.insert(0, Subscriber { callback, user_data });
        Subscription::Added
    }

    /// Calls every subscriber synchronously, most recent first. Callbacks must
    /// not subscribe from inside a dispatch.
    pub fn dispatch(&self, event: &SessionEvent) {
        for subscriber in &self.subscribers {
            (subscriber.callback)(event, &subscriber.user_data);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
