//! Shared, observable state containers.

use std::sync::Arc;
use tokio::sync::watch;

/// A value shared across a session that subscribers can watch.
///
/// Writes replace the value and notify every receiver; there is no merge and
/// the last write wins. Clones share the same underlying value.
pub struct Reactive<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Reactive<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default> Default for Reactive<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Reactive<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the value wholesale.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }
}

impl<T: Clone> Reactive<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_value() {
        let state = Reactive::new(vec![1, 2, 3]);
        state.set(vec![9]);
        assert_eq!(state.get(), vec![9]);
    }

    #[test]
    fn clones_share_state() {
        let a = Reactive::new(0u32);
        let b = a.clone();
        b.update(|v| *v += 5);
        assert_eq!(a.get(), 5);
    }

    #[test]
    fn writes_without_subscribers_are_kept() {
        let state: Reactive<Option<String>> = Reactive::default();
        state.set(Some("fr".into()));
        assert_eq!(state.get().as_deref(), Some("fr"));
    }

    #[tokio::test]
    async fn subscribers_see_latest_value() {
        let state = Reactive::new("en".to_string());
        let mut rx = state.subscribe();

        state.set("de".into());
        state.set("fr".into());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "fr");
    }

    #[test]
    fn with_reads_without_clone() {
        let state = Reactive::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(state.with(|v| v.len()), 2);
    }
}
