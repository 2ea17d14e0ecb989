use std::{fmt, future::Future, sync::Arc};

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::{error::WaiterClosed, Error};

/// Predicate deciding whether an event resolves a wait.
pub type Check<I> = Box<dyn Fn(&I) -> bool + Send + Sync>;

/// Source of interactions for a [`CallbackStore`](crate::CallbackStore).
///
/// `wait_for` resolves with the next event accepted by `check`. Dropping the
/// returned future abandons the wait.
pub trait Listener<I>: Send + Sync {
    fn wait_for(&self, check: Check<I>) -> BoxFuture<'_, Result<I, Error>>;
}

/// Wraps a function as a [`Listener`], see [`listener_fn`].
#[derive(Clone, Debug)]
pub struct ListenerFn<F>(F);

pub fn listener_fn<I, F, Fut>(func: F) -> ListenerFn<F>
where
    F: Fn(Check<I>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<I, Error>> + Send + 'static,
{
    ListenerFn(func)
}

impl<I, F, Fut> Listener<I> for ListenerFn<F>
where
    F: Fn(Check<I>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<I, Error>> + Send + 'static,
{
    fn wait_for(&self, check: Check<I>) -> BoxFuture<'_, Result<I, Error>> {
        Box::pin((self.0)(check))
    }
}

struct Waiter<I> {
    check: Check<I>,
    tx: oneshot::Sender<I>,
}

struct Waiters<I> {
    closed: bool,
    pending: Vec<Waiter<I>>,
}

/// Event hub fed by the bot's event loop, stores wait on it through
/// [`Listener::wait_for`].
pub struct EventWaiter<I> {
    waiters: Arc<Mutex<Waiters<I>>>,
}

impl<I> EventWaiter<I> {
    pub fn new() -> Self {
        Self {
            waiters: Arc::new(Mutex::new(Waiters {
                closed: false,
                pending: Vec::new(),
            })),
        }
    }

    /// Number of waits that haven't been resolved or abandoned yet.
    pub fn pending(&self) -> usize {
        self.waiters
            .lock()
            .pending
            .iter()
            .filter(|waiter| !waiter.tx.is_closed())
            .count()
    }

    /// Fails all pending and future waits with [`WaiterClosed`].
    pub fn close(&self) {
        let mut waiters = self.waiters.lock();
        waiters.closed = true;
        // dropping the senders wakes the receivers with an error
        waiters.pending.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.waiters.lock().closed
    }
}

impl<I: Clone> EventWaiter<I> {
    /// Hands `event` to every waiter whose check accepts it, returns how many
    /// waiters received it.
    pub fn dispatch(&self, event: I) -> usize {
        let mut waiters = self.waiters.lock();
        let mut matched = 0;

        for waiter in std::mem::take(&mut waiters.pending) {
            if waiter.tx.is_closed() {
                continue;
            }

            if !(waiter.check)(&event) {
                waiters.pending.push(waiter);
                continue;
            }

            if waiter.tx.send(event.clone()).is_ok() {
                matched += 1;
            }
        }

        tracing::trace!(matched, pending = waiters.pending.len(), "event dispatched");

        matched
    }
}

impl<I> Clone for EventWaiter<I> {
    fn clone(&self) -> Self {
        Self {
            waiters: Arc::clone(&self.waiters),
        }
    }
}

impl<I> fmt::Debug for EventWaiter<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let waiters = self.waiters.lock();
        f.debug_struct("EventWaiter")
            .field("closed", &waiters.closed)
            .field("pending", &waiters.pending.len())
            .finish()
    }
}

impl<I> Default for EventWaiter<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Send + 'static> Listener<I> for EventWaiter<I> {
    fn wait_for(&self, check: Check<I>) -> BoxFuture<'_, Result<I, Error>> {
        let (tx, rx) = oneshot::channel();

        {
            let mut waiters = self.waiters.lock();
            if !waiters.closed {
                waiters.pending.retain(|waiter| !waiter.tx.is_closed());
                waiters.pending.push(Waiter { check, tx });
            }
        }

        Box::pin(async move { rx.await.map_err(|_| Error::from(WaiterClosed)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(expected: &'static str) -> Check<String> {
        Box::new(move |event: &String| event == expected)
    }

    #[tokio::test]
    async fn dispatch_resolves_matching_waiters_test() {
        let waiter = EventWaiter::<String>::new();
        let first = waiter.wait_for(exact("a"));
        let second = waiter.wait_for(exact("a"));
        let other = waiter.wait_for(exact("b"));
        assert_eq!(waiter.pending(), 3);

        assert_eq!(waiter.dispatch("a".to_string()), 2);
        assert_eq!(first.await.ok(), Some("a".to_string()));
        assert_eq!(second.await.ok(), Some("a".to_string()));
        assert_eq!(waiter.pending(), 1);

        assert_eq!(waiter.dispatch("a".to_string()), 0);
        assert_eq!(waiter.dispatch("b".to_string()), 1);
        assert_eq!(other.await.ok(), Some("b".to_string()));
    }

    #[tokio::test]
    async fn abandoned_waits_are_pruned_test() {
        let waiter = EventWaiter::<String>::new();
        drop(waiter.wait_for(exact("a")));
        assert_eq!(waiter.pending(), 0);
        assert_eq!(waiter.dispatch("a".to_string()), 0);
    }

    #[tokio::test]
    async fn wait_for_prunes_abandoned_waits_test() {
        let waiter = EventWaiter::<String>::new();
        for _ in 0..8 {
            drop(waiter.wait_for(exact("a")));
        }
        let pending = waiter.wait_for(exact("b"));
        assert_eq!(waiter.waiters.lock().pending.len(), 1);

        assert_eq!(waiter.dispatch("b".to_string()), 1);
        assert_eq!(pending.await.ok().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn close_fails_waits_test() {
        let waiter = EventWaiter::<String>::new();
        let pending = waiter.wait_for(exact("a"));
        waiter.close();
        assert!(waiter.is_closed());

        let err = pending.await.err().map(|err| err.to_string());
        assert_eq!(err.as_deref(), Some("event waiter was closed"));
        assert!(waiter.wait_for(exact("a")).await.is_err());
    }

    #[tokio::test]
    async fn listener_fn_test() {
        let listener = listener_fn(|check: Check<String>| async move {
            let event = "hello".to_string();
            if check(&event) {
                Ok(event)
            } else {
                Err(Error::from("rejected"))
            }
        });

        assert_eq!(listener.wait_for(exact("hello")).await.ok(), Some("hello".to_string()));
        assert!(listener.wait_for(exact("bye")).await.is_err());
    }
}
