use std::{
    collections::HashMap,
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    config::StoreConfig,
    error::StoreError,
    handler::{allow_all, boxed_callback, boxed_check, BoxedCallback, BoxedCheck},
    id::{random_header, IdGenerator},
    interaction::HasCustomId,
    listener::{Check, Listener},
    Error,
};

/// Why [`CallbackStore::listen`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenOutcome {
    /// No interaction was handled within the timeout.
    TimedOut,
    /// [`CallbackStore::stop`] was called.
    Stopped,
}

impl ListenOutcome {
    pub fn is_timeout(self) -> bool {
        self == Self::TimedOut
    }
}

/// Stops the store it was taken from, meant to be moved into callbacks.
#[derive(Clone, Debug)]
pub struct StopHandle(CancellationToken);

impl StopHandle {
    pub fn stop(&self) {
        self.0.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// Registry & dispatch for callbacks of UI components.
///
/// Components get a custom ID from [`make_id`](Self::make_id), are bound to a
/// callback with [`bind`](Self::bind), and [`listen`](Self::listen) then runs
/// callbacks for interactions with them until it times out or is stopped.
///
/// Custom IDs of bound components must not change afterwards, the store won't
/// recognise their interactions anymore. Mutable state therefore can't live in
/// the ID.
pub struct CallbackStore<I> {
    listener: Arc<dyn Listener<I>>,
    check: BoxedCheck<I>,
    config: StoreConfig,
    timeout: Option<Duration>,

    ids: IdGenerator,
    callbacks: HashMap<String, BoxedCallback<I>>,
    stop: CancellationToken,
    listening: AtomicBool,
}

impl<I> CallbackStore<I>
where
    I: HasCustomId + Clone + Send + Sync + 'static,
{
    pub fn new(listener: impl Listener<I> + 'static) -> Self {
        Self::builder(listener).build()
    }

    pub fn builder(listener: impl Listener<I> + 'static) -> CallbackStoreBuilder<I> {
        CallbackStoreBuilder {
            listener: Arc::new(listener),
            check: None,
            config: StoreConfig::default(),
            timeout: None,
            id: None,
        }
    }

    /// Unique ID of this store, the header of every ID it makes.
    pub fn id(&self) -> &str {
        self.ids.header()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Timeout used by [`listen`](Self::listen), `None` if there is none.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Creates a custom ID `{id}:{n}` from a counter.
    pub fn make_id(&self) -> String {
        self.ids.next()
    }

    /// Creates a custom ID `{id}:{part}:{part}…`, an empty `parts` falls back
    /// to [`make_id`](Self::make_id).
    pub fn make_id_from<P>(&self, parts: P) -> String
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.ids.from_parts(parts)
    }

    /// Removes this store's header from the component's custom ID.
    pub fn strip_id<'a, C: HasCustomId + ?Sized>(&self, component: &'a C) -> Option<&'a str> {
        component
            .custom_id()
            .map(|custom_id| self.ids.strip(custom_id))
    }

    pub fn strip_custom_id<'a>(&self, custom_id: &'a str) -> &'a str {
        self.ids.strip(custom_id)
    }

    /// Whether interactions with `custom_id` are handled by this store.
    pub fn owns(&self, custom_id: &str) -> bool {
        self.ids.owns(custom_id)
    }

    /// Registers a callback for the component and hands the component back.
    ///
    /// ```ignore
    /// let button = store.bind(
    ///     Button { custom_id: Some(store.make_id()), .. },
    ///     move |inter| async move { stop.stop(); Ok(()) },
    /// )?;
    /// ```
    pub fn bind<C, F, Fut>(&mut self, component: C, callback: F) -> Result<C, StoreError>
    where
        C: HasCustomId,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), Error>> + Send + 'static,
    {
        let custom_id = component
            .custom_id()
            .ok_or(StoreError::MissingCustomId)?
            .to_string();
        self.insert(custom_id, boxed_callback(callback));

        Ok(component)
    }

    /// Registers one callback for several components, the callback receives
    /// the index of the component that was interacted with.
    pub fn bind_many<C, F, Fut>(
        &mut self,
        components: impl IntoIterator<Item = C>,
        callback: F,
    ) -> Result<Vec<C>, StoreError>
    where
        C: HasCustomId,
        F: Fn(usize, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), Error>> + Send + 'static,
    {
        let components = components.into_iter().collect::<Vec<C>>();
        let custom_ids = components
            .iter()
            .map(|component| {
                component
                    .custom_id()
                    .map(ToString::to_string)
                    .ok_or(StoreError::MissingCustomId)
            })
            .collect::<Result<Vec<String>, StoreError>>()?;

        let callback = Arc::new(callback);
        for (index, custom_id) in custom_ids.into_iter().enumerate() {
            let callback = Arc::clone(&callback);
            self.insert(
                custom_id,
                boxed_callback(move |interaction| callback(index, interaction)),
            );
        }

        Ok(components)
    }

    fn insert(&mut self, custom_id: String, callback: BoxedCallback<I>) {
        if self.callbacks.insert(custom_id.clone(), callback).is_some() {
            tracing::debug!(store = self.id(), %custom_id, "replaced bound callback");
        }
    }

    pub fn is_bound(&self, custom_id: &str) -> bool {
        self.callbacks.contains_key(custom_id)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Stops the loop and signals [`listen`](Self::listen) to return.
    pub fn stop(&self) {
        self.stop.cancel();
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.stop.clone())
    }

    /// Runs the main loop with the configured timeout until stopped.
    pub async fn listen(&self) -> Result<ListenOutcome, StoreError> {
        self.listen_for(self.timeout).await
    }

    /// Runs the main loop until stopped, or until `timeout` passes since the
    /// last handled interaction.
    ///
    /// Checks and callbacks always run to completion, a stop or timeout during
    /// one is seen by the next wait.
    pub async fn listen_for(&self, timeout: Option<Duration>) -> Result<ListenOutcome, StoreError> {
        // stores are single-use
        if self.listening.swap(true, Ordering::AcqRel) {
            return Err(StoreError::AlreadyListening);
        }

        tracing::debug!(store = self.id(), ?timeout, "listening for interactions");

        let mut deadline = deadline_after(timeout);
        loop {
            let interaction = tokio::select! {
                biased;

                () = self.stop.cancelled() => {
                    tracing::debug!(store = self.id(), "store stopped");
                    return Ok(ListenOutcome::Stopped);
                }
                () = sleep_until(deadline) => {
                    tracing::debug!(store = self.id(), "store timed out");
                    return Ok(ListenOutcome::TimedOut);
                }
                result = self.listener.wait_for(self.owned_check()) => {
                    result.map_err(StoreError::Listener)?
                }
            };

            let custom_id = interaction.custom_id().unwrap_or_default().to_string();
            tracing::trace!(store = self.id(), %custom_id, "interaction received");

            if !(self.check)(interaction.clone())
                .await
                .map_err(StoreError::Check)?
            {
                // rejected interactions don't extend the deadline
                tracing::trace!(store = self.id(), %custom_id, "interaction rejected");
                continue;
            }

            let Some(callback) = self.callbacks.get(&custom_id) else {
                return Err(StoreError::UnboundComponent(custom_id));
            };

            tracing::trace!(store = self.id(), %custom_id, "running callback");
            if let Err(source) = callback(interaction).await {
                return Err(StoreError::Callback { custom_id, source });
            }

            deadline = deadline_after(timeout);
        }
    }

    fn owned_check(&self) -> Check<I> {
        let header = format!("{}{}", self.id(), crate::id::SEPARATOR);
        Box::new(move |interaction: &I| {
            interaction
                .custom_id()
                .is_some_and(|custom_id| custom_id.starts_with(&header))
        })
    }
}

/// A timeout too large to represent as an instant never expires.
fn deadline_after(timeout: Option<Duration>) -> Option<Instant> {
    timeout.and_then(|timeout| Instant::now().checked_add(timeout))
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

pub struct CallbackStoreBuilder<I> {
    listener: Arc<dyn Listener<I>>,
    check: Option<BoxedCheck<I>>,
    config: StoreConfig,
    timeout: Option<Option<Duration>>,
    id: Option<String>,
}

impl<I> CallbackStoreBuilder<I>
where
    I: HasCustomId + Clone + Send + Sync + 'static,
{
    /// Check whether an interaction should be propagated to the callbacks,
    /// all interactions are allowed by default.
    pub fn check<F, Fut>(mut self, check: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, Error>> + Send + 'static,
    {
        self.check = Some(boxed_check(check));
        self
    }

    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the timeout from the config, `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the randomly generated store ID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn build(self) -> CallbackStore<I> {
        CallbackStore {
            listener: self.listener,
            check: self.check.unwrap_or_else(allow_all),
            timeout: self.timeout.unwrap_or_else(|| self.config.timeout()),
            config: self.config,

            ids: IdGenerator::new(self.id.unwrap_or_else(random_header)),
            callbacks: HashMap::new(),
            stop: CancellationToken::new(),
            listening: AtomicBool::new(false),
        }
    }
}
