pub use config::StoreConfig;
pub use error::{StoreError, WaiterClosed};
pub use handler::{BoxedCallback, BoxedCheck};
pub use interaction::HasCustomId;
pub use listener::{listener_fn, Check, EventWaiter, Listener, ListenerFn};
pub use store::{CallbackStore, CallbackStoreBuilder, ListenOutcome, StopHandle};

#[cfg(feature = "twilight")]
pub use interaction::ComponentInteraction;

pub mod config;
pub mod error;
pub mod handler;
pub mod id;
pub mod interaction;
pub mod listener;
pub mod store;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
