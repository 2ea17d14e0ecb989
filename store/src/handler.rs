use std::{future::Future, sync::Arc};

use futures::future::BoxFuture;

use crate::Error;

pub type BoxedCallback<I> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<(), Error>> + Send + Sync>;
pub type BoxedCheck<I> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<bool, Error>> + Send + Sync>;

pub(crate) fn boxed_callback<I, F, Fut>(func: F) -> BoxedCallback<I>
where
    I: 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), Error>> + Send + 'static,
{
    Arc::new(move |interaction: I| -> BoxFuture<'static, Result<(), Error>> {
        Box::pin(func(interaction))
    })
}

pub(crate) fn boxed_check<I, F, Fut>(func: F) -> BoxedCheck<I>
where
    I: 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, Error>> + Send + 'static,
{
    Arc::new(move |interaction: I| -> BoxFuture<'static, Result<bool, Error>> {
        Box::pin(func(interaction))
    })
}

/// Interaction check which allows all interactions.
pub fn allow_all<I: Send + 'static>() -> BoxedCheck<I> {
    boxed_check(|_interaction: I| async { Ok::<_, Error>(true) })
}
