//! The per-route middleware chain.
//!
//! Every stage of a route, including its handlers, implements the same
//! [`Middleware`] trait. A stage receives the mutable [`RouteContext`],
//! the [`ValidatedRequest`] payload, and a [`Next`] that continues the
//! chain. Stages placed before validation receive an empty payload; the
//! validation stage swaps in the parsed one for everything downstream.
//!
//! # Example
//!
//! ```ignore
//! use periplus_core::{BoxFuture, Middleware, Next, RouteContext, ValidatedRequest};
//!
//! struct Timing;
//!
//! impl Middleware for Timing {
//!     fn name(&self) -> &'static str {
//!         "timing"
//!     }
//!
//!     fn handle<'a>(
//!         &'a self,
//!         ctx: &'a mut RouteContext,
//!         request: ValidatedRequest,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, periplus_core::PeriplusResult<()>> {
//!         Box::pin(async move {
//!             let start = std::time::Instant::now();
//!             let result = next.run(ctx, request).await;
//!             tracing::debug!(elapsed = ?start.elapsed(), "stage finished");
//!             result
//!         })
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::context::RouteContext;
use crate::error::PeriplusResult;
use crate::validated::ValidatedRequest;

/// A boxed future, the return type of every chain stage.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One stage of a route's chain.
///
/// # Invariants
///
/// - A stage calls `next.run()` at most once; skipping it short-circuits
///   the rest of the chain.
/// - A stage forwards the payload it was given unless it is the
///   validation stage.
pub trait Middleware: Send + Sync + 'static {
    /// The stage name, used in logs.
    fn name(&self) -> &'static str;

    /// Processes the request through this stage.
    fn handle<'a>(
        &'a self,
        ctx: &'a mut RouteContext,
        request: ValidatedRequest,
        next: Next<'a>,
    ) -> BoxFuture<'a, PeriplusResult<()>>;
}

/// Continuation of the chain after the current stage.
///
/// Consumed by [`Next::run`], so a stage can only continue once.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    Chain {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    Terminal,
}

impl<'a> Next<'a> {
    /// Creates a `Next` that will invoke the given stage.
    #[must_use]
    pub fn new(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Chain {
                middleware,
                next: Box::new(next),
            },
        }
    }

    /// Creates the end of the chain, which completes successfully.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            inner: NextInner::Terminal,
        }
    }

    /// Invokes the next stage in the chain.
    ///
    /// # Errors
    ///
    /// Returns whatever error a downstream stage raised, unmodified.
    pub async fn run(
        self,
        ctx: &mut RouteContext,
        request: ValidatedRequest,
    ) -> PeriplusResult<()> {
        match self.inner {
            NextInner::Chain { middleware, next } => middleware.handle(ctx, request, *next).await,
            NextInner::Terminal => Ok(()),
        }
    }
}

/// A middleware built from a closure, for around-style stages.
///
/// The closure receives all three chain arguments, so it can run code
/// both before and after the downstream stages.
///
/// # Example
///
/// ```ignore
/// let stage = FnMiddleware::new("audit", |ctx, request, next| {
///     Box::pin(async move {
///         tracing::info!(path = ctx.path(), "audit");
///         next.run(ctx, request).await
///     })
/// });
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F>
where
    F: for<'a> Fn(
            &'a mut RouteContext,
            ValidatedRequest,
            Next<'a>,
        ) -> BoxFuture<'a, PeriplusResult<()>>
        + Send
        + Sync
        + 'static,
{
    /// Creates a closure-backed middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(
            &'a mut RouteContext,
            ValidatedRequest,
            Next<'a>,
        ) -> BoxFuture<'a, PeriplusResult<()>>
        + Send
        + Sync
        + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle<'a>(
        &'a self,
        ctx: &'a mut RouteContext,
        request: ValidatedRequest,
        next: Next<'a>,
    ) -> BoxFuture<'a, PeriplusResult<()>> {
        (self.func)(ctx, request, next)
    }
}

/// A handler built from a closure that does not manage the chain itself.
///
/// The closure reads the payload and writes to the response; the chain
/// is continued automatically afterwards. Create one with [`handler_fn`].
pub struct HandlerFn<F> {
    name: &'static str,
    func: F,
}

/// Wraps an async closure as a chain stage that always continues.
///
/// This is the usual way to write route handlers.
///
/// # Example
///
/// ```ignore
/// let get_ship = handler_fn("get_ship", |ctx, request| {
///     Box::pin(async move {
///         let id = request.params()["shipId"].clone();
///         ctx.response_mut().set_json(&serde_json::json!({"id": id}))
///     })
/// });
/// ```
pub fn handler_fn<F>(name: &'static str, func: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a mut RouteContext, &'a ValidatedRequest) -> BoxFuture<'a, PeriplusResult<()>>
        + Send
        + Sync
        + 'static,
{
    HandlerFn { name, func }
}

impl<F> Middleware for HandlerFn<F>
where
    F: for<'a> Fn(&'a mut RouteContext, &'a ValidatedRequest) -> BoxFuture<'a, PeriplusResult<()>>
        + Send
        + Sync
        + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle<'a>(
        &'a self,
        ctx: &'a mut RouteContext,
        request: ValidatedRequest,
        next: Next<'a>,
    ) -> BoxFuture<'a, PeriplusResult<()>> {
        Box::pin(async move {
            (self.func)(&mut *ctx, &request).await?;
            next.run(ctx, request).await
        })
    }
}
