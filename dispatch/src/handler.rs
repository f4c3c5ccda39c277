use crate::binding::ArgValues;
use crate::context::{AfterContext, Context};
use crate::ocm::BoundCommand;
use futures::future::BoxFuture;
use model::interaction::{Interaction, InteractionResponse};
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

pub type HandlerError = Box<dyn Error + Send + Sync>;

/// `Ok(None)` leaves the response unresolved: for commands this allows
/// subcommand descent and otherwise falls back to a deferred response.
pub type HandlerResult = Result<Option<Reply>, HandlerError>;

/// Normalized handler return value. `Response` passes a fully-built
/// interaction response through untouched; the other variants are shorthand
/// that the engine expands per interaction kind.
#[derive(Debug, Clone)]
pub enum Reply {
    Message { content: Box<str>, ephemeral: bool },
    Defer { ephemeral: bool },
    Response(InteractionResponse),
}

impl Reply {
    pub fn message(content: impl Into<Box<str>>) -> Reply {
        Reply::Message {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(content: impl Into<Box<str>>) -> Reply {
        Reply::Message {
            content: content.into(),
            ephemeral: true,
        }
    }

    pub fn defer() -> Reply {
        Reply::Defer { ephemeral: false }
    }

    pub fn defer_ephemeral() -> Reply {
        Reply::Defer { ephemeral: true }
    }

    pub fn response(response: InteractionResponse) -> Reply {
        Reply::Response(response)
    }
}

/// Everything a handler receives: the request context plus the arguments the
/// registration's binding plan produced.
#[derive(Debug)]
pub struct Invocation {
    pub ctx: Context,
    pub args: Arguments,
}

#[derive(Debug)]
pub enum Arguments {
    Empty,
    /// Rich binding: the raw decoded interaction.
    Interaction(Arc<Interaction>),
    /// Per-option binding from a slot plan.
    Values(ArgValues),
    /// Declarative binding: the schema-bound value view.
    Model(BoundCommand),
}

impl Invocation {
    pub fn values(&self) -> Option<&ArgValues> {
        match &self.args {
            Arguments::Values(values) => Some(values),
            _ => None,
        }
    }

    pub fn model(&self) -> Option<&BoundCommand> {
        match &self.args {
            Arguments::Model(model) => Some(model),
            _ => None,
        }
    }
}

type HandlerFn = dyn Fn(Invocation) -> BoxFuture<'static, HandlerResult> + Send + Sync;

/// A registered callback. Synchronous and asynchronous callbacks are stored
/// uniformly as boxed futures so the engine can await either.
#[derive(Clone)]
pub struct Handler {
    f: Arc<HandlerFn>,
}

impl Handler {
    pub fn new<F, Fut>(f: F) -> Handler
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Handler {
            f: Arc::new(move |invocation| Box::pin(f(invocation))),
        }
    }

    pub fn sync<F>(f: F) -> Handler
    where
        F: Fn(Invocation) -> HandlerResult + Send + Sync + 'static,
    {
        Handler {
            f: Arc::new(move |invocation| {
                let result = f(invocation);
                Box::pin(futures::future::ready(result))
            }),
        }
    }

    pub(crate) fn invoke(&self, invocation: Invocation) -> BoxFuture<'static, HandlerResult> {
        (self.f)(invocation)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

type ErrorHandlerFn = dyn Fn(&(dyn Error + Send + Sync)) -> Option<Reply> + Send + Sync;

/// Absorbs a handler failure, optionally substituting a reply. Returning
/// `None` leaves the response unresolved, like a handler returning `Ok(None)`.
#[derive(Clone)]
pub struct ErrorHandler {
    f: Arc<ErrorHandlerFn>,
}

impl ErrorHandler {
    pub fn new<F>(f: F) -> ErrorHandler
    where
        F: Fn(&(dyn Error + Send + Sync)) -> Option<Reply> + Send + Sync + 'static,
    {
        ErrorHandler { f: Arc::new(f) }
    }

    pub(crate) fn handle(&self, error: &(dyn Error + Send + Sync)) -> Option<Reply> {
        (self.f)(error)
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler")
    }
}

type AfterHandlerFn = dyn Fn(AfterContext) -> BoxFuture<'static, Result<(), HandlerError>> + Send + Sync;

/// Detached post-response callback; failures are logged and discarded.
#[derive(Clone)]
pub struct AfterHandler {
    f: Arc<AfterHandlerFn>,
}

impl AfterHandler {
    pub fn new<F, Fut>(f: F) -> AfterHandler
    where
        F: Fn(AfterContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        AfterHandler {
            f: Arc::new(move |ctx| Box::pin(f(ctx))),
        }
    }

    pub(crate) fn invoke(&self, ctx: AfterContext) -> BoxFuture<'static, Result<(), HandlerError>> {
        (self.f)(ctx)
    }
}

impl fmt::Debug for AfterHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AfterHandler")
    }
}
