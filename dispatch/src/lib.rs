pub mod api;
pub mod binding;
pub mod ocm;

mod error;
pub use error::DispatchError;

mod handler;
pub use handler::{
    AfterHandler, Arguments, ErrorHandler, Handler, HandlerError, HandlerResult, Invocation, Reply,
};

mod registry;
pub use registry::{CommandRegistration, ElementKind, ElementRegistration};

mod context;
pub use context::{AfterContext, Context};

mod app;
pub use app::App;

mod after;
mod engine;
