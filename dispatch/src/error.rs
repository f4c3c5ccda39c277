use crate::binding::BindError;
use crate::handler::HandlerError;

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    /// The remote service only ever sends names of published commands, so an
    /// unknown top-level name is a configuration defect and is not swallowed.
    #[error("no command registered under \"{0}\"")]
    UnknownCommand(Box<str>),

    #[error("error while binding handler arguments: {0}")]
    Bind(#[from] BindError),

    #[error("handler failed: {0}")]
    Handler(#[source] HandlerError),
}
