use crate::context::AfterContext;
use crate::handler::AfterHandler;

/// Run an after-response hook as a detached task. The primary response has
/// already been handed back by the time this runs; failures are logged and
/// discarded, never surfaced to the original request.
pub(crate) fn spawn(handler: AfterHandler, ctx: AfterContext) {
    tokio::spawn(async move {
        if let Err(e) = handler.invoke(ctx).await {
            tracing::error!("after-response handler failed: {}", e);
        }
    });
}
