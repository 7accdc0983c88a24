//! Mutation dispatcher: one intent in, at most one remote call out.

use tracing::{debug, error};

use crate::client::TodoClient;
use crate::error::{ApiError, DispatchError};
use crate::http::Transport;
use crate::intent::Intent;

impl TodoClient {
    /// Validate `intent`, send the single request it maps to, and report
    /// whether the backend accepted it.
    ///
    /// Validation failures return `InvalidInput` without any I/O. Every
    /// remote failure, whether a transport error or a non-2xx status, becomes
    /// `RemoteOperationFailed` for the intent's kind. The response body is
    /// discarded; reload the collection to observe the result.
    pub async fn dispatch<T: Transport>(&self, transport: &T, intent: Intent) -> Result<(), DispatchError> {
        intent.validate()?;
        let kind = intent.kind();

        self.send_intent(transport, &intent).await.map_err(|source| {
            error!(%kind, error = %source, "failed to {kind} todo");
            DispatchError::RemoteOperationFailed { kind, source }
        })
    }

    async fn send_intent<T: Transport>(&self, transport: &T, intent: &Intent) -> Result<(), ApiError> {
        let request = self.build_intent(intent)?;
        debug!(kind = %intent.kind(), method = request.method.as_str(), path = %request.path, "dispatching");
        let response = transport.execute(request).await?;
        self.parse_mutation(response)
    }
}
