use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, Redirect},
    Form,
};
use todo_core::{DispatchError, Intent, Transport};
use tracing::warn;

use crate::{error::ActionError, view::render_page, AppState};

/// `GET /`: load the collection and render it.
pub async fn index<T: Transport>(State(state): State<AppState<T>>) -> Html<String> {
    let todos = state.client.load(state.transport.as_ref()).await;
    Html(render_page(&todos, None))
}

/// `POST /`: turn the form into an intent and dispatch it.
///
/// Success redirects back to `/`, which reloads the collection. Failure
/// reloads it here and renders the page with an error banner. A body that is
/// not a urlencoded form counts as invalid input.
pub async fn submit<T: Transport>(
    State(state): State<AppState<T>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Redirect, ActionError> {
    let transport = state.transport.as_ref();
    let outcome = match form {
        Ok(Form(fields)) => match Intent::from_fields(&fields) {
            Ok(intent) => state.client.dispatch(transport, intent).await,
            Err(e) => Err(e),
        },
        Err(rejection) => Err(DispatchError::InvalidInput(rejection.body_text())),
    };

    match outcome {
        Ok(()) => Ok(Redirect::to("/")),
        Err(error) => {
            // Remote failures are already logged by the dispatcher.
            if let DispatchError::InvalidInput(reason) = &error {
                warn!(%reason, "rejected form submission");
            }
            let todos = state.client.load(transport).await;
            Err(ActionError { error, todos })
        }
    }
}
