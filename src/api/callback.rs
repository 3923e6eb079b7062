use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    response::Html,
};
use tokio::sync::{Mutex, oneshot};

use crate::warning;

/// What the provider sent back to the redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    /// The user declined or the provider reported an error.
    Denied(String),
    /// The request did not belong to this authorization attempt.
    Invalid(String),
}

/// Router state for one authorization attempt.
///
/// The sender is taken by the first callback request; later requests are
/// answered but ignored.
#[derive(Debug, Clone)]
pub struct CallbackState {
    expected_state: Option<String>,
    sender: Arc<Mutex<Option<oneshot::Sender<CallbackOutcome>>>>,
}

impl CallbackState {
    pub fn new(
        expected_state: Option<String>,
    ) -> (Self, oneshot::Receiver<CallbackOutcome>) {
        let (tx, rx) = oneshot::channel();
        let state = Self {
            expected_state,
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (state, rx)
    }
}

pub async fn callback(
    State(state): State<CallbackState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<&'static str> {
    let outcome = classify(&state, &params);

    let Some(sender) = state.sender.lock().await.take() else {
        return Html("<h4>Authorization already handled.</h4>");
    };

    let page = match &outcome {
        CallbackOutcome::Code(_) => {
            Html("<h2>Authentication successful!</h2><p>You can close this window now.</p>")
        }
        CallbackOutcome::Denied(reason) => {
            warning!("Authorization denied: {}", reason);
            Html("<h4>Authentication failed.</h4>")
        }
        CallbackOutcome::Invalid(reason) => {
            warning!("Invalid callback: {}", reason);
            Html("<h4>Authentication failed.</h4>")
        }
    };

    let _ = sender.send(outcome);
    page
}

fn classify(state: &CallbackState, params: &HashMap<String, String>) -> CallbackOutcome {
    if let Some(error) = params.get("error") {
        return CallbackOutcome::Denied(error.clone());
    }

    if let Some(expected) = &state.expected_state {
        if params.get("state") != Some(expected) {
            return CallbackOutcome::Invalid("state mismatch".to_string());
        }
    }

    match params.get("code") {
        Some(code) if !code.is_empty() => CallbackOutcome::Code(code.clone()),
        _ => CallbackOutcome::Invalid("missing authorization code".to_string()),
    }
}
