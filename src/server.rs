use std::{net::SocketAddr, time::Duration};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::{
    Error, Res,
    api::{self, CallbackOutcome, CallbackState},
    debug,
};

pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .with_state(state)
}

/// Local server waiting for exactly one OAuth redirect.
pub struct CallbackServer {
    local_addr: SocketAddr,
    outcome: oneshot::Receiver<CallbackOutcome>,
    handle: JoinHandle<()>,
}

impl CallbackServer {
    /// Binds `addr` and starts serving the callback routes.
    ///
    /// `expected_state` is compared with the `state` query parameter of the
    /// redirect when present.
    pub async fn start(addr: &str, expected_state: Option<String>) -> Res<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("cannot bind {}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;

        let (state, outcome) = CallbackState::new(expected_state);
        let app = router(state);
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                debug!("Callback server stopped: {}", e);
            }
        });

        debug!("Callback server listening on {}", local_addr);
        Ok(Self {
            local_addr,
            outcome,
            handle,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits for the redirect and returns the authorization code.
    ///
    /// The server is shut down whatever the outcome.
    pub async fn wait_for_code(self, timeout: Duration) -> Res<String> {
        let result = tokio::time::timeout(timeout, self.outcome).await;
        self.handle.abort();

        match result {
            Ok(Ok(CallbackOutcome::Code(code))) => Ok(code),
            Ok(Ok(CallbackOutcome::Denied(reason))) => {
                Err(Error::Callback(format!("authorization denied: {}", reason)))
            }
            Ok(Ok(CallbackOutcome::Invalid(reason))) => Err(Error::Callback(reason)),
            Ok(Err(_)) => Err(Error::Callback("callback server stopped".to_string())),
            Err(_) => Err(Error::Callback(format!(
                "no callback received within {} seconds",
                timeout.as_secs()
            ))),
        }
    }
}
