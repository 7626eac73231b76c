//! Network actor - runs backend calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;

/// Network actor that turns commands into backend calls
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            // In-flight calls are abandoned; nothing reads their results
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let name = cmd.name();

        self.active_requests.spawn(async move {
            let Some(response) = execute(&client, cmd).await else {
                return;
            };
            if response.is_success() {
                tracing::info!(id = response.id(), call = name, "Request completed");
            } else {
                tracing::warn!(id = response.id(), call = name, ?response, "Request failed");
            }
            let _ = response_tx.send(response);
        });
    }
}

async fn execute(client: &ApiClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::IssueToken { id, passcode } => {
            tracing::info!(id, "Issuing token");
            NetworkResponse::TokenIssued {
                id,
                result: client.issue_token(&passcode).await,
            }
        }
        NetworkCommand::VerifyToken { id, token } => {
            tracing::info!(id, "Verifying token");
            NetworkResponse::TokenVerified {
                id,
                result: client.verify_token(&token).await,
            }
        }
        NetworkCommand::FetchActivity { id, token } => {
            tracing::info!(id, authenticated = token.is_some(), "Fetching activity");
            NetworkResponse::ActivityFetched {
                id,
                result: client.get_activity(token.as_deref()).await,
            }
        }
        NetworkCommand::ClearActivity { id, token } => {
            tracing::info!(id, "Clearing activity");
            NetworkResponse::ActivityCleared {
                id,
                result: client.clear_activity(&token).await,
            }
        }
        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}
