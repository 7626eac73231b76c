//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let startup = self.state.startup();
        self.send(startup);
        self.publish();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.publish();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.publish();
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Start any queries the new state needs, then push a frame to the UI
    fn publish(&mut self) {
        let query = self.state.poll_queries();
        self.send(query);
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Login surface
            UiEvent::PasscodeChar(c) => {
                let cmd = self.state.passcode_char(c);
                self.send(cmd);
            }
            UiEvent::PasscodeBackspace => self.state.passcode_backspace(),
            UiEvent::OpenLogin => self.state.open_login(),
            UiEvent::CloseLogin => self.state.close_login(),

            // Session
            UiEvent::Logout => self.state.logout(),

            // Activity widget
            UiEvent::RefreshActivity => {
                let cmd = self.state.refresh_activity();
                self.send(cmd);
            }
            UiEvent::ClearActivity => {
                let cmd = self.state.clear_activity();
                self.send(cmd);
            }

            // Layout / popups
            UiEvent::ToggleSidebar => self.state.toggle_sidebar(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionManager, SessionStatus};
    use crate::storage::MemoryTokenStore;

    #[tokio::test]
    async fn test_actor_round_trip_login() {
        let store = MemoryTokenStore::new();
        let state = AppState::new(SessionManager::new(Box::new(store.clone())), "http://api.test");

        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(AppActor::new(state, net_tx, render_tx).run(ui_rx, net_resp_rx));

        ui_tx.send(UiEvent::OpenLogin).unwrap();
        for c in "123456".chars() {
            ui_tx.send(UiEvent::PasscodeChar(c)).unwrap();
        }

        let Some(NetworkCommand::IssueToken { id, passcode }) = net_cmd_rx.recv().await else {
            panic!("expected issue command");
        };
        assert_eq!(passcode, "123456");

        net_resp_tx
            .send(NetworkResponse::TokenIssued {
                id,
                result: Ok("abc".to_string()),
            })
            .unwrap();

        // Authenticated on home: the widget's first fetch follows
        assert!(matches!(
            net_cmd_rx.recv().await,
            Some(NetworkCommand::FetchActivity { .. })
        ));

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();

        let mut last = None;
        while let Ok(frame) = render_rx.try_recv() {
            last = Some(frame);
        }
        let last = last.unwrap();
        assert_eq!(last.session.status, SessionStatus::Authenticated);
        assert_eq!(store.get(), Some("abc".to_string()));
    }
}
