//! Selection session task
//!
//! A single tokio task owns the `SelectionController`. Surfaces never touch the
//! state directly: they send "record chosen" commands over an mpsc channel and
//! watch the published state. Only picks that change the state publish.

use super::{SelectionController, SelectionState};
use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Command buffer size; picks are tiny and handled immediately
const COMMAND_BUFFER: usize = 64;

/// Which surface emitted a pick (for logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Web,
    Terminal,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Web => "web",
            Origin::Terminal => "terminal",
        }
    }
}

/// Messages accepted by the session task
#[derive(Debug)]
pub enum SessionCommand {
    /// A record was chosen on some surface
    Select {
        id: String,
        origin: Origin,
        /// Receives the state after the pick (changed or not)
        reply: Option<oneshot::Sender<SelectionState>>,
    },
}

/// Cloneable handle to the session task
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    state: watch::Receiver<SelectionState>,
}

impl SessionHandle {
    /// Spawn the session task around `controller`
    ///
    /// The task exits once every handle has been dropped.
    pub fn spawn(controller: SelectionController) -> (Self, JoinHandle<()>) {
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (state_tx, state) = watch::channel(controller.state().clone());

        let task = tokio::spawn(run_session(controller, command_rx, state_tx));

        (Self { commands, state }, task)
    }

    /// Pick a record and wait for the resulting state
    pub async fn select(&self, id: impl Into<String>, origin: Origin) -> Result<SelectionState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(SessionCommand::Select {
                id: id.into(),
                origin,
                reply: Some(reply_tx),
            })
            .await
            .context("Selection session has stopped")?;

        reply_rx
            .await
            .context("Selection session dropped the reply")
    }

    /// Receiver that wakes on every published selection change
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.state.clone()
    }

    /// Snapshot of the current state
    pub fn current(&self) -> SelectionState {
        self.state.borrow().clone()
    }
}

async fn run_session(
    mut controller: SelectionController,
    mut commands: mpsc::Receiver<SessionCommand>,
    state_tx: watch::Sender<SelectionState>,
) {
    tracing::debug!("Selection session started");

    while let Some(command) = commands.recv().await {
        match command {
            SessionCommand::Select { id, origin, reply } => {
                let before = controller.state().clone();
                let state = controller.select(&id);

                if *state != before {
                    tracing::info!(
                        id = %id,
                        origin = origin.as_str(),
                        lat = state.focus.lat,
                        lon = state.focus.lon,
                        "Locality selected"
                    );
                    state_tx.send_replace(state.clone());
                } else if controller.catalog().find_by_id(&id).is_none() {
                    tracing::debug!(id = %id, origin = origin.as_str(), "Ignoring unknown locality id");
                } else {
                    tracing::debug!(id = %id, origin = origin.as_str(), "Locality already selected");
                }

                if let Some(reply) = reply {
                    // Requester may have gone away; nothing to do then
                    let _ = reply.send(controller.state().clone());
                }
            }
        }
    }

    tracing::debug!("Selection session ended");
}
