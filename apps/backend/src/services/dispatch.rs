//! Controller task: one event at a time, actions and remote snapshots alike.
//!
//! Each seat's `TurnController` lives on its own tokio task. Actions arrive on
//! an mpsc channel with a oneshot reply; store snapshots arrive on the seat's
//! subscription. Queued snapshots are drained before the next action runs.
//! After every event the controller's state is published on a `watch`
//! channel, which is what sessions render from.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use super::turn_controller::{Command, TurnController};
use crate::domain::state::{GameState, PlayerColor};
use crate::errors::domain::DomainError;
use crate::store::{Snapshot, Subscription};

const EVENT_BUFFER: usize = 64;

pub enum ControllerEvent {
    Action {
        command: Command,
        reply: oneshot::Sender<Result<GameState, DomainError>>,
    },
    RemoteUpdate(Snapshot),
}

#[derive(Clone)]
pub struct ControllerHandle {
    seat: PlayerColor,
    tx: mpsc::Sender<ControllerEvent>,
    state: watch::Receiver<GameState>,
}

impl ControllerHandle {
    pub fn seat(&self) -> PlayerColor {
        self.seat
    }

    /// Run `command` on the controller and return the state it left behind.
    pub async fn dispatch(&self, command: Command) -> Result<GameState, DomainError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(ControllerEvent::Action { command, reply })
            .await
            .map_err(|_| DomainError::ControllerStopped(self.seat))?;
        rx.await
            .map_err(|_| DomainError::ControllerStopped(self.seat))?
    }

    /// Latest published state.
    pub fn current(&self) -> GameState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<GameState> {
        self.state.clone()
    }
}

/// Subscribe the controller to its store and start its task.
pub async fn spawn_controller(controller: TurnController) -> Result<ControllerHandle, DomainError> {
    let seat = controller.seat();
    let subscription = controller.store().subscribe().await?;
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let (state_tx, state_rx) = watch::channel(controller.state().clone());

    tokio::spawn(run(controller, rx, subscription, state_tx));
    info!(seat = %seat, "Turn controller started");

    Ok(ControllerHandle {
        seat,
        tx,
        state: state_rx,
    })
}

async fn run(
    mut controller: TurnController,
    mut events: mpsc::Receiver<ControllerEvent>,
    mut subscription: Subscription,
    state_tx: watch::Sender<GameState>,
) {
    let seat = controller.seat();
    let mut feed_open = true;

    loop {
        let event = tokio::select! {
            biased;
            snapshot = subscription.next(), if feed_open => match snapshot {
                Some(snapshot) => ControllerEvent::RemoteUpdate(snapshot),
                None => {
                    warn!(seat = %seat, "Store subscription ended; remote updates stop");
                    feed_open = false;
                    continue;
                }
            },
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        match event {
            ControllerEvent::Action { command, reply } => {
                let result = controller
                    .handle(&command)
                    .await
                    .map(|()| controller.state().clone());
                if reply.send(result).is_err() {
                    debug!(seat = %seat, command = %command, "Caller went away before reply");
                }
            }
            ControllerEvent::RemoteUpdate(snapshot) => {
                controller.apply_remote(snapshot);
            }
        }

        let latest = controller.state();
        state_tx.send_if_modified(|published| {
            if published == latest {
                false
            } else {
                *published = latest.clone();
                true
            }
        });
    }

    info!(seat = %seat, "Turn controller stopped");
}
