use std::sync::Arc;

use crate::domain::state::PlayerColor;
use crate::services::dispatch::ControllerHandle;
use crate::store::{GameStore, StoreKind};

/// Shared resources handed to every request and websocket session.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn GameStore>,
    blue: ControllerHandle,
    green: ControllerHandle,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, blue: ControllerHandle, green: ControllerHandle) -> Self {
        Self { store, blue, green }
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    pub fn store_kind(&self) -> StoreKind {
        self.store.kind()
    }

    /// Controller acting for `seat`.
    pub fn controller(&self, seat: PlayerColor) -> &ControllerHandle {
        match seat {
            PlayerColor::Blue => &self.blue,
            PlayerColor::Green => &self.green,
        }
    }
}
