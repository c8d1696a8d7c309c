//! Services bridging the pure game transitions with the store and card source.

pub mod dispatch;
pub mod turn_controller;

pub use dispatch::{spawn_controller, ControllerEvent, ControllerHandle};
pub use turn_controller::{Command, TurnController};
