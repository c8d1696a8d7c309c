//! Wire shapes shared by the HTTP and websocket surfaces.

pub mod view;

pub use view::{BoardCellView, ClientView, HandCard};
