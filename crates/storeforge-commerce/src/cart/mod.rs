//! Shopping cart module.
//!
//! Contains line items, the cart state, the command set and the pure
//! reducer that moves between states.

mod command;
mod item;
mod legacy;
mod reducer;
mod state;

pub use command::CartCommand;
pub use item::{LineItem, NewLineItem};
pub use legacy::migrate_legacy;
pub use reducer::{reduce, try_reduce};
pub use state::CartState;
