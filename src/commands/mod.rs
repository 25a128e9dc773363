//! Command implementations

mod config_cmd;
mod filter;
mod list;
mod note;
mod refresh;
mod session;
mod stats;
mod suggest;
mod toggle;
mod transfer;

pub use config_cmd::config_cmd;
pub use filter::filter_cmd;
pub use list::{list, show};
pub use note::note_cmd;
pub use refresh::refresh;
pub use stats::stats;
pub use suggest::suggest;
pub use toggle::toggle;
pub use transfer::{export, import};
