pub mod config;
pub mod error;
pub mod types;

pub use config::AutomatonConfig;
pub use error::{AutomatonError, Result};
pub use types::{Direction, FieldKind, Generation, Mode, Position, BORDER, UNTIMED};
