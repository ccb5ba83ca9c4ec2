pub mod transaction;

pub use transaction::{CommandRecord, CommandType};
