pub mod chain;
pub mod constants;
pub mod error;
pub mod transaction;
pub mod types;
pub mod unlock;

pub use chain::*;
pub use constants::*;
pub use error::HechainError;
pub use transaction::*;
pub use types::*;
pub use unlock::*;
