pub mod discovery;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod output;
pub mod page;
pub mod primary;
pub mod profiles;
pub mod scout;

pub use error::{Result, ScoutError};
pub use scout::Scout;
