pub mod config;
pub mod error;
pub mod gate;
pub mod io;
pub mod paths;
pub mod promotion;
pub mod publisher;
pub mod resolve;
pub mod types;

pub use error::{PromoteError, Result};
pub use resolve::resolve;
pub use types::{Channel, PromotionAction, PromotionChoice, Track};
