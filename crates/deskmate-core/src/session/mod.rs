//! Session domain types.

mod model;
mod token;

pub use model::{IDLE_TIMEOUT_MS, Session, User, UserRole};
pub use token::BearerToken;
