//! Core domain types.
//!
//! Newtype wrappers and small value types shared across the workspace.

mod email;
mod id;
mod message;
mod read_flag;

pub use email::{Email, EmailError};
pub use id::{AdminId, MessageId};
pub use message::ContactMessage;
pub use read_flag::ReadFlag;
