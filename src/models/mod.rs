//! Wire data types.

mod chat;
mod request;

pub use chat::{
    AcceptedChanges, ChatMessage, ChatOutcome, FileChange, FileOperation, RevertedChanges, Role,
};
pub use request::{DevRequest, NewDevRequest};
