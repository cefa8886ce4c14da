//! Chat domain.
//!
//! - [`turn::Turn`]: a single message in a conversation
//! - [`session::ChatSession`]: ordered turns plus the in-progress streaming turn
//! - [`stream::StreamEvent`]: events produced by a streaming reply

pub mod session;
pub mod stream;
pub mod turn;
