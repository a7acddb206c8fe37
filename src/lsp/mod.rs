//! Language-server scaffold: LSP framing and a JSON-RPC lifecycle server.

pub mod message_io;
pub mod server;

pub use message_io::{MessageReader, MessageWriter};
pub use server::Server;
