//! Model-assisted parsing (the remote path)

pub mod adapter;
pub mod client;

pub use adapter::RemoteParsingAdapter;
pub use client::RemoteClient;
