//! Development server with live reload for the DeployMe landing site.
//!
//! Renders pages on request, watches the site configuration and the public directory, and
//! tells connected browsers to reload over a WebSocket.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{HmrHub, HmrMessage};
