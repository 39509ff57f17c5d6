//! Local storage for pftracker
//!
//! Finance records live on the server; the client only keeps its settings
//! and the login session, both as JSON files written atomically.

pub mod file_io;
pub mod session;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use session::{Session, SessionStore};
