//! Runtime core: the supervisor event loop and OS signal handling.
//!
//! Internal modules:
//! - [`supervisor`]: the state machine owning the single child handle;
//! - [`shutdown`]: cross-platform interrupt signal waiting.

mod shutdown;
mod supervisor;

pub use supervisor::Supervisor;
