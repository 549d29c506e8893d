//! The directory component: state, transitions and the service that owns them.

pub mod error;
pub mod service;
pub mod state;

pub use error::*;
pub use service::DirectoryService;
pub use state::DirectoryState;
