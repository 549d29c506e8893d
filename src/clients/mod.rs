#[macro_use]
mod macros;
mod directory_client;

pub use directory_client::DirectoryClient;
