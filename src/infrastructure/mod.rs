pub mod config;
pub mod seed;
pub mod server;
pub mod state;
pub mod store;

pub use config::Config;
pub use state::AppState;
pub use store::{HttpLogStore, MemoryLogStore};
