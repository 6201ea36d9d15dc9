pub mod http;
pub mod memory;

pub use http::HttpLogStore;
pub use memory::MemoryLogStore;
