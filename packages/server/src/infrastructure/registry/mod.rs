//! ConnectionRegistry の実装
//!
//! ## 実装
//!
//! - `inmemory`: HashMap と mpsc チャンネルを使った実装

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
