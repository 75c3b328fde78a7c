pub mod api;
pub mod cipher;
pub mod config;
pub mod error;
pub mod oracle;
pub mod scorer;
pub mod search;
// cmd and reports belong to the binary (main.rs).
