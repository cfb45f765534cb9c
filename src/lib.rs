pub mod config;
pub mod error;
pub mod optimizer;
pub mod presets;
pub mod scenario;
pub mod solution;
// cmd and reports are modules of the binary crate (main), not the library.
