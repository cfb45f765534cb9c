pub mod bench;
pub mod solve;
