pub mod api;
pub mod error;
pub mod input;
pub mod packer;
pub mod report;
pub mod solver;
pub mod types;
