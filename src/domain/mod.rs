pub mod git;
pub mod message;
pub mod service;
pub mod timestamp;
pub mod walker;
