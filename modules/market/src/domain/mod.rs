pub mod error;
pub mod lookup;
pub mod repo;
pub mod service;
