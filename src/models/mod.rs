pub mod message;
pub mod mood;
pub mod role;
pub mod wish;
