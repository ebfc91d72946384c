pub mod like_service;
pub mod memory_like_service;
