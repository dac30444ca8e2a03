//! Cache module - Redis client and operations
//!
//! This module provides Redis caching functionality including:
//! - Connection management with retry logic
//! - Basic operations (set, delete, exists, increment, ttl)
//! - The revoked access token denylist

pub mod redis_client;
pub mod token_denylist;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use token_denylist::RedisTokenRepository;
