//! Password hashing with bcrypt

mod hasher;

pub use hasher::{PasswordHasher, DEFAULT_COST};
