//! `brandhub-clients`
//!
//! **Responsibility:** agency clients (linked to brands many-to-many) and the
//! agency team.

pub mod client;
pub mod seed;
pub mod user;

pub use client::Client;
pub use user::{Role, User};
