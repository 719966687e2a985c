//! Use-case services over the repositories.

pub mod user_service;
