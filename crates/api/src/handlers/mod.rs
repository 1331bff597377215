//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the repositories in `onlycard_db`, run domain rules
//! from `onlycard_core`, and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod card;
pub mod catalog;
pub mod contact;
pub mod dashboard;
pub mod profile;
pub mod public;
pub mod upload;
pub mod wizard;
