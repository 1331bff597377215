//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create / update DTOs used by the repositories

pub mod card;
pub mod contact;
pub mod email_confirmation;
pub mod profile;
pub mod session;
pub mod subscription;
pub mod user;
pub mod wizard_session;
