//! Domain logic for onlycard digital business cards.
//!
//! Everything here is pure and synchronous except the [`wizard`] theme step,
//! which persists through the [`wizard::CardWriter`] trait. Storage and HTTP
//! live in `onlycard-db` and `onlycard-api`.

pub mod account;
pub mod activity;
pub mod card;
pub mod error;
pub mod fields;
pub mod lead_capture;
pub mod platform;
pub mod share;
pub mod theme;
pub mod types;
pub mod wizard;
