//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod card_repo;
pub mod contact_repo;
pub mod email_confirmation_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod subscription_repo;
pub mod user_repo;
pub mod wizard_session_repo;

pub use card_repo::{CardRepo, PgCardWriter};
pub use contact_repo::ContactRepo;
pub use email_confirmation_repo::EmailConfirmationRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
pub use wizard_session_repo::WizardSessionRepo;
