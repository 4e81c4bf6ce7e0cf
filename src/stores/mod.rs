// Stores layer - data access over the shared connection pool
pub mod credential_store;
pub mod issue_store;

pub use credential_store::CredentialStore;
pub use issue_store::IssueStore;
