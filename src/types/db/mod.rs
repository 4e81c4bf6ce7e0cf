// Database entities (SeaORM models)
pub mod issue;
pub mod user;
