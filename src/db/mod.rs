pub mod application_repository;
pub mod company_repository;
pub mod connection;
pub mod job_repository;
pub mod migrations;
pub mod models;
pub mod store;

pub use job_repository::PgJobStore;
pub use store::{JobStore, StoreError};
