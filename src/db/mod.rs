pub mod group;
pub mod portal_db;
pub mod session;
pub mod submission;
pub mod user;
