pub mod auth;
pub mod error;
pub mod group;
pub mod response;
pub mod submission;
pub mod user;
