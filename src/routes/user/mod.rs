pub mod approve;
pub mod create;
pub mod delete;
pub mod get;
pub mod join_team;
pub mod list;
pub mod pending;
pub mod reject;
pub mod role;
pub mod submissions;
pub mod update;
