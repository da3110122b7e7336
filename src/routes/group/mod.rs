pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod submissions;
pub mod update;

/// Blank leader names are stored as no leader at all.
pub(crate) fn clean_leader_name(raw: Option<String>) -> Option<String> {
    raw.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
