pub mod group;
pub mod role;
pub mod session;
pub mod submission;
pub mod user;

/*
 Users can register without a team and pick one later. A team (group) holds at most ten users
 and at most one of them is the leader. Members need their leader's approval before they can
 upload submissions; owner and admin accounts are never gated.
 */
