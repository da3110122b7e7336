pub mod ratelimit;
pub mod storage;
pub mod token;
pub mod webutils;
