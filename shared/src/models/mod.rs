//! Domain models for the jar service
//!
//! Entities plus their create/update payloads and response views. All
//! timestamps are Unix millis (`i64`); repositories and the wire format
//! speak the same unit.

pub mod jar;
pub mod member;
pub mod suggestion;
pub mod vote;

pub use jar::{Jar, JarCreate, JarDetail, JarStats, JarStatus, JarUpdate};
pub use member::{Member, MemberJoin, MemberStatus};
pub use suggestion::{Suggestion, SuggestionCreate, SuggestionUpdate, SuggestionWithVotes};
pub use vote::{
    JarResults, SuggestionVotes, Vote, VoteBatch, VoteEntry, VotePoints, VoteSummary, Winner,
};
