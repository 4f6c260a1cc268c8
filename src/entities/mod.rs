//! Sea-ORM entities for the member/team model.
//!
//! Every member optionally belongs to one team. Searches always select
//! from `member` LEFT JOIN `team`, so members without a team stay visible
//! unless a team name filter is applied.

pub mod member;
pub mod team;

pub use member::MemberTeamRow;
