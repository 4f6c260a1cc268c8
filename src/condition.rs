use serde::Deserialize;
use serde_with::{NoneAsEmptyString, PickFirst, serde_as};
use utoipa::IntoParams;

use crate::predicate::build_predicates;

/// Optional search criteria for members.
///
/// A missing field means "no constraint on that field". Blank strings are
/// treated the same as missing ones. Ages accept numbers or numeric strings,
/// and an empty `ageGoe=` / `ageLoe=` query parameter decodes as `None`
/// rather than failing.
///
/// # Query parameters
/// ```text
/// GET /v3/members?teamName=teamB&ageGoe=35&ageLoe=40
/// ```
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MemberSearchCondition {
    /// Exact member username.
    #[param(example = "member1")]
    pub username: Option<String>,
    /// Exact team name; members without a team never match.
    #[param(example = "teamB")]
    pub team_name: Option<String>,
    /// Minimum age (inclusive).
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, NoneAsEmptyString)>")]
    #[param(value_type = Option<i32>, example = 35)]
    pub age_goe: Option<i32>,
    /// Maximum age (inclusive).
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, NoneAsEmptyString)>")]
    #[param(value_type = Option<i32>, example = 40)]
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    #[must_use]
    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    #[must_use]
    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// True when this condition produces no predicates and so matches every member.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        build_predicates(self).is_empty()
    }
}
