//! # Predicate Builder
//!
//! Turns a [`MemberSearchCondition`] into typed predicates instead of SQL
//! text. Each populated field contributes exactly one predicate; absent or
//! blank fields contribute nothing, so an empty condition yields an empty
//! list, which [`conjunction`] renders as the match-all condition.
//!
//! ```rust,ignore
//! let condition = MemberSearchCondition::new().with_team_name("teamB").with_age_goe(35);
//! let predicates = build_predicates(&condition);
//! // [team.name = 'teamB', member.age >= 35]
//! let select = member::Entity::find().filter(conjunction(&predicates));
//! ```

use sea_orm::{ColumnTrait, Condition, Value, sea_query::SimpleExpr};
use std::fmt;

use crate::condition::MemberSearchCondition;
use crate::entities::{member, team};

/// Column a predicate is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// `member.username`
    Username,
    /// `team.name`, only resolvable with the team join applied
    TeamName,
    /// `member.age`
    Age,
}

impl FilterField {
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Username => "member.username",
            Self::TeamName => "team.name",
            Self::Age => "member.age",
        }
    }
}

/// Comparison operators supported by member predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equality (=)
    Eq,
    /// Greater than or equal (>=)
    Gte,
    /// Less than or equal (<=)
    Lte,
}

impl FilterOperator {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// An atomic, stateless boolean test on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: FilterField,
    pub operator: FilterOperator,
    pub value: Value,
}

impl Predicate {
    pub fn new(field: FilterField, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn username_eq(username: &str) -> Self {
        Self::new(FilterField::Username, FilterOperator::Eq, username)
    }

    #[must_use]
    pub fn team_name_eq(team_name: &str) -> Self {
        Self::new(FilterField::TeamName, FilterOperator::Eq, team_name)
    }

    #[must_use]
    pub fn age_goe(age: i32) -> Self {
        Self::new(FilterField::Age, FilterOperator::Gte, age)
    }

    #[must_use]
    pub fn age_loe(age: i32) -> Self {
        Self::new(FilterField::Age, FilterOperator::Lte, age)
    }

    /// Table-qualified SQL expression for this predicate.
    #[must_use]
    pub fn to_expr(&self) -> SimpleExpr {
        let value = self.value.clone();
        match self.field {
            FilterField::Username => compare(member::Column::Username, self.operator, value),
            FilterField::TeamName => compare(team::Column::Name, self.operator, value),
            FilterField::Age => compare(member::Column::Age, self.operator, value),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.field.column_name(), self.operator.symbol())?;
        match &self.value {
            Value::String(Some(text)) => write!(f, "'{text}'"),
            Value::Int(Some(number)) => write!(f, "{number}"),
            other => write!(f, "{other:?}"),
        }
    }
}

fn compare<C: ColumnTrait>(column: C, operator: FilterOperator, value: Value) -> SimpleExpr {
    match operator {
        FilterOperator::Eq => column.eq(value),
        FilterOperator::Gte => column.gte(value),
        FilterOperator::Lte => column.lte(value),
    }
}

fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Build the predicates for every populated field of `condition`.
///
/// Order is fixed: username, team name, minimum age, maximum age. Any age,
/// including zero or a negative number, is a constraint; only `None` is
/// skipped.
#[must_use]
pub fn build_predicates(condition: &MemberSearchCondition) -> Vec<Predicate> {
    [
        has_text(condition.username.as_deref()).map(Predicate::username_eq),
        has_text(condition.team_name.as_deref()).map(Predicate::team_name_eq),
        condition.age_goe.map(Predicate::age_goe),
        condition.age_loe.map(Predicate::age_loe),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Both bounds of an inclusive age range.
#[must_use]
pub fn age_between(goe: i32, loe: i32) -> Vec<Predicate> {
    vec![Predicate::age_goe(goe), Predicate::age_loe(loe)]
}

/// AND of all predicates. An empty slice is the identity (`Condition::all()`).
#[must_use]
pub fn conjunction(predicates: &[Predicate]) -> Condition {
    predicates
        .iter()
        .fold(Condition::all(), |condition, predicate| {
            condition.add(predicate.to_expr())
        })
}
