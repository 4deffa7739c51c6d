use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::Difficulty;

/// Wire value meaning "no constraint on this field"
pub const ALL: &str = "all";

/// Prize buckets over the digits of `prize_value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PrizeRange {
    Low,
    Medium,
    High,
    #[default]
    All,
}

impl PrizeRange {
    pub const LOW_CEILING: u64 = 2_000;
    pub const HIGH_FLOOR: u64 = 5_000;

    /// Bucket an extracted prize amount; never returns `All`
    pub fn classify(amount: u64) -> Self {
        if amount < Self::LOW_CEILING {
            Self::Low
        } else if amount < Self::HIGH_FLOOR {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::All => ALL,
        }
    }
}

/// Deadline buckets relative to the evaluation instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DeadlineWindow {
    Week,
    Month,
    Later,
    #[default]
    All,
}

impl DeadlineWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Later => "later",
            Self::All => ALL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter value '{0}'")]
pub struct UnknownFilterValue(pub String);

impl FromStr for PrizeRange {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "" | ALL => Ok(Self::All),
            other => Err(UnknownFilterValue(other.to_string())),
        }
    }
}

impl TryFrom<String> for PrizeRange {
    type Error = UnknownFilterValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl TryFrom<String> for DeadlineWindow {
    type Error = UnknownFilterValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl FromStr for DeadlineWindow {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "later" => Ok(Self::Later),
            "" | ALL => Ok(Self::All),
            other => Err(UnknownFilterValue(other.to_string())),
        }
    }
}

/// The user's current filter configuration. `None` and `All` impose no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default, with = "sentinel")]
    #[schema(value_type = String, example = "all")]
    pub category: Option<String>,
    #[serde(default, with = "sentinel")]
    #[schema(value_type = String, example = "all")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub prize_range: PrizeRange,
    #[serde(default)]
    pub deadline: DeadlineWindow,
}

impl FilterSelection {
    /// Selection that lets every record through
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::all()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_prize_range(mut self, prize_range: PrizeRange) -> Self {
        self.prize_range = prize_range;
        self
    }

    pub fn with_deadline(mut self, deadline: DeadlineWindow) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Row ordering requested from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    /// Whatever order the store returns
    #[default]
    Store,
    /// `created_at` descending
    Newest,
}

/// Query parameters of the filtering endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CompetitionQuery {
    /// Category name, or `all`
    #[serde(default, with = "sentinel")]
    #[param(value_type = Option<String>)]
    pub category: Option<String>,
    /// easy, medium, hard or `all`
    #[serde(default, with = "sentinel")]
    #[param(value_type = Option<String>)]
    pub difficulty: Option<Difficulty>,
    /// low, medium, high or `all`
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub prize_range: PrizeRange,
    /// week, month, later or `all`
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub deadline: DeadlineWindow,
    /// Archived listings instead of active ones
    #[serde(default)]
    pub archived: bool,
    /// `store` or `newest`
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub order: ListOrder,
}

impl CompetitionQuery {
    pub fn new(selection: FilterSelection, archived: bool, order: ListOrder) -> Self {
        Self {
            category: selection.category,
            difficulty: selection.difficulty,
            prize_range: selection.prize_range,
            deadline: selection.deadline,
            archived,
            order,
        }
    }

    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            category: self.category.clone(),
            difficulty: self.difficulty,
            prize_range: self.prize_range,
            deadline: self.deadline,
        }
    }
}

/// Serde adapter mapping `None` to the `all` sentinel and back
pub mod sentinel {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::ALL;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        match value {
            Some(value) => serializer.collect_str(value),
            None => serializer.serialize_str(ALL),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") | Some(ALL) => Ok(None),
            Some(value) => value.parse().map(Some).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prize_boundaries() {
        assert_eq!(PrizeRange::classify(0), PrizeRange::Low);
        assert_eq!(PrizeRange::classify(1_999), PrizeRange::Low);
        assert_eq!(PrizeRange::classify(2_000), PrizeRange::Medium);
        assert_eq!(PrizeRange::classify(4_999), PrizeRange::Medium);
        assert_eq!(PrizeRange::classify(5_000), PrizeRange::High);
    }

    #[test]
    fn test_selection_sentinel_from_json() {
        let selection: FilterSelection = serde_json::from_str(
            r#"{"category":"all","difficulty":"hard","prizeRange":"high","deadline":"all"}"#,
        )
        .unwrap();

        assert_eq!(selection.category, None);
        assert_eq!(selection.difficulty, Some(Difficulty::Hard));
        assert_eq!(selection.prize_range, PrizeRange::High);
        assert_eq!(selection.deadline, DeadlineWindow::All);
    }

    #[test]
    fn test_selection_missing_fields_default_to_all() {
        let selection: FilterSelection = serde_json::from_str("{}").unwrap();
        assert!(selection.is_unconstrained());
    }

    #[test]
    fn test_selection_serializes_none_as_all() {
        let selection = FilterSelection::all().with_category("Art");
        let json = serde_json::to_value(&selection).unwrap();

        assert_eq!(json["category"], "Art");
        assert_eq!(json["difficulty"], "all");
        assert_eq!(json["prizeRange"], "all");
    }

    #[test]
    fn test_empty_bucket_values_mean_all() {
        let selection: FilterSelection =
            serde_json::from_str(r#"{"prizeRange":"","deadline":""}"#).unwrap();

        assert_eq!(selection.prize_range, PrizeRange::All);
        assert_eq!(selection.deadline, DeadlineWindow::All);
    }

    #[test]
    fn test_unknown_bucket_value_is_rejected() {
        let error = serde_json::from_str::<FilterSelection>(r#"{"prizeRange":"huge"}"#)
            .unwrap_err();
        assert!(error.to_string().contains("unknown filter value 'huge'"));
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let result = serde_json::from_str::<FilterSelection>(r#"{"difficulty":"extreme"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_query_round_trips_selection() {
        let selection = FilterSelection::all()
            .with_category("Technology")
            .with_deadline(DeadlineWindow::Month);
        let query = CompetitionQuery::new(selection.clone(), true, ListOrder::Newest);

        assert_eq!(query.selection(), selection);
        assert!(query.archived);
    }
}
