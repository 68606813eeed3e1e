use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 11] = [
        FilterOperator::Eq,
        FilterOperator::Ne,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::Like,
        FilterOperator::In,
        FilterOperator::NotIn,
        FilterOperator::IsNull,
        FilterOperator::IsNotNull,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Like => "like",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not_in",
            FilterOperator::IsNull => "is_null",
            FilterOperator::IsNotNull => "is_not_null",
        }
    }

    /// `is_null` / `is_not_null` carry no operand
    pub fn requires_value(&self) -> bool {
        !matches!(self, FilterOperator::IsNull | FilterOperator::IsNotNull)
    }

    /// Operators offered for free-text columns
    pub fn text_operators() -> Vec<FilterOperator> {
        vec![
            FilterOperator::Like,
            FilterOperator::Eq,
            FilterOperator::Ne,
            FilterOperator::IsNull,
            FilterOperator::IsNotNull,
        ]
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eq" | "equals" | "=" => Ok(FilterOperator::Eq),
            "ne" | "neq" | "not_equals" | "!=" => Ok(FilterOperator::Ne),
            "gt" | ">" => Ok(FilterOperator::Gt),
            "gte" | ">=" => Ok(FilterOperator::Gte),
            "lt" | "<" => Ok(FilterOperator::Lt),
            "lte" | "<=" => Ok(FilterOperator::Lte),
            "like" | "contains" => Ok(FilterOperator::Like),
            "in" => Ok(FilterOperator::In),
            "not_in" | "nin" => Ok(FilterOperator::NotIn),
            "is_null" | "null" => Ok(FilterOperator::IsNull),
            "is_not_null" | "not_null" => Ok(FilterOperator::IsNotNull),
            other => Err(FilterError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// One committed column filter, as sent to paginate endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterConfig {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

/// Value and operator a column currently commits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnFilterValue {
    pub value: String,
    pub operator: FilterOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    pub direction: SortDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_parse_with_aliases() {
        assert_eq!("contains".parse::<FilterOperator>().unwrap(), FilterOperator::Like);
        assert_eq!("NOT_IN".parse::<FilterOperator>().unwrap(), FilterOperator::NotIn);
        assert!("between".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn operators_serialize_snake_case() {
        let filter = FilterConfig {
            field: "email".to_string(),
            operator: FilterOperator::IsNotNull,
            value: String::new(),
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["operator"], "is_not_null");
        assert!(!FilterOperator::IsNull.requires_value());
        assert!(FilterOperator::Like.requires_value());
    }
}
