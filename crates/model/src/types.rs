use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of value kinds a column or field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    #[default]
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    /// A nested sequence of rows rendered by a sub-document.
    Table,
}

impl DataType {
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Integer | DataType::Decimal)
    }

    /// The narrowest type able to hold values of both `self` and `other`.
    pub fn widen(self, other: DataType) -> DataType {
        match (self, other) {
            (a, b) if a == b => a,
            (DataType::Integer, DataType::Decimal) | (DataType::Decimal, DataType::Integer) => {
                DataType::Decimal
            }
            _ => DataType::Text,
        }
    }
}

/// An aggregate computed over a column, at group or report level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Calculation {
    #[default]
    None,
    Sum,
    Count,
    #[serde(alias = "avg")]
    Average,
    #[serde(alias = "min")]
    Lowest,
    #[serde(alias = "max")]
    Highest,
    #[serde(alias = "stdDev")]
    StandardDeviation,
    Variance,
    DistinctCount,
    First,
}

impl Calculation {
    pub fn is_active(self) -> bool {
        self != Calculation::None
    }

    /// The data type of the aggregate's result given its input type.
    pub fn result_type(self, input: DataType) -> DataType {
        match self {
            Calculation::Count | Calculation::DistinctCount => DataType::Integer,
            Calculation::Sum => {
                if input == DataType::Integer {
                    DataType::Integer
                } else {
                    DataType::Decimal
                }
            }
            Calculation::Average | Calculation::StandardDeviation | Calculation::Variance => {
                DataType::Decimal
            }
            Calculation::None | Calculation::Lowest | Calculation::Highest | Calculation::First => {
                input
            }
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Calculation::None => "none",
            Calculation::Sum => "sum",
            Calculation::Count => "count",
            Calculation::Average => "avg",
            Calculation::Lowest => "min",
            Calculation::Highest => "max",
            Calculation::StandardDeviation => "stddev",
            Calculation::Variance => "variance",
            Calculation::DistinctCount => "distinct",
            Calculation::First => "first",
        }
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
}

impl ChartType {
    pub fn parse(s: &str) -> Option<ChartType> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Some(ChartType::Bar),
            "line" => Some(ChartType::Line),
            "pie" => Some(ChartType::Pie),
            "area" => Some(ChartType::Area),
            _ => None,
        }
    }
}
