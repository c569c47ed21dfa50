//! Sort orders and aggregate function names.

/// Aggregate functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    /// Population standard deviation.
    StdDev,
}

impl AggregateFunc {
    /// Returns the SQL spelling of the function.
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Avg => "AVG",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
            AggregateFunc::StdDev => "STDDEV",
        }
    }

    /// Returns true for functions that need numeric input.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            AggregateFunc::Sum | AggregateFunc::Avg | AggregateFunc::StdDev
        )
    }
}

/// Sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Applies this direction to an ascending comparison result.
    #[inline]
    pub fn apply(&self, ordering: core::cmp::Ordering) -> core::cmp::Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}
