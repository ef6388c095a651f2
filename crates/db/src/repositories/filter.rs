//! Typed list-filter criteria.
//!
//! Catalog queries accept a list of tagged criteria instead of untyped filter
//! objects. Each repository folds the criteria it understands into its query
//! and ignores the rest.

/// A single catalog filter criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCriteria {
    /// Substring match on name/description.
    TextSearch(String),
    /// Substring match on location (projects only).
    Location(String),
    /// Inclusive price bounds in whole Rupiah (products only).
    PriceRange {
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Restrict to entities owned by this account.
    Owner(String),
    /// Restrict to entities belonging to this project.
    Project(String),
}
