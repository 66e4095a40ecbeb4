//! Property search query builder.
//!
//! [`PropertyQuery`] collects typed [`Predicate`]s and renders the SQL text
//! and its positional parameters together, so placeholder numbers always
//! line up with the bound values. The row limit is always the last
//! parameter.
//!
//! ```
//! use lightbnb_db::search::{PropertyQuery, PropertySearch};
//! use rusqlite::types::Value;
//!
//! let search = PropertySearch {
//!     city: Some("Vancouver".to_string()),
//!     minimum_rating: Some(4.0),
//!     ..PropertySearch::default()
//! };
//! let built = PropertyQuery::from_search(&search, 5).build();
//!
//! assert_eq!(
//!     built.params,
//!     vec![
//!         Value::Text("%Vancouver%".to_string()),
//!         Value::Real(4.0),
//!         Value::Integer(5),
//!     ]
//! );
//! ```

use lightbnb_common::{money::dollars_to_cents, UserId};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::models::PROPERTY_COLUMNS;

/// Row cap used when the caller does not pick one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Optional filters for a property search. Prices are in dollars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySearch {
    pub city: Option<String>,
    pub owner_id: Option<UserId>,
    pub minimum_price_per_night: Option<f64>,
    pub maximum_price_per_night: Option<f64>,
    pub minimum_rating: Option<f64>,
}

/// Where a predicate lands in the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// Before `GROUP BY`, filtering rows.
    Where,
    /// After `GROUP BY`, filtering aggregates.
    Having,
}

/// A single filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Substring match on the city; holds the full `%...%` pattern.
    CityLike(String),
    /// Exact owner match.
    Owner(UserId),
    /// Inclusive nightly price range, in cents.
    PriceBetween { min_cents: i64, max_cents: i64 },
    /// Minimum average review rating.
    MinimumRating(f64),
}

impl Predicate {
    /// Position in the fixed predicate order.
    fn rank(&self) -> u8 {
        match self {
            Self::CityLike(_) => 0,
            Self::Owner(_) => 1,
            Self::PriceBetween { .. } => 2,
            Self::MinimumRating(_) => 3,
        }
    }

    pub fn clause(&self) -> Clause {
        match self {
            Self::MinimumRating(_) => Clause::Having,
            _ => Clause::Where,
        }
    }

    /// Number of parameters the predicate binds.
    pub fn arity(&self) -> usize {
        match self {
            Self::PriceBetween { .. } => 2,
            _ => 1,
        }
    }

    /// Render the predicate with placeholders numbered from `first`.
    fn render(&self, first: usize) -> String {
        match self {
            Self::CityLike(_) => format!("properties.city LIKE ?{first}"),
            Self::Owner(_) => format!("properties.owner_id = ?{first}"),
            Self::PriceBetween { .. } => format!(
                "(properties.cost_per_night >= ?{first} AND properties.cost_per_night <= ?{})",
                first + 1
            ),
            Self::MinimumRating(_) => format!("avg(property_reviews.rating) >= ?{first}"),
        }
    }

    fn values(&self) -> Vec<Value> {
        match self {
            Self::CityLike(pattern) => vec![Value::Text(pattern.clone())],
            Self::Owner(id) => vec![Value::Integer(id.get())],
            Self::PriceBetween {
                min_cents,
                max_cents,
            } => vec![Value::Integer(*min_cents), Value::Integer(*max_cents)],
            Self::MinimumRating(rating) => vec![Value::Real(*rating)],
        }
    }
}

/// Rendered statement text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Builder for the property search statement.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyQuery {
    predicates: Vec<Predicate>,
    limit: u32,
}

impl Default for PropertyQuery {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl PropertyQuery {
    /// Start an unfiltered search capped at `limit` rows.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            predicates: Vec::new(),
            limit,
        }
    }

    /// Build from search options. The price range is only applied when
    /// both bounds are present; an empty city counts as absent.
    #[must_use]
    pub fn from_search(search: &PropertySearch, limit: u32) -> Self {
        let mut query = Self::new(limit);

        if let Some(city) = search.city.as_deref().filter(|c| !c.is_empty()) {
            query = query.city(city);
        }

        if let Some(owner_id) = search.owner_id {
            query = query.owner(owner_id);
        }

        if let (Some(min), Some(max)) = (
            search.minimum_price_per_night,
            search.maximum_price_per_night,
        ) {
            query = query.price_range(min, max);
        }

        if let Some(rating) = search.minimum_rating {
            query = query.minimum_rating(rating);
        }

        query
    }

    /// Match properties whose city contains `city`.
    #[must_use]
    pub fn city(self, city: &str) -> Self {
        self.with(Predicate::CityLike(format!("%{city}%")))
    }

    #[must_use]
    pub fn owner(self, owner_id: UserId) -> Self {
        self.with(Predicate::Owner(owner_id))
    }

    /// Inclusive nightly price range in dollars.
    #[must_use]
    pub fn price_range(self, minimum_dollars: f64, maximum_dollars: f64) -> Self {
        self.with(Predicate::PriceBetween {
            min_cents: dollars_to_cents(minimum_dollars),
            max_cents: dollars_to_cents(maximum_dollars),
        })
    }

    #[must_use]
    pub fn minimum_rating(self, rating: f64) -> Self {
        self.with(Predicate::MinimumRating(rating))
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Render the statement.
    #[must_use]
    pub fn build(&self) -> BuiltQuery {
        let mut predicates: Vec<&Predicate> = self.predicates.iter().collect();
        predicates.sort_by_key(|p| p.rank());

        let (filters, having): (Vec<&Predicate>, Vec<&Predicate>) = predicates
            .into_iter()
            .partition(|p| p.clause() == Clause::Where);

        let mut params = Vec::new();
        let mut sql = format!(
            "SELECT {PROPERTY_COLUMNS}, avg(property_reviews.rating) AS average_rating
FROM properties
JOIN property_reviews ON properties.id = property_reviews.property_id"
        );

        if !filters.is_empty() {
            sql.push_str("\nWHERE ");
            sql.push_str(&render_all(&filters, &mut params));
        }

        sql.push_str("\nGROUP BY properties.id");

        if !having.is_empty() {
            sql.push_str("\nHAVING ");
            sql.push_str(&render_all(&having, &mut params));
        }

        params.push(Value::Integer(i64::from(self.limit)));
        sql.push_str(&format!(
            "\nORDER BY properties.cost_per_night ASC\nLIMIT ?{}",
            params.len()
        ));

        BuiltQuery { sql, params }
    }
}

fn render_all(predicates: &[&Predicate], params: &mut Vec<Value>) -> String {
    predicates
        .iter()
        .map(|p| {
            let rendered = p.render(params.len() + 1);
            params.extend(p.values());
            rendered
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}
