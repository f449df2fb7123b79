use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::plafond::errors::PlafondIdError;

/// A loan plan: the product the catalog exists to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plafond {
    pub id: PlafondId,
    pub name: String,
    pub description: Option<String>,
    /// Maximum loan amount for this plan.
    pub max_amount: Decimal,
    /// Annual interest rate in percent (12.5 = 12.5% p.a.).
    pub interest_rate: Decimal,
    /// Loan tenor in months.
    pub tenor_month: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlafondId(pub Uuid);

impl PlafondId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, PlafondIdError> {
        Uuid::parse_str(s)
            .map(PlafondId)
            .map_err(|e| PlafondIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PlafondId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlafondId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
pub struct CreatePlafondCommand {
    pub name: String,
    pub description: Option<String>,
    pub max_amount: Decimal,
    pub interest_rate: Decimal,
    pub tenor_month: i32,
}

/// Partial update; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdatePlafondCommand {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub max_amount: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub tenor_month: Option<i32>,
    pub is_active: Option<bool>,
}
