use serde::{Deserialize, Serialize};

/// A persisted valuation: one row of the result ledger.
///
/// `value` holds the text exactly as stored. Rows written by this crate always
/// carry two decimal digits; rows that were already in the file are kept as
/// they were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub company_name: String,
    pub value: String,
}

impl ResultRecord {
    pub fn new(company_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            value: value.into(),
        }
    }

    /// Parse the stored value, if it is numeric.
    pub fn value_f64(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }
}

/// Whether an upsert replaced an existing row or appended a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Updated => "updated",
        }
    }
}
