//! Database schema and types

use chrono::NaiveDate;

/// SQL schema for initialization
///
/// The table keeps the historical `products` name so databases written by
/// earlier versions of the bot open unchanged.
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    in_fridge INTEGER DEFAULT 0,
    added_date TEXT
);
";

/// Date format used for the `added_date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Where an item currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Fridge,
    Shopping,
}

impl Location {
    #[allow(dead_code)] // Used in tests
    pub fn from_in_fridge(in_fridge: bool) -> Self {
        if in_fridge {
            Location::Fridge
        } else {
            Location::Shopping
        }
    }

    pub fn in_fridge(self) -> bool {
        matches!(self, Location::Fridge)
    }
}

/// A stored grocery item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub in_fridge: bool,
    pub added_date: Option<NaiveDate>,
}

impl Item {
    #[allow(dead_code)] // Used in tests
    pub fn location(&self) -> Location {
        Location::from_in_fridge(self.in_fridge)
    }
}

/// Canonical form of an item name: surrounding whitespace removed, lowercased
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
