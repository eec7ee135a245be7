//! The closed category vocabulary shared by the rules, the corpus and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::Error;

/// Website category.
///
/// Nominal: the declaration order has no meaning beyond listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Restaurant,
    Cafe,
    Bar,
    Hotel,
    Retail,
    Grocery,
    Fashion,
    Beauty,
    Fitness,
    Healthcare,
    Legal,
    Finance,
    RealEstate,
    Automotive,
    Construction,
    Education,
    Technology,
    Travel,
    Entertainment,
    Nonprofit,
    Government,
    News,
    Blog,
    Portfolio,
    Forum,
    Other,
}

impl Category {
    /// Every category, in listing order.
    pub const ALL: [Category; 26] = [
        Category::Restaurant,
        Category::Cafe,
        Category::Bar,
        Category::Hotel,
        Category::Retail,
        Category::Grocery,
        Category::Fashion,
        Category::Beauty,
        Category::Fitness,
        Category::Healthcare,
        Category::Legal,
        Category::Finance,
        Category::RealEstate,
        Category::Automotive,
        Category::Construction,
        Category::Education,
        Category::Technology,
        Category::Travel,
        Category::Entertainment,
        Category::Nonprofit,
        Category::Government,
        Category::News,
        Category::Blog,
        Category::Portfolio,
        Category::Forum,
        Category::Other,
    ];

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurant => "Restaurant",
            Category::Cafe => "Cafe",
            Category::Bar => "Bar",
            Category::Hotel => "Hotel",
            Category::Retail => "Retail",
            Category::Grocery => "Grocery",
            Category::Fashion => "Fashion",
            Category::Beauty => "Beauty",
            Category::Fitness => "Fitness",
            Category::Healthcare => "Healthcare",
            Category::Legal => "Legal",
            Category::Finance => "Finance",
            Category::RealEstate => "Real Estate",
            Category::Automotive => "Automotive",
            Category::Construction => "Construction",
            Category::Education => "Education",
            Category::Technology => "Technology",
            Category::Travel => "Travel",
            Category::Entertainment => "Entertainment",
            Category::Nonprofit => "Nonprofit",
            Category::Government => "Government",
            Category::News => "News",
            Category::Blog => "Blog",
            Category::Portfolio => "Portfolio",
            Category::Forum => "Forum",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Case-insensitive match against the canonical names. Anything else is
    /// rejected so the vocabulary never grows silently.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownCategory(wanted.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<Category>().map_err(de::Error::custom)
    }
}
