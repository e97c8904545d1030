//! Category labels.
//!
//! Transactions carry a short label token (an emoji) chosen from a fixed picker.
//! Labels the picker does not know are kept verbatim under [`Category::Other`] so that
//! grouping still distinguishes them, while their heading falls back to "Other".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction category, keyed by its label token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Income,
    Housing,
    #[default]
    Shopping,
    Food,
    Transport,
    Entertainment,
    /// Any label outside the known set, stored as received.
    Other(String),
}

/// Known categories in picker order.
pub const KNOWN_CATEGORIES: [Category; 6] = [
    Category::Shopping,
    Category::Food,
    Category::Transport,
    Category::Entertainment,
    Category::Income,
    Category::Housing,
];

impl Category {
    /// Resolve a stored label token. Never fails: unknown tokens become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "💰" => Category::Income,
            "🏠" => Category::Housing,
            "🛒" => Category::Shopping,
            "🍔" => Category::Food,
            "🚗" => Category::Transport,
            "🎬" => Category::Entertainment,
            other => Category::Other(other.to_string()),
        }
    }

    /// Label token as persisted by the store.
    pub fn label(&self) -> &str {
        match self {
            Category::Income => "💰",
            Category::Housing => "🏠",
            Category::Shopping => "🛒",
            Category::Food => "🍔",
            Category::Transport => "🚗",
            Category::Entertainment => "🎬",
            Category::Other(raw) => raw,
        }
    }

    /// Group heading shown above a category's transactions.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Housing => "Rent & Housing",
            Category::Shopping => "Shopping",
            Category::Food => "Food & Drink",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Other(_) => "Other",
        }
    }

    /// Short name used by the category picker.
    pub fn picker_name(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Housing => "Rent",
            Category::Shopping => "Shopping",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Other(_) => "Other",
        }
    }

    /// Parse picker input: either the label token itself or a case-insensitive alias.
    /// Only the known set is accepted here.
    pub fn parse_choice(input: &str) -> Option<Self> {
        let s = input.trim();
        let by_label = Category::from_label(s);
        if !matches!(by_label, Category::Other(_)) {
            return Some(by_label);
        }

        match s.to_lowercase().as_str() {
            "income" => Some(Category::Income),
            "rent" | "housing" => Some(Category::Housing),
            "shopping" => Some(Category::Shopping),
            "food" => Some(Category::Food),
            "transport" => Some(Category::Transport),
            "entertainment" => Some(Category::Entertainment),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
