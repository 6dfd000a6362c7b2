use serde::{Deserialize, Serialize};

/// Spending category of a transaction. Closed set.
///
/// The declaration order is the ranking order used to break ties
/// when two categories carry the same total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Groceries,
    Transportation,
    Shopping,
    Entertainment,
    Income,
    Other,
}

impl Category {
    /// Every category, in ranking order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Groceries,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::Income,
        Category::Other,
    ];

    /// Parse a category label.
    ///
    /// Accepts the variant names (case-insensitive) plus the labels used by
    /// the AI categorizer and older dashboard builds ("Food & Drink",
    /// "Transport", "Salary", ...). Returns `None` for anything else.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        let category = match normalized.as_str() {
            "food" | "food & drink" | "food and drink" | "dining" | "restaurants" => Category::Food,
            "groceries" | "grocery" => Category::Groceries,
            "transportation" | "transport" | "travel" => Category::Transportation,
            "shopping" | "general merchandise" => Category::Shopping,
            "entertainment" | "subscriptions" => Category::Entertainment,
            "income" | "salary" => Category::Income,
            "other" => Category::Other,
            _ => return None,
        };
        Some(category)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Food => write!(f, "Food"),
            Category::Groceries => write!(f, "Groceries"),
            Category::Transportation => write!(f, "Transportation"),
            Category::Shopping => write!(f, "Shopping"),
            Category::Entertainment => write!(f, "Entertainment"),
            Category::Income => write!(f, "Income"),
            Category::Other => write!(f, "Other"),
        }
    }
}
