use tracing::debug;

use crate::models::category::Category;

/// One keyword rule: any keyword found in the description selects `category`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub category: Category,
    /// Lowercase substrings
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, description: &str) -> bool {
        self.keywords.iter().any(|k| description.contains(k.as_str()))
    }
}

/// Offline transaction categorizer.
///
/// Case-insensitive substring match against an ordered rule list; the
/// first matching rule wins and no match is `Other`. Used whenever the
/// AI categorizer is unavailable and to default categories on import.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<CategoryRule>,
}

impl KeywordClassifier {
    /// Classifier with the built-in merchant rules.
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn classify(&self, description: &str) -> Category {
        let lower = description.to_lowercase();
        match self.rules.iter().find(|r| r.matches(&lower)) {
            Some(rule) => rule.category,
            None => {
                debug!(description, "no category rule matched");
                Category::Other
            }
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// Groceries precede Food so "Whole Foods" is not read as a restaurant;
// Shopping comes last because "store"/"shop" are the loosest keywords.
fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            Category::Income,
            &["payroll", "direct deposit", "salary", "paycheck", "employer", "interest payment"],
        ),
        CategoryRule::new(
            Category::Groceries,
            &["whole foods", "grocery", "groceries", "trader joe", "safeway", "kroger", "aldi", "supermarket", "costco"],
        ),
        CategoryRule::new(
            Category::Food,
            &[
                "starbucks", "coffee", "cafe", "restaurant", "chipotle", "mcdonald", "subway", "pizza",
                "burger", "doordash", "grubhub", "bakery",
            ],
        ),
        CategoryRule::new(
            Category::Transportation,
            &[
                "uber", "lyft", "shell", "chevron", "exxon", "gas station", "fuel", "parking", "transit",
                "airline", "taxi",
            ],
        ),
        CategoryRule::new(
            Category::Entertainment,
            &[
                "netflix", "spotify", "hulu", "disney", "cinema", "movie", "theater", "theatre", "concert",
                "fitness", "gym",
            ],
        ),
        CategoryRule::new(
            Category::Shopping,
            &["amazon", "target", "walmart", "home depot", "best buy", "mall", "store", "shop"],
        ),
    ]
}
