//! Suggested categories, units and stores
//!
//! None of these are enforced; they are offered as completions by the CLI.

pub const COMMON_CATEGORIES: &[&str] = &[
    "Fruits & Vegetables",
    "Dairy & Eggs",
    "Meat & Seafood",
    "Bakery",
    "Pantry Staples",
    "Beverages",
    "Snacks",
    "Frozen Foods",
    "Health & Beauty",
    "Household Items",
    "Organic",
    "International",
    "Other",
];

pub const COMMON_UNITS: &[&str] = &[
    "kg", "g", "lb", "oz", "l", "ml", "piece", "pack", "box", "bottle", "can", "bag", "dozen",
    "bunch", "head", "clove", "slice", "cup", "tbsp", "tsp",
];

pub const COMMON_STORES: &[&str] = &[
    "Walmart",
    "Target",
    "Kroger",
    "Safeway",
    "Whole Foods",
    "Trader Joe's",
    "Costco",
    "Sam's Club",
    "Aldi",
    "Lidl",
    "Publix",
    "Wegmans",
    "Local Market",
    "Farmers Market",
    "Online Store",
    "Other",
];

/// Whether `category` matches a suggested category (case-insensitive)
pub fn is_common_category(category: &str) -> bool {
    COMMON_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category.trim()))
}
