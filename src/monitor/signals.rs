//! Selector and phrase tables used by the availability heuristic
//!
//! Everything the classifier looks for lives here as ordered data so the
//! lists can be extended without touching the decision logic.

/// Purchase-action controls; any match counts as a buy button
pub const BUY_BUTTON_SELECTORS: &[&str] = &["#add-to-cart-button", "#buy-now-button"];

/// Price containers; the earliest match in the page wins
pub const PRICE_SELECTORS: &[&str] = &[
    "#price_inside_buybox",
    "#priceblock_ourprice",
    ".a-price .a-offscreen",
    "#corePrice_feature_div .a-price .a-offscreen",
    ".a-price.a-offscreen",
];

/// Containers holding the human-readable stock status
pub const AVAILABILITY_SELECTORS: &[&str] =
    &["#availability", "#outOfStock", "#availability_feature_div"];

/// Phrases that mark an item as unavailable, checked first
pub const UNAVAILABLE_PHRASES: &[&str] = &[
    "currently unavailable",
    "this item is not available",
    "we don't know when or if this item will be back in stock",
    "sign up to be notified when this item becomes available",
    "temporarily out of stock",
];

/// Phrases that mark an item as in stock
pub const IN_STOCK_PHRASES: &[&str] = &["in stock", "ships from", "fulfilled by amazon"];

/// Ordered phrase lists matched against availability text
#[derive(Debug, Clone)]
pub struct PhraseRules {
    pub unavailable: Vec<String>,
    pub in_stock: Vec<String>,
}

impl PhraseRules {
    /// Returns the first unavailability phrase contained in `text`
    pub fn find_unavailable<'a>(&'a self, text: &str) -> Option<&'a str> {
        first_contained(&self.unavailable, text)
    }

    /// Returns the first in-stock phrase contained in `text`
    pub fn find_in_stock<'a>(&'a self, text: &str) -> Option<&'a str> {
        first_contained(&self.in_stock, text)
    }
}

impl Default for PhraseRules {
    fn default() -> Self {
        Self {
            unavailable: UNAVAILABLE_PHRASES.iter().map(|p| p.to_string()).collect(),
            in_stock: IN_STOCK_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

fn first_contained<'a>(phrases: &'a [String], text: &str) -> Option<&'a str> {
    phrases
        .iter()
        .map(String::as_str)
        .find(|phrase| text.contains(*phrase))
}

/// Lower-cases availability text and folds typographic apostrophes
///
/// Product pages mix `'` and `’`; the phrase tables only use the ASCII form.
pub fn normalize_availability_text(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}
