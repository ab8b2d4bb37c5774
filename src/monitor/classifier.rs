//! Availability classifier for product pages
//!
//! This module turns raw product page HTML into a [`Verdict`] by combining
//! independent signals:
//! - Buy button presence
//! - Price text
//! - Unavailability and in-stock phrases in the availability section

use crate::monitor::signals::{
    normalize_availability_text, PhraseRules, AVAILABILITY_SELECTORS, BUY_BUTTON_SELECTORS,
    PRICE_SELECTORS,
};
use crate::monitor::verdict::{Verdict, VerdictReason};
use crate::{Result, WatchError};
use scraper::{Html, Selector};

/// Signals extracted from one parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSignals {
    /// A purchase-action control exists somewhere in the page
    pub buy_button_present: bool,

    /// Trimmed text of the first price element in the page (may be empty)
    pub price: String,

    /// Lower-cased text of the availability section
    pub availability_text: String,
}

impl PageSignals {
    pub fn has_price(&self) -> bool {
        !self.price.is_empty()
    }
}

/// Availability heuristic with precompiled selectors
///
/// The classifier holds no mutable state; one instance can classify any
/// number of pages.
#[derive(Debug, Clone)]
pub struct AvailabilityClassifier {
    buy_button: Selector,
    price: Selector,
    availability: Selector,
    rules: PhraseRules,
}

impl AvailabilityClassifier {
    /// Creates a classifier with the default selector and phrase tables
    pub fn new() -> Result<Self> {
        Self::with_rules(PhraseRules::default())
    }

    /// Creates a classifier with custom phrase lists
    pub fn with_rules(rules: PhraseRules) -> Result<Self> {
        Ok(Self {
            buy_button: compile_selector(&BUY_BUTTON_SELECTORS.join(", "))?,
            price: compile_selector(&PRICE_SELECTORS.join(", "))?,
            availability: compile_selector(&AVAILABILITY_SELECTORS.join(", "))?,
            rules,
        })
    }

    /// Classifies a product page
    ///
    /// # Decision Order
    ///
    /// 1. Unavailability phrase in the availability section → unavailable
    /// 2. In-stock phrase in the availability section → available
    /// 3. Buy button and price both present → available
    /// 4. Otherwise → unclear, treated as unavailable
    ///
    /// # Arguments
    ///
    /// * `html` - The raw page content
    ///
    /// # Returns
    ///
    /// * `Ok(Verdict)` - The availability verdict
    /// * `Err(WatchError::Parse)` - The input contains no markup at all
    ///
    /// # Example
    ///
    /// ```
    /// use restock_watch::monitor::AvailabilityClassifier;
    ///
    /// let classifier = AvailabilityClassifier::new().unwrap();
    /// let html = r#"<div id="availability">In Stock.</div>
    ///               <span class="a-price"><span class="a-offscreen">$19.99</span></span>"#;
    /// let verdict = classifier.classify(html).unwrap();
    /// assert!(verdict.available);
    /// assert_eq!(verdict.status, "Available - Price: $19.99");
    /// ```
    pub fn classify(&self, html: &str) -> Result<Verdict> {
        let signals = self.extract_signals(html)?;
        Ok(self.decide(&signals))
    }

    /// Parses the page and collects the raw signals
    pub fn extract_signals(&self, html: &str) -> Result<PageSignals> {
        if html.trim().is_empty() {
            return Err(WatchError::Parse("empty document".to_string()));
        }

        let document = Html::parse_document(html);

        let buy_button_present = document.select(&self.buy_button).next().is_some();
        tracing::debug!("Buy button present: {}", buy_button_present);

        let price = self.extract_price(&document);
        tracing::debug!("Has price: {}, Price: {}", !price.is_empty(), price);

        let availability_text = self.extract_availability_text(&document);
        tracing::debug!("Availability section text: {}", availability_text.trim());

        Ok(PageSignals {
            buy_button_present,
            price,
            availability_text,
        })
    }

    /// Applies the decision rules to extracted signals
    pub fn decide(&self, signals: &PageSignals) -> Verdict {
        if let Some(phrase) = self.rules.find_unavailable(&signals.availability_text) {
            tracing::debug!("Found unavailability indicator: {}", phrase);
            return Verdict::unavailable();
        }

        if let Some(phrase) = self.rules.find_in_stock(&signals.availability_text) {
            tracing::debug!("Found in-stock indicator: {}", phrase);
            return Verdict::available(VerdictReason::InStockPhrase, &signals.price);
        }

        if signals.buy_button_present && signals.has_price() {
            return Verdict::available(VerdictReason::BuyButtonWithPrice, &signals.price);
        }

        tracing::debug!(
            "Could not definitively determine availability - defaulting to unavailable"
        );
        Verdict::unclear()
    }

    /// Returns the trimmed text of the earliest element in document order
    /// matched by any price selector
    fn extract_price(&self, document: &Html) -> String {
        document
            .select(&self.price)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    fn extract_availability_text(&self, document: &Html) -> String {
        let text: String = document
            .select(&self.availability)
            .flat_map(|element| element.text())
            .collect();

        normalize_availability_text(&text)
    }
}

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| WatchError::Parse(format!("invalid selector '{}': {:?}", selector, e)))
}
