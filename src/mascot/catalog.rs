//! Message Catalog
//!
//! Static lookup table of canned messages, one pool per category.

use std::collections::BTreeMap;

use super::error::MascotError;
use super::random::RandomSource;
use super::types::MessageCategory;

/// Returned when a pool is missing or empty
pub const FALLBACK_MESSAGE: &str = "Hello there!";

const DEFAULT_MESSAGES: &[&str] = &[
    "Hi there! I'm Indexy, your URL indexing assistant.",
    "Need help checking if your URLs are indexed? I'm here to help!",
    "Enter URLs to check their Google indexing status.",
    "Tip: You can upload a CSV file with lots of URLs to check in bulk.",
    "I crawl the web just like Google, but much friendlier!",
];

const THINKING_MESSAGES: &[&str] = &[
    "Hmm, let me think about that...",
    "Processing your request...",
    "Analyzing the situation...",
    "Connecting the web threads...",
];

const WORKING_MESSAGES: &[&str] = &[
    "Checking your URLs now...",
    "Crawling through the web for your results...",
    "I'm working on your request...",
    "Spinning up some results for you...",
    "Just a moment while I check the indexing status...",
];

const HAPPY_MESSAGES: &[&str] = &[
    "Great job! Your results are ready.",
    "Success! I've finished checking your URLs.",
    "All done! Take a look at your results.",
    "Mission accomplished! How else can I help?",
    "Your URL check is complete!",
];

const TIPS_MESSAGES: &[&str] = &[
    "Tip: Keep your URLs organized for better tracking.",
    "Tip: Regular indexing checks help monitor your SEO progress.",
    "Tip: Check both new and old URLs to maintain visibility.",
    "Tip: Focus on improving content for non-indexed pages.",
    "Tip: Export your reports to track progress over time.",
];

/// Message pools keyed by category. Immutable once built.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    pools: BTreeMap<MessageCategory, Vec<String>>,
}

impl MessageCatalog {
    /// Catalog with the built-in pools
    pub fn builtin() -> Self {
        let pools = MessageCategory::ALL
            .iter()
            .map(|&category| {
                let messages = builtin_pool(category)
                    .iter()
                    .map(|m| m.to_string())
                    .collect();
                (category, messages)
            })
            .collect();

        Self { pools }
    }

    /// Built-in pools with some categories replaced
    pub fn with_overrides(overrides: &BTreeMap<MessageCategory, Vec<String>>) -> Self {
        let mut catalog = Self::builtin();
        for (category, messages) in overrides {
            if messages.is_empty() {
                tracing::warn!("Message pool '{}' overridden with no entries", category);
            }
            catalog.pools.insert(*category, messages.clone());
        }
        catalog
    }

    /// Messages of a category, empty slice if absent
    pub fn messages(&self, category: MessageCategory) -> &[String] {
        self.pools.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check that a category has something to say
    pub fn check(&self, category: MessageCategory) -> Result<(), MascotError> {
        if self.messages(category).is_empty() {
            Err(MascotError::InvalidCategory(category.to_string()))
        } else {
            Ok(())
        }
    }

    /// Pick one message uniformly at random, falling back to a greeting
    pub fn random_message(&self, category: MessageCategory, random: &mut dyn RandomSource) -> String {
        if let Err(e) = self.check(category) {
            tracing::warn!("{}, using fallback message", e);
            return FALLBACK_MESSAGE.to_string();
        }

        let messages = self.messages(category);
        messages[random.pick_index(messages.len())].clone()
    }

    /// Like [`random_message`](Self::random_message) but for a category name
    pub fn random_message_named(&self, name: &str, random: &mut dyn RandomSource) -> String {
        match name.parse::<MessageCategory>() {
            Ok(category) => self.random_message(category, random),
            Err(e) => {
                tracing::warn!("{}, using fallback message", e);
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_pool(category: MessageCategory) -> &'static [&'static str] {
    match category {
        MessageCategory::Default => DEFAULT_MESSAGES,
        MessageCategory::Thinking => THINKING_MESSAGES,
        MessageCategory::Working => WORKING_MESSAGES,
        MessageCategory::Happy => HAPPY_MESSAGES,
        MessageCategory::Tips => TIPS_MESSAGES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mascot::random::SeededRandom;

    #[test]
    fn test_every_builtin_pool_answers_from_itself() {
        let catalog = MessageCatalog::builtin();
        let mut random = SeededRandom::new(7);

        for category in MessageCategory::ALL {
            for _ in 0..50 {
                let message = catalog.random_message(category, &mut random);
                assert_ne!(message, FALLBACK_MESSAGE);
                assert!(catalog.messages(category).contains(&message));
            }
        }
    }

    #[test]
    fn test_empty_override_falls_back() {
        let mut overrides = BTreeMap::new();
        overrides.insert(MessageCategory::Tips, Vec::new());
        let catalog = MessageCatalog::with_overrides(&overrides);
        let mut random = SeededRandom::new(1);

        assert!(matches!(
            catalog.check(MessageCategory::Tips),
            Err(MascotError::InvalidCategory(_))
        ));
        assert_eq!(
            catalog.random_message(MessageCategory::Tips, &mut random),
            FALLBACK_MESSAGE
        );
        // Untouched pools keep the built-in text
        assert_eq!(catalog.messages(MessageCategory::Happy).len(), 5);
    }

    #[test]
    fn test_unknown_category_name_falls_back() {
        let catalog = MessageCatalog::builtin();
        let mut random = SeededRandom::new(1);
        assert_eq!(
            catalog.random_message_named("jokes", &mut random),
            FALLBACK_MESSAGE
        );
        let tip = catalog.random_message_named("tips", &mut random);
        assert!(tip.starts_with("Tip:"));
    }
}
