//! Quote catalog types and the `QuoteSource` access contract.
//!
//! All querying is delegated to the hosted backend via
//! [`RemoteQuoteSource`](remote::RemoteQuoteSource); there is no local
//! query engine. [`FixtureQuoteSource`] serves the bundled catalog for
//! tests and offline use.

pub mod remote;

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A quote as served by the backend. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Opaque backend identifier.
    pub id: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A quote category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Paginated, searchable, category-filterable access to the quote catalog.
///
/// Every method fails with [`CoreError::NotAvailable`] when the backend is
/// unreachable or an index is out of range; callers skip the dependent
/// operation rather than surfacing the failure.
pub trait QuoteSource {
    /// Total number of quotes in the catalog.
    fn count(&self) -> Result<usize>;

    /// Fetch the quote at a stable catalog index in `[0, count)`.
    fn by_index(&self, index: usize) -> Result<Quote>;

    /// Fetch a quote by its identifier.
    fn by_id(&self, id: &str) -> Result<Quote>;

    /// One page of quotes, newest first, optionally category-filtered.
    fn page(&self, page: usize, page_size: usize, category_id: Option<&str>) -> Result<Vec<Quote>>;

    /// Case-insensitive search over content and author.
    fn search(&self, term: &str) -> Result<Vec<Quote>>;

    /// The most recently added quotes.
    fn recent(&self, limit: usize) -> Result<Vec<Quote>>;

    /// All categories, sorted by name.
    fn categories(&self) -> Result<Vec<Category>>;

    /// A uniformly random quote from the catalog.
    fn random(&self) -> Result<Quote> {
        let count = self.count()?;
        if count == 0 {
            return Err(CoreError::NotAvailable("catalog is empty".into()));
        }
        let index = rand::thread_rng().gen_range(0..count);
        self.by_index(index)
    }
}

/// In-memory quote catalog backed by a bundled fixture set.
#[derive(Debug, Clone)]
pub struct FixtureQuoteSource {
    quotes: Vec<Quote>,
    categories: Vec<Category>,
}

impl FixtureQuoteSource {
    pub fn new(quotes: Vec<Quote>, categories: Vec<Category>) -> Self {
        Self { quotes, categories }
    }

    /// The bundled starter catalog (a slice of the seeded backend data).
    pub fn bundled() -> Self {
        let seed: &[(&str, &str, &str)] = &[
            (
                "The only way to do great work is to love what you do.",
                "Steve Jobs",
                "Motivation",
            ),
            (
                "Success is not final, failure is not fatal: it is the courage to continue that counts.",
                "Winston Churchill",
                "Motivation",
            ),
            (
                "Don't watch the clock; do what it does. Keep going.",
                "Sam Levenson",
                "Motivation",
            ),
            (
                "The secret of getting ahead is getting started.",
                "Mark Twain",
                "Motivation",
            ),
            (
                "It always seems impossible until it's done.",
                "Nelson Mandela",
                "Motivation",
            ),
            (
                "Believe you can and you're halfway there.",
                "Theodore Roosevelt",
                "Motivation",
            ),
            (
                "Love all, trust a few, do wrong to none.",
                "William Shakespeare",
                "Love",
            ),
            (
                "Where there is love there is life.",
                "Mahatma Gandhi",
                "Love",
            ),
            (
                "To love oneself is the beginning of a lifelong romance.",
                "Oscar Wilde",
                "Love",
            ),
            (
                "The best thing to hold onto in life is each other.",
                "Audrey Hepburn",
                "Love",
            ),
            (
                "Success usually comes to those who are too busy to be looking for it.",
                "Henry David Thoreau",
                "Success",
            ),
            (
                "Opportunities don't happen. You create them.",
                "Chris Grosser",
                "Success",
            ),
            (
                "Success is not the key to happiness. Happiness is the key to success.",
                "Albert Schweitzer",
                "Success",
            ),
            (
                "Don't be afraid to give up the good to go for the great.",
                "John D. Rockefeller",
                "Success",
            ),
        ];

        let mut categories: Vec<Category> = Vec::new();
        let mut quotes = Vec::with_capacity(seed.len());
        for (i, (content, author, category)) in seed.iter().enumerate() {
            let category_id = match categories.iter().find(|c| c.name == *category) {
                Some(c) => c.id.clone(),
                None => {
                    let id = format!("cat-{}", categories.len() + 1);
                    categories.push(Category {
                        id: id.clone(),
                        name: (*category).to_string(),
                    });
                    id
                }
            };
            quotes.push(Quote {
                id: format!("fixture-{:03}", i + 1),
                content: (*content).to_string(),
                author: (*author).to_string(),
                category_id: Some(category_id),
                category_name: Some((*category).to_string()),
                // Later entries are "newer" so recent() has a stable order.
                created_at: Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap(),
            });
        }
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Self { quotes, categories }
    }
}

impl QuoteSource for FixtureQuoteSource {
    fn count(&self) -> Result<usize> {
        Ok(self.quotes.len())
    }

    fn by_index(&self, index: usize) -> Result<Quote> {
        self.quotes
            .get(index)
            .cloned()
            .ok_or_else(|| CoreError::NotAvailable(format!("no quote at index {index}")))
    }

    fn by_id(&self, id: &str) -> Result<Quote> {
        self.quotes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotAvailable(format!("no quote with id {id}")))
    }

    fn page(&self, page: usize, page_size: usize, category_id: Option<&str>) -> Result<Vec<Quote>> {
        let mut quotes: Vec<Quote> = self
            .quotes
            .iter()
            .filter(|q| match category_id {
                Some(cat) => q.category_id.as_deref() == Some(cat),
                None => true,
            })
            .cloned()
            .collect();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes
            .into_iter()
            .skip(page * page_size)
            .take(page_size)
            .collect())
    }

    fn search(&self, term: &str) -> Result<Vec<Quote>> {
        let needle = term.to_lowercase();
        Ok(self
            .quotes
            .iter()
            .filter(|q| {
                q.content.to_lowercase().contains(&needle)
                    || q.author.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    fn recent(&self, limit: usize) -> Result<Vec<Quote>> {
        let mut quotes = self.quotes.clone();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        quotes.truncate(limit);
        Ok(quotes)
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_is_nonempty_and_indexed() {
        let source = FixtureQuoteSource::bundled();
        let count = source.count().unwrap();
        assert!(count > 0);
        for i in 0..count {
            let q = source.by_index(i).unwrap();
            assert!(!q.content.is_empty());
            assert!(!q.author.is_empty());
        }
        assert!(source.by_index(count).is_err());
    }

    #[test]
    fn by_id_roundtrip() {
        let source = FixtureQuoteSource::bundled();
        let q = source.by_index(0).unwrap();
        assert_eq!(source.by_id(&q.id).unwrap(), q);
        assert!(matches!(
            source.by_id("nope"),
            Err(CoreError::NotAvailable(_))
        ));
    }

    #[test]
    fn search_matches_content_and_author() {
        let source = FixtureQuoteSource::bundled();
        let by_author = source.search("churchill").unwrap();
        assert!(!by_author.is_empty());
        let by_content = source.search("impossible").unwrap();
        assert!(by_content.iter().any(|q| q.author == "Nelson Mandela"));
    }

    #[test]
    fn page_filters_by_category() {
        let source = FixtureQuoteSource::bundled();
        let cats = source.categories().unwrap();
        let love = cats.iter().find(|c| c.name == "Love").unwrap();
        let page = source.page(0, 10, Some(&love.id)).unwrap();
        assert!(!page.is_empty());
        assert!(page.iter().all(|q| q.category_name.as_deref() == Some("Love")));
    }

    #[test]
    fn recent_returns_newest_first() {
        let source = FixtureQuoteSource::bundled();
        let recent = source.recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert!(recent[0].created_at >= recent[1].created_at);
        assert!(recent[1].created_at >= recent[2].created_at);
    }

    #[test]
    fn random_draws_from_catalog() {
        let source = FixtureQuoteSource::bundled();
        let q = source.random().unwrap();
        assert!(source.by_id(&q.id).is_ok());

        let empty = FixtureQuoteSource::new(Vec::new(), Vec::new());
        assert!(matches!(empty.random(), Err(CoreError::NotAvailable(_))));
    }
}
