//! Keyword-based transaction classification.
//!
//! A category matches when any of its comma-separated keywords appears as a
//! case-insensitive substring of the transaction description. The scan is
//! order-sensitive: the first matching category wins, and within a category
//! keywords are tested in list order.

use crate::types::Category;

/// The outcome of classifying one description.
///
/// Both fields are `Some` on a match and both are `None` when no category
/// matched; they are never mixed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// Id of the matched category.
    pub category_id: Option<String>,
    /// Name of the matched category.
    pub category_name: Option<String>,
}

impl Classification {
    /// Whether a category was assigned.
    pub fn is_matched(&self) -> bool {
        self.category_id.is_some()
    }
}

/// Assign at most one category to a transaction description.
///
/// Categories are scanned in the order supplied; a category with absent or
/// empty keywords never matches. This is a pure function: no state, no
/// mutation of inputs.
pub fn classify(description: &str, categories: &[Category]) -> Classification {
    let description = description.to_lowercase();

    for category in categories {
        let Some(keywords) = category.keywords.as_deref() else {
            continue;
        };

        for keyword in keywords.split(',') {
            let keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }
            if description.contains(&keyword) {
                return Classification {
                    category_id: Some(category.id.clone()),
                    category_name: Some(category.name.clone()),
                };
            }
        }
    }

    Classification::default()
}
