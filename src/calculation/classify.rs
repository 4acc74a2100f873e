//! Event subject classification.
//!
//! Subjects are matched against a fixed, ordered keyword table; the first
//! category whose keyword list hits wins. Anything unmatched lands in the
//! default [`Category::Meeting`] bucket.

use serde::{Deserialize, Serialize};

/// The closed set of meeting-type buckets used for time aggregation.
///
/// # Example
///
/// ```
/// use slacktime::calculation::Category;
///
/// let category = Category::Ceremony;
/// assert_eq!(format!("{:?}", category), "Ceremony");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Agile ceremonies: dailies, refinements, reviews, plannings, retros.
    Ceremony,
    /// The default bucket for anything the keyword table does not match.
    Meeting,
    /// Learning-route sessions.
    Route,
    /// Seeker program sessions.
    Seeker,
    /// Knowledge-transfer sessions.
    Transfer,
    /// Career plan conversations.
    CareerPlan,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Ceremony => write!(f, "Ceremony"),
            Category::Meeting => write!(f, "Meeting"),
            Category::Route => write!(f, "Route"),
            Category::Seeker => write!(f, "Seeker"),
            Category::Transfer => write!(f, "Transfer"),
            Category::CareerPlan => write!(f, "CareerPlan"),
        }
    }
}

/// Keyword table in priority order.
///
/// The order is load-bearing: a subject matching several categories takes
/// the first hit, so ceremony keywords shadow route keywords and so on.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Ceremony,
        &[
            "ceremonia",
            "refinamiento",
            "refi",
            "review",
            "daily",
            "refi-planning",
            "planning",
            "retro",
            "retrospectiva",
            "pre-review",
            "def-arquitectura",
            "escenarios de calidad",
        ],
    ),
    (Category::Route, &["ruta"]),
    (Category::Seeker, &["seeker"]),
    (Category::Transfer, &["transferencia"]),
    (Category::CareerPlan, &["plan carrera"]),
];

/// Classifies an event subject into exactly one [`Category`].
///
/// Matching is case-insensitive substring matching against the keyword
/// table, tested in table order; the first category with any matching
/// keyword wins. Empty or absent subjects, and subjects matching nothing,
/// classify as [`Category::Meeting`].
///
/// # Example
///
/// ```
/// use slacktime::calculation::{classify, Category};
///
/// assert_eq!(classify(Some("Daily Standup")), Category::Ceremony);
/// assert_eq!(classify(Some("Random sync")), Category::Meeting);
/// assert_eq!(classify(None), Category::Meeting);
/// ```
pub fn classify(subject: Option<&str>) -> Category {
    let subject = match subject {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => return Category::Meeting,
    };

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| subject.contains(keyword)) {
            return *category;
        }
    }

    Category::Meeting
}
