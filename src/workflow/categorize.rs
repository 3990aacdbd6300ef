/// Keyword-based workflow categorizer
///
/// Maps a workflow name to one of the fixed galaxy categories by scanning
/// for keywords in the lowercased name. The tests run in a fixed order and
/// the first matching set wins, so a name containing both "ai" and "seo"
/// lands in the AI cluster.

use crate::workflow::types::Category;

/// Ordered keyword table. Order is load-bearing: earlier rows shadow later
/// ones for names that match several sets.
const KEYWORD_SETS: &[(&[&str], Category)] = &[
    (&["ai", "gemini", "claude", "agent"], Category::Ai),
    (&["seo", "keyword"], Category::Seo),
    (&["hr", "job", "resume", "helpdesk"], Category::Hr),
    (&["lead", "roofing", "scraper"], Category::LeadGen),
    (&["monitor", "sre", "alert"], Category::Monitoring),
    (&["sql", "data", "tax", "research"], Category::Data),
];

/// Determine the category of a workflow from its name
///
/// Total and pure: every name maps to exactly one category, with
/// `Category::Other` as the fallthrough.
pub fn categorize(name: &str) -> Category {
    let lower = name.to_lowercase();

    for (keywords, category) in KEYWORD_SETS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return *category;
        }
    }

    Category::Other
}
