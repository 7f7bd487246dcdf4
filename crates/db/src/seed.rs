//! Demo content for local development.

use slangdex_core::error::CoreError;

use crate::repositories::ContentRepo;
use crate::{storage_error, DbPool};

/// Minimum number of items below which the demo set is inserted.
const SEED_THRESHOLD: i64 = 5;

/// Demo terms as `(term, definition, example, submitted_by)`.
const DEMO_CONTENT: &[(&str, &str, &str, &str)] = &[
    (
        "Simp",
        "Someone who does way too much for a person they like",
        "He drove three hours just to bring her coffee, total simp.",
        "Luna",
    ),
    (
        "Sus",
        "Suspicious or questionable",
        "That excuse sounds kinda sus.",
        "Kai",
    ),
    (
        "Drip",
        "Stylish clothing or accessories",
        "Check out the drip on that jacket.",
        "Mila",
    ),
    (
        "FYP",
        "For You Page, the personalised feed on short-video apps",
        "This dance is all over my FYP.",
        "Leo",
    ),
    (
        "Yeet",
        "To throw something with force, or an exclamation of excitement",
        "He yeeted the ball across the field.",
        "Sofia",
    ),
];

/// Insert the demo set as `PENDING` items when the table holds fewer than
/// five rows. Returns how many rows were inserted.
pub async fn seed_demo_content(pool: &DbPool) -> Result<usize, CoreError> {
    let existing = ContentRepo::count(pool)
        .await
        .map_err(storage_error("count_content"))?;
    if existing >= SEED_THRESHOLD {
        tracing::debug!(existing, "Skipping demo seed");
        return Ok(0);
    }

    for (term, definition, example, submitted_by) in DEMO_CONTENT {
        ContentRepo::create(pool, term, definition, Some(example), submitted_by)
            .await
            .map_err(storage_error("seed_content"))?;
    }

    tracing::info!(inserted = DEMO_CONTENT.len(), "Seeded demo content");
    Ok(DEMO_CONTENT.len())
}
