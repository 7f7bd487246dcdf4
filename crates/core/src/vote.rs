//! Vote types and derived tallies.
//!
//! Tallies are never stored. They are recomputed from the vote set each
//! time they are read.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteType {
    ThumbsUp,
    ThumbsDown,
}

impl VoteType {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteType::ThumbsUp => "THUMBS_UP",
            VoteType::ThumbsDown => "THUMBS_DOWN",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "THUMBS_UP" => Ok(VoteType::ThumbsUp),
            "THUMBS_DOWN" => Ok(VoteType::ThumbsDown),
            other => Err(CoreError::Validation(format!(
                "Invalid vote type '{other}'. Must be one of: THUMBS_UP, THUMBS_DOWN"
            ))),
        }
    }
}

/// What a cast did to the voter's stored vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOutcome {
    /// No previous vote existed.
    Created,
    /// A vote of the other type was replaced.
    Changed,
    /// The same vote was already recorded.
    Unchanged,
}

impl CastOutcome {
    /// Decide the outcome of casting `new` over the `previous` vote.
    pub fn of(previous: Option<VoteType>, new: VoteType) -> Self {
        match previous {
            None => CastOutcome::Created,
            Some(prev) if prev == new => CastOutcome::Unchanged,
            Some(_) => CastOutcome::Changed,
        }
    }
}

/// Aggregate counts for one content item, plus the viewer's own vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub thumbs_up: i64,
    pub thumbs_down: i64,
    pub user_vote: Option<VoteType>,
}

impl VoteTally {
    pub fn total(&self) -> i64 {
        self.thumbs_up + self.thumbs_down
    }

    fn count(&mut self, vote_type: VoteType) {
        match vote_type {
            VoteType::ThumbsUp => self.thumbs_up += 1,
            VoteType::ThumbsDown => self.thumbs_down += 1,
        }
    }
}

/// Tally response for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub content_id: DbId,
    pub thumbs_up: i64,
    pub thumbs_down: i64,
    pub user_vote: Option<VoteType>,
}

impl VoteSummary {
    pub fn new(content_id: DbId, tally: VoteTally) -> Self {
        Self {
            content_id,
            thumbs_up: tally.thumbs_up,
            thumbs_down: tally.thumbs_down,
            user_vote: tally.user_vote,
        }
    }
}

/// Build per-item tallies for `content_ids` from `(content_id, voter, type)`
/// triples in a single pass.
///
/// Every requested id gets an entry, zeroed when it has no votes. Votes on
/// ids outside the requested set are ignored.
pub fn tally_votes<'a, I>(content_ids: &[DbId], votes: I, viewer: Option<&str>) -> HashMap<DbId, VoteTally>
where
    I: IntoIterator<Item = (DbId, &'a str, VoteType)>,
{
    let mut tallies: HashMap<DbId, VoteTally> = content_ids
        .iter()
        .map(|id| (*id, VoteTally::default()))
        .collect();

    for (content_id, voter, vote_type) in votes {
        let Some(tally) = tallies.get_mut(&content_id) else {
            continue;
        };
        tally.count(vote_type);
        if viewer == Some(voter) {
            tally.user_vote = Some(vote_type);
        }
    }

    tallies
}
