//! Badge evaluation.
//!
//! [`evaluate`] is pure and cheap; it is re-run on every read. Keeping
//! earned badges is the job of [`StateStore::settle_badges`], which only ever
//! inserts.
//!
//! [`StateStore::settle_badges`]: crate::state::StateStore::settle_badges

use std::collections::BTreeSet;

use crate::catalog::{BadgeKind, Catalog};
use crate::state::BadgeId;

/// Every catalog badge whose threshold is met by `streak` or `total_count`.
pub fn evaluate(streak: u32, total_count: u64, catalog: &Catalog) -> BTreeSet<BadgeId> {
    catalog
        .badges
        .iter()
        .filter(|badge| match badge.kind {
            BadgeKind::Streak => u64::from(streak) >= badge.requirement,
            BadgeKind::Counter => total_count >= badge.requirement,
        })
        .map(|badge| badge.id.clone())
        .collect()
}
