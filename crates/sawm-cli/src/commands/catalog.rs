use sawm_core::Badge;
use serde::Serialize;

use crate::app::{print_json, App, CliResult};

#[derive(Serialize)]
struct BadgeView<'a> {
    #[serde(flatten)]
    badge: &'a Badge,
    unlocked: bool,
}

pub fn rituals() -> CliResult {
    let app = App::open()?;
    print_json(&app.catalog.rituals)
}

pub fn badges() -> CliResult {
    let mut app = App::open()?;
    app.settle_badges()?;
    let state = app.store.get();
    let mut views: Vec<BadgeView<'_>> = app
        .catalog
        .badges
        .iter()
        .map(|badge| BadgeView {
            badge,
            unlocked: state.unlocked_badges.contains(&badge.id),
        })
        .collect();
    // Unlocked first, then catalog order.
    views.sort_by_key(|v| !v.unlocked);

    print_json(&views)
}
