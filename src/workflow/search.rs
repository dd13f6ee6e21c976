//! Startlist search.

use crate::api::types::Rider;

/// Case-insensitive substring filter on rider name or team name.
///
/// A pure projection of the startlist: selection state is never touched by
/// searching, and an empty term returns everyone.
pub fn filter_riders<'a>(riders: &'a [Rider], term: &str) -> Vec<&'a Rider> {
    if term.is_empty() {
        return riders.iter().collect();
    }

    let needle = term.to_lowercase();
    riders
        .iter()
        .filter(|rider| {
            rider.full_name.to_lowercase().contains(&needle)
                || rider
                    .display_team()
                    .map(|team| team.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}
