//! Text filtering of the grouped habit listing.

use crate::model::category::CategoryGroup;

/// Keeps the habits whose title contains `query` (case-insensitive) and
/// drops categories left with no matches.
///
/// An empty query returns the listing unchanged. Pure function: callable
/// repeatedly with different queries over the same grouping.
pub fn filter_groups(groups: &[CategoryGroup], query: &str) -> Vec<CategoryGroup> {
    if query.is_empty() {
        return groups.to_vec();
    }

    let needle = query.to_lowercase();
    groups
        .iter()
        .filter_map(|group| {
            let matching: Vec<_> = group
                .habits
                .iter()
                .filter(|habit| habit.title.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            if matching.is_empty() {
                return None;
            }
            Some(CategoryGroup {
                category: group.category.clone(),
                habits: matching,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_groups;
    use crate::model::category::{Category, CategoryGroup};
    use crate::model::habit::Habit;
    use crate::model::schedule::Schedule;
    use uuid::Uuid;

    fn group(name: &str, titles: &[&str]) -> CategoryGroup {
        CategoryGroup {
            category: Category {
                id: Uuid::new_v4(),
                name: name.to_string(),
                created_at: 0,
            },
            habits: titles
                .iter()
                .map(|title| Habit::new(*title, "mint", "✨", Schedule::empty()))
                .collect(),
        }
    }

    #[test]
    fn empty_query_returns_listing_unchanged() {
        let groups = vec![group("Health", &["Water", "Walk"])];
        let filtered = filter_groups(&groups, "");
        assert_eq!(filtered, groups);
    }

    #[test]
    fn query_matches_substring_case_insensitively() {
        let groups = vec![group("Health", &["Water", "Walk"])];

        let filtered = filter_groups(&groups, "wat");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].habits.len(), 1);
        assert_eq!(filtered[0].habits[0].title, "Water");

        let filtered = filter_groups(&groups, "WALK");
        assert_eq!(filtered[0].habits[0].title, "Walk");
    }

    #[test]
    fn categories_without_matches_are_dropped() {
        let groups = vec![group("Health", &["Water"]), group("Work", &["Standup"])];

        let filtered = filter_groups(&groups, "zzz");
        assert!(filtered.is_empty());

        let filtered = filter_groups(&groups, "stand");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].category.name, "Work");
    }

    #[test]
    fn repeated_calls_do_not_disturb_the_source() {
        let groups = vec![group("Health", &["Water", "Walk"])];
        let before = groups.clone();

        let _ = filter_groups(&groups, "wat");
        let _ = filter_groups(&groups, "zzz");
        assert_eq!(groups, before);
    }
}
