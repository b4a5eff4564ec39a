//! Leaderboard projection.

use crate::types::ranking::RankingEntry;

/// Project raw score records into leaderboard order.
///
/// Stable sort, descending by score; entries without a score compare as 0
/// but keep their absent score for display. Ties preserve the backend's
/// original relative order.
#[must_use]
pub fn project(entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    let mut ordered = entries;
    ordered.sort_by(|a, b| {
        let left = a.score.unwrap_or(0.0);
        let right = b.score.unwrap_or(0.0);
        right.total_cmp(&left)
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::ChefId;

    fn entry(id: i64, name: &str, score: Option<f64>) -> RankingEntry {
        RankingEntry {
            chef_id: Some(ChefId::new(id)),
            chef_name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_project_sorts_descending() {
        let projected = project(vec![
            entry(1, "Ana", Some(80.0)),
            entry(2, "Bruno", Some(95.0)),
            entry(3, "Carla", Some(95.0)),
        ]);
        let scores: Vec<_> = projected.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![Some(95.0), Some(95.0), Some(80.0)]);
        // Stable: the two 95s keep their original relative order.
        assert_eq!(projected[0].chef_name, "Bruno");
        assert_eq!(projected[1].chef_name, "Carla");
    }

    #[test]
    fn test_missing_score_ranks_as_zero_but_displays_as_absent() {
        let projected = project(vec![
            entry(1, "Ana", None),
            entry(2, "Bruno", Some(10.0)),
        ]);
        assert_eq!(projected[0].chef_name, "Bruno");
        assert_eq!(projected[1].chef_name, "Ana");
        assert_eq!(projected[1].score, None);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(project(Vec::new()).is_empty());
    }
}
