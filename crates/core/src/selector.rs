use std::collections::HashSet;

use crate::model::{Difficulty, Exercise, QuestionId};

/// Picks the tier to serve next.
///
/// Scans tiers in ascending order starting at `current`; the first tier
/// holding at least one unseen question wins, so a tier with work left is
/// never abandoned and harder tiers are preferred over falling back. When
/// the forward scan finds nothing, it wraps and scans every tier from the
/// lowest. `None` is the exhausted signal: every question in `questions`
/// has been seen.
///
/// # Examples
///
/// ```
/// # use std::collections::HashSet;
/// # use practice_core::model::{Difficulty, Literal, QuestionId, QuizQuestion};
/// # use practice_core::selector::select_tier;
/// let questions = vec![QuizQuestion::new(
///     QuestionId::new(1),
///     Difficulty::Medium,
///     "2 + 2?",
///     vec!["3".into(), "4".into()],
///     "4",
/// )
/// .unwrap()];
///
/// let tier = select_tier(Difficulty::Easy, &HashSet::new(), &questions);
/// assert_eq!(tier, Some(Difficulty::Medium));
/// ```
#[must_use]
pub fn select_tier<Q: Exercise>(
    current: Difficulty,
    seen: &HashSet<QuestionId>,
    questions: &[Q],
) -> Option<Difficulty> {
    let has_unseen = |tier: Difficulty| {
        questions
            .iter()
            .any(|q| q.difficulty() == tier && !seen.contains(&q.id()))
    };

    current
        .ascending_from()
        .find(|&tier| has_unseen(tier))
        .or_else(|| Difficulty::ORDERED.into_iter().find(|&tier| has_unseen(tier)))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizQuestion;

    fn quiz(id: u64, difficulty: Difficulty) -> QuizQuestion {
        QuizQuestion::new(
            QuestionId::new(id),
            difficulty,
            format!("Q{id}"),
            vec!["a".into(), "b".into()],
            "a",
        )
        .unwrap()
    }

    fn seen(ids: &[u64]) -> HashSet<QuestionId> {
        ids.iter().copied().map(QuestionId::new).collect()
    }

    #[test]
    fn stays_on_current_tier_with_unseen_questions() {
        let questions = vec![quiz(1, Difficulty::Easy), quiz(2, Difficulty::Medium)];
        let tier = select_tier(Difficulty::Easy, &HashSet::new(), &questions);
        assert_eq!(tier, Some(Difficulty::Easy));
    }

    #[test]
    fn advances_past_exhausted_tier() {
        let questions = vec![quiz(1, Difficulty::Easy), quiz(2, Difficulty::Medium)];
        let tier = select_tier(Difficulty::Easy, &seen(&[1]), &questions);
        assert_eq!(tier, Some(Difficulty::Medium));
    }

    #[test]
    fn skips_empty_tier_between() {
        let questions = vec![quiz(1, Difficulty::Easy), quiz(3, Difficulty::Hard)];
        let tier = select_tier(Difficulty::Medium, &HashSet::new(), &questions);
        assert_eq!(tier, Some(Difficulty::Hard));
    }

    #[test]
    fn wraps_to_lower_tier_when_forward_scan_fails() {
        let questions = vec![quiz(1, Difficulty::Easy), quiz(2, Difficulty::Hard)];
        let tier = select_tier(Difficulty::Hard, &seen(&[2]), &questions);
        assert_eq!(tier, Some(Difficulty::Easy));
    }

    #[test]
    fn exhausted_when_everything_is_seen() {
        let questions = vec![quiz(1, Difficulty::Easy), quiz(2, Difficulty::Medium)];
        let tier = select_tier(Difficulty::Easy, &seen(&[1, 2]), &questions);
        assert_eq!(tier, None);
    }

    #[test]
    fn empty_store_is_exhausted_from_any_tier() {
        let questions: Vec<QuizQuestion> = Vec::new();
        for tier in Difficulty::ORDERED {
            assert_eq!(select_tier(tier, &HashSet::new(), &questions), None);
        }
    }

    #[test]
    fn always_finds_a_tier_while_any_question_is_unseen() {
        let questions = vec![
            quiz(1, Difficulty::Easy),
            quiz(2, Difficulty::Medium),
            quiz(3, Difficulty::Hard),
        ];

        for current in Difficulty::ORDERED {
            for hidden in [&[][..], &[1], &[1, 2], &[2, 3], &[1, 3]] {
                let seen = seen(hidden);
                let tier = select_tier(current, &seen, &questions);
                let picked = tier.expect("unseen questions remain");
                assert!(
                    questions
                        .iter()
                        .any(|q| q.difficulty() == picked && !seen.contains(&q.id())),
                    "tier {picked} has no unseen question"
                );
            }
        }
    }
}
