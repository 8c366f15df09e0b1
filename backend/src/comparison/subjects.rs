use super::{
    ngram::words_fuzzy_equal,
    text::{normalize, words},
    MatchSettings,
};

/// A registry subject scored against a candidate name.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch<'a, S> {
    pub score: f64,
    pub subject: &'a S,
}

/// Scores subject names against each other by fuzzy word overlap.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectMatcher {
    settings: MatchSettings,
}

impl SubjectMatcher {
    pub fn new(settings: MatchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn words_fuzzy_equal(&self, a: &str, b: &str) -> bool {
        words_fuzzy_equal(
            a,
            b,
            self.settings.ngram_length,
            self.settings.word_threshold,
        )
    }

    /// Similarity of two subject names in `[0, 1]`.
    ///
    /// Words of `first` are taken in order; each one consumes the first
    /// unused fuzzy-equal word of `second`. The score is the Tanimoto
    /// coefficient over matched words.
    pub fn similarity(&self, first: &str, second: &str) -> f64 {
        if (first.is_empty() && second.is_empty()) || normalize(first) == normalize(second) {
            return 1.0;
        }
        if first.is_empty() || second.is_empty() {
            return 0.0;
        }

        let first_words = words(first, self.settings.min_word_length);
        let second_words = words(second, self.settings.min_word_length);
        let mut used = vec![false; second_words.len()];
        let mut equal = 0usize;

        for word in &first_words {
            for (j, other) in second_words.iter().enumerate() {
                if !used[j] && self.words_fuzzy_equal(word, other) {
                    used[j] = true;
                    equal += 1;
                    break;
                }
            }
        }

        let union = first_words.len() + second_words.len() - equal;
        if union == 0 {
            return 0.0;
        }
        equal as f64 / union as f64
    }

    /// Rank `registry` against a single candidate name.
    ///
    /// Only strictly positive scores are kept. Ties keep registry order.
    pub fn rank_one<'a, S, F>(
        &self,
        candidate: &str,
        registry: &'a [S],
        name: F,
    ) -> Vec<RankedMatch<'a, S>>
    where
        F: Fn(&S) -> &str,
    {
        self.ranked_above(candidate, registry, name, 0.0)
    }

    /// One ranked list per candidate, in candidate order. An empty list means
    /// nothing in the registry resembles that candidate.
    pub fn rank<'a, C, S, F>(
        &self,
        candidates: &[C],
        registry: &'a [S],
        name: F,
    ) -> Vec<Vec<RankedMatch<'a, S>>>
    where
        C: AsRef<str>,
        F: Fn(&S) -> &str,
    {
        candidates
            .iter()
            .map(|candidate| self.rank_one(candidate.as_ref(), registry, &name))
            .collect()
    }

    /// Scores strictly greater than `floor`, best first. The sort is stable.
    pub(crate) fn ranked_above<'a, S, F>(
        &self,
        candidate: &str,
        registry: &'a [S],
        name: F,
        floor: f64,
    ) -> Vec<RankedMatch<'a, S>>
    where
        F: Fn(&S) -> &str,
    {
        let mut ranked: Vec<RankedMatch<'a, S>> = registry
            .iter()
            .map(|subject| RankedMatch {
                score: self.similarity(candidate, name(subject)),
                subject,
            })
            .filter(|m| m.score > floor)
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matcher() -> SubjectMatcher {
        SubjectMatcher::default()
    }

    #[test]
    fn empty_names() {
        let m = matcher();
        assert_eq!(m.similarity("", ""), 1.0);
        assert_eq!(m.similarity("", "x"), 0.0);
        assert_eq!(m.similarity("x", ""), 0.0);
    }

    #[test]
    fn equal_after_normalization_is_one() {
        let m = matcher();
        assert_eq!(m.similarity("История", "история"), 1.0);
        assert_eq!(m.similarity("Web-дизайн", "web дизайн"), 1.0);
    }

    #[test]
    fn short_names_without_words_score_zero() {
        // both tokenize to nothing and differ after normalization
        assert_eq!(matcher().similarity("ab", "cd"), 0.0);
    }

    #[test]
    fn greedy_matching_does_not_double_consume() {
        let score = matcher().similarity("data base systems", "systems of databases");
        // only "systems" pairs up: 1 / (3 + 2 - 1)
        assert!((score - 0.25).abs() < 1e-12);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn prefix_course_matches_inflected_name() {
        let score = matcher().similarity("Программирование", "Основы программирования");
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rank_keeps_only_positive_scores() {
        let registry = vec!["Физика", "Математика"];
        let ranked = matcher().rank(&["Физика", "История"], &registry, |s| *s);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].len(), 1);
        assert_eq!(ranked[0][0].score, 1.0);
        assert_eq!(*ranked[0][0].subject, "Физика");
        assert!(ranked[1].is_empty());
    }

    #[test]
    fn rank_orders_by_score_and_keeps_registry_order_on_ties() {
        let registry = vec![
            "Основы программирования",
            "Программирование",
            "Объектно-ориентированное программирование",
            "Web программирование",
            "Физика",
        ];
        let ranked = matcher().rank_one("Программирование", &registry, |s| *s);
        let names: Vec<&str> = ranked.iter().map(|m| *m.subject).collect();

        assert_eq!(
            names,
            vec![
                "Программирование",
                "Основы программирования",
                "Объектно-ориентированное программирование",
                "Web программирование",
            ]
        );
        assert_eq!(ranked[0].score, 1.0);
        // the three two-word names tie at 1/2
        assert!(ranked[1..].iter().all(|m| m.score == 0.5));
    }

    #[test]
    fn custom_thresholds_change_word_equality() {
        let strict = SubjectMatcher::new(MatchSettings {
            word_threshold: 0.95,
            ..Default::default()
        });
        assert_eq!(
            strict.similarity("Программирование", "Основы программирования"),
            0.0
        );
    }

    proptest! {
        #[test]
        fn prop_similarity_is_bounded(
            a in "[a-zа-я ]{0,30}",
            b in "[a-zа-я ]{0,30}",
        ) {
            let score = matcher().similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_similarity_is_reflexive(a in "[a-zA-Zа-яА-Я .-]{1,30}") {
            prop_assert_eq!(matcher().similarity(&a, &a), 1.0);
        }

        #[test]
        fn prop_similarity_is_symmetric(
            a in "(ab|ba|abc|cab|bca|aab|[a-c]{3,6})( (ab|ba|abc|cab|bca|aab|[a-c]{3,6})){0,3}",
            b in "(ab|ba|abc|cab|bca|aab|[a-c]{3,6})( (ab|ba|abc|cab|bca|aab|[a-c]{3,6})){0,3}",
        ) {
            let m = matcher();
            prop_assert_eq!(m.similarity(&a, &b), m.similarity(&b, &a));
        }

        #[test]
        fn prop_rank_is_positive_and_non_increasing(
            candidate in "[a-c]{2,5}( [a-c]{2,5}){0,2}",
            registry in proptest::collection::vec("[a-c]{2,5}( [a-c]{2,5}){0,2}", 0..12),
        ) {
            let ranked = matcher().rank_one(&candidate, &registry, |s| s.as_str());
            prop_assert!(ranked.iter().all(|m| m.score > 0.0));
            prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}
