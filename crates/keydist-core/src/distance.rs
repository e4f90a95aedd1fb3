// Keydist Distance Engine
// Weighted edit distance with an optional keyboard-adjacency discount

use std::cmp::Ordering;

use crate::trace::{DistanceTrace, LogSink, TraceSink};
use crate::{CostConfig, DistanceMatrix, KeyboardModel};

/// Adjacent-key errors cost this fraction of the configured cost
const KEYBOARD_DISCOUNT: f64 = 3.0;

/// Distance of one candidate from the ranked word
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a> {
    pub candidate: &'a str,
    pub distance: f64,
}

/// Runs the edit-distance DP against a borrowed keyboard model
///
/// The model is only consulted when the cost config enables the keyboard
/// bias. Every computation hands one trace to the sink.
#[derive(Debug, Clone)]
pub struct DistanceEngine<'m, S = LogSink> {
    model: &'m KeyboardModel,
    sink: S,
}

impl<'m> DistanceEngine<'m> {
    /// Engine that traces through the `log` facade
    pub fn new(model: &'m KeyboardModel) -> Self {
        Self {
            model,
            sink: LogSink,
        }
    }
}

impl Default for DistanceEngine<'static> {
    fn default() -> Self {
        Self::new(KeyboardModel::qwerty())
    }
}

impl<'m, S: TraceSink> DistanceEngine<'m, S> {
    /// Swap the trace sink
    pub fn with_sink<T: TraceSink>(self, sink: T) -> DistanceEngine<'m, T> {
        DistanceEngine {
            model: self.model,
            sink,
        }
    }

    pub fn model(&self) -> &'m KeyboardModel {
        self.model
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Edit distance from `source` to `target`
    pub fn distance(&self, source: &str, target: &str, config: &CostConfig) -> f64 {
        self.matrix(source, target, config).final_cost()
    }

    /// The full cost matrix; its bottom-right cell is the distance
    pub fn matrix(&self, source: &str, target: &str, config: &CostConfig) -> DistanceMatrix {
        let source_chars: Vec<char> = source.chars().collect();
        let target_chars: Vec<char> = target.chars().collect();
        let matrix = self.fill(&source_chars, &target_chars, config);

        self.sink.record(&DistanceTrace {
            source,
            target,
            use_keyboard_model: config.use_keyboard_model,
            distance: matrix.final_cost(),
        });

        matrix
    }

    /// Distance from `word` to every candidate, closest first
    ///
    /// Ties keep the candidates' original order.
    pub fn rank<'c, I>(&self, word: &str, candidates: I, config: &CostConfig) -> Vec<Ranked<'c>>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let mut ranked: Vec<Ranked<'c>> = candidates
            .into_iter()
            .map(|candidate| Ranked {
                candidate,
                distance: self.distance(word, candidate, config),
            })
            .collect();
        ranked.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }

    fn fill(&self, source: &[char], target: &[char], config: &CostConfig) -> DistanceMatrix {
        let (m, n) = (source.len(), target.len());
        let mut matrix = DistanceMatrix::new(m, n);

        for i in 1..=m {
            matrix.set(i, 0, i as f64 * config.deletion_cost);
        }
        for j in 1..=n {
            matrix.set(0, j, j as f64 * config.insertion_cost);
        }

        let bias = config.use_keyboard_model;
        for i in 1..=m {
            let source_char = source[i - 1];
            // The insertion check looks one character ahead; past the end
            // there is nothing to be adjacent to.
            let next_source = source.get(i).copied();

            for j in 1..=n {
                let target_char = target[j - 1];

                let insertion = if bias
                    && self
                        .model
                        .are_neighbors(next_source, target_char)
                        .is_neighbor()
                {
                    config.insertion_cost / KEYBOARD_DISCOUNT
                } else {
                    config.insertion_cost
                };
                let cost_to_insert = matrix.get(i, j - 1) + insertion;
                let cost_to_delete = matrix.get(i - 1, j) + config.deletion_cost;

                let mut cost_to_substitute = matrix.get(i - 1, j - 1);
                if source_char != target_char {
                    cost_to_substitute += if bias
                        && self
                            .model
                            .are_neighbors(source_char, target_char)
                            .is_neighbor()
                    {
                        config.substitution_cost / KEYBOARD_DISCOUNT
                    } else {
                        config.substitution_cost
                    };
                }

                matrix.set(
                    i,
                    j,
                    cost_to_insert.min(cost_to_delete).min(cost_to_substitute),
                );
            }
        }

        matrix
    }
}

/// Edit distance using the built-in QWERTY model and log tracing
pub fn levenshtein_distance(source: &str, target: &str, config: &CostConfig) -> f64 {
    DistanceEngine::default().distance(source, target, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{RecordingSink, SilentSink};
    use crate::Layout;

    const EPSILON: f64 = 1e-9;

    fn engine() -> DistanceEngine<'static, SilentSink> {
        DistanceEngine::default().with_sink(SilentSink)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_kitten_sitting() {
        let config = CostConfig::default();
        assert_close(engine().distance("kitten", "sitting", &config), 5.0);
    }

    #[test]
    fn test_identical_strings_are_free() {
        let config = CostConfig::default();
        for word in ["", "a", "search", "keyboard"] {
            assert_close(engine().distance(word, word, &config), 0.0);
            assert_close(engine().distance(word, word, &CostConfig::keyboard()), 0.0);
        }
    }

    #[test]
    fn test_empty_source_and_target() {
        let config = CostConfig::default()
            .with_insertion_cost(2.0)
            .with_deletion_cost(0.5);
        assert_close(engine().distance("", "abc", &config), 6.0);
        assert_close(engine().distance("abcd", "", &config), 2.0);
        assert_close(engine().distance("", "", &config), 0.0);
    }

    #[test]
    fn test_base_row_and_column() {
        let config = CostConfig::default().with_deletion_cost(1.5);
        let matrix = engine().matrix("ab", "xyz", &config);
        assert_eq!(matrix.row(0), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(matrix.get(1, 0), 1.5);
        assert_eq!(matrix.get(2, 0), 3.0);
    }

    #[test]
    fn test_substitution_uses_configured_cost() {
        let config = CostConfig::default().with_substitution_cost(1.0);
        assert_close(engine().distance("cat", "cut", &config), 1.0);
        // Two edits are cheaper than a substitution costing more than both
        let config = CostConfig::default().with_substitution_cost(5.0);
        assert_close(engine().distance("cat", "cut", &config), 2.0);
    }

    #[test]
    fn test_adjacent_substitution_is_discounted() {
        let plain = engine().distance("test", "tedt", &CostConfig::default());
        let biased = engine().distance("test", "tedt", &CostConfig::keyboard());
        assert_close(plain, 2.0);
        assert_close(biased, 2.0 / 3.0);
    }

    #[test]
    fn test_adjacent_typo_is_closer_than_distant_one() {
        let config = CostConfig::keyboard();
        let adjacent = engine().distance("test", "tedt", &config);
        let distant = engine().distance("test", "tent", &config);
        assert!(adjacent < distant);
    }

    #[test]
    fn test_insertion_discount_uses_following_character() {
        // 'd' is inserted right before 's', its neighbor on the home row
        let config = CostConfig::keyboard();
        assert_close(engine().distance("as", "ads", &config), 1.0 / 3.0);
        assert_close(engine().distance("as", "ads", &CostConfig::default()), 1.0);
    }

    #[test]
    fn test_insertion_past_end_is_not_discounted() {
        // Appending after the last character has no following character
        let config = CostConfig::keyboard();
        assert_close(engine().distance("was", "wasd", &config), 1.0);
    }

    #[test]
    fn test_bias_ignored_when_disabled() {
        let config = CostConfig::default();
        assert_close(engine().distance("qwe", "wqe", &config), 2.0);
    }

    #[test]
    fn test_custom_model() {
        let layout = Layout::new(vec![vec!["ab"], vec!["cd"]]);
        let model = KeyboardModel::build(Some(&layout));
        let engine = DistanceEngine::new(&model).with_sink(SilentSink);

        assert_close(engine.distance("a", "b", &CostConfig::keyboard()), 2.0 / 3.0);
        assert_close(engine.distance("a", "d", &CostConfig::keyboard()), 2.0 / 3.0);
        // 'q' and 'w' are not keys in this layout
        assert_close(engine.distance("q", "w", &CostConfig::keyboard()), 2.0);
    }

    #[test]
    fn test_one_sided_neighbors_are_discounted() {
        // The repeated 'a' leaves 'c' -> 'a' recorded with no way back
        let layout = Layout::new(vec![vec!["abca"]]);
        let model = KeyboardModel::build(Some(&layout));
        let engine = DistanceEngine::new(&model).with_sink(SilentSink);
        let config = CostConfig::keyboard();

        assert_close(engine.distance("a", "c", &config), 2.0 / 3.0);
        assert_close(engine.distance("c", "a", &config), 2.0 / 3.0);
        assert_close(engine.distance("a", "c", &CostConfig::default()), 2.0);

        // Inserting right before a one-sided neighbor
        assert_close(engine.distance("xa", "xca", &config), 1.0 / 3.0);
        assert_close(engine.distance("xc", "xac", &config), 1.0 / 3.0);
        assert_close(engine.distance("xa", "xca", &CostConfig::default()), 1.0);
    }

    #[test]
    fn test_trace_is_recorded() {
        let engine = DistanceEngine::default().with_sink(RecordingSink::new());
        engine.distance("test", "tedt", &CostConfig::keyboard());
        engine.matrix("a", "b", &CostConfig::default());

        let records = engine.sink().records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "test");
        assert_eq!(records[0].target, "tedt");
        assert!(records[0].use_keyboard_model);
        assert_close(records[0].distance, 2.0 / 3.0);
        assert!(!records[1].use_keyboard_model);
        assert_close(records[1].distance, 2.0);
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let ranked = engine().rank(
            "tesr",
            ["toast", "test", "tent", "tesr"],
            &CostConfig::keyboard(),
        );
        let order: Vec<&str> = ranked.iter().map(|r| r.candidate).collect();
        assert_eq!(order[0], "tesr");
        assert_eq!(order[1], "test");
        assert_close(ranked[0].distance, 0.0);
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_unicode_counts_characters() {
        let config = CostConfig::default();
        assert_close(engine().distance("café", "cafe", &config), 2.0);
        assert_close(engine().distance("", "日本", &config), 2.0);
    }

    #[test]
    fn test_levenshtein_distance_helper() {
        assert_close(levenshtein_distance("kitten", "sitting", &CostConfig::default()), 5.0);
    }
}
