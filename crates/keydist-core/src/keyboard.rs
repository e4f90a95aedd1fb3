// Keydist Keyboard Model
// Precomputed key adjacency with direction metadata, built once per layout

use std::sync::LazyLock;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::{Direction, Layout};

/// Per-character neighbor relation: key -> (neighbor -> direction)
pub type AdjacencyMap = IndexMap<char, IndexMap<char, Direction>>;

/// Model for the built-in QWERTY layout, built on first use
static QWERTY_MODEL: LazyLock<KeyboardModel> = LazyLock::new(|| KeyboardModel::build(None));

/// How confidently two characters are adjacent keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborStatus {
    /// Both `a -> b` and `b -> a` were recorded
    Confirmed,
    /// Only one of the two directions was recorded
    Asymmetric,
    /// Not neighbors, or one of the characters is unknown
    None,
}

impl NeighborStatus {
    /// Boolean view: Confirmed and Asymmetric both count as neighboring
    pub fn is_neighbor(self) -> bool {
        !matches!(self, NeighborStatus::None)
    }
}

/// A non-fatal problem found while building a model from a layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutIssue {
    #[error("row {row} has no key-strings")]
    EmptyRow { row: usize },

    #[error("row {row} variant {variant} is an empty key-string")]
    EmptyKeyString { row: usize, variant: usize },

    #[error("row {row} variant {variant} has no counterpart in row {adjacent_row}")]
    MissingVariant {
        row: usize,
        variant: usize,
        adjacent_row: usize,
    },
}

/// Vertical side of a neighboring row
#[derive(Debug, Clone, Copy)]
enum Side {
    Above,
    Below,
}

impl Side {
    fn directions(self) -> [Direction; 3] {
        match self {
            Side::Above => [Direction::Above, Direction::AboveLeft, Direction::AboveRight],
            Side::Below => [Direction::Below, Direction::BelowLeft, Direction::BelowRight],
        }
    }
}

/// Keyboard adjacency model
///
/// Immutable once built, so a single model can be shared by reference
/// across any number of distance computations.
#[derive(Debug, Clone)]
pub struct KeyboardModel {
    adjacency: AdjacencyMap,
    layout: Layout,
    issues: Vec<LayoutIssue>,
}

impl KeyboardModel {
    /// Build a model from a layout, or from the built-in QWERTY layout
    ///
    /// Malformed parts of the layout are logged, recorded in [`issues`],
    /// and skipped; whatever could be derived is kept.
    ///
    /// [`issues`]: KeyboardModel::issues
    pub fn build(layout: Option<&Layout>) -> Self {
        let layout = layout.unwrap_or_else(|| Layout::qwerty()).clone();
        let mut builder = Builder {
            placeholder: layout.placeholder(),
            adjacency: AdjacencyMap::new(),
            issues: Vec::new(),
        };

        let rows: Vec<Vec<Vec<char>>> = layout
            .rows()
            .iter()
            .map(|row| row.iter().map(|keys| keys.chars().collect()).collect())
            .collect();

        for (i, row) in rows.iter().enumerate() {
            if row.is_empty() {
                builder.report(LayoutIssue::EmptyRow { row: i });
                continue;
            }

            for (j, keys) in row.iter().enumerate() {
                if keys.is_empty() {
                    builder.report(LayoutIssue::EmptyKeyString { row: i, variant: j });
                    continue;
                }

                builder.link_row(keys);

                if i > 0 {
                    builder.link_adjacent_row(&rows, keys, (i, j), i - 1, Side::Above);
                }
                if i + 1 < rows.len() {
                    builder.link_adjacent_row(&rows, keys, (i, j), i + 1, Side::Below);
                }
            }
        }

        log::debug!(
            "Built keyboard model: {} keys, {} issue(s)",
            builder.adjacency.len(),
            builder.issues.len()
        );

        Self {
            adjacency: builder.adjacency,
            layout,
            issues: builder.issues,
        }
    }

    /// The shared model for the built-in QWERTY layout
    pub fn qwerty() -> &'static KeyboardModel {
        &QWERTY_MODEL
    }

    /// Check whether two characters are adjacent keys
    ///
    /// Accepts plain `char`s or `Option<char>`; a missing character is never
    /// a neighbor of anything.
    pub fn are_neighbors(
        &self,
        a: impl Into<Option<char>>,
        b: impl Into<Option<char>>,
    ) -> NeighborStatus {
        let (Some(a), Some(b)) = (a.into(), b.into()) else {
            return NeighborStatus::None;
        };
        let (Some(from_a), Some(from_b)) = (self.adjacency.get(&a), self.adjacency.get(&b)) else {
            return NeighborStatus::None;
        };

        match (from_a.contains_key(&b), from_b.contains_key(&a)) {
            (true, true) => NeighborStatus::Confirmed,
            (true, false) | (false, true) => NeighborStatus::Asymmetric,
            (false, false) => NeighborStatus::None,
        }
    }

    /// Direction of `b` as recorded from `a`'s side
    pub fn direction(&self, a: char, b: char) -> Option<Direction> {
        self.adjacency.get(&a)?.get(&b).copied()
    }

    /// All recorded neighbors of `c`, in the order they were found
    pub fn neighbors(&self, c: char) -> SmallVec<[(char, Direction); 8]> {
        self.adjacency
            .get(&c)
            .map(|entry| entry.iter().map(|(&k, &d)| (k, d)).collect())
            .unwrap_or_default()
    }

    /// True if `c` has an entry in the adjacency map
    pub fn contains(&self, c: char) -> bool {
        self.adjacency.contains_key(&c)
    }

    /// Number of keys with an adjacency entry
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.adjacency
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Problems found while building; empty for a well-formed layout
    pub fn issues(&self) -> &[LayoutIssue] {
        &self.issues
    }
}

impl Default for KeyboardModel {
    fn default() -> Self {
        QWERTY_MODEL.clone()
    }
}

/// Mutable state while a model is under construction
struct Builder {
    placeholder: char,
    adjacency: AdjacencyMap,
    issues: Vec<LayoutIssue>,
}

impl Builder {
    fn report(&mut self, issue: LayoutIssue) {
        log::warn!("Skipping malformed layout part: {}", issue);
        self.issues.push(issue);
    }

    fn is_key(&self, c: char) -> bool {
        c != self.placeholder
    }

    /// Record a neighbor, never linking a key to itself
    fn link(&mut self, key: char, neighbor: char, direction: Direction) {
        if key == neighbor || !self.is_key(neighbor) {
            return;
        }
        self.adjacency
            .entry(key)
            .or_default()
            .insert(neighbor, direction);
    }

    /// Left/right neighbors, recorded on a key's first occurrence only
    fn link_row(&mut self, keys: &[char]) {
        for (k, &key) in keys.iter().enumerate() {
            if !self.is_key(key) || self.adjacency.contains_key(&key) {
                continue;
            }
            self.adjacency.insert(key, IndexMap::new());

            if k > 0 {
                self.link(key, keys[k - 1], Direction::Left);
            }
            if let Some(&right) = keys.get(k + 1) {
                self.link(key, right, Direction::Right);
            }
        }
    }

    /// Aligned and diagonal neighbors from the same variant of another row
    fn link_adjacent_row(
        &mut self,
        rows: &[Vec<Vec<char>>],
        keys: &[char],
        (row, variant): (usize, usize),
        adjacent_row: usize,
        side: Side,
    ) {
        let Some(other) = rows[adjacent_row].get(variant) else {
            self.report(LayoutIssue::MissingVariant {
                row,
                variant,
                adjacent_row,
            });
            return;
        };

        let [straight, diagonal_left, diagonal_right] = side.directions();
        let last = keys.len() - 1;

        for (k, &key) in keys.iter().enumerate() {
            if !self.is_key(key) || k >= other.len() {
                continue;
            }
            self.adjacency.entry(key).or_default();

            self.link(key, other[k], straight);
            if k > 0 {
                self.link(key, other[k - 1], diagonal_left);
            }
            if k < last {
                if let Some(&right) = other.get(k + 1) {
                    self.link(key, right, diagonal_right);
                }
            }
        }
    }
}
