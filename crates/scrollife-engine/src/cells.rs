// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Spatial store of live cells.

Membership is an `AHashSet`; range queries go through a row index
(`y -> ordered xs`) so a rectangle query only visits the rows it spans.
*/

use ahash::AHashSet;
use std::collections::{BTreeMap, BTreeSet};

use scrollife_structures::{GridBoundingRectangle, GridInterval, GridVector2};

/// Split of a cell set against a rectangle or row band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellPartition {
    pub inside: Vec<GridVector2>,
    pub outside: Vec<GridVector2>,
}

/// Deduplicated set of live cells.
///
/// Values are immutable: every operation that changes membership returns a
/// new store.
#[derive(Debug, Clone, Default)]
pub struct Cells {
    members: AHashSet<GridVector2>,
    rows: BTreeMap<i32, BTreeSet<i32>>,
}

impl Cells {
    pub fn new<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = GridVector2>,
    {
        let mut store = Self::default();
        for cell in cells {
            store.insert(cell);
        }
        store
    }

    fn insert(&mut self, cell: GridVector2) {
        if self.members.insert(cell) {
            self.rows.entry(cell.y).or_default().insert(cell.x);
        }
    }

    fn remove(&mut self, cell: &GridVector2) {
        if self.members.remove(cell) {
            if let Some(xs) = self.rows.get_mut(&cell.y) {
                xs.remove(&cell.x);
                if xs.is_empty() {
                    self.rows.remove(&cell.y);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, cell: &GridVector2) -> bool {
        self.members.contains(cell)
    }

    /// Unordered iteration over live cells.
    pub fn iter(&self) -> impl Iterator<Item = &GridVector2> {
        self.members.iter()
    }

    /// Live cells inside `bounds`, edges inclusive.
    pub fn within(&self, bounds: &GridBoundingRectangle) -> Vec<GridVector2> {
        self.rows
            .range(bounds.top()..=bounds.bottom())
            .flat_map(|(&y, xs)| {
                xs.range(bounds.left()..=bounds.right())
                    .map(move |&x| GridVector2::new(x, y))
            })
            .collect()
    }

    /// Splits every live cell into those within `bounds` and the rest.
    pub fn partition(&self, bounds: &GridBoundingRectangle) -> CellPartition {
        let inside = self.within(bounds);
        let outside = self
            .members
            .iter()
            .filter(|cell| !bounds.contains(cell))
            .copied()
            .collect();
        CellPartition { inside, outside }
    }

    /// Splits every live cell by whether its row lies within `rows` (inclusive).
    pub fn partition_rows(&self, rows: &GridInterval) -> CellPartition {
        let mut partition = CellPartition::default();
        for (&y, xs) in &self.rows {
            let target = if rows.contains(y) {
                &mut partition.inside
            } else {
                &mut partition.outside
            };
            target.extend(xs.iter().map(|&x| GridVector2::new(x, y)));
        }
        partition
    }

    /// New store with `cell` flipped.
    pub fn toggled(&self, cell: GridVector2) -> Self {
        let mut next = self.clone();
        if next.contains(&cell) {
            next.remove(&cell);
        } else {
            next.insert(cell);
        }
        next
    }

    /// Live cells ordered row by row, left to right.
    pub fn to_sorted_vec(&self) -> Vec<GridVector2> {
        self.rows
            .iter()
            .flat_map(|(&y, xs)| xs.iter().map(move |&x| GridVector2::new(x, y)))
            .collect()
    }
}

impl PartialEq for Cells {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for Cells {}

impl FromIterator<GridVector2> for Cells {
    fn from_iter<I: IntoIterator<Item = GridVector2>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<GridVector2>> for Cells {
    fn from(cells: Vec<GridVector2>) -> Self {
        Self::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i32, y: i32) -> GridVector2 {
        GridVector2::new(x, y)
    }

    fn rect(top: i32, left: i32, bottom: i32, right: i32) -> GridBoundingRectangle {
        GridBoundingRectangle::new(top, left, bottom, right).unwrap()
    }

    #[test]
    fn test_duplicates_collapse() {
        let cells = Cells::new(vec![v(1, 1), v(1, 1), v(2, 3)]);
        assert_eq!(cells.len(), 2);
        assert!(cells.contains(&v(1, 1)));
        assert!(!cells.is_empty());
        assert!(Cells::default().is_empty());
    }

    #[test]
    fn test_within_is_inclusive() {
        let cells = Cells::new(vec![v(0, 0), v(2, 2), v(3, 2), v(5, 5)]);
        let mut found = cells.within(&rect(0, 0, 2, 2));
        found.sort();
        assert_eq!(found, vec![v(0, 0), v(2, 2)]);
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let cells = Cells::new(vec![v(0, 0), v(2, 2), v(3, 2), v(5, 5), v(-1, 1)]);
        let partition = cells.partition(&rect(0, 0, 2, 2));
        assert_eq!(partition.inside.len() + partition.outside.len(), cells.len());
        for cell in &partition.inside {
            assert!(!partition.outside.contains(cell));
        }
        assert!(partition.outside.contains(&v(-1, 1)));
        assert!(partition.outside.contains(&v(3, 2)));
    }

    #[test]
    fn test_partition_rows() {
        let cells = Cells::new(vec![v(9, 0), v(1, 4), v(2, 5), v(3, 6)]);
        let partition = cells.partition_rows(&GridInterval::new(4, 5).unwrap());
        assert_eq!(partition.inside, vec![v(1, 4), v(2, 5)]);
        assert_eq!(partition.outside, vec![v(9, 0), v(3, 6)]);
    }

    #[test]
    fn test_toggled_returns_new_store() {
        let cells = Cells::new(vec![v(0, 0)]);
        let added = cells.toggled(v(1, 0));
        let removed = added.toggled(v(0, 0));

        assert_eq!(cells.len(), 1);
        assert_eq!(added.to_sorted_vec(), vec![v(0, 0), v(1, 0)]);
        assert_eq!(removed.to_sorted_vec(), vec![v(1, 0)]);
        assert!(removed.within(&rect(0, 0, 0, 0)).is_empty());
    }

    #[test]
    fn test_sorted_vec_is_row_major() {
        let cells = Cells::new(vec![v(3, 1), v(0, 2), v(1, 1), v(5, 0)]);
        assert_eq!(cells.to_sorted_vec(), vec![v(5, 0), v(1, 1), v(3, 1), v(0, 2)]);
    }
}
