// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Party Size Normalization
//!
//! Turns a party size into the table combinations ("groupings") that could
//! seat it at a site. A party no larger than the largest table is matched
//! against single tables with up to `upward_scaling` spare seats. A larger
//! party is first split across as many largest tables as the site has and
//! the party needs; only the leftover guests are matched with spare seats.
//!
//! Each grouping lists the remainder table first, then the largest tables.

use std::collections::BTreeSet;
use std::fmt::Display;
use table_alloc_model::policy::UpwardScaling;
use table_alloc_model::table::{PartySize, Seats};

/// Table capacities that together seat one party.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grouping(Vec<Seats>);

impl Grouping {
    #[inline]
    pub fn new(capacities: Vec<Seats>) -> Self {
        Self(capacities)
    }

    #[inline]
    pub fn capacities(&self) -> &[Seats] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_seats(&self) -> u32 {
        self.0.iter().map(|s| s.value() as u32).sum()
    }
}

impl Display for Grouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, seats) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", seats)?;
        }
        write!(f, "]")
    }
}

/// All groupings able to seat a party, in matching preference order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyPlan {
    party: PartySize,
    groupings: Vec<Grouping>,
}

impl PartyPlan {
    pub fn normalize(party: PartySize, capacities: &[Seats], scaling: UpwardScaling) -> Self {
        let mut remaining: Vec<u16> = capacities.iter().map(|s| s.value()).collect();
        remaining.sort_unstable();

        let Some(&largest) = remaining.last() else {
            return Self {
                party,
                groupings: Vec::new(),
            };
        };

        let mut leftover = party.value();
        let mut large = Vec::new();
        if leftover > largest {
            for _ in 0..(party.value() / largest) {
                if let Some(pos) = remaining.iter().position(|&c| c == largest) {
                    remaining.remove(pos);
                    leftover -= largest;
                    large.push(largest);
                }
            }
        }

        let to_seats = |c: u16| Seats::new(c).ok();
        let groupings = if leftover == 0 {
            vec![Grouping(large.iter().copied().filter_map(to_seats).collect())]
        } else {
            let upper = leftover as u32 + scaling.value() as u32;
            remaining
                .iter()
                .copied()
                .collect::<BTreeSet<u16>>()
                .into_iter()
                .filter(|&c| leftover <= c && (c as u32) <= upper)
                .map(|c| {
                    Grouping(
                        std::iter::once(c)
                            .chain(large.iter().copied())
                            .filter_map(to_seats)
                            .collect(),
                    )
                })
                .collect()
        };

        Self { party, groupings }
    }

    #[inline]
    pub fn party(&self) -> PartySize {
        self.party
    }

    #[inline]
    pub fn groupings(&self) -> &[Grouping] {
        &self.groupings
    }

    /// `true` if no combination of the site's tables seats the party.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        self.groupings.is_empty()
    }

    /// Every capacity used by any grouping.
    pub fn capacities(&self) -> BTreeSet<Seats> {
        self.groupings
            .iter()
            .flat_map(|g| g.capacities().iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(party: u16, tables: &[u16], scaling: u8) -> Vec<Vec<u16>> {
        let capacities: Vec<Seats> = tables.iter().map(|&s| Seats::new(s).unwrap()).collect();
        PartyPlan::normalize(
            PartySize::new(party).unwrap(),
            &capacities,
            UpwardScaling::new(scaling).unwrap(),
        )
        .groupings()
        .iter()
        .map(|g| g.capacities().iter().map(|s| s.value()).collect())
        .collect()
    }

    #[test]
    fn test_no_tables_no_groupings() {
        assert!(plan(2, &[], 2).is_empty());
    }

    #[test]
    fn test_exact_single_table() {
        assert_eq!(plan(2, &[2, 6], 2), vec![vec![2]]);
        assert_eq!(plan(6, &[2, 6], 2), vec![vec![6]]);
    }

    #[test]
    fn test_smaller_party_with_scaling() {
        assert_eq!(plan(1, &[2, 6], 2), vec![vec![2]]);
        assert_eq!(plan(2, &[2, 6], 4), vec![vec![2], vec![6]]);
        assert_eq!(plan(5, &[2, 6], 0), Vec::<Vec<u16>>::new());
    }

    #[test]
    fn test_larger_single_with_remainder() {
        assert_eq!(plan(8, &[2, 6], 2), vec![vec![2, 6]]);
        assert_eq!(plan(7, &[2, 6], 2), vec![vec![2, 6]]);
    }

    #[test]
    fn test_larger_single_with_remainder_and_scaling() {
        assert_eq!(plan(8, &[2, 6, 4], 2), vec![vec![2, 6], vec![4, 6]]);
    }

    #[test]
    fn test_remainder_without_table_is_infeasible() {
        assert!(plan(9, &[2, 6], 0).is_empty());
        assert!(plan(9, &[2, 6], 2).is_empty());
    }

    #[test]
    fn test_exact_multiple_of_largest() {
        assert_eq!(plan(18, &[2, 6, 6, 6], 2), vec![vec![6, 6, 6]]);
        assert_eq!(plan(20, &[2, 6, 6, 6], 2), vec![vec![2, 6, 6, 6]]);
    }

    #[test]
    fn test_multiple_with_remainder_and_scaling() {
        assert_eq!(
            plan(19, &[2, 6, 6, 6, 4], 3),
            vec![vec![2, 6, 6, 6], vec![4, 6, 6, 6]]
        );
        assert!(plan(21, &[2, 6, 6, 6], 2).is_empty());
    }

    #[test]
    fn test_not_enough_largest_tables() {
        assert!(plan(18, &[2, 6, 6], 2).is_empty());
    }

    #[test]
    fn test_largest_table_used_for_remainder_once_split() {
        // Two 6s cover twelve guests, the third 6 is left for the remaining four.
        assert_eq!(plan(16, &[6, 6, 6], 2), vec![vec![6, 6, 6]]);
    }

    #[test]
    fn test_scaling_only_applies_to_remainder() {
        assert!(plan(9, &[6, 8], 0).is_empty());
        assert_eq!(plan(9, &[6, 8], 5), vec![vec![6, 8]]);
        assert_eq!(plan(14, &[6, 6, 8], 2), vec![vec![6, 8]]);
    }

    #[test]
    fn test_random_groupings_seat_the_party_from_available_tables() {
        use rand::{Rng, SeedableRng, rngs::SmallRng};
        use std::collections::BTreeMap;

        let mut rng = SmallRng::seed_from_u64(0x7AB1E);
        for _ in 0..500 {
            let tables: Vec<u16> = (0..rng.random_range(0..=8usize))
                .map(|_| rng.random_range(1..=10u16))
                .collect();
            let party = rng.random_range(1..=30u16);
            let scaling = rng.random_range(0..=5u8);

            let mut available: BTreeMap<u16, usize> = BTreeMap::new();
            for &c in &tables {
                *available.entry(c).or_default() += 1;
            }

            let groupings = plan(party, &tables, scaling);
            for grouping in &groupings {
                let total: u32 = grouping.iter().map(|&c| c as u32).sum();
                assert!(
                    total >= party as u32 && total <= party as u32 + scaling as u32,
                    "{grouping:?} for party {party}, scaling {scaling}, tables {tables:?}"
                );

                let mut used: BTreeMap<u16, usize> = BTreeMap::new();
                for &c in grouping {
                    *used.entry(c).or_default() += 1;
                }
                for (c, n) in used {
                    assert!(
                        available.get(&c).is_some_and(|&have| have >= n),
                        "{grouping:?} uses more {c}-seaters than {tables:?} has"
                    );
                }
            }

            let distinct: BTreeSet<&Vec<u16>> = groupings.iter().collect();
            assert_eq!(distinct.len(), groupings.len());
        }
    }

    #[test]
    fn test_capacities_are_flattened() {
        let capacities: Vec<Seats> = [2, 4, 6].iter().map(|&s| Seats::new(s).unwrap()).collect();
        let plan = PartyPlan::normalize(
            PartySize::new(8).unwrap(),
            &capacities,
            UpwardScaling::new(2).unwrap(),
        );
        let flat: Vec<u16> = plan.capacities().iter().map(|s| s.value()).collect();
        assert_eq!(flat, vec![2, 4, 6]);
        assert_eq!(plan.groupings()[1].total_seats(), 10);
        assert_eq!(plan.groupings()[1].to_string(), "[4, 6]");
    }
}
