//! Client-side ordering for nullable-rank tables.
//!
//! Banner-style tables sort by a nullable numeric rank: ranked rows first
//! in ascending rank order, unranked rows after them, and unranked rows
//! among themselves newest-first.

use core::cmp::Ordering;

/// A row that participates in rank ordering.
pub trait RankOrdered {
    /// The explicit display rank, if one was assigned.
    fn rank(&self) -> Option<i64>;

    /// Monotonic creation key (larger = more recently created).
    fn created_key(&self) -> i64;
}

/// Compare two rows under the rank ordering rule.
pub fn compare_rank<T: RankOrdered>(a: &T, b: &T) -> Ordering {
    match (a.rank(), b.rank()) {
        (Some(ra), Some(rb)) => ra
            .cmp(&rb)
            .then_with(|| b.created_key().cmp(&a.created_key())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_key().cmp(&a.created_key()),
    }
}

/// Sort rows in place under the rank ordering rule.
pub fn sort_by_rank<T: RankOrdered>(rows: &mut [T]) {
    rows.sort_by(compare_rank);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Banner {
        id: i64,
        rank: Option<i64>,
        created: i64,
    }

    impl RankOrdered for Banner {
        fn rank(&self) -> Option<i64> {
            self.rank
        }

        fn created_key(&self) -> i64 {
            self.created
        }
    }

    fn banner(id: i64, rank: Option<i64>, created: i64) -> Banner {
        Banner { id, rank, created }
    }

    #[test]
    fn ranked_rows_come_first_then_unranked_newest_first() {
        let mut rows = vec![
            banner(1, None, 5),
            banner(2, Some(2), 1),
            banner(3, None, 9),
        ];

        sort_by_rank(&mut rows);

        let order: Vec<i64> = rows.iter().map(|b| b.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn equal_ranks_fall_back_to_newest_first() {
        let mut rows = vec![banner(1, Some(1), 3), banner(2, Some(1), 8)];
        sort_by_rank(&mut rows);
        let order: Vec<i64> = rows.iter().map(|b| b.id).collect();
        assert_eq!(order, vec![2, 1]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_banner() -> impl Strategy<Value = Banner> {
            (
                0i64..1000,
                proptest::option::of(0i64..100),
                0i64..1_000_000,
            )
                .prop_map(|(id, rank, created)| Banner { id, rank, created })
        }

        proptest! {
            /// Property: no unranked row ever precedes a ranked row.
            #[test]
            fn unranked_never_precede_ranked(mut rows in proptest::collection::vec(arb_banner(), 0..50)) {
                sort_by_rank(&mut rows);
                let first_unranked = rows.iter().position(|r| r.rank.is_none());
                if let Some(boundary) = first_unranked {
                    prop_assert!(rows[boundary..].iter().all(|r| r.rank.is_none()));
                }
            }

            /// Property: ranked prefix is non-decreasing in rank.
            #[test]
            fn ranked_prefix_is_sorted(mut rows in proptest::collection::vec(arb_banner(), 0..50)) {
                sort_by_rank(&mut rows);
                let ranked: Vec<i64> = rows.iter().filter_map(|r| r.rank).collect();
                prop_assert!(ranked.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
