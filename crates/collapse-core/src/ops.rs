//! Ready-made contracts for the common collapse shapes.

use crate::contract::{adjacency, Adjacency};

/// Keeps the first element of every run where `same` holds between neighbours.
pub fn distinct_runs<T, P>(same: P) -> impl Adjacency<T, Acc = T>
where
    T: Clone,
    P: Fn(&T, &T) -> bool,
{
    adjacency(
        same,
        |first: &T| first.clone(),
        |acc: T, _next: &T| acc,
        |left: T, _right: T| left,
    )
}

/// Collapses runs of equal elements to their first element.
pub fn dedup<T>() -> impl Adjacency<T, Acc = T>
where
    T: PartialEq + Clone,
{
    distinct_runs(|a: &T, b: &T| a == b)
}

/// Materializes each run as a vector.
pub fn group_runs<T, P>(adjacent: P) -> impl Adjacency<T, Acc = Vec<T>>
where
    T: Clone,
    P: Fn(&T, &T) -> bool,
{
    adjacency(
        adjacent,
        |first: &T| vec![first.clone()],
        |mut run: Vec<T>, next: &T| {
            run.push(next.clone());
            run
        },
        |mut left: Vec<T>, right: Vec<T>| {
            left.extend(right);
            left
        },
    )
}

/// Pairs the first element of each run of equal elements with the run length.
pub fn run_lengths<T>() -> impl Adjacency<T, Acc = (T, usize)>
where
    T: PartialEq + Clone,
{
    adjacency(
        |a: &T, b: &T| a == b,
        |first: &T| (first.clone(), 1),
        |(value, len): (T, usize), _next: &T| (value, len + 1),
        |(value, left): (T, usize), (_, right): (T, usize)| (value, left + right),
    )
}

/// Reduces each run to its `(first, last)` elements.
///
/// With `|a, b| b - a == 1` over sorted integers this yields the maximal
/// intervals of consecutive values.
pub fn intervals<T, P>(adjacent: P) -> impl Adjacency<T, Acc = (T, T)>
where
    T: Clone,
    P: Fn(&T, &T) -> bool,
{
    adjacency(
        adjacent,
        |first: &T| (first.clone(), first.clone()),
        |(first, _): (T, T), next: &T| (first, next.clone()),
        |(first, _): (T, T), (_, last): (T, T)| (first, last),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collapse::CollapseExt;
    use crate::cursor::VecCursor;

    #[test]
    fn group_runs_groups_consecutive_equal_keys() {
        let items = vec![1, 1, 2, 2, 2, 1, 3, 3];
        let groups: Vec<Vec<i32>> = VecCursor::new(items)
            .collapse(group_runs(|a: &i32, b: &i32| a == b))
            .collect();

        assert_eq!(groups, vec![vec![1, 1], vec![2, 2, 2], vec![1], vec![3, 3]]);
    }

    #[test]
    fn group_runs_with_strings() {
        let items = vec!["aa", "ab", "ba", "bb"];
        let groups: Vec<Vec<&str>> = VecCursor::new(items)
            .collapse(group_runs(|a: &&str, b: &&str| a.chars().next() == b.chars().next()))
            .collect();

        assert_eq!(groups, vec![vec!["aa", "ab"], vec!["ba", "bb"]]);
    }

    #[test]
    fn run_lengths_count_each_run() {
        let lengths: Vec<(char, usize)> = VecCursor::new("aaabccdddd".chars().collect())
            .collapse(run_lengths())
            .collect();

        assert_eq!(lengths, vec![('a', 3), ('b', 1), ('c', 2), ('d', 4)]);
    }

    #[test]
    fn intervals_of_consecutive_integers() {
        let input = vec![1, 2, 5, 6, 7, 8, 10, 11, 15];
        let spans: Vec<(i32, i32)> = VecCursor::new(input)
            .collapse(intervals(|a: &i32, b: &i32| b - a == 1))
            .collect();

        assert_eq!(spans, vec![(1, 2), (5, 8), (10, 11), (15, 15)]);
    }

    #[test]
    fn distinct_runs_uses_pairwise_predicate_only() {
        // |b - a| <= 1 is not transitive: 1,2,3 still forms one run because
        // only neighbours are compared.
        let firsts: Vec<i32> = VecCursor::new(vec![1, 2, 3, 7, 8, 3])
            .collapse(distinct_runs(|a: &i32, b: &i32| (b - a).abs() <= 1))
            .collect();

        assert_eq!(firsts, vec![1, 7, 3]);
    }
}
