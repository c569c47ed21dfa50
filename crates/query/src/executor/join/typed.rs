//! Joins over typed slices instead of row sets.

use super::combinations;
use alloc::vec::Vec;
use tabula_core::Tuple3;

/// Performs a nested loop join using a predicate function.
pub fn nested_loop_join<L, R, O, P, OF>(
    left: &[L],
    right: &[R],
    predicate: P,
    output_fn: OF,
) -> Vec<O>
where
    P: Fn(&L, &R) -> bool,
    OF: Fn(&L, &R) -> O,
{
    let mut results = Vec::new();

    for l in left {
        for r in right {
            if predicate(l, r) {
                results.push(output_fn(l, r));
            }
        }
    }

    results
}

/// Cross join of three slices; `c` varies fastest.
pub fn cross_join3<A, B, C>(a: &[A], b: &[B], c: &[C]) -> Vec<Tuple3<A, B, C>>
where
    A: Clone,
    B: Clone,
    C: Clone,
{
    let mut results = Vec::with_capacity(a.len() * b.len() * c.len());
    for x in a {
        for y in b {
            for z in c {
                results.push(Tuple3::new(x.clone(), y.clone(), z.clone()));
            }
        }
    }
    results
}

/// Chain inner join of three slices.
///
/// `on_ab` links `a` to `b` and `on_bc` links `b` to `c`; `a` and `c` are
/// never compared directly.
pub fn inner_join3<A, B, C, P, Q>(
    a: &[A],
    b: &[B],
    c: &[C],
    on_ab: P,
    on_bc: Q,
) -> Vec<Tuple3<A, B, C>>
where
    A: Clone,
    B: Clone,
    C: Clone,
    P: Fn(&A, &B) -> bool,
    Q: Fn(&B, &C) -> bool,
{
    let mut results = Vec::new();
    for x in a {
        for y in b.iter().filter(|y| on_ab(x, y)) {
            for z in c.iter().filter(|z| on_bc(y, z)) {
                results.push(Tuple3::new(x.clone(), y.clone(), z.clone()));
            }
        }
    }
    results
}

/// Cross join of any number of same-typed slices.
pub fn cross_join_n<T: Clone>(sets: &[&[T]]) -> Vec<Vec<T>> {
    combinations(sets, |_, _, _| true)
        .into_iter()
        .map(|path| path.into_iter().cloned().collect())
        .collect()
}

/// Chain inner join of any number of same-typed slices on equality of
/// adjacent elements.
pub fn chain_join_n<T: Clone + PartialEq>(sets: &[&[T]]) -> Vec<Vec<T>> {
    combinations(sets, |_, prev, next| prev == next)
        .into_iter()
        .map(|path| path.into_iter().cloned().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tabula_core::Keyed;

    fn table(values: &[&'static str]) -> Vec<Keyed<&'static str>> {
        Keyed::wrap_all(values.iter().copied())
    }

    #[test]
    fn test_nested_loop_join_function() {
        let left = vec![(1, "A"), (2, "B"), (3, "C")];
        let right = vec![(1, "X"), (2, "Y"), (4, "Z")];

        let result = nested_loop_join(&left, &right, |l, r| l.0 == r.0, |l, r| (l.1, r.1));

        assert_eq!(result, vec![("A", "X"), ("B", "Y")]);
    }

    #[test]
    fn test_nested_loop_join_range() {
        let left = [10, 20];
        let right = [5, 15, 25];
        // 10 > 5, 20 > 5, 20 > 15 = 3 matches
        let result = nested_loop_join(&left, &right, |l, r| l > r, |l, r| (*l, *r));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_cross_join3() {
        let t1 = table(&["A", "B", "C"]);
        let t2 = table(&["B", "C", "D"]);
        let t3 = table(&["C", "D", "E"]);
        let result = cross_join3(&t1, &t2, &t3);

        assert_eq!(result.len(), 27);
        assert_eq!(result[0], Tuple3::new(Keyed::new("A"), Keyed::new("B"), Keyed::new("C")));
        assert_eq!(result[1].z, Keyed::new("D"));
        assert_eq!(result[3].y, Keyed::new("C"));
    }

    #[test]
    fn test_inner_join3() {
        let t1 = table(&["A", "B", "C"]);
        let t2 = table(&["B", "C", "D"]);
        let t3 = table(&["C", "D", "E"]);
        let result = inner_join3(&t1, &t2, &t3, |a, b| a.e == b.e, |b, c| b.e == c.e);

        assert_eq!(
            result,
            vec![Tuple3::new(Keyed::new("C"), Keyed::new("C"), Keyed::new("C"))]
        );
    }

    #[test]
    fn test_inner_join3_chain_only() {
        // a = b and b = c hold for (1, 1, 1) only; a and c are never compared.
        let a = [1, 2];
        let b = [1, 3];
        let c = [1, 2];
        let result = inner_join3(&a, &b, &c, |x, y| x == y, |y, z| y == z);
        assert_eq!(result, vec![Tuple3::new(1, 1, 1)]);
    }

    #[test]
    fn test_n_way_joins() {
        let s1 = ["A", "B", "C"];
        let s2 = ["B", "C", "D"];
        let s3 = ["C", "D", "E"];
        let sets = [&s1[..], &s2[..], &s3[..]];

        let cross = cross_join_n(&sets);
        assert_eq!(cross.len(), 27);
        assert_eq!(cross[0], vec!["A", "B", "C"]);

        assert_eq!(chain_join_n(&sets), vec![vec!["C", "C", "C"]]);
    }

    #[test]
    fn test_n_way_empty_input() {
        let s1 = [1, 2];
        let s2: [i32; 0] = [];
        assert!(cross_join_n(&[&s1[..], &s2[..]]).is_empty());
        assert!(chain_join_n(&[&s1[..], &s2[..]]).is_empty());
    }
}
