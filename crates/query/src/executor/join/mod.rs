//! JOIN implementations.
//!
//! Every join here walks its inputs depth-first, left to right, so output
//! order is that of the full cross product (rightmost input varying fastest)
//! restricted to the combinations that match.

mod chain;
mod cross;
mod typed;

pub use chain::{ChainJoin, JoinKey};
pub use cross::CrossJoin;
pub use typed::{chain_join_n, cross_join3, cross_join_n, inner_join3, nested_loop_join};

use alloc::vec::Vec;

/// Enumerates every path through `inputs` that picks one element per input.
///
/// `matches(level, prev, next)` decides whether `next` (from input
/// `level + 1`) may follow `prev` (from input `level`); branches that fail
/// are pruned before descending.
pub(crate) fn combinations<'a, T, F>(inputs: &[&'a [T]], matches: F) -> Vec<Vec<&'a T>>
where
    F: Fn(usize, &T, &T) -> bool,
{
    let mut out = Vec::new();
    if inputs.is_empty() {
        return out;
    }
    let mut path = Vec::with_capacity(inputs.len());
    descend(inputs, &matches, &mut path, &mut out);
    out
}

fn descend<'a, T, F>(
    inputs: &[&'a [T]],
    matches: &F,
    path: &mut Vec<&'a T>,
    out: &mut Vec<Vec<&'a T>>,
) where
    F: Fn(usize, &T, &T) -> bool,
{
    let level = path.len();
    if level == inputs.len() {
        out.push(path.clone());
        return;
    }
    for item in inputs[level] {
        if let Some(&prev) = path.last() {
            if !matches(level - 1, prev, item) {
                continue;
            }
        }
        path.push(item);
        descend(inputs, matches, path, out);
        path.pop();
    }
}
