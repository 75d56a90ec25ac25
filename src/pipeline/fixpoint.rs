//! Bounded fixed-point iteration for repeated rewrites.
//!
//! Some rewrites only reach their goal when re-applied to their own output
//! (`sqrt(sqrt(16))` needs two passes). Instead of `while pattern matches`
//! loops, every such rewrite goes through [`fixed_point`], which takes an
//! explicit pass budget and returns the last state when the budget runs out.

use std::borrow::Cow;
use tracing::warn;

/// Result of a bounded fixed-point run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPoint {
    /// Converged value, or the last state if the bound was hit.
    pub value: String,
    /// Number of passes that changed the text.
    pub passes: usize,
    /// `true` when the final state is stable under `rewrite`.
    pub converged: bool,
}

/// Apply `rewrite` until it stops changing the text or `max_passes` is spent.
///
/// `rewrite` signals "no change" by returning [`Cow::Borrowed`], which is what
/// [`regex::Regex::replace_all`] does when nothing matched; an owned result
/// equal to its input counts as no change too.
pub fn fixed_point<F>(input: &str, max_passes: usize, mut rewrite: F) -> FixedPoint
where
    F: FnMut(&str) -> Cow<'_, str>,
{
    let mut current = input.to_string();
    let mut passes = 0;

    loop {
        let next = match rewrite(&current) {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => Some(s),
        };
        let next = match next {
            Some(s) if s != current => s,
            _ => {
                return FixedPoint {
                    value: current,
                    passes,
                    converged: true,
                }
            }
        };

        if passes == max_passes {
            warn!(
                max_passes,
                len = current.len(),
                "rewrite did not converge within its pass bound; keeping last state"
            );
            return FixedPoint {
                value: current,
                passes,
                converged: false,
            };
        }

        current = next;
        passes += 1;
    }
}
