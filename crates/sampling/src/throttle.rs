//! Per-round bookkeeping: which groups still need shots, and how many.

use crate::accumulator::BitstringAccumulator;
use crate::error::{MeasurementError, MeasurementResult};
use crate::stopping::StoppingCriteria;
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

/// Below this many repetitions per sweep point a throttled job is refused.
pub const MIN_REPETITIONS: usize = 10;

/// Non-fatal adjustments made while planning a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Groups asked for different chunk sizes; the largest one is used.
    DivergentRepetitions { requested: Vec<usize>, chosen: usize },
    /// The batched job would exceed `ceiling` shots; repetitions were cut.
    Throttled { from: usize, to: usize, ceiling: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DivergentRepetitions { requested, chosen } => write!(
                f,
                "stopping criteria requested differing repetitions {:?}; \
                 submitting one sweep with the largest value: {}",
                requested, chosen
            ),
            Notice::Throttled { from, to, ceiling } => write!(
                f,
                "batched job would exceed {} shots; repetitions per sweep point \
                 throttled from {} to {}",
                ceiling, from, to
            ),
        }
    }
}

/// Collapse the distinct requested counts into one: the maximum, with a
/// notice when they disagree. `requested` must not be empty.
pub fn aggregate_n_repetitions(requested: &BTreeSet<usize>) -> (usize, Option<Notice>) {
    debug_assert!(!requested.is_empty(), "no repetitions requested");
    let chosen = requested.iter().next_back().copied().unwrap_or(0);
    if requested.len() <= 1 {
        return (chosen, None);
    }
    let notice = Notice::DivergentRepetitions {
        requested: requested.iter().copied().collect(),
        chosen,
    };
    (chosen, Some(notice))
}

/// Plan for the next round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Todo {
    /// Indices of unfinished groups, in their original order.
    pub still_todo: Vec<usize>,
    /// Repetitions per spec; 0 when nothing is left.
    pub repetitions: usize,
    pub notices: Vec<Notice>,
}

/// Ask `criteria` about every pending accumulator, drop the finished ones
/// and size the next batch under `ceiling` total repetitions.
pub fn check_meas_specs_still_todo<C>(
    todo: &[usize],
    accumulators: &[BitstringAccumulator],
    criteria: &C,
    ceiling: usize,
) -> MeasurementResult<Todo>
where
    C: StoppingCriteria + ?Sized,
{
    let mut still_todo = Vec::with_capacity(todo.len());
    let mut requested = BTreeSet::new();
    for &index in todo {
        let more = criteria.more_repetitions(&accumulators[index]);
        if more < 0 {
            return Err(MeasurementError::NegativeRepetitions(more));
        }
        if more == 0 {
            continue;
        }
        requested.insert(more as usize);
        still_todo.push(index);
    }

    if still_todo.is_empty() {
        return Ok(Todo::default());
    }

    let mut notices = Vec::new();
    let (mut repetitions, notice) = aggregate_n_repetitions(&requested);
    if let Some(notice) = notice {
        warn!("{}", notice);
        notices.push(notice);
    }

    let total = still_todo.len().saturating_mul(repetitions);
    if total > ceiling {
        let from = repetitions;
        repetitions = ceiling / still_todo.len();
        if repetitions < MIN_REPETITIONS {
            return Err(MeasurementError::TooManySweeps {
                groups: still_todo.len(),
                repetitions,
                ceiling,
            });
        }
        let notice = Notice::Throttled {
            from,
            to: repetitions,
            ceiling,
        };
        warn!("{}", notice);
        notices.push(notice);
    }

    Ok(Todo {
        still_todo,
        repetitions,
        notices,
    })
}
