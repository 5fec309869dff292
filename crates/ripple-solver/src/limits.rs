use std::time::{Duration, Instant};

/// How often the wall clock is polled, in search nodes.
const CLOCK_POLL_INTERVAL: u64 = 256;

/// Bounds on a backtracking search.
///
/// A search stops once either bound is hit. The node limit is deterministic;
/// the timeout depends on machine speed.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use ripple_solver::SearchLimits;
///
/// let limits = SearchLimits::with_timeout(Duration::from_secs(2)).and_node_limit(100_000);
/// assert_eq!(limits.node_limit, Some(100_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Wall-clock budget for one search.
    pub timeout: Option<Duration>,
    /// Maximum number of search nodes (recursive calls) for one search.
    pub node_limit: Option<u64>,
}

impl SearchLimits {
    /// No bounds at all.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            timeout: None,
            node_limit: None,
        }
    }

    /// A wall-clock bound only.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            node_limit: None,
        }
    }

    /// A node-count bound only.
    #[must_use]
    pub const fn with_node_limit(node_limit: u64) -> Self {
        Self {
            timeout: None,
            node_limit: Some(node_limit),
        }
    }

    /// Adds a node-count bound.
    #[must_use]
    pub const fn and_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    /// Scales the timeout by `factor`, leaving the node limit unchanged.
    #[must_use]
    pub fn scale_timeout(mut self, factor: u32) -> Self {
        self.timeout = self.timeout.map(|timeout| timeout * factor);
        self
    }

    /// Starts the clock for one search.
    #[must_use]
    pub fn start(&self) -> SearchBudget {
        SearchBudget {
            deadline: self.timeout.map(|timeout| Instant::now() + timeout),
            node_limit: self.node_limit,
            nodes: 0,
            exhausted: false,
        }
    }
}

/// The running budget of one search, created by [`SearchLimits::start`].
///
/// Call [`tick`](Self::tick) on every recursive entry. Once it returns
/// `false` it keeps returning `false`.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    deadline: Option<Instant>,
    node_limit: Option<u64>,
    nodes: u64,
    exhausted: bool,
}

impl SearchBudget {
    /// Counts one node. Returns `false` when the budget is exhausted.
    pub fn tick(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        self.nodes += 1;
        if self.node_limit.is_some_and(|limit| self.nodes > limit) {
            self.exhausted = true;
        } else if self.nodes % CLOCK_POLL_INTERVAL == 0
            && self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.exhausted = true;
        }
        !self.exhausted
    }

    /// Number of nodes counted so far.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Returns `true` once a bound has been hit.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_limit() {
        let mut budget = SearchLimits::with_node_limit(3).start();
        assert!(budget.tick());
        assert!(budget.tick());
        assert!(budget.tick());
        assert!(!budget.tick());
        assert!(!budget.tick());
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_unlimited_never_exhausts() {
        let mut budget = SearchLimits::unlimited().start();
        for _ in 0..10_000 {
            assert!(budget.tick());
        }
        assert_eq!(budget.nodes(), 10_000);
    }

    #[test]
    fn test_zero_timeout_exhausts_at_first_poll() {
        let mut budget = SearchLimits::with_timeout(Duration::ZERO).start();
        let ticks = std::iter::from_fn(|| budget.tick().then_some(())).count();
        assert_eq!(ticks as u64, CLOCK_POLL_INTERVAL - 1);
    }

    #[test]
    fn test_scale_timeout() {
        let limits = SearchLimits::with_timeout(Duration::from_millis(10)).scale_timeout(3);
        assert_eq!(limits.timeout, Some(Duration::from_millis(30)));
        assert_eq!(SearchLimits::unlimited().scale_timeout(3).timeout, None);
    }
}
