//! Sliding-window minimum and maximum.
//!
//! Both the trailing window of the position metric and the forward window of
//! the drawdown are fixed-width windows sliding one step at a time. Each is
//! served by a pair of monotonic deques holding indices, so a full pass costs
//! O(n) regardless of the window width.

use std::collections::VecDeque;

/// Minimum and maximum of one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    /// Smallest value in the window.
    pub min: f64,
    /// Largest value in the window.
    pub max: f64,
}

impl Extrema {
    /// Returns true if every value in the window is the same.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.max <= self.min
    }
}

/// Iterator over the extrema of every `width`-long window of `values`.
///
/// The k-th item covers `values[k..k + width]`. A zero width, or a width
/// longer than the input, yields nothing.
#[derive(Debug, Clone)]
pub struct SlidingExtrema<'a> {
    values: &'a [f64],
    width: usize,
    end: usize,
    pushed: usize,
    min_q: VecDeque<usize>,
    max_q: VecDeque<usize>,
}

impl<'a> SlidingExtrema<'a> {
    /// Creates the iterator.
    #[must_use]
    pub fn new(values: &'a [f64], width: usize) -> Self {
        let capacity = width.min(values.len());
        Self {
            values,
            width,
            end: width,
            pushed: 0,
            min_q: VecDeque::with_capacity(capacity),
            max_q: VecDeque::with_capacity(capacity),
        }
    }

    fn push(&mut self, index: usize) {
        let value = self.values[index];
        while self.max_q.back().is_some_and(|&j| self.values[j] <= value) {
            self.max_q.pop_back();
        }
        self.max_q.push_back(index);

        while self.min_q.back().is_some_and(|&j| self.values[j] >= value) {
            self.min_q.pop_back();
        }
        self.min_q.push_back(index);
    }
}

impl Iterator for SlidingExtrema<'_> {
    type Item = Extrema;

    fn next(&mut self) -> Option<Extrema> {
        if self.width == 0 || self.end > self.values.len() {
            return None;
        }

        while self.pushed < self.end {
            self.push(self.pushed);
            self.pushed += 1;
        }

        let start = self.end - self.width;
        while self.max_q.front().is_some_and(|&j| j < start) {
            self.max_q.pop_front();
        }
        while self.min_q.front().is_some_and(|&j| j < start) {
            self.min_q.pop_front();
        }

        let extrema = Extrema {
            min: self.values[*self.min_q.front()?],
            max: self.values[*self.max_q.front()?],
        };
        self.end += 1;
        Some(extrema)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.width == 0 {
            0
        } else {
            (self.values.len() + 1).saturating_sub(self.end)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlidingExtrema<'_> {}

/// Extrema of a single slice by direct scan.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn scan_extrema(values: &[f64]) -> Option<Extrema> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold(
        Extrema {
            min: *first,
            max: *first,
        },
        |acc, &v| Extrema {
            min: acc.min.min(v),
            max: acc.max.max(v),
        },
    ))
}
