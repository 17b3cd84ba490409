//! Rate-limited and progress-logged iteration.
//!
//! Both adapters are plain synchronous iterators: pacing blocks the calling
//! thread, and stopping early is just dropping the iterator.

use std::thread;
use std::time::{Duration, Instant};

/// Yields items no faster than one per `interval`.
///
/// Before each item after the first, sleeps for whatever remains of the
/// interval since the previous item was handed out, so time spent by the
/// caller processing an item counts toward the wait.
pub struct Paced<I> {
    inner: I,
    interval: Duration,
    last: Option<Instant>,
}

impl<I> Paced<I> {
    pub fn new(inner: I, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last: None,
        }
    }
}

impl<I: Iterator> Iterator for Paced<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        let item = self.inner.next()?;
        self.last = Some(Instant::now());
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Logs `[i/total | Elapsed: .. | ETA: ..] label` before yielding each item.
pub struct Tracked<I, F> {
    inner: I,
    total: usize,
    index: usize,
    start: Instant,
    label: F,
}

impl<I, F> Tracked<I, F> {
    pub fn new(inner: I, total: usize, label: F) -> Self {
        Self {
            inner,
            total,
            index: 0,
            start: Instant::now(),
            label,
        }
    }
}

impl<I, F> Iterator for Tracked<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> String,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        let elapsed = self.start.elapsed();
        log::info!(
            "{} {}",
            progress_prefix(self.index, self.total, elapsed),
            (self.label)(&item)
        );
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// `[007/120 | Elapsed: 00:01:02 | ETA: 00:17:11]` for the item at 0-based
/// `index`. The ETA is unknown before the first item completes.
fn progress_prefix(index: usize, total: usize, elapsed: Duration) -> String {
    let width = total.to_string().len();
    let eta = if index == 0 {
        "--:--:--".to_string()
    } else {
        let remaining = total.saturating_sub(index) as f64;
        format_hms(elapsed.mul_f64(remaining / index as f64))
    };
    format!(
        "[{:0width$}/{} | Elapsed: {} | ETA: {}]",
        index + 1,
        total,
        format_hms(elapsed),
        eta
    )
}

/// Format a duration as `HH:MM:SS`, hours unbounded.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Iterator extension for [`Paced`] and [`Tracked`].
pub trait IterPacingExt: Iterator + Sized {
    fn paced(self, interval: Duration) -> Paced<Self> {
        Paced::new(self, interval)
    }

    fn tracked<F>(self, total: usize, label: F) -> Tracked<Self, F>
    where
        F: FnMut(&Self::Item) -> String,
    {
        Tracked::new(self, total, label)
    }
}

impl<I: Iterator> IterPacingExt for I {}

#[cfg(test)]
#[path = "tests/pacing_tests.rs"]
mod tests;
