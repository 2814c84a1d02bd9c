//! Fixed-capacity rolling window of scalar sensor readings.
//!
//! Backing storage is allocated once at construction; each push overwrites
//! the oldest slot, so steady-state ingestion never allocates.

/// Ring buffer of `f64` readings, most-recent-last.
///
/// Invariant: `len() <= capacity` always; once full, a push evicts the
/// oldest reading (FIFO).
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    data: Vec<f64>,
    /// Next slot to write.
    write_index: usize,
    /// Whether the buffer has wrapped at least once.
    filled: bool,
}

impl HistoryWindow {
    /// Create a window holding at most `capacity` readings. `capacity` must
    /// be non-zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history window capacity must be non-zero");
        Self {
            data: vec![0.0; capacity],
            write_index: 0,
            filled: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        if self.filled {
            self.data.len()
        } else {
            self.write_index
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a reading, evicting the oldest if the window is full.
    pub fn push(&mut self, value: f64) {
        self.data[self.write_index] = value;
        self.write_index = (self.write_index + 1) % self.data.len();
        if self.write_index == 0 {
            self.filled = true;
        }
    }

    /// Iterate readings in arrival order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let capacity = self.data.len();
        let (start, count) = if self.filled {
            (self.write_index, capacity)
        } else {
            (0, self.write_index)
        };
        (0..count).map(move |i| self.data[(start + i) % capacity])
    }

    /// True if any stored reading satisfies the predicate.
    pub fn any<F: Fn(f64) -> bool>(&self, pred: F) -> bool {
        self.iter().any(pred)
    }

    pub fn clear(&mut self) {
        self.write_index = 0;
        self.filled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let w = HistoryWindow::new(4);
        assert_eq!(w.len(), 0);
        assert!(w.is_empty());
        assert_eq!(w.capacity(), 4);
        assert_eq!(w.iter().count(), 0);
    }

    #[test]
    fn fills_then_evicts_oldest() {
        let mut w = HistoryWindow::new(3);
        w.push(1.0);
        w.push(2.0);
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![1.0, 2.0]);

        w.push(3.0);
        w.push(4.0); // evicts 1.0
        assert_eq!(w.len(), 3);
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut w = HistoryWindow::new(60);
        for i in 0..500 {
            w.push(i as f64);
        }
        assert_eq!(w.len(), 60);
        // Exactly the most recent 60 values, in arrival order.
        let expected: Vec<f64> = (440..500).map(|i| i as f64).collect();
        assert_eq!(w.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn any_scans_all_retained_readings() {
        let mut w = HistoryWindow::new(3);
        w.push(0.3); // will be evicted
        w.push(1.0);
        w.push(1.0);
        assert!(w.any(|v| v < 0.5));
        w.push(1.0); // 0.3 gone
        assert!(!w.any(|v| v < 0.5));
    }

    #[test]
    fn clear_resets_without_reallocating() {
        let mut w = HistoryWindow::new(2);
        w.push(5.0);
        w.push(6.0);
        w.clear();
        assert!(w.is_empty());
        assert_eq!(w.capacity(), 2);
        w.push(7.0);
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![7.0]);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn zero_capacity_rejected() {
        HistoryWindow::new(0);
    }
}
