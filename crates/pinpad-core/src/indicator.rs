//! Pin progress indicators
//!
//! One indicator per position of the target pin length. Only the length of
//! the pin is ever reflected, never its digits.

/// Ordered row of filled/empty indicators
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndicatorStrip {
    filled: Vec<bool>,
}

impl IndicatorStrip {
    /// Create a strip of `count` empty indicators
    pub fn new(count: usize) -> Self {
        Self {
            filled: vec![false; count],
        }
    }

    /// Number of indicators
    pub fn len(&self) -> usize {
        self.filled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }

    /// Whether the indicator at `index` is filled; out of range is empty
    pub fn is_filled(&self, index: usize) -> bool {
        self.filled.get(index).copied().unwrap_or(false)
    }

    /// Number of filled indicators
    pub fn filled_count(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.filled
    }

    /// Replace the strip with `count` empty indicators
    pub fn rebuild(&mut self, count: usize) {
        self.filled.clear();
        self.filled.resize(count, false);
    }

    /// Fill the first `pin_len` indicators and empty the rest.
    ///
    /// A `pin_len` longer than the strip leaves every indicator filled.
    /// Returns the indices whose state changed.
    pub fn sync(&mut self, pin_len: usize) -> Vec<usize> {
        let mut changed = Vec::new();
        for (index, filled) in self.filled.iter_mut().enumerate() {
            let target = index < pin_len;
            if *filled != target {
                *filled = target;
                changed.push(index);
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_fills_prefix() {
        let mut strip = IndicatorStrip::new(4);
        assert_eq!(strip.sync(2), vec![0, 1]);
        assert_eq!(strip.as_slice(), &[true, true, false, false]);

        assert_eq!(strip.sync(1), vec![1]);
        assert_eq!(strip.filled_count(), 1);

        assert!(strip.sync(1).is_empty());
    }

    #[test]
    fn test_sync_tolerates_overlong_pin() {
        let mut strip = IndicatorStrip::new(3);
        strip.sync(10);
        assert_eq!(strip.as_slice(), &[true, true, true]);
        assert!(!strip.is_filled(3));
    }

    #[test]
    fn test_rebuild_empties_strip() {
        let mut strip = IndicatorStrip::new(4);
        strip.sync(4);
        strip.rebuild(6);
        assert_eq!(strip.len(), 6);
        assert_eq!(strip.filled_count(), 0);

        strip.rebuild(0);
        assert!(strip.is_empty());
        assert!(strip.sync(3).is_empty());
    }
}
