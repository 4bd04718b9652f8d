/// Byte progress of a single file upload.
///
/// `percentage` is `round(loaded * 100 / total)` whenever `total > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
    pub percentage: u8,
}

impl UploadProgress {
    /// Nothing transferred yet.
    pub const fn zero() -> Self {
        Self {
            loaded: 0,
            total: 0,
            percentage: 0,
        }
    }

    /// Terminal marker recorded for a successful upload.
    pub const fn complete() -> Self {
        Self {
            loaded: 100,
            total: 100,
            percentage: 100,
        }
    }

    /// Builds a progress value from byte counts.
    ///
    /// With `total == 0` the percentage is 0; use [`ProgressCounter`] to
    /// keep the previous value instead.
    pub fn from_bytes(loaded: u64, total: u64) -> Self {
        Self {
            loaded,
            total,
            percentage: percent_of(loaded, total).unwrap_or(0),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percentage == 100
    }
}

/// Rounded percentage, clamped to 100. `None` when `total` is unknown.
fn percent_of(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    // Integer round-half-up of loaded * 100 / total without overflow.
    let scaled = (loaded as u128) * 200 + total as u128;
    let pct = scaled / (total as u128 * 2);
    Some(pct.min(100) as u8)
}

/// Accumulates transferred bytes for one upload attempt.
///
/// `loaded` only grows, and when the total is unknown the percentage stays
/// at the last computed value.
#[derive(Debug, Clone)]
pub struct ProgressCounter {
    current: UploadProgress,
}

impl ProgressCounter {
    pub fn new(total: u64) -> Self {
        Self {
            current: UploadProgress {
                loaded: 0,
                total,
                percentage: 0,
            },
        }
    }

    /// Records `bytes` more bytes and returns the updated progress.
    pub fn advance(&mut self, bytes: u64) -> UploadProgress {
        let loaded = self.current.loaded.saturating_add(bytes);
        self.observe(loaded, self.current.total)
    }

    /// Records an absolute `(loaded, total)` report.
    ///
    /// A report with fewer bytes than already seen is ignored.
    pub fn observe(&mut self, loaded: u64, total: u64) -> UploadProgress {
        if loaded < self.current.loaded {
            return self.current;
        }
        let percentage = percent_of(loaded, total).unwrap_or(self.current.percentage);
        self.current = UploadProgress {
            loaded,
            total,
            percentage,
        };
        self.current
    }

    pub fn current(&self) -> UploadProgress {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_rounds_half_up() {
        assert_eq!(UploadProgress::from_bytes(1, 3).percentage, 33);
        assert_eq!(UploadProgress::from_bytes(2, 3).percentage, 67);
        assert_eq!(UploadProgress::from_bytes(1, 200).percentage, 1);
        assert_eq!(UploadProgress::from_bytes(1, 201).percentage, 0);
        assert_eq!(UploadProgress::from_bytes(500, 1000).percentage, 50);
    }

    #[test]
    fn from_bytes_clamps_overshoot() {
        let p = UploadProgress::from_bytes(1500, 1000);
        assert_eq!(p.percentage, 100);
    }

    #[test]
    fn from_bytes_unknown_total_is_zero() {
        assert_eq!(UploadProgress::from_bytes(10, 0).percentage, 0);
    }

    #[test]
    fn from_bytes_handles_huge_sizes() {
        let total = u64::MAX;
        assert_eq!(UploadProgress::from_bytes(total, total).percentage, 100);
        assert_eq!(UploadProgress::from_bytes(total / 2, total).percentage, 50);
    }

    #[test]
    fn complete_marker() {
        let p = UploadProgress::complete();
        assert_eq!((p.loaded, p.total, p.percentage), (100, 100, 100));
        assert!(p.is_complete());
        assert!(!UploadProgress::zero().is_complete());
    }

    #[test]
    fn counter_advances() {
        let mut c = ProgressCounter::new(400);
        assert_eq!(c.advance(100).percentage, 25);
        assert_eq!(c.advance(100).percentage, 50);
        let last = c.advance(200);
        assert_eq!(last.loaded, 400);
        assert_eq!(last.percentage, 100);
    }

    #[test]
    fn counter_freezes_percentage_without_total() {
        let mut c = ProgressCounter::new(1000);
        assert_eq!(c.observe(300, 1000).percentage, 30);
        let p = c.observe(600, 0);
        assert_eq!(p.loaded, 600);
        assert_eq!(p.percentage, 30);
        assert_eq!(c.observe(900, 1000).percentage, 90);
    }

    #[test]
    fn counter_ignores_regressions() {
        let mut c = ProgressCounter::new(100);
        c.observe(80, 100);
        let p = c.observe(20, 100);
        assert_eq!(p.loaded, 80);
        assert_eq!(p.percentage, 80);
    }

    #[test]
    fn counter_percentage_never_decreases() {
        let mut c = ProgressCounter::new(1000);
        let mut last = 0;
        for step in [0u64, 7, 130, 1, 400, 0, 462] {
            let p = c.advance(step);
            assert!(p.percentage >= last);
            assert!(p.percentage <= 100);
            last = p.percentage;
        }
        assert_eq!(c.current().loaded, 1000);
    }
}
