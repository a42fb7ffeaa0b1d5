//! スクロール位置による追加読み込みの判定

/// デフォルトの閾値（下端からの残り距離）
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 200.0;

/// 残りのスクロール量が閾値を下回ったら読み込みを促す
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    pub threshold: f64,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

impl ScrollTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
        }
    }

    /// まだスクロールできる距離
    pub fn remaining(&self, viewport_height: f64, scroll_y: f64, document_height: f64) -> f64 {
        document_height - (viewport_height + scroll_y)
    }

    /// `request_next()` を呼ぶべきか
    pub fn should_load(&self, viewport_height: f64, scroll_y: f64, document_height: f64) -> bool {
        self.remaining(viewport_height, scroll_y, document_height) <= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(ScrollTrigger::default().threshold, 200.0);
    }

    #[test]
    fn test_should_load_near_bottom() {
        let trigger = ScrollTrigger::default();
        // 900 + 1850 = 2750, 残り 250
        assert!(!trigger.should_load(900.0, 1850.0, 3000.0));
        // 残りちょうど200
        assert!(trigger.should_load(900.0, 1900.0, 3000.0));
        assert!(trigger.should_load(900.0, 2100.0, 3000.0));
    }

    #[test]
    fn test_short_document_loads_immediately() {
        // 画面より短いページはリサイズ時にも読み込み対象
        let trigger = ScrollTrigger::default();
        assert!(trigger.should_load(1080.0, 0.0, 600.0));
    }

    #[test]
    fn test_negative_threshold_is_clamped() {
        let trigger = ScrollTrigger::new(-50.0);
        assert_eq!(trigger.threshold, 0.0);
        assert!(!trigger.should_load(500.0, 0.0, 501.0));
        assert!(trigger.should_load(500.0, 1.0, 501.0));
    }
}
