use crate::DetectedPattern;

/// Free-text classifier seam.
///
/// The shipped implementation is a keyword scanner; anything that maps text
/// to a list of detected patterns can stand in for it.
pub trait PatternDetector: Send + Sync {
    fn detect(&self, text: &str) -> Vec<DetectedPattern>;
}
