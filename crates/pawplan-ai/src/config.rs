//! Engine configuration snapshot.

/// Immutable per-engine flags, captured once at construction.
///
/// `feature_enabled` is a hard kill switch: when false the engine returns
/// placeholder results without running anything. `prefer_advanced` and
/// `advanced_available` together gate the single advanced-backend attempt
/// per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Master switch for the whole assistant
    pub feature_enabled: bool,
    /// Try the advanced backend before the heuristics
    pub prefer_advanced: bool,
    /// Whether an advanced backend is known to be reachable
    pub advanced_available: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feature_enabled: true,
            prefer_advanced: false,
            advanced_available: false,
        }
    }
}

impl EngineConfig {
    /// Default flags: enabled, heuristics only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags for a caller that wants the advanced path when possible.
    pub fn with_advanced(available: bool) -> Self {
        Self {
            feature_enabled: true,
            prefer_advanced: true,
            advanced_available: available,
        }
    }
}
