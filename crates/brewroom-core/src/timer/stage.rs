use serde::{Deserialize, Serialize};

/// The four visual phases of a session, one per elapsed-time quartile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrewStage {
    Grinding,
    Tampering,
    Brewing,
    Filtering,
}

impl BrewStage {
    pub const ALL: [BrewStage; 4] = [
        BrewStage::Grinding,
        BrewStage::Tampering,
        BrewStage::Brewing,
        BrewStage::Filtering,
    ];

    /// Derive the stage from a duration and the seconds still remaining.
    ///
    /// With `span = duration / 4`, the stage is the first quartile boundary
    /// that `elapsed` has not yet crossed. For durations under four seconds
    /// the span is zero and every non-negative elapsed value lands in
    /// `Filtering`.
    pub fn for_elapsed(duration_secs: u64, remaining_secs: u64) -> Self {
        let span = duration_secs / 4;
        let elapsed = duration_secs.saturating_sub(remaining_secs);
        if elapsed < span {
            BrewStage::Grinding
        } else if elapsed < span * 2 {
            BrewStage::Tampering
        } else if elapsed < span * 3 {
            BrewStage::Brewing
        } else {
            BrewStage::Filtering
        }
    }

    /// Elapsed second at which this stage begins for a given duration.
    pub fn starts_at(self, duration_secs: u64) -> u64 {
        let span = duration_secs / 4;
        span * self.index() as u64
    }

    pub fn index(self) -> usize {
        match self {
            BrewStage::Grinding => 0,
            BrewStage::Tampering => 1,
            BrewStage::Brewing => 2,
            BrewStage::Filtering => 3,
        }
    }

    /// Animation asset rendered while this stage is active.
    pub fn animation_name(self) -> &'static str {
        match self {
            BrewStage::Grinding => "coffee-grinder",
            BrewStage::Tampering => "coffee-tampering",
            BrewStage::Brewing => "coffee-brewing",
            BrewStage::Filtering => "coffee-filtering",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BrewStage::Grinding => "Grinding",
            BrewStage::Tampering => "Tampering",
            BrewStage::Brewing => "Brewing",
            BrewStage::Filtering => "Filtering",
        }
    }
}

impl std::fmt::Display for BrewStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
