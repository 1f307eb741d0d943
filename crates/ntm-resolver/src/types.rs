use ntm_release::ReleaseAsset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ExactArchive,
    ExactBinary,
    PrefixMatch,
    FuzzySameOs,
    LegacyDash,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactArchive => "exact_archive",
            Self::ExactBinary => "exact_binary",
            Self::PrefixMatch => "prefix_match",
            Self::FuzzySameOs => "fuzzy_same_os",
            Self::LegacyDash => "legacy_dash",
        }
    }

    /// Fixed per strategy; exposed for telemetry.
    pub fn confidence(self) -> f64 {
        match self {
            Self::ExactArchive => 1.0,
            Self::ExactBinary => 0.9,
            Self::PrefixMatch => 0.7,
            Self::FuzzySameOs => 0.5,
            Self::LegacyDash => 0.3,
        }
    }

    /// Admitted in strict mode, which forbids every fallback.
    pub fn is_exact(self) -> bool {
        matches!(self, Self::ExactArchive | Self::ExactBinary)
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub asset: &'a ReleaseAsset,
    pub strategy: Strategy,
    pub confidence: f64,
    pub reason: String,
}

impl<'a> MatchResult<'a> {
    pub(crate) fn new(asset: &'a ReleaseAsset, strategy: Strategy, reason: String) -> Self {
        Self {
            asset,
            strategy,
            confidence: strategy.confidence(),
            reason,
        }
    }
}
