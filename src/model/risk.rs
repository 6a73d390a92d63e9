#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskTier {
    // Generation-index thresholds from the clinical timeline: the initial
    // state is healthy, early invasion is moderate, and anything past
    // generation 30 is treated as systemic.
    pub fn from_generation(generation: usize) -> Self {
        if generation == 0 {
            RiskTier::Low
        } else if generation <= 10 {
            RiskTier::Moderate
        } else if generation <= 30 {
            RiskTier::High
        } else {
            RiskTier::Critical
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::Critical => "Critical",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            RiskTier::Low => "Healthy tissue",
            RiskTier::Moderate => "Early infection",
            RiskTier::High => "Spreading",
            RiskTier::Critical => "Total invasion",
        }
    }
}
