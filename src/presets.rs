use strum_macros::{Display, EnumIter, EnumString};

/// Stock instance sizes used by the benchmark command.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum ScenarioPreset {
    Small,
    Medium,
    Large,
}

impl ScenarioPreset {
    /// (devices, sites, facility types)
    pub fn dimensions(&self) -> (usize, usize, usize) {
        match self {
            Self::Small => (50, 10, 2),
            Self::Medium => (100, 20, 3),
            Self::Large => (200, 30, 3),
        }
    }
}
