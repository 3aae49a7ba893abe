//! Generator configuration

use replid_core::IdBase;

/// Identifier generator configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Fixed counter seed. `None` draws one at random.
    pub counter_seed: Option<u32>,
    /// Base used by `new_id`
    pub default_base: IdBase,
}

impl GeneratorConfig {
    /// Reproducible configuration for tests and simulation
    pub fn deterministic(seed: u32) -> Self {
        GeneratorConfig {
            counter_seed: Some(seed),
            ..Default::default()
        }
    }

    /// Mint decimal strings by default
    pub fn decimal() -> Self {
        GeneratorConfig {
            default_base: IdBase::Decimal,
            ..Default::default()
        }
    }

    pub fn with_default_base(mut self, base: IdBase) -> Self {
        self.default_base = base;
        self
    }
}
