//! Identifier generator - composes time, device and counter into an id

use replid_core::{
    device_fingerprint, time_field_from_secs, DeviceId, Id, IdBase, IdResult, IntId, PackedId,
};
use replid_time::{Clock, SystemClock};

use crate::{Counter, GeneratorConfig};

/// Identifier generator
///
/// Owns the minting counter and reads time through `C`. Shareable across
/// threads; minting never blocks.
pub struct IdGenerator<C = SystemClock> {
    clock: C,
    counter: Counter,
    config: GeneratorConfig,
}

impl IdGenerator<SystemClock> {
    /// Generator on the OS clock with a random counter seed
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Generator on the OS clock with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for IdGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> IdGenerator<C> {
    /// Generator reading time from `clock`
    pub fn with_clock(config: GeneratorConfig, clock: C) -> Self {
        let counter = match config.counter_seed {
            Some(seed) => Counter::with_seed(seed),
            None => Counter::new(),
        };
        tracing::debug!(
            "Identifier generator ready: seeded={}, default_base={:?}",
            if config.counter_seed.is_some() { "fixed" } else { "random" },
            config.default_base
        );
        IdGenerator {
            clock,
            counter,
            config,
        }
    }

    /// Pack the next identifier for `device`.
    ///
    /// The device id is checked before the counter moves, so a rejected call
    /// leaves no trace.
    pub fn compose(&self, device: &str) -> IdResult<PackedId> {
        let fingerprint = device_fingerprint(device).map_err(|e| {
            tracing::debug!("Rejected device id: {}", e);
            e
        })?;
        Ok(self.pack(fingerprint))
    }

    /// Pack the next identifier for an already validated device
    pub fn compose_for(&self, device: &DeviceId) -> PackedId {
        self.pack(device.fingerprint())
    }

    fn pack(&self, fingerprint: u16) -> PackedId {
        let time = time_field_from_secs(self.clock.now_secs());
        let counter = self.counter.next() as u16;
        let packed = PackedId::from_fields(time, fingerprint, counter);
        tracing::trace!("Minted identifier {:?}", packed);
        packed
    }

    /// Mint a numeric identifier for entity kind `T`
    pub fn new_numeric_id<T>(&self, device: &str) -> IdResult<IntId<T>> {
        self.compose(device).map(IntId::from_packed)
    }

    /// Mint a string identifier for entity kind `T` in `base`
    pub fn new_string_id<T>(&self, device: &str, base: IdBase) -> IdResult<Id<T>> {
        let packed = self.compose(device)?;
        Ok(replid_core::cast_to_id(base.render(packed)))
    }

    /// Mint a string identifier in the configured default base
    pub fn new_id<T>(&self, device: &str) -> IdResult<Id<T>> {
        self.new_string_id(device, self.config.default_base)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }
}
