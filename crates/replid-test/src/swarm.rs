//! Swarm Simulator - many devices minting identifiers independently
//!
//! Every simulated device gets a random hex device id and its own randomly
//! seeded generator, with no coordination between them. All devices read the
//! same manual clock, which advances between rounds. The report counts how
//! many minted identifiers collided.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use replid_core::{DeviceId, IdError, PackedId};
use replid_gen::{GeneratorConfig, IdGenerator};
use replid_time::ManualClock;
use thiserror::Error;

/// Swarm simulation errors
#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("Swarm needs at least one device")]
    NoDevices,

    #[error("Device id length must be at least 4, got {0}")]
    DeviceIdLength(usize),

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Swarm configuration
#[derive(Clone, Debug)]
pub struct SwarmConfig {
    /// Number of devices
    pub devices: usize,
    /// Identifiers minted by each device
    pub ids_per_device: usize,
    /// Hex characters per generated device id
    pub device_id_len: usize,
    /// Unix millis the shared clock starts at
    pub start_millis: u64,
    /// Clock advance after every round
    pub tick: Duration,
    /// Random seed
    pub seed: u64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        SwarmConfig {
            devices: 16,
            ids_per_device: 1000,
            device_id_len: 16,
            start_millis: 1_700_000_000_000,
            tick: Duration::from_millis(10),
            seed: 42,
        }
    }
}

impl SwarmConfig {
    /// Small swarm for quick tests
    pub fn light() -> Self {
        SwarmConfig {
            devices: 4,
            ids_per_device: 100,
            ..Default::default()
        }
    }

    /// Many devices, enough ids to make fingerprint clashes likely
    pub fn crowded() -> Self {
        SwarmConfig {
            devices: 512,
            ids_per_device: 200,
            ..Default::default()
        }
    }
}

/// Simulated device
pub struct SimDevice {
    pub device_id: DeviceId,
    pub generator: IdGenerator<ManualClock>,
    pub minted: Vec<PackedId>,
}

/// Result of a swarm run
#[derive(Clone, Debug, Default)]
pub struct CollisionReport {
    /// Identifiers minted across all devices
    pub minted: usize,
    /// Distinct identifiers
    pub unique: usize,
    /// Identifiers equal to one minted earlier
    pub collisions: usize,
    /// Pairs of devices sharing a 16-bit fingerprint
    pub fingerprint_clashes: usize,
    /// Identifiers minted per device
    pub per_device: HashMap<DeviceId, usize>,
}

impl CollisionReport {
    /// Fraction of minted identifiers that collided
    pub fn collision_rate(&self) -> f64 {
        if self.minted == 0 {
            0.0
        } else {
            self.collisions as f64 / self.minted as f64
        }
    }
}

/// Swarm simulator
pub struct SwarmSimulator {
    config: SwarmConfig,
    clock: ManualClock,
    devices: Vec<SimDevice>,
}

impl SwarmSimulator {
    /// Build the swarm: random device ids and independently seeded counters
    pub fn new(config: SwarmConfig) -> Result<Self, SwarmError> {
        if config.devices == 0 {
            return Err(SwarmError::NoDevices);
        }
        if config.device_id_len < replid_core::MIN_DEVICE_ID_LEN {
            return Err(SwarmError::DeviceIdLength(config.device_id_len));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let clock = ManualClock::new(config.start_millis);

        let mut devices = Vec::with_capacity(config.devices);
        for _ in 0..config.devices {
            let raw = random_hex(&mut rng, config.device_id_len);
            let device_id = DeviceId::parse(&raw)?;
            let generator = IdGenerator::with_clock(
                GeneratorConfig::deterministic(rng.gen()),
                clock.clone(),
            );
            devices.push(SimDevice {
                device_id,
                generator,
                minted: Vec::with_capacity(config.ids_per_device),
            });
        }

        Ok(SwarmSimulator {
            config,
            clock,
            devices,
        })
    }

    /// Mint round-robin across devices, advancing the clock after each round
    pub fn run(&mut self) -> CollisionReport {
        for _ in 0..self.config.ids_per_device {
            for device in &mut self.devices {
                let packed = device.generator.compose_for(&device.device_id);
                device.minted.push(packed);
            }
            self.clock.advance(self.config.tick);
        }
        self.report()
    }

    /// Tally what has been minted so far
    pub fn report(&self) -> CollisionReport {
        let mut seen = HashSet::new();
        let mut report = CollisionReport::default();

        for device in &self.devices {
            for packed in &device.minted {
                report.minted += 1;
                if !seen.insert(*packed) {
                    report.collisions += 1;
                }
            }
            *report.per_device.entry(device.device_id.clone()).or_default() +=
                device.minted.len();
        }
        report.unique = seen.len();

        let mut fingerprints: HashMap<u16, usize> = HashMap::new();
        for device in &self.devices {
            *fingerprints.entry(device.device_id.fingerprint()).or_default() += 1;
        }
        report.fingerprint_clashes = fingerprints.values().map(|&n| n * (n - 1) / 2).sum();

        report
    }

    pub fn devices(&self) -> &[SimDevice] {
        &self.devices
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }
}

fn random_hex(rng: &mut StdRng, len: usize) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    (0..len)
        .map(|_| HEX[rng.gen_range(0..16)] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swarm_light() {
        let mut sim = SwarmSimulator::new(SwarmConfig::light()).unwrap();
        let report = sim.run();

        assert_eq!(report.minted, 400);
        assert_eq!(report.unique + report.collisions, report.minted);
        assert_eq!(report.per_device.len(), 4);
        assert!(report.per_device.values().all(|&n| n == 100));
    }

    #[test]
    fn test_swarm_is_reproducible() {
        let a = SwarmSimulator::new(SwarmConfig::light()).unwrap().run();
        let b = SwarmSimulator::new(SwarmConfig::light()).unwrap().run();
        assert_eq!(a.unique, b.unique);
        assert_eq!(a.collisions, b.collisions);
        assert_eq!(a.per_device, b.per_device);
    }

    #[test]
    fn test_single_device_never_collides() {
        let config = SwarmConfig {
            devices: 1,
            ids_per_device: 60_000,
            ..Default::default()
        };
        let report = SwarmSimulator::new(config).unwrap().run();
        assert_eq!(report.collisions, 0);
        assert_eq!(report.unique, 60_000);
    }

    #[test]
    fn test_same_fingerprint_devices_can_collide() {
        let mut sim = SwarmSimulator::new(SwarmConfig {
            devices: 2,
            ids_per_device: 0,
            ..Default::default()
        })
        .unwrap();

        // Force both devices onto one fingerprint and one counter seed
        let shared = DeviceId::parse("0000beef").unwrap();
        for device in &mut sim.devices {
            device.device_id = shared.clone();
            device.generator = IdGenerator::with_clock(
                GeneratorConfig::deterministic(9),
                sim.clock.clone(),
            );
        }
        sim.config.ids_per_device = 10;

        let report = sim.run();
        assert_eq!(report.minted, 20);
        assert_eq!(report.collisions, 10);
        assert_eq!(report.fingerprint_clashes, 1);
    }

    #[test]
    fn test_clock_advances_per_round() {
        let config = SwarmConfig::light();
        let start = config.start_millis;
        let mut sim = SwarmSimulator::new(config).unwrap();
        sim.run();
        assert_eq!(
            replid_time::Clock::now_millis(sim.clock()),
            start + 100 * 10
        );
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            SwarmSimulator::new(SwarmConfig {
                devices: 0,
                ..Default::default()
            }),
            Err(SwarmError::NoDevices)
        ));
        assert!(matches!(
            SwarmSimulator::new(SwarmConfig {
                device_id_len: 2,
                ..Default::default()
            }),
            Err(SwarmError::DeviceIdLength(2))
        ));
    }

    #[test]
    fn test_collision_rate_empty() {
        assert_eq!(CollisionReport::default().collision_rate(), 0.0);
    }
}
