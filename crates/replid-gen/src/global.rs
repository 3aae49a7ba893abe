//! Process-wide default generator
//!
//! Convenience entry points for callers that do not thread an
//! [`IdGenerator`] through their code. The generator is created on first use
//! with a random counter seed and the OS clock.

use std::sync::OnceLock;

use replid_core::{Id, IdBase, IdResult, IntId};

use crate::IdGenerator;

static DEFAULT_GENERATOR: OnceLock<IdGenerator> = OnceLock::new();

/// The shared generator, created on first call
pub fn default_generator() -> &'static IdGenerator {
    DEFAULT_GENERATOR.get_or_init(IdGenerator::new)
}

/// Mint a numeric identifier from the default generator
pub fn new_numeric_id<T>(device: &str) -> IdResult<IntId<T>> {
    default_generator().new_numeric_id(device)
}

/// Mint a string identifier from the default generator
pub fn new_string_id<T>(device: &str, base: IdBase) -> IdResult<Id<T>> {
    default_generator().new_string_id(device, base)
}

/// Mint a hex identifier from the default generator
pub fn new_id<T>(device: &str) -> IdResult<Id<T>> {
    default_generator().new_id(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use replid_core::IdError;

    struct Doc;

    #[test]
    fn test_default_generator_is_shared() {
        assert!(std::ptr::eq(default_generator(), default_generator()));
    }

    #[test]
    fn test_free_functions_mint() {
        let hex = new_id::<Doc>("00aa11bb").unwrap();
        assert_eq!(hex.as_str().len(), 10);
        assert_eq!(&hex.as_str()[2..6], "11bb");

        let numeric = new_numeric_id::<Doc>("00aa11bb").unwrap();
        assert_eq!(numeric.packed().device_field(), 0x11bb);

        let decimal = new_string_id::<Doc>("00aa11bb", IdBase::Decimal).unwrap();
        assert!(decimal.as_str().parse::<u64>().is_ok());
    }

    #[test]
    fn test_free_functions_validate() {
        assert!(matches!(new_id::<Doc>("nope"), Err(IdError::InvalidDeviceId(_))));
        assert_eq!(
            new_numeric_id::<Doc>("abc").unwrap_err(),
            IdError::DeviceIdTooShort { len: 3 }
        );
    }
}
