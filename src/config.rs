//! Settings for [`RsaHelper`](crate::RsaHelper).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Key sizes and file permissions used by the key store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HelperConfig {
    /// Modulus size in bits used by [`RsaHelper::generate_key`](crate::RsaHelper::generate_key)
    /// and when a key has to be generated on demand.
    pub default_bits: usize,

    /// Smallest modulus size accepted by
    /// [`RsaHelper::generate_key_pair`](crate::RsaHelper::generate_key_pair).
    pub min_bits: usize,

    /// Unix permission bits for files written by
    /// [`RsaHelper::persist_key_pair`](crate::RsaHelper::persist_key_pair).
    /// Ignored on other platforms.
    pub file_mode: u32,
}

impl HelperConfig {
    /// Default modulus size.
    pub const DEFAULT_BITS: usize = 2048;

    /// Default lower bound. Large enough for a SHA-256 PKCS#1 v1.5 signature.
    pub const MIN_BITS: usize = 512;

    /// Default file mode.
    pub const FILE_MODE: u32 = 0o755;

    /// Set the modulus size used for on-demand generation.
    pub fn with_default_bits(mut self, bits: usize) -> Self {
        self.default_bits = bits;
        self
    }

    /// Set the smallest accepted modulus size.
    pub fn with_min_bits(mut self, bits: usize) -> Self {
        self.min_bits = bits;
        self
    }

    /// Set the permission bits of persisted key files.
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            default_bits: Self::DEFAULT_BITS,
            min_bits: Self::MIN_BITS,
            file_mode: Self::FILE_MODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HelperConfig::default();
        assert_eq!(config.default_bits, 2048);
        assert_eq!(config.min_bits, 512);
        assert_eq!(config.file_mode, 0o755);
    }

    #[test]
    fn test_builder() {
        let config = HelperConfig::default()
            .with_default_bits(1024)
            .with_min_bits(768)
            .with_file_mode(0o600);
        assert_eq!(
            config,
            HelperConfig {
                default_bits: 1024,
                min_bits: 768,
                file_mode: 0o600,
            }
        );
    }
}
