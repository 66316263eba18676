use crate::extra::{normalize_vanity, IstanbulExtraError, Vanity};
use crate::header::{init_extra, ExtensionField};
use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// Proposer-side configuration for building Istanbul extra data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IstanbulExtraConfig {
    /// Vanity bytes written into new headers (zero-padded or truncated to 32 bytes)
    #[serde(default)]
    pub vanity: Bytes,
}

impl IstanbulExtraConfig {
    /// Create a config with the given vanity bytes
    pub fn with_vanity(vanity: impl Into<Bytes>) -> Self {
        Self { vanity: vanity.into() }
    }

    /// Normalized 32-byte vanity prefix
    pub fn vanity_prefix(&self) -> Vanity {
        normalize_vanity(&self.vanity)
    }

    /// Replace the header's extra data with the configured vanity and an
    /// unsealed record for `validators`.
    pub fn prepare_header<H: ExtensionField>(
        &self,
        header: &mut H,
        validators: Vec<Address>,
    ) -> Result<(), IstanbulExtraError> {
        header.set_extension(Bytes::copy_from_slice(&self.vanity_prefix()));
        init_extra(header, validators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::get_extra;
    use alloy_consensus::Header;

    #[test]
    fn test_default_vanity_is_zero() {
        assert_eq!(IstanbulExtraConfig::default().vanity_prefix(), [0u8; 32]);
    }

    #[test]
    fn test_prepare_header_overwrites_existing_extra() {
        let config = IstanbulExtraConfig::with_vanity(b"meowchain".to_vec());
        let mut header = Header { extra_data: Bytes::from(vec![0xff; 120]), ..Default::default() };
        let validators = vec![Address::repeat_byte(1), Address::repeat_byte(2)];

        config.prepare_header(&mut header, validators.clone()).unwrap();

        assert_eq!(&header.extra_data[..9], b"meowchain");
        assert_eq!(&header.extra_data[9..32], &[0u8; 23]);
        let extra = get_extra(&header).unwrap();
        assert_eq!(extra.validators, validators);
        assert!(!extra.is_sealed());
    }

    #[test]
    fn test_long_vanity_truncated() {
        let config = IstanbulExtraConfig::with_vanity(vec![0x42; 40]);
        assert_eq!(config.vanity_prefix(), [0x42; 32]);
    }

    #[test]
    fn test_config_json() {
        let config: IstanbulExtraConfig = serde_json::from_str(r#"{"vanity":"0x6d656f77"}"#).unwrap();
        assert_eq!(config.vanity, Bytes::from_static(b"meow"));
        assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"vanity":"0x6d656f77"}"#);

        let empty: IstanbulExtraConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, IstanbulExtraConfig::default());
    }
}
