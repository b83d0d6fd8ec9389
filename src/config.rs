//! Takeoff configuration

use crate::error::Result;
use crate::io::dxf::code_page::DEFAULT_FALLBACK_ENCODING;
use crate::quantity::EstimationPolicy;
use encoding_rs::Encoding;

/// Configuration for a takeoff run.
#[derive(Debug, Clone)]
pub struct TakeoffConfiguration {
    /// Constants for quantities the drawing leaves implicit
    pub policy: EstimationPolicy,

    /// Legacy encoding for non-UTF-8 lines until the drawing declares
    /// `$DWGCODEPAGE`.
    ///
    /// Default: Windows-1252.
    pub fallback_encoding: &'static Encoding,

    /// When `true`, callouts are grouped under the most recent element label.
    ///
    /// Default: `true`.
    pub attribute_elements: bool,
}

impl Default for TakeoffConfiguration {
    fn default() -> Self {
        Self {
            policy: EstimationPolicy::default(),
            fallback_encoding: DEFAULT_FALLBACK_ENCODING,
            attribute_elements: true,
        }
    }
}

impl TakeoffConfiguration {
    /// Set the estimation policy
    pub fn with_policy(mut self, policy: EstimationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the legacy fallback encoding
    pub fn with_fallback_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.fallback_encoding = encoding;
        self
    }

    /// Enable or disable the per-element breakdown
    pub fn with_element_attribution(mut self, enabled: bool) -> Self {
        self.attribute_elements = enabled;
        self
    }

    /// Check the configuration before any input is read
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TakeoffConfiguration::default();
        assert_eq!(config.policy, EstimationPolicy::default());
        assert_eq!(config.fallback_encoding, encoding_rs::WINDOWS_1252);
        assert!(config.attribute_elements);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = TakeoffConfiguration::default()
            .with_fallback_encoding(encoding_rs::WINDOWS_1254)
            .with_element_attribution(false)
            .with_policy(EstimationPolicy {
                stock_bar_length_m: -1.0,
                ..EstimationPolicy::default()
            });
        assert_eq!(config.fallback_encoding, encoding_rs::WINDOWS_1254);
        assert!(!config.attribute_elements);
        assert!(config.validate().is_err());
    }
}
