use serde::{Deserialize, Serialize};

use crate::bit::ProtectedInt;
use crate::errors::ConfigError;
use crate::padding::Padding;
use crate::transcoder::{Transcoder, TranscoderBuilder};

/// Declarative transcoder settings, loadable from any serde format.
///
/// ```
/// use flagpack::{Padding, Transcoder, TranscoderConfig};
///
/// let config: TranscoderConfig = serde_json::from_str(
///     r#"{ "fields": ["search", "export"], "padding": "unknown", "max_value": 2147483647 }"#,
/// )?;
/// assert_eq!(config.padding, Padding::Unknown);
///
/// let transcoder: Transcoder<i64> = config.build()?;
/// assert_eq!(transcoder.max_fields(), 30);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscoderConfig {
    pub fields: Vec<String>,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<u128>,
}

impl TranscoderConfig {
    pub fn builder<T: ProtectedInt>(&self) -> TranscoderBuilder<T> {
        let builder = TranscoderBuilder::new(self.fields.iter().cloned()).padding(self.padding);
        match self.max_value {
            Some(max_value) => builder.max_value(max_value),
            None => builder,
        }
    }

    pub fn build<T: ProtectedInt>(&self) -> Result<Transcoder<T>, ConfigError> {
        self.builder().build()
    }
}
