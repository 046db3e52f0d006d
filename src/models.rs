use std::time::Duration;

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

pub type Color = palette::rgb::LinSrgb<u8>;

pub trait ServerConfig {
    fn port(&self) -> u16;
}

/// Format a color as a `RRGGBB` hex string without the leading `#`
pub fn clean_hex(color: Color) -> String {
    let (r, g, b) = color.into_components();
    format!("{:02X}{:02X}{:02X}", r, g, b)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorName {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorHex {
    pub value: String,
    pub clean: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRgb {
    pub value: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorHsl {
    pub value: String,
    pub h: u32,
    pub s: u32,
    pub l: u32,
}

impl From<crate::color::Hsl> for ColorHsl {
    fn from(hsl: crate::color::Hsl) -> Self {
        Self {
            value: hsl.value(),
            h: hsl.h,
            s: hsl.s,
            l: hsl.l,
        }
    }
}

/// One fully-described color, mirroring the lookup service's JSON shape
///
/// Channel values are `u8`, so the [0,255] invariant holds by construction;
/// an out-of-range channel in a service response fails deserialization and is
/// reported as a lookup failure by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub name: ColorName,
    pub hex: ColorHex,
    pub rgb: ColorRgb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsl: Option<ColorHsl>,
}

impl ColorSample {
    /// Name given to samples synthesized locally when the lookup service is unreachable
    pub const FALLBACK_NAME: &'static str = "Fallback Color";

    /// Synthesize a sample directly from an RGB triple, without a service lookup
    pub fn from_color(color: Color) -> Self {
        let (r, g, b) = color.into_components();
        let clean = clean_hex(color);

        Self {
            name: ColorName {
                value: Self::FALLBACK_NAME.to_owned(),
            },
            hex: ColorHex {
                value: format!("#{}", clean),
                clean,
            },
            rgb: ColorRgb {
                value: format!("rgb({}, {}, {})", r, g, b),
                r,
                g,
                b,
            },
            hsl: None,
        }
    }

    pub fn color(&self) -> Color {
        Color::new(self.rgb.r, self.rgb.g, self.rgb.b)
    }

    /// Attach the derived HSL representation
    ///
    /// Idempotent: a sample that already carries HSL is returned unchanged, so
    /// both the tick path and manual selection paths may enrich freely.
    pub fn with_hsl(mut self) -> Self {
        if self.hsl.is_none() {
            self.hsl = Some(crate::color::rgb_to_hsl(self.color()).into());
        }

        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Screensaver {
    /// Period of the automatic color advance, in milliseconds
    #[validate(range(min = 250, max = 3_600_000))]
    pub interval_ms: u32,
    /// Bound on the color history length
    #[validate(range(min = 1, max = 100))]
    pub history_limit: usize,
}

impl Default for Screensaver {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            history_limit: 20,
        }
    }
}

impl Screensaver {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as _)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Lookup {
    /// Base URL of the color lookup service
    pub url: String,
    /// Request timeout, in milliseconds. A hung request stalls at most one
    /// scheduled advance before the local fallback takes over.
    #[validate(range(min = 1000, max = 60_000))]
    pub timeout_ms: u32,
}

impl Default for Lookup {
    fn default() -> Self {
        Self {
            url: "https://www.thecolorapi.com".to_owned(),
            timeout_ms: 10_000,
        }
    }
}

impl Lookup {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms as _)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonServer {
    pub enable: bool,
    #[validate(range(min = 1024))]
    pub port: u16,
}

impl Default for JsonServer {
    fn default() -> Self {
        Self {
            enable: true,
            port: 19480,
        }
    }
}

impl ServerConfig for JsonServer {
    fn port(&self) -> u16 {
        self.port
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    #[validate(nested)]
    pub screensaver: Screensaver,
    #[validate(nested)]
    pub lookup: Lookup,
    #[validate(nested)]
    pub json_server: JsonServer,
}

impl Config {
    pub async fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        use tokio::io::AsyncReadExt;

        let mut file = tokio::fs::File::open(path).await?;
        let mut full = String::new();
        file.read_to_string(&mut full).await?;

        let config: Config = toml::from_str(&full)?;
        config.validate()?;

        debug!(
            interval_ms = %config.screensaver.interval_ms,
            history_limit = %config.screensaver.history_limit,
            lookup = %config.lookup.url,
            "loaded",
        );

        Ok(config)
    }

    pub fn to_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_sample_matches_requested_triple() {
        let sample = ColorSample::from_color(Color::new(18, 52, 86));

        assert_eq!(sample.name.value, ColorSample::FALLBACK_NAME);
        assert_eq!(sample.hex.value, "#123456");
        assert_eq!(sample.hex.clean, "123456");
        assert_eq!(sample.rgb.value, "rgb(18, 52, 86)");
        assert_eq!((sample.rgb.r, sample.rgb.g, sample.rgb.b), (18, 52, 86));
        assert!(sample.hsl.is_none());
    }

    #[test]
    fn hsl_enrichment_is_idempotent() {
        let sample = ColorSample::from_color(Color::new(255, 0, 0)).with_hsl();
        let enriched = sample.clone().with_hsl();

        assert_eq!(sample, enriched);

        let hsl = enriched.hsl.expect("enriched sample must carry HSL");
        assert_eq!((hsl.h, hsl.s, hsl.l), (0, 100, 50));
        assert_eq!(hsl.value, "hsl(0, 100%, 50%)");
    }

    #[test]
    fn deserialize_lookup_response() {
        // Trimmed-down response from the lookup service; unknown fields are ignored
        let json_data = r##"
        {
            "name": { "value": "Cerulean", "closest_named_hex": "#02A4D3" },
            "hex": { "value": "#02A4D3", "clean": "02A4D3" },
            "rgb": { "fraction": { "r": 0.007, "g": 0.643, "b": 0.827 }, "r": 2, "g": 164, "b": 211, "value": "rgb(2, 164, 211)" },
            "hsl": { "fraction": { "h": 0.537, "s": 0.981, "l": 0.417 }, "h": 193, "s": 98, "l": 42, "value": "hsl(193, 98%, 42%)" }
        }"##;

        let sample: ColorSample =
            serde_json::from_str(json_data).expect("failed to deserialize sample");

        assert_eq!(sample.name.value, "Cerulean");
        assert_eq!(sample.hex.clean, "02A4D3");
        assert_eq!(sample.rgb.g, 164);
        assert_eq!(sample.hsl.as_ref().map(|hsl| hsl.h), Some(193));

        // Enrichment must not overwrite service-provided HSL
        let enriched = sample.clone().with_hsl();
        assert_eq!(sample, enriched);
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let json_data = r##"
        {
            "name": { "value": "Bogus" },
            "hex": { "value": "#FFFFFF", "clean": "FFFFFF" },
            "rgb": { "r": 300, "g": 0, "b": 0, "value": "rgb(300, 0, 0)" }
        }"##;

        assert!(serde_json::from_str::<ColorSample>(json_data).is_err());
    }

    #[test]
    fn config_toml_roundtrip() {
        let config = Config::default();
        let serialized = config.to_string().expect("failed to serialize config");
        let deserialized: Config = toml::from_str(&serialized).expect("failed to parse config");

        assert_eq!(config, deserialized);
        assert_eq!(deserialized.screensaver.interval_ms, 5000);
        assert_eq!(deserialized.screensaver.history_limit, 20);
    }

    #[test]
    fn config_validation_rejects_short_interval() {
        let config: Config =
            toml::from_str("[screensaver]\nintervalMs = 50\n").expect("failed to parse config");

        assert!(config.validate().is_err());
    }
}
