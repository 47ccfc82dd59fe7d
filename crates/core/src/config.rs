use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be within [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("smoothing factor must be within (0, 1], got {0}")]
    Smoothing(f64),
}

/// Visibility-trigger parameters for one family of elements. Fields left
/// out of an override take the `IntersectionObserver` defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// CSS margin applied to the viewport before intersecting.
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::new(0.0, "0px")
    }
}

impl ObserverOptions {
    pub fn new(threshold: f64, root_margin: &str) -> Self {
        Self {
            threshold,
            root_margin: root_margin.to_owned(),
        }
    }
}

/// Timings of the hero typing loop, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub type_speed_ms: u32,
    pub delete_speed_ms: u32,
    /// Delay between the title and subtitle starting to type.
    pub stagger_ms: u32,
    /// How long the fully typed text and badge stay on screen.
    pub hold_ms: u32,
    pub shake_ms: u32,
    /// Pause before the first iteration and between iterations.
    pub restart_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            type_speed_ms: 100,
            delete_speed_ms: 50,
            stagger_ms: 200,
            hold_ms: 5000,
            shake_ms: 600,
            restart_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub throttle_ms: u32,
    /// Offset past which the header switches to the scrolled shadow.
    pub header_threshold_px: f64,
    /// Allowance subtracted from each section's top for the fixed header.
    pub section_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 16,
            header_threshold_px: 50.0,
            section_offset_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub fade_in: ObserverOptions,
    pub flip: ObserverOptions,
    pub counter: ObserverOptions,
    pub counter_duration_ms: u32,
    pub counter_frame_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            fade_in: ObserverOptions::new(0.1, "0px 0px -50px 0px"),
            flip: ObserverOptions::new(0.2, "0px 0px -30px 0px"),
            counter: ObserverOptions::new(0.5, "0px"),
            counter_duration_ms: 2000,
            counter_frame_ms: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub particle_count: usize,
    pub star_count: usize,
    /// Viewports narrower than this skip every decorative effect.
    pub mobile_breakpoint_px: f64,
    pub smoothing: f64,
    pub spotlight_throttle_ms: u32,
    /// Quiet period after the last resize before the cached viewport size
    /// is refreshed.
    pub resize_debounce_ms: u32,
    /// Devices reporting fewer logical cores hide the heavy layers.
    pub min_cores: u32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            particle_count: 20,
            star_count: 40,
            mobile_breakpoint_px: 768.0,
            smoothing: 0.05,
            spotlight_throttle_ms: 50,
            resize_debounce_ms: 150,
            min_cores: 4,
        }
    }
}

/// Every tunable of the page, defaulted to the shipped values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub typing: TypingConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub background: BackgroundConfig,
    pub contact_ack: ContactAck,
}

/// Acknowledgement shown after the contact form is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactAck(pub String);

impl Default for ContactAck {
    fn default() -> Self {
        Self("Cảm ơn bạn đã liên hệ! Tôi sẽ phản hồi sớm nhất có thể.".to_owned())
    }
}

impl EffectsConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, opts) in [
            ("reveal.fade_in.threshold", &self.reveal.fade_in),
            ("reveal.flip.threshold", &self.reveal.flip),
            ("reveal.counter.threshold", &self.reveal.counter),
        ] {
            if !(0.0..=1.0).contains(&opts.threshold) {
                return Err(ConfigError::FractionOutOfRange {
                    field,
                    value: opts.threshold,
                });
            }
        }

        for (field, value) in [
            ("typing.type_speed_ms", self.typing.type_speed_ms),
            ("typing.delete_speed_ms", self.typing.delete_speed_ms),
            ("reveal.counter_duration_ms", self.reveal.counter_duration_ms),
            ("reveal.counter_frame_ms", self.reveal.counter_frame_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { field });
            }
        }

        let s = self.background.smoothing;
        if !(s > 0.0 && s <= 1.0) {
            return Err(ConfigError::Smoothing(s));
        }
        Ok(())
    }
}
