//! Runtime settings of the effect.
//!
//! Defaults reproduce the stock page. A page can override the timing knobs
//! through `data-*` attributes on the canvas element, e.g.
//! `<canvas id="water-canvas" data-resume="restart" data-debounce-ms="300">`.

use std::str::FromStr;

use crate::error::WaterError;

/// What the animation clock does when the page becomes visible again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumePolicy {
    /// Carry the elapsed time across the pause so the waves pick up where they stopped.
    #[default]
    Continue,
    /// Restart the clock at zero; the wave phase snaps on resume.
    Restart,
}

impl FromStr for ResumePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(ResumePolicy::Continue),
            "restart" => Ok(ResumePolicy::Restart),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectConfig {
    /// Element id of the drawing surface.
    pub canvas_id: String,
    /// Element id of the photograph used as texture and as fallback.
    pub image_id: String,
    pub resize_debounce_ms: u32,
    /// Upper bound applied to `window.devicePixelRatio`.
    pub max_pixel_ratio: f64,
    pub resume: ResumePolicy,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            canvas_id: "water-canvas".to_owned(),
            image_id: "hero-img".to_owned(),
            resize_debounce_ms: 200,
            max_pixel_ratio: 2.0,
            resume: ResumePolicy::Continue,
        }
    }
}

impl EffectConfig {
    pub const DEBOUNCE_KEY: &'static str = "debounce-ms";
    pub const PIXEL_RATIO_KEY: &'static str = "max-pixel-ratio";
    pub const RESUME_KEY: &'static str = "resume";

    /// Applies overrides looked up by data-attribute key (without the `data-` prefix).
    ///
    /// Missing keys keep their current value. The first malformed value aborts
    /// with [`WaterError::Config`] and leaves `self` untouched.
    pub fn with_overrides<F>(&self, lookup: F) -> Result<Self, WaterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut next = self.clone();

        if let Some(value) = lookup(Self::DEBOUNCE_KEY) {
            next.resize_debounce_ms = value.trim().parse().map_err(|_| WaterError::Config {
                key: Self::DEBOUNCE_KEY,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(Self::PIXEL_RATIO_KEY) {
            next.max_pixel_ratio = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|ratio| ratio.is_finite() && *ratio >= 1.0)
                .ok_or_else(|| WaterError::Config {
                    key: Self::PIXEL_RATIO_KEY,
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(Self::RESUME_KEY) {
            next.resume = value.parse().map_err(|_| WaterError::Config {
                key: Self::RESUME_KEY,
                value: value.clone(),
            })?;
        }

        Ok(next)
    }
}
