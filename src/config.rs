use serde::Deserialize;

use crate::{Error, Result};

/// Class names, attributes and selectors the server-rendered markup uses to
/// opt elements into each widget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markup {
    pub rating_container: String,
    pub rating_star: String,
    pub rating_value_attr: String,
    pub rating_current_attr: String,
    pub rating_input: String,
    pub rating_active_class: String,
    pub carousel_container: String,
    pub carousel_slide: String,
    pub carousel_prev: String,
    pub carousel_next: String,
    pub carousel_active_class: String,
    pub confirm_attr: String,
    pub flash_notice: String,
    pub search_input: String,
    pub lazy_source_attr: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            rating_container: ".star-rating".into(),
            rating_star: "[data-value]".into(),
            rating_value_attr: "data-value".into(),
            rating_current_attr: "data-rating".into(),
            rating_input: "input[name=\"rating\"]".into(),
            rating_active_class: "is-active".into(),
            carousel_container: ".carousel".into(),
            carousel_slide: ".carousel-item".into(),
            carousel_prev: ".carousel-prev".into(),
            carousel_next: ".carousel-next".into(),
            carousel_active_class: "active".into(),
            confirm_attr: "data-confirm".into(),
            flash_notice: ".alert".into(),
            search_input: ".nav-search input[name=\"q\"]".into(),
            lazy_source_attr: "data-src".into(),
        }
    }
}

impl Markup {
    pub(crate) fn confirm_selector(&self) -> String {
        format!("[{}]", self.confirm_attr)
    }

    pub(crate) fn lazy_image_selector(&self) -> String {
        format!("img[{}]", self.lazy_source_attr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub flash_delay_ms: i64,
    pub flash_fade_ms: i64,
    pub search_debounce_ms: i64,
    pub search_min_chars: usize,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            flash_delay_ms: 5_000,
            flash_fade_ms: 500,
            search_debounce_ms: 300,
            search_min_chars: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub markup: Markup,
    pub timing: Timing,
    pub timer_step_limit: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            markup: Markup::default(),
            timing: Timing::default(),
            timer_step_limit: 10_000,
        }
    }
}

impl PageConfig {
    /// Parses a JSON document; omitted fields keep their defaults.
    pub fn from_json_str(src: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(src).map_err(|err| Error::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timer_step_limit == 0 {
            return Err(Error::Config(
                "timer_step_limit requires at least 1 step".into(),
            ));
        }
        let timing = &self.timing;
        for (name, value) in [
            ("flash_delay_ms", timing.flash_delay_ms),
            ("flash_fade_ms", timing.flash_fade_ms),
            ("search_debounce_ms", timing.search_debounce_ms),
        ] {
            if value < 0 {
                return Err(Error::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
