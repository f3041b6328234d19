//! Tunables for every widget. `SiteConfig::default()` is the production page.

use crate::host::{ObserverOptions, RootMargin};
use core_types::Millis;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiteConfig {
    pub header: HeaderConfig,
    pub reveal: RevealConfig,
    pub form: FormConfig,
    pub gallery: GalleryConfig,
    pub slider: SliderConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderConfig {
    /// The header turns solid once `scrollY` is strictly greater than this.
    pub solid_after_px: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            solid_after_px: 50.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    pub observer: ObserverOptions,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            observer: ObserverOptions {
                threshold: 0.1,
                root_margin: RootMargin {
                    bottom: -50.0,
                    ..RootMargin::default()
                },
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormConfig {
    pub sending_label: String,
    pub sent_label: String,
    pub success_color: String,
    /// Delay between submit and the "sent" state.
    pub sent_after: Millis,
    /// Delay between the "sent" state and the form reset.
    pub restore_after: Millis,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            sending_label: "Sender...".to_string(),
            sent_label: "Sendt!".to_string(),
            success_color: "#27ae60".to_string(),
            sent_after: Millis(1500),
            restore_after: Millis(2000),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    /// Gap between `display: block` and the fade-in, so layout happens first.
    pub show_delay: Millis,
    /// Length of the fade-out before `display: none`.
    pub hide_delay: Millis,
    pub hidden_scale: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            show_delay: Millis(50),
            hide_delay: Millis(300),
            hidden_scale: "scale(0.9)".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliderConfig {
    pub min_fraction: f64,
    pub max_fraction: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min_fraction: 0.05,
            max_fraction: 0.95,
        }
    }
}
