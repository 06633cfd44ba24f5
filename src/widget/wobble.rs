//! Hero title whose letters wobble in a staggered loop.

use crate::tracker::ActiveGate;
use crate::utils::html::{escape, seconds};
use serde::{Deserialize, Serialize};

/// Timing for the wobble loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WobbleConfig {
    /// Seconds per loop.
    pub duration: f64,
    /// Per-letter delay offset in seconds.
    pub delay_step: f64,
}

impl Default for WobbleConfig {
    fn default() -> Self {
        Self {
            duration: 3.6,
            delay_step: 0.08,
        }
    }
}

/// Letter-by-letter title. Animates only while its section is active.
#[derive(Debug, Clone)]
pub struct WobblyText {
    text: String,
    config: WobbleConfig,
    active: bool,
}

impl WobblyText {
    pub fn new(text: impl Into<String>, config: WobbleConfig) -> Self {
        Self {
            text: text.into(),
            config,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn render(&self) -> String {
        let letter_class = if self.active {
            r#" class="wobble-letter""#
        } else {
            ""
        };

        let mut html = String::from(r#"<h2 class="hero-title wobbly">"#);
        for (i, ch) in self.text.chars().enumerate() {
            let glyph = if ch == ' ' {
                "\u{00A0}".to_string()
            } else {
                escape(ch.encode_utf8(&mut [0; 4])).into_owned()
            };
            html.push_str(&format!(
                r#"<span{letter_class} style="animation-duration:{};animation-delay:{}">{glyph}</span>"#,
                seconds(self.config.duration),
                seconds(i as f64 * self.config.delay_step),
            ));
        }
        html.push_str("</h2>");
        html
    }
}

impl ActiveGate for WobblyText {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_staggered() {
        let mut text = WobblyText::new("Hi", WobbleConfig::default());
        text.set_active(true);
        let html = text.render();

        assert!(html.contains("animation-duration:3.6s;animation-delay:0s\">H"));
        assert!(html.contains("animation-delay:0.08s\">i"));
        assert_eq!(html.matches("wobble-letter").count(), 2);
    }

    #[test]
    fn test_inactive_has_no_animation_class() {
        let text = WobblyText::new("Hi", WobbleConfig::default());
        assert!(!text.is_active());
        assert!(!text.render().contains("wobble-letter"));
    }

    #[test]
    fn test_spaces_become_nbsp_and_text_is_escaped() {
        let text = WobblyText::new("a <b", WobbleConfig::default());
        let html = text.render();
        assert!(html.contains(">\u{00A0}</span>"));
        assert!(html.contains(">&lt;</span>"));
    }

    #[test]
    fn test_multibyte_letters() {
        let text = WobblyText::new("Wei’s", WobbleConfig::default());
        assert_eq!(text.render().matches("<span").count(), 5);
    }
}
