//! Run configuration: segmentation mode and its parameters.

use serde::{Deserialize, Serialize};

/// Which segmentation variant a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Exhaustive point-grid segmentation of everything in the tile.
    #[default]
    Automatic,
    /// Segmentation guided by a natural-language phrase.
    TextPrompt,
}

impl RunMode {
    /// Palette used when the mask is colorized for the result map.
    pub fn mask_palette(&self) -> &'static str {
        match self {
            RunMode::Automatic => "viridis",
            RunMode::TextPrompt => "Greens",
        }
    }
}

/// Parameters for one segmentation run as submitted by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub mode: RunMode,
    /// Search phrase, text-prompt mode only.
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default = "default_threshold")]
    pub box_threshold: f32,
    #[serde(default = "default_threshold")]
    pub text_threshold: f32,
}

fn default_threshold() -> f32 {
    0.24
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Automatic,
            prompt: None,
            box_threshold: default_threshold(),
            text_threshold: default_threshold(),
        }
    }
}

impl RunConfig {
    /// Header text for the results panel. Interpolates the prompt in
    /// text-prompt mode.
    pub fn title(&self) -> String {
        match self.mode {
            RunMode::Automatic => "Automatic Segmentation".to_string(),
            RunMode::TextPrompt => {
                format!("Segmentation of {}", self.prompt.as_deref().unwrap_or(""))
            }
        }
    }
}

/// Fixed sampling and quality parameters for the automatic variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomaticParams {
    pub model_id: String,
    pub points_per_side: u32,
    pub pred_iou_thresh: f32,
    pub stability_score_thresh: f32,
    pub foreground: bool,
}

impl Default for AutomaticParams {
    fn default() -> Self {
        Self {
            model_id: "vit_h".to_string(),
            points_per_side: 32,
            pred_iou_thresh: 0.86,
            stability_score_thresh: 0.92,
            foreground: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&RunMode::Automatic).unwrap(), "\"automatic\"");
        assert_eq!(serde_json::to_string(&RunMode::TextPrompt).unwrap(), "\"text-prompt\"");
    }

    #[test]
    fn test_thresholds_default() {
        let config: RunConfig = serde_json::from_str(r#"{"mode":"automatic"}"#).unwrap();
        assert_eq!(config.box_threshold, 0.24);
        assert_eq!(config.text_threshold, 0.24);
        assert!(config.prompt.is_none());
    }

    #[test]
    fn test_title_interpolates_prompt() {
        let config = RunConfig {
            mode: RunMode::TextPrompt,
            prompt: Some("tree".to_string()),
            ..Default::default()
        };
        assert_eq!(config.title(), "Segmentation of tree");
        assert_eq!(RunConfig::default().title(), "Automatic Segmentation");
    }

    #[test]
    fn test_palette_by_mode() {
        assert_eq!(RunMode::Automatic.mask_palette(), "viridis");
        assert_eq!(RunMode::TextPrompt.mask_palette(), "Greens");
    }
}
