//! Data models and report types for verification runs
//!
//! This module defines the core types used throughout the library:
//! - Viewport and base-resolution geometry, including the FIT-mode math
//! - Canvas inline-style readings and CSS pixel parsing
//! - Scenario reports and screenshot artifact records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{VerifyError, VerifyResult};

/// Browser viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Viewport width
    pub width: u32,
    /// Viewport height
    pub height: u32,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Validates that both dimensions are non-zero
    pub fn validate(&self) -> VerifyResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VerifyError::InvalidParameter {
                parameter: "viewport".to_string(),
                reason: format!("{}x{} has a zero dimension", self.width, self.height),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The game's base (design) resolution
///
/// The engine renders at this resolution and its scale manager stretches
/// the canvas to fit the viewport while preserving the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDimensions {
    /// Base render width
    pub width: u32,
    /// Base render height
    pub height: u32,
}

impl GameDimensions {
    /// Creates base dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Base aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Computes the rectangle FIT scale mode must produce for a viewport.
    ///
    /// FIT picks the largest rectangle with the base aspect ratio that
    /// fits entirely inside the viewport and centers it, so the limiting
    /// axis gets zero margin and the other axis gets half the leftover
    /// space on each side.
    pub fn fit_within(&self, viewport: Viewport) -> FitRect {
        let scale = (f64::from(viewport.width) / f64::from(self.width))
            .min(f64::from(viewport.height) / f64::from(self.height));
        let width = f64::from(self.width) * scale;
        let height = f64::from(self.height) * scale;
        FitRect {
            width,
            height,
            margin_left: (f64::from(viewport.width) - width) / 2.0,
            margin_top: (f64::from(viewport.height) - height) / 2.0,
        }
    }
}

impl Default for GameDimensions {
    fn default() -> Self {
        // The game renders at 800x600 (4:3)
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Expected canvas geometry under FIT scaling, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitRect {
    /// Scaled canvas width
    pub width: f64,
    /// Scaled canvas height
    pub height: f64,
    /// Left margin centering the canvas horizontally
    pub margin_left: f64,
    /// Top margin centering the canvas vertically
    pub margin_top: f64,
}

/// Inline style values read from the canvas element
///
/// The scale manager writes these directly onto `canvas.style`. Values
/// are kept verbatim as the browser reports them; use the `*_px()`
/// accessors for numeric comparison. An empty string means the engine
/// never set the property, which is compared as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasStyle {
    /// `canvas.style.width`, e.g. "1000px"
    pub width: String,
    /// `canvas.style.height`, e.g. "750px"
    pub height: String,
    /// `canvas.style.marginTop`, e.g. "25px"
    #[serde(rename = "marginTop")]
    pub margin_top: String,
    /// `canvas.style.marginLeft`, e.g. "0px"
    #[serde(rename = "marginLeft")]
    pub margin_left: String,
}

impl CanvasStyle {
    /// Parsed numeric width, if present
    pub fn width_px(&self) -> Option<f64> {
        parse_css_px(&self.width)
    }

    /// Parsed numeric height, if present
    pub fn height_px(&self) -> Option<f64> {
        parse_css_px(&self.height)
    }

    /// Parsed top margin; absent is treated as 0
    pub fn margin_top_px(&self) -> f64 {
        parse_css_px(&self.margin_top).unwrap_or(0.0)
    }

    /// Parsed left margin; absent is treated as 0
    pub fn margin_left_px(&self) -> f64 {
        parse_css_px(&self.margin_left).unwrap_or(0.0)
    }
}

/// Parses a CSS pixel length such as "25px" or "25.5px".
///
/// Returns `None` for empty strings and anything that is not a plain
/// pixel length (percentages, calc expressions).
pub fn parse_css_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.strip_suffix("px")?.trim_end().parse::<f64>().ok()
}

/// Result of comparing observed canvas style against the FIT expectation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingReport {
    /// Viewport the check ran under
    pub viewport: Viewport,
    /// Base resolution used for the expectation
    pub base: GameDimensions,
    /// Expected canvas geometry
    pub expected: FitRect,
    /// Observed inline style
    pub observed: CanvasStyle,
    /// Per-property tolerance in pixels
    pub tolerance_px: f64,
    /// Human-readable descriptions of each mismatch
    pub mismatches: Vec<String>,
    /// Whether all properties matched within tolerance
    pub passed: bool,
}

impl ScalingReport {
    /// Compares observed style against expectation within a tolerance.
    ///
    /// A missing width or height is always a mismatch (the scale manager
    /// must set both); missing margins compare as 0.
    pub fn evaluate(
        viewport: Viewport,
        base: GameDimensions,
        observed: CanvasStyle,
        tolerance_px: f64,
    ) -> Self {
        let expected = base.fit_within(viewport);
        let mut mismatches = Vec::new();

        let mut check = |name: &str, expected: f64, observed: Option<f64>| match observed {
            Some(actual) if (actual - expected).abs() <= tolerance_px => {}
            Some(actual) => mismatches.push(format!(
                "{name}: expected {expected:.1}px, observed {actual:.1}px"
            )),
            None => mismatches.push(format!("{name}: expected {expected:.1}px, style not set")),
        };

        check("width", expected.width, observed.width_px());
        check("height", expected.height, observed.height_px());
        check("marginTop", expected.margin_top, Some(observed.margin_top_px()));
        check("marginLeft", expected.margin_left, Some(observed.margin_left_px()));

        let passed = mismatches.is_empty();
        Self {
            viewport,
            base,
            expected,
            observed,
            tolerance_px,
            mismatches,
            passed,
        }
    }
}

/// A screenshot written to disk during a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotArtifact {
    /// What the screenshot shows, e.g. "main_menu"
    pub label: String,
    /// Path the PNG was written to
    pub path: std::path::PathBuf,
    /// Decoded image width in pixels
    pub width: u32,
    /// Decoded image height in pixels
    pub height: u32,
}

/// Outcome of a single scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub scenario: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
    /// Screenshots written during the run
    pub artifacts: Vec<ScreenshotArtifact>,
    /// Scaling comparison, present for the scaling scenario
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaling: Option<ScalingReport>,
    /// Whether the scenario's checks all passed
    pub passed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_display_and_validate() {
        let vp = Viewport::new(1000, 800);
        assert_eq!(vp.to_string(), "1000x800");
        assert!(vp.validate().is_ok());

        let bad = Viewport::new(0, 800);
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("viewport"));
    }

    #[test]
    fn test_fit_width_limited_viewport() {
        // 1000x800 viewport, 4:3 base. 1000/800 = 1.25 < 1.333 so width
        // is the limiting axis: 1000x750 centered with a 25px top margin.
        let rect = GameDimensions::default().fit_within(Viewport::new(1000, 800));
        assert!((rect.width - 1000.0).abs() < f64::EPSILON);
        assert!((rect.height - 750.0).abs() < f64::EPSILON);
        assert!((rect.margin_left - 0.0).abs() < f64::EPSILON);
        assert!((rect.margin_top - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_height_limited_viewport() {
        // 1600x600: height limits, canvas is 800x600 centered horizontally.
        let rect = GameDimensions::default().fit_within(Viewport::new(1600, 600));
        assert!((rect.width - 800.0).abs() < f64::EPSILON);
        assert!((rect.height - 600.0).abs() < f64::EPSILON);
        assert!((rect.margin_left - 400.0).abs() < f64::EPSILON);
        assert!((rect.margin_top - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_exact_viewport_has_no_margins() {
        let rect = GameDimensions::default().fit_within(Viewport::new(800, 600));
        assert!((rect.width - 800.0).abs() < f64::EPSILON);
        assert!((rect.height - 600.0).abs() < f64::EPSILON);
        assert_eq!(rect.margin_left, 0.0);
        assert_eq!(rect.margin_top, 0.0);
    }

    #[test]
    fn test_fit_preserves_aspect_and_bounds() {
        let base = GameDimensions::default();
        for (w, h) in [(320, 240), (1920, 1080), (640, 960), (5, 3000)] {
            let vp = Viewport::new(w, h);
            let rect = base.fit_within(vp);
            assert!(rect.width <= f64::from(w) + 1e-9);
            assert!(rect.height <= f64::from(h) + 1e-9);
            assert!(rect.margin_left >= 0.0);
            assert!(rect.margin_top >= 0.0);
            let ratio = rect.width / rect.height;
            assert!((ratio - base.aspect_ratio()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_parse_css_px() {
        assert_eq!(parse_css_px("25px"), Some(25.0));
        assert_eq!(parse_css_px("25.5px"), Some(25.5));
        assert_eq!(parse_css_px(" 1000px "), Some(1000.0));
        assert_eq!(parse_css_px(""), None);
        assert_eq!(parse_css_px("auto"), None);
        assert_eq!(parse_css_px("50%"), None);
        assert_eq!(parse_css_px("calc(100% - 10px)"), None);
    }

    #[test]
    fn test_canvas_style_deserializes_from_dom_shape() {
        // Shape produced by reading el.style properties in the page
        let json = r#"{"width":"1000px","height":"750px","marginTop":"25px","marginLeft":""}"#;
        let style: CanvasStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.width_px(), Some(1000.0));
        assert_eq!(style.height_px(), Some(750.0));
        assert_eq!(style.margin_top_px(), 25.0);
        assert_eq!(style.margin_left_px(), 0.0);
    }

    #[test]
    fn test_scaling_report_passes_within_tolerance() {
        let observed = CanvasStyle {
            width: "1000px".to_string(),
            height: "749.5px".to_string(),
            margin_top: "25.2px".to_string(),
            margin_left: "".to_string(),
        };
        let report = ScalingReport::evaluate(
            Viewport::new(1000, 800),
            GameDimensions::default(),
            observed,
            1.0,
        );
        assert!(report.passed, "mismatches: {:?}", report.mismatches);
    }

    #[test]
    fn test_scaling_report_detects_uncentered_canvas() {
        let observed = CanvasStyle {
            width: "1000px".to_string(),
            height: "750px".to_string(),
            margin_top: "0px".to_string(),
            margin_left: "".to_string(),
        };
        let report = ScalingReport::evaluate(
            Viewport::new(1000, 800),
            GameDimensions::default(),
            observed,
            1.0,
        );
        assert!(!report.passed);
        assert_eq!(report.mismatches.len(), 1);
        assert!(report.mismatches[0].contains("marginTop"));
    }

    #[test]
    fn test_scaling_report_missing_dimensions_fail() {
        let report = ScalingReport::evaluate(
            Viewport::new(1000, 800),
            GameDimensions::default(),
            CanvasStyle::default(),
            1.0,
        );
        assert!(!report.passed);
        assert!(report
            .mismatches
            .iter()
            .any(|m| m.contains("width") && m.contains("not set")));
        assert!(report.mismatches.iter().any(|m| m.contains("height")));
    }

    #[test]
    fn test_scenario_report_serialization() {
        let report = ScenarioReport {
            scenario: "gameplay".to_string(),
            started_at: Utc::now(),
            duration_ms: 4200,
            artifacts: vec![ScreenshotArtifact {
                label: "main_menu".to_string(),
                path: "verification/1_main_menu.png".into(),
                width: 800,
                height: 600,
            }],
            scaling: None,
            passed: true,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scenario"], "gameplay");
        assert_eq!(json["artifacts"][0]["label"], "main_menu");
        assert!(json.get("scaling").is_none());
    }
}
