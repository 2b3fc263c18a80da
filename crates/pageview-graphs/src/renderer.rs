//! Graph rendering trait shared by the line, bar and box charts

use crate::{ColorScheme, FontConfig, GraphConfig};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use pageview_common::Result;

/// Trait for rendering graphs with different types and styling options
pub trait GraphRenderer {
    /// Render the graph to a PNG file, overwriting any existing file
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()>;

    /// Fill the drawing area with the configured background
    fn apply_styling<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &GraphConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let bg_color = self.get_background_color(config);
        root.fill(&bg_color)?;
        Ok(())
    }

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
                RGBColor(140, 86, 75),   // Brown
                RGBColor(227, 119, 194), // Pink
                RGBColor(127, 127, 127), // Gray
                RGBColor(188, 189, 34),  // Olive
                RGBColor(23, 190, 207),  // Cyan
                RGBColor(174, 199, 232), // Light Blue
                RGBColor(255, 187, 120), // Light Orange
            ],
            ColorScheme::Monochrome => vec![
                RGBColor(0, 0, 0),       // Black
                RGBColor(64, 64, 64),    // Dark Gray
                RGBColor(128, 128, 128), // Gray
                RGBColor(192, 192, 192), // Light Gray
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
        }
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }

    /// Color at `index`, cycling through the scheme
    fn color_at(&self, scheme: &ColorScheme, index: usize) -> RGBColor {
        let colors = self.get_colors(scheme);
        if colors.is_empty() {
            return RGBColor(0, 0, 0);
        }
        colors[index % colors.len()]
    }
}

/// Category axis positions: category `i` occupies `[i, i + 1)` and is
/// labelled at its center.
pub(crate) fn category_centers(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64 + 0.5).collect()
}

/// Pixel gap between the x axis and the category labels below it
const CATEGORY_LABEL_GAP: i32 = 8;

/// Draw one label under each category center.
///
/// `to_pixel` maps an x value on the category axis to the backend pixel
/// where that value meets the x axis. Mesh ticks are placed by plotters
/// itself, so category names are drawn here instead of through the mesh.
pub(crate) fn draw_category_labels<DB, F>(
    area: &DrawingArea<DB, Shift>,
    to_pixel: F,
    labels: &[String],
    font: &FontConfig,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
    F: Fn(f64) -> (i32, i32),
{
    let (base_x, base_y) = area.get_base_pixel();
    let text_style = TextStyle::from((font.family.as_str(), font.size))
        .pos(Pos::new(HPos::Center, VPos::Top));

    for (center, label) in category_centers(labels.len()).into_iter().zip(labels) {
        let (x, y) = to_pixel(center);
        area.draw(&Text::new(
            label.as_str(),
            (x - base_x, y - base_y + CATEGORY_LABEL_GAP),
            text_style.clone(),
        ))?;
    }
    Ok(())
}

/// Upper bound of a value axis with 10% headroom above the largest value
pub(crate) fn padded_max(max_value: f64) -> f64 {
    if max_value > 0.0 {
        max_value * 1.1
    } else {
        1.0
    }
}

/// Make sure the parent directory of an output file exists
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
