//! Page layout arithmetic: orientation, cell column widths, text wrapping
//! with approximate Helvetica metrics, and the row-height fitting rule.

use crate::config::policy::{self, CellLayout};

/// Vertical gap between a photo and the text block under it.
pub const PHOTO_TEXT_GAP: f64 = 3.0;
/// Line leading as a multiple of the font size.
pub const LEADING: f64 = 1.2;

/// Base-14 font faces used on a card, keyed to the page font resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

impl FontFace {
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Oblique => "F3",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageMetrics {
    pub page_width: f64,
    pub page_height: f64,
    /// Width available to the grid between the margins.
    pub usable_width: f64,
    /// Height available to the grid: page minus margins and title allowance.
    pub usable_height: f64,
    pub col_width: f64,
}

/// Letter in landscape for the dense 5x5-with-photos case, portrait otherwise.
pub fn page_metrics(grid_size: usize, show_photos: bool) -> PageMetrics {
    let (page_width, page_height) = if grid_size == 5 && show_photos {
        (policy::PAGE_HEIGHT, policy::PAGE_WIDTH)
    } else {
        (policy::PAGE_WIDTH, policy::PAGE_HEIGHT)
    };

    let title_allowance = policy::TITLE_FONT_SIZE * LEADING + policy::TITLE_SPACER;
    let usable_width = page_width - 2.0 * policy::PAGE_MARGIN;
    let usable_height = page_height - 2.0 * policy::PAGE_MARGIN - title_allowance;

    PageMetrics {
        page_width,
        page_height,
        usable_width,
        usable_height,
        col_width: usable_width / grid_size as f64,
    }
}

/// Approximate Helvetica advance width in 1/1000 em. Close enough for
/// wrapping and centring; exact metrics would need an embedded font.
fn char_width_milli(c: char) -> f64 {
    match c {
        ' ' | 'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 278.0,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | '/' => 333.0,
        'm' | 'w' | 'M' | 'W' => 833.0,
        c if c.is_uppercase() => 722.0,
        _ => 556.0,
    }
}

pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(char_width_milli).sum::<f64>() * font_size / 1000.0
}

/// Greedy word wrap to `max_width`. A word wider than the line gets a line
/// of its own rather than being split mid-word.
pub fn wrap_text(text: &str, font_size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(&candidate, font_size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn text_block_height(line_count: usize, font_size: f64) -> f64 {
    line_count as f64 * font_size * LEADING
}

/// Height of one row: the tallest cell wins. With photos on, each occupied
/// cell reserves the photo allotment plus the gap above its text block.
pub fn row_height(layout: &CellLayout, cell_text_heights: &[f64], show_photos: bool) -> f64 {
    cell_text_heights
        .iter()
        .map(|&text_height| {
            if show_photos {
                layout.photo_size + text_height + 2.0 * layout.padding + PHOTO_TEXT_GAP
            } else {
                text_height + 2.0 * layout.padding
            }
        })
        .fold(0.0, f64::max)
}

/// Uniformly scales row heights down when their sum would overflow the
/// usable page height, so the grid fits exactly. Rows that already fit are
/// left untouched.
pub fn scale_rows_to_fit(row_heights: &mut [f64], usable_height: f64) {
    let total: f64 = row_heights.iter().sum();
    if total > usable_height && total > 0.0 {
        let factor = usable_height / total;
        for height in row_heights.iter_mut() {
            *height *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rows_overflow_sums_to_usable_height() {
        let mut heights = vec![200.0, 250.0, 180.0, 220.0];
        scale_rows_to_fit(&mut heights, 600.0);
        let total: f64 = heights.iter().sum();
        assert!((total - 600.0).abs() < 1e-9);

        // Uniform factor: relative proportions preserved.
        assert!((heights[1] / heights[0] - 250.0 / 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_rows_noop_when_grid_fits() {
        let mut heights = vec![100.0, 120.0];
        scale_rows_to_fit(&mut heights, 600.0);
        assert_eq!(heights, vec![100.0, 120.0]);
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("Great Blue Heron", 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            // A single word may overflow; multi-word lines must fit.
            if line.contains(' ') {
                assert!(text_width(line, 10.0) <= 60.0);
            }
        }
        assert_eq!(lines.join(" "), "Great Blue Heron");
    }

    #[test]
    fn test_wrap_text_single_line_when_it_fits() {
        let lines = wrap_text("Mallard", 8.0, 200.0);
        assert_eq!(lines, vec!["Mallard".to_string()]);
    }

    #[test]
    fn test_row_height_uses_tallest_cell() {
        let layout = crate::config::policy::cell_layout(3).unwrap();
        let with_photos = row_height(&layout, &[10.0, 24.0, 12.0], true);
        let expected = layout.photo_size + 24.0 + 2.0 * layout.padding + PHOTO_TEXT_GAP;
        assert!((with_photos - expected).abs() < 1e-9);

        let text_only = row_height(&layout, &[10.0, 24.0, 12.0], false);
        assert!((text_only - (24.0 + 2.0 * layout.padding)).abs() < 1e-9);
    }

    #[test]
    fn test_landscape_only_for_dense_photo_grid() {
        let dense = page_metrics(5, true);
        assert!(dense.page_width > dense.page_height);

        let portrait = page_metrics(5, false);
        assert!(portrait.page_height > portrait.page_width);

        let small = page_metrics(3, true);
        assert!(small.page_height > small.page_width);
    }
}
