//! Top-to-bottom line placement for the résumé PDF.
//!
//! Coordinates are PDF points with a bottom-left origin, so the cursor starts
//! near the top of the page and moves down by subtracting the line height.

/// Glyph that replaces a leading `-` on bullet lines.
pub const BULLET: char = '•';

/// Page size, margins and type sizes used by the layout loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub line_height: f32,
    pub base_font_size: f32,
    /// Used for lines ending in `:`, which are treated as section headings.
    pub heading_font_size: f32,
}

/// US Letter (8.5" × 11") with 50pt margins.
pub const US_LETTER: PageGeometry = PageGeometry {
    width: 612.0,
    height: 792.0,
    margin_left: 50.0,
    margin_top: 50.0,
    margin_bottom: 50.0,
    line_height: 18.0,
    base_font_size: 12.0,
    heading_font_size: 14.0,
};

impl PageGeometry {
    fn first_baseline(&self) -> f32 {
        self.height - self.margin_top
    }
}

/// One line of text at its final position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// Places every non-blank line of `text`, starting a new page whenever the
/// cursor drops below the bottom margin.
///
/// Always returns at least one page; a new page is only opened when there is
/// a line left to draw on it.
pub fn layout_pages(text: &str, geometry: &PageGeometry) -> Vec<Vec<PlacedLine>> {
    let mut pages = Vec::new();
    let mut current = Vec::new();
    let mut y = geometry.first_baseline();
    let mut page_full = false;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if page_full {
            pages.push(std::mem::take(&mut current));
            y = geometry.first_baseline();
            page_full = false;
        }

        let font_size = if line.ends_with(':') {
            geometry.heading_font_size
        } else {
            geometry.base_font_size
        };

        current.push(PlacedLine {
            text: bulletize(line),
            x: geometry.margin_left,
            y,
            font_size,
        });

        y -= geometry.line_height;
        if y < geometry.margin_bottom {
            page_full = true;
        }
    }

    pages.push(current);
    pages
}

fn bulletize(line: &str) -> String {
    match line.strip_prefix('-') {
        Some(rest) => format!("{BULLET} {}", rest.trim()),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_lines(pages: &[Vec<PlacedLine>]) -> Vec<&PlacedLine> {
        pages.iter().flatten().collect()
    }

    #[test]
    fn test_bullet_rewrite() {
        let pages = layout_pages("- Built X", &US_LETTER);
        assert_eq!(pages[0][0].text, "• Built X");
        assert_eq!(bulletize("-Shipped Y"), "• Shipped Y");
        assert_eq!(bulletize("Self-taught"), "Self-taught");
    }

    #[test]
    fn test_blank_lines_are_never_drawn() {
        let pages = layout_pages("Name: Ada\n\n   \n\t\nSummary:\n\nWrites code", &US_LETTER);
        let lines = all_lines(&pages);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| !l.text.trim().is_empty()));
        // Skipped lines do not advance the cursor.
        assert_eq!(lines[1].y, lines[0].y - US_LETTER.line_height);
    }

    #[test]
    fn test_headings_use_larger_font() {
        let pages = layout_pages("Experience:\nAnalytical Engine", &US_LETTER);
        assert_eq!(pages[0][0].font_size, 14.0);
        assert_eq!(pages[0][1].font_size, 12.0);
    }

    #[test]
    fn test_first_line_sits_below_top_margin() {
        let pages = layout_pages("Ada", &US_LETTER);
        assert_eq!(pages[0][0].x, 50.0);
        assert_eq!(pages[0][0].y, 742.0);
    }

    #[test]
    fn test_two_hundred_lines_span_several_pages() {
        let text = (0..200).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let pages = layout_pages(&text, &US_LETTER);

        assert!(pages.len() > 1);
        // 742 - 18 * 39 = 40 < 50, so 39 lines fit on a page.
        assert_eq!(pages.len(), 6);
        assert_eq!(pages[0].len(), 39);
        assert_eq!(pages[5].len(), 5);
        assert_eq!(all_lines(&pages).len(), 200);
    }

    #[test]
    fn test_every_line_clears_bottom_margin() {
        let text = (0..120).map(|i| format!("- item {i}")).collect::<Vec<_>>().join("\n");
        for page in layout_pages(&text, &US_LETTER) {
            assert!(page.iter().all(|l| l.y >= US_LETTER.margin_bottom));
            assert_eq!(page[0].y, 742.0);
        }
    }

    #[test]
    fn test_exactly_full_page_opens_no_trailing_page() {
        let text = vec!["x"; 39].join("\n");
        assert_eq!(layout_pages(&text, &US_LETTER).len(), 1);
    }

    #[test]
    fn test_empty_text_yields_single_blank_page() {
        let pages = layout_pages("\n \n", &US_LETTER);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }
}
