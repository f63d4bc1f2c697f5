//! Page geometry and image fitting for the report renderer. All lengths are
//! millimetres on an A4 page.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;

/// Bounding box for embedded photos: 8 cm x 6 cm.
pub const PHOTO_BOX_WIDTH_MM: f32 = 80.0;
pub const PHOTO_BOX_HEIGHT_MM: f32 = 60.0;

/// Gap between a photo and its caption column.
pub const CAPTION_GUTTER_MM: f32 = 8.0;

/// Forced page break cadence in the entries and photos sections.
pub const ENTRIES_PER_PAGE: usize = 3;
pub const PHOTOS_PER_PAGE: usize = 4;

pub fn content_width_mm() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

/// Scales pixel dimensions to exactly fit the bounding box in one dimension
/// while preserving aspect ratio: a wide image is clamped to the box width,
/// a tall one to the box height.
pub fn fit_within(width_px: u32, height_px: u32, box_w_mm: f32, box_h_mm: f32) -> (f32, f32) {
    debug_assert!(width_px > 0 && height_px > 0);

    let scale = (box_w_mm / width_px as f32).min(box_h_mm / height_px as f32);
    (width_px as f32 * scale, height_px as f32 * scale)
}

/// True when a forced break follows item `index` (0-based) in a section of
/// `total` items: after every `per_page`-th item, never after the last.
pub fn breaks_after(index: usize, total: usize, per_page: usize) -> bool {
    (index + 1) % per_page == 0 && index + 1 != total
}
