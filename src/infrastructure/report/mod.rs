//! The report renderer: block model builders, layout math, and the PDF
//! writer. Orchestration (fetching records, loading photo files) lives in
//! `use_cases::report`.

pub mod document;
pub mod layout;
pub mod pdf;

use std::path::Path;

use chrono::NaiveDate;
use printpdf::image_crate::{self, DynamicImage};

/// Loads and decodes a photo's backing file. Any failure is returned as a
/// human-readable reason; it becomes an in-document placeholder, never an
/// error for the whole render.
pub fn load_photo_image(path: &Path) -> Result<DynamicImage, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("file could not be read: {e}"))?;
    let image = image_crate::load_from_memory(&bytes)
        .map_err(|e| format!("image could not be decoded: {e}"))?;

    // Flatten to RGB so the PDF embedding never has to deal with alpha.
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

/// `<prefix>_<project-name>_<YYYYMMDD>.pdf` with anything non-alphanumeric in
/// the project name collapsed to underscores.
pub fn suggested_filename(prefix: &str, project_name: &str, date: NaiveDate) -> String {
    let safe_name: String = project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    format!("{}_{}_{}.pdf", prefix, safe_name, date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_safe_and_dated() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(
            suggested_filename("construction_diary", "Lakeside House #2", date),
            "construction_diary_Lakeside_House__2_20240110.pdf"
        );
    }

    #[test]
    fn missing_file_yields_a_reason_not_a_panic() {
        let result = load_photo_image(Path::new("/nonexistent/photo.png"));
        assert!(result.unwrap_err().contains("file could not be read"));
    }
}
