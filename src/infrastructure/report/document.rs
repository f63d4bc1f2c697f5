//! Intermediate document model for the report renderer. Rendering happens in
//! two stages: builders here turn stored records into a flat list of [`Block`]s
//! (where all ordering, pagination, and formatting decisions are made), and
//! the PDF writer serializes that list. Structure stays checkable without
//! parsing PDF bytes.

use chrono::NaiveDate;
use printpdf::image_crate::{DynamicImage, GenericImageView};

use crate::entities::{entry::Entry, photo::Photo, project::Project, stats::ProjectStats};

use super::layout::{
    breaks_after, fit_within, ENTRIES_PER_PAGE, PHOTOS_PER_PAGE, PHOTO_BOX_HEIGHT_MM,
    PHOTO_BOX_WIDTH_MM,
};

pub const DOCUMENT_TITLE: &str = "Construction Diary";
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No description provided";

/// One photo together with the result of loading its backing file. A failed
/// load degrades that photo to a placeholder block; it never aborts the
/// document.
pub struct PhotoSlot {
    pub photo: Photo,
    pub outcome: Result<DynamicImage, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoCaption {
    pub original_filename: String,
    pub date_taken: NaiveDate,
    pub description: Option<String>,
}

impl PhotoCaption {
    fn from_photo(photo: &Photo) -> Self {
        PhotoCaption {
            original_filename: photo.original_filename.clone(),
            date_taken: photo.date_taken,
            description: photo
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug)]
pub enum Block {
    Title(String),
    Heading(String),
    SubHeading(String),
    KeyValueTable(Vec<(String, String)>),
    LabeledParagraph { label: String, text: String },
    PhotoFigure {
        image: DynamicImage,
        width_mm: f32,
        height_mm: f32,
        caption: PhotoCaption,
    },
    PhotoPlaceholder { caption: PhotoCaption, reason: String },
    PageBreak,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_costs(costs: f64) -> String {
    format!("{:.2} €", costs)
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.1} h", hours)
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{:.1}°C", celsius)
}

/// Full project report: title, project info, statistics, all entries in
/// ascending date order, then the photo gallery (if any).
pub fn full_report(
    project: &Project,
    stats: &ProjectStats,
    entries: &[Entry],
    photos: Vec<PhotoSlot>,
) -> Vec<Block> {
    let mut blocks = Vec::new();

    blocks.push(Block::Title(DOCUMENT_TITLE.to_string()));
    blocks.push(Block::Heading(project.name.clone()));

    blocks.push(Block::SubHeading("Project Information".to_string()));
    blocks.push(Block::KeyValueTable(project_info_rows(project)));

    blocks.push(Block::SubHeading("Statistics".to_string()));
    blocks.push(Block::KeyValueTable(stats_rows(stats)));
    blocks.push(Block::PageBreak);

    blocks.push(Block::Heading("Entries".to_string()));
    for (index, entry) in entries.iter().enumerate() {
        let heading = format!("Entry {}: {}", index + 1, format_date(entry.date));
        push_entry_blocks(&mut blocks, entry, heading);

        if breaks_after(index, entries.len(), ENTRIES_PER_PAGE) {
            blocks.push(Block::PageBreak);
        }
    }

    if !photos.is_empty() {
        blocks.push(Block::PageBreak);
        blocks.push(Block::Heading("Photos".to_string()));

        let total = photos.len();
        for (index, slot) in photos.into_iter().enumerate() {
            let caption = PhotoCaption::from_photo(&slot.photo);
            match slot.outcome {
                Ok(image) => {
                    let (w_px, h_px) = image.dimensions();
                    let (width_mm, height_mm) =
                        fit_within(w_px, h_px, PHOTO_BOX_WIDTH_MM, PHOTO_BOX_HEIGHT_MM);
                    blocks.push(Block::PhotoFigure {
                        image,
                        width_mm,
                        height_mm,
                        caption,
                    });
                }
                Err(reason) => {
                    blocks.push(Block::PhotoPlaceholder { caption, reason });
                }
            }

            if breaks_after(index, total, PHOTOS_PER_PAGE) {
                blocks.push(Block::PageBreak);
            }
        }
    }

    blocks
}

/// Standalone document for a single entry: same block rules, no statistics,
/// no numbering, no photos.
pub fn entry_report(project: &Project, entry: &Entry) -> Vec<Block> {
    let mut blocks = Vec::new();

    blocks.push(Block::Title(DOCUMENT_TITLE.to_string()));
    blocks.push(Block::Heading(project.name.clone()));

    let heading = format!("Entry from {}", format_date(entry.date));
    push_entry_blocks(&mut blocks, entry, heading);

    blocks
}

fn push_entry_blocks(blocks: &mut Vec<Block>, entry: &Entry, heading: String) {
    blocks.push(Block::SubHeading(heading));

    let details = entry_detail_rows(entry);
    if !details.is_empty() {
        blocks.push(Block::KeyValueTable(details));
    }

    blocks.push(Block::LabeledParagraph {
        label: "Work performed".to_string(),
        text: entry.content.clone(),
    });

    if let Some(materials) = entry.materials.as_deref().filter(|m| !m.trim().is_empty()) {
        blocks.push(Block::LabeledParagraph {
            label: "Materials".to_string(),
            text: materials.to_string(),
        });
    }

    if let Some(notes) = entry.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        blocks.push(Block::LabeledParagraph {
            label: "Notes".to_string(),
            text: notes.to_string(),
        });
    }
}

fn project_info_rows(project: &Project) -> Vec<(String, String)> {
    let description = project
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(NO_DESCRIPTION_PLACEHOLDER);

    vec![
        ("Project name".to_string(), project.name.clone()),
        ("Builder".to_string(), project.builder_name.clone()),
        ("Start date".to_string(), format_date(project.start_date)),
        ("Status".to_string(), project.status.clone()),
        ("Description".to_string(), description.to_string()),
    ]
}

fn stats_rows(stats: &ProjectStats) -> Vec<(String, String)> {
    vec![
        ("Entries".to_string(), stats.total_entries.to_string()),
        ("Photos".to_string(), stats.total_photos.to_string()),
        ("Project days".to_string(), stats.project_days.to_string()),
        ("Total costs".to_string(), format_costs(stats.total_costs)),
        ("Total work hours".to_string(), format_hours(stats.total_hours)),
        ("Completion".to_string(), format!("{} %", stats.completion)),
    ]
}

/// Rows only for the optional fields that are actually present; callers omit
/// the table entirely when this is empty.
fn entry_detail_rows(entry: &Entry) -> Vec<(String, String)> {
    let mut rows = Vec::new();

    if let Some(weather) = entry.weather.as_deref().filter(|w| !w.trim().is_empty()) {
        rows.push(("Weather".to_string(), weather.to_string()));
    }
    if let Some(temperature) = entry.temperature {
        rows.push(("Temperature".to_string(), format_temperature(temperature)));
    }
    if let Some(workers) = entry.workers_count {
        rows.push(("Workers on site".to_string(), workers.to_string()));
    }
    if let Some(hours) = entry.work_hours {
        rows.push(("Work hours".to_string(), format_hours(hours)));
    }
    if let Some(costs) = entry.costs {
        rows.push(("Costs".to_string(), format_costs(costs)));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn project() -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Lakeside House".to_string(),
            builder_name: "A. Mason".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: "in progress".to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn entry(day: u32) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            weather: None,
            temperature: None,
            content: format!("Work on day {day}"),
            workers_count: None,
            materials: None,
            work_hours: None,
            costs: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn photo(day: u32) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            filename: format!("stored-{day}.png"),
            original_filename: format!("site-{day}.png"),
            description: None,
            date_taken: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            file_size: 1024,
            created_at: Utc::now(),
        }
    }

    fn stats() -> ProjectStats {
        ProjectStats {
            total_entries: 0,
            total_photos: 0,
            project_days: 1,
            total_costs: 0.0,
            total_hours: 0.0,
            completion: 65,
        }
    }

    /// Structural fingerprint used to compare documents without PartialEq on
    /// embedded image data.
    fn shape(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .map(|b| match b {
                Block::Title(t) => format!("title:{t}"),
                Block::Heading(t) => format!("heading:{t}"),
                Block::SubHeading(t) => format!("subheading:{t}"),
                Block::KeyValueTable(rows) => format!(
                    "table:{}",
                    rows.iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect::<Vec<_>>()
                        .join(";")
                ),
                Block::LabeledParagraph { label, text } => format!("para:{label}:{text}"),
                Block::PhotoFigure {
                    width_mm,
                    height_mm,
                    caption,
                    ..
                } => format!(
                    "figure:{}:{width_mm:.2}x{height_mm:.2}",
                    caption.original_filename
                ),
                Block::PhotoPlaceholder { caption, reason } => {
                    format!("placeholder:{}:{reason}", caption.original_filename)
                }
                Block::PageBreak => "pagebreak".to_string(),
            })
            .collect()
    }

    fn page_break_positions(blocks: &[Block]) -> Vec<usize> {
        blocks
            .iter()
            .enumerate()
            .filter_map(|(i, b)| matches!(b, Block::PageBreak).then_some(i))
            .collect()
    }

    #[test]
    fn formatting_matches_the_document_conventions() {
        assert_eq!(format_costs(150.0), "150.00 €");
        assert_eq!(format_costs(100.5 + 49.5), "150.00 €");
        assert_eq!(format_hours(8.0), "8.0 h");
        assert_eq!(format_temperature(12.5), "12.5°C");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()),
            "07.03.2024"
        );
    }

    #[test]
    fn entry_without_optional_fields_gets_no_details_table() {
        let blocks = entry_report(&project(), &entry(1));

        assert!(!blocks.iter().any(|b| matches!(b, Block::KeyValueTable(_))));
        assert!(blocks.iter().any(|b| matches!(
            b,
            Block::LabeledParagraph { label, .. } if label == "Work performed"
        )));
    }

    #[test]
    fn blank_weather_string_gets_no_details_table() {
        let mut e = entry(1);
        e.weather = Some("  ".to_string());

        let blocks = entry_report(&project(), &e);
        assert!(!blocks.iter().any(|b| matches!(b, Block::KeyValueTable(_))));
    }

    #[test]
    fn entry_with_only_temperature_gets_a_one_row_table() {
        let mut e = entry(1);
        e.temperature = Some(12.5);

        let blocks = entry_report(&project(), &e);
        let table = blocks
            .iter()
            .find_map(|b| match b {
                Block::KeyValueTable(rows) => Some(rows),
                _ => None,
            })
            .expect("details table missing");

        assert_eq!(table.len(), 1);
        assert_eq!(table[0], ("Temperature".to_string(), "12.5°C".to_string()));
    }

    #[test]
    fn materials_and_notes_appear_only_when_non_empty() {
        let mut e = entry(1);
        e.materials = Some("  ".to_string());
        e.notes = Some("Check delivery".to_string());

        let blocks = entry_report(&project(), &e);
        let labels: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::LabeledParagraph { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(labels, vec!["Work performed", "Notes"]);
    }

    #[test]
    fn blank_description_falls_back_to_placeholder() {
        let mut p = project();
        p.description = Some("   ".to_string());

        let blocks = full_report(&p, &stats(), &[], Vec::new());
        let info = blocks
            .iter()
            .find_map(|b| match b {
                Block::KeyValueTable(rows) => Some(rows),
                _ => None,
            })
            .unwrap();

        assert!(info
            .iter()
            .any(|(k, v)| k == "Description" && v == NO_DESCRIPTION_PLACEHOLDER));
    }

    #[test]
    fn seven_entries_break_after_the_third_and_sixth_only() {
        let entries: Vec<Entry> = (1..=7).map(entry).collect();
        let blocks = full_report(&project(), &stats(), &entries, Vec::new());

        // Indices of the entry subheadings, paired with following breaks.
        let mut breaks_after_entry = Vec::new();
        let mut current_entry = 0usize;
        for block in &blocks {
            match block {
                Block::SubHeading(text) if text.starts_with("Entry ") => {
                    current_entry = text
                        .trim_start_matches("Entry ")
                        .split(':')
                        .next()
                        .unwrap()
                        .parse()
                        .unwrap();
                }
                Block::PageBreak if current_entry > 0 => {
                    breaks_after_entry.push(current_entry);
                }
                _ => {}
            }
        }

        assert_eq!(breaks_after_entry, vec![3, 6]);
    }

    #[test]
    fn statistics_block_is_followed_by_a_page_break() {
        let blocks = full_report(&project(), &stats(), &[], Vec::new());

        let stats_idx = blocks
            .iter()
            .position(|b| matches!(b, Block::SubHeading(t) if t == "Statistics"))
            .unwrap();
        // Subheading, table, then the forced break.
        assert!(matches!(blocks[stats_idx + 1], Block::KeyValueTable(_)));
        assert!(matches!(blocks[stats_idx + 2], Block::PageBreak));
    }

    #[test]
    fn photos_section_is_omitted_without_photos() {
        let blocks = full_report(&project(), &stats(), &[], Vec::new());
        assert!(!blocks
            .iter()
            .any(|b| matches!(b, Block::Heading(t) if t == "Photos")));
    }

    #[test]
    fn five_photos_break_after_the_fourth_only() {
        let slots: Vec<PhotoSlot> = (1..=5)
            .map(|day| PhotoSlot {
                photo: photo(day),
                outcome: Ok(DynamicImage::new_rgb8(4, 3)),
            })
            .collect();

        let blocks = full_report(&project(), &stats(), &[], slots);

        let photos_heading = blocks
            .iter()
            .position(|b| matches!(b, Block::Heading(t) if t == "Photos"))
            .unwrap();

        // The section is preceded by a forced break.
        assert!(matches!(blocks[photos_heading - 1], Block::PageBreak));

        let section = &blocks[photos_heading + 1..];
        let figure_positions: Vec<usize> = section
            .iter()
            .enumerate()
            .filter_map(|(i, b)| matches!(b, Block::PhotoFigure { .. }).then_some(i))
            .collect();
        assert_eq!(figure_positions.len(), 5);

        let break_positions = page_break_positions(section);
        // Exactly one break, between the 4th and 5th figure.
        assert_eq!(break_positions.len(), 1);
        assert!(break_positions[0] > figure_positions[3]);
        assert!(break_positions[0] < figure_positions[4]);
        // Never after the last photo.
        assert!(break_positions[0] != section.len() - 1);
    }

    #[test]
    fn failed_photo_load_becomes_a_placeholder_not_an_error() {
        let slots = vec![
            PhotoSlot {
                photo: photo(1),
                outcome: Ok(DynamicImage::new_rgb8(4, 3)),
            },
            PhotoSlot {
                photo: photo(2),
                outcome: Err("file is missing".to_string()),
            },
        ];

        let blocks = full_report(&project(), &stats(), &[], slots);

        let placeholder = blocks
            .iter()
            .find_map(|b| match b {
                Block::PhotoPlaceholder { caption, reason } => Some((caption, reason)),
                _ => None,
            })
            .expect("placeholder missing");

        assert_eq!(placeholder.0.original_filename, "site-2.png");
        assert_eq!(placeholder.0.date_taken, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(placeholder.1, "file is missing");
    }

    #[test]
    fn photo_figures_fit_the_bounding_box() {
        let slots = vec![PhotoSlot {
            photo: photo(1),
            outcome: Ok(DynamicImage::new_rgb8(1600, 900)),
        }];

        let blocks = full_report(&project(), &stats(), &[], slots);
        let (w, h) = blocks
            .iter()
            .find_map(|b| match b {
                Block::PhotoFigure {
                    width_mm,
                    height_mm,
                    ..
                } => Some((*width_mm, *height_mm)),
                _ => None,
            })
            .unwrap();

        assert!((w - 80.0).abs() < 1e-3);
        assert!((h - 45.0).abs() < 1e-3);
    }

    #[test]
    fn building_twice_yields_identical_structure() {
        let entries: Vec<Entry> = (1..=4).map(entry).collect();

        let build = || {
            let slots = vec![
                PhotoSlot {
                    photo: photo(1),
                    outcome: Ok(DynamicImage::new_rgb8(640, 480)),
                },
                PhotoSlot {
                    photo: photo(2),
                    outcome: Err("unreadable".to_string()),
                },
            ];
            full_report(&project(), &stats(), &entries, slots)
        };

        assert_eq!(shape(&build()), shape(&build()));
    }
}
