//! Serializes a block list into paginated PDF bytes. A4 pages, builtin
//! Helvetica fonts, top-down cursor with automatic overflow onto new pages
//! plus the explicit page breaks the document builders emit.

use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::errors::ReportError;

use super::{
    document::{format_date, Block, PhotoCaption},
    layout::{
        content_width_mm, CAPTION_GUTTER_MM, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
        PHOTO_BOX_WIDTH_MM,
    },
};

const TITLE_PT: f64 = 20.0;
const HEADING_PT: f64 = 16.0;
const SUBHEADING_PT: f64 = 13.0;
const BODY_PT: f64 = 11.0;

const PT_TO_MM: f64 = 0.352_778;
/// Average Helvetica glyph advance relative to the font size; good enough for
/// greedy wrapping with builtin fonts, which carry no metrics tables here.
const AVG_GLYPH_EM: f64 = 0.5;

const TABLE_LABEL_WIDTH_MM: f64 = 55.0;
const EMBED_DPI: f64 = 300.0;

pub struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    /// Distance of the cursor from the top edge of the current page.
    cursor_mm: f64,
}

impl PdfWriter {
    pub fn render(document_title: &str, blocks: &[Block]) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            document_title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Page 1",
        );

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;

        let layer = doc.get_page(page).get_layer(layer);

        let mut writer = PdfWriter {
            doc,
            layer,
            font,
            bold,
            cursor_mm: MARGIN_MM as f64,
        };

        for block in blocks {
            writer.write_block(block);
        }

        writer
            .doc
            .save_to_bytes()
            .map_err(|e| ReportError::Pdf(e.to_string()))
    }

    fn write_block(&mut self, block: &Block) {
        match block {
            Block::Title(text) => {
                self.ensure_space(line_height(TITLE_PT) * 2.0);
                self.write_centered(text, TITLE_PT);
                self.cursor_mm += line_height(TITLE_PT) * 0.5;
            }
            Block::Heading(text) => {
                self.ensure_space(line_height(HEADING_PT) * 2.0);
                self.cursor_mm += line_height(HEADING_PT) * 0.3;
                self.write_line(text, HEADING_PT, true, MARGIN_MM as f64);
                self.cursor_mm += line_height(HEADING_PT) * 0.3;
            }
            Block::SubHeading(text) => {
                self.ensure_space(line_height(SUBHEADING_PT) * 2.0);
                self.cursor_mm += line_height(SUBHEADING_PT) * 0.4;
                self.write_line(text, SUBHEADING_PT, true, MARGIN_MM as f64);
                self.cursor_mm += line_height(SUBHEADING_PT) * 0.2;
            }
            Block::KeyValueTable(rows) => {
                for (label, value) in rows {
                    self.write_table_row(label, value);
                }
                self.cursor_mm += line_height(BODY_PT) * 0.5;
            }
            Block::LabeledParagraph { label, text } => {
                self.ensure_space(line_height(BODY_PT) * 2.0);
                self.write_line(label, BODY_PT, true, MARGIN_MM as f64);
                self.write_wrapped(text, BODY_PT, MARGIN_MM as f64, content_width_mm() as f64);
                self.cursor_mm += line_height(BODY_PT) * 0.5;
            }
            Block::PhotoFigure {
                image,
                width_mm,
                height_mm,
                caption,
            } => {
                self.write_photo_figure(image, *width_mm as f64, *height_mm as f64, caption);
            }
            Block::PhotoPlaceholder { caption, reason } => {
                self.write_photo_placeholder(caption, reason);
            }
            Block::PageBreak => self.new_page(),
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Page");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_mm = MARGIN_MM as f64;
    }

    fn ensure_space(&mut self, needed_mm: f64) {
        if self.cursor_mm + needed_mm > PAGE_HEIGHT_MM as f64 - MARGIN_MM as f64 {
            self.new_page();
        }
    }

    /// Baseline y in PDF coordinates (origin bottom-left) for the current
    /// cursor position.
    fn baseline(&self, size_pt: f64) -> f64 {
        PAGE_HEIGHT_MM as f64 - self.cursor_mm - size_pt * PT_TO_MM
    }

    fn write_line(&mut self, text: &str, size_pt: f64, bold: bool, x_mm: f64) {
        let font = if bold { &self.bold } else { &self.font };
        self.layer.use_text(
            text,
            size_pt as f32,
            Mm(x_mm as f32),
            Mm(self.baseline(size_pt) as f32),
            font,
        );
        self.cursor_mm += line_height(size_pt);
    }

    fn write_centered(&mut self, text: &str, size_pt: f64) {
        let text_width = text.chars().count() as f64 * size_pt * AVG_GLYPH_EM * PT_TO_MM;
        let x = MARGIN_MM as f64 + ((content_width_mm() as f64 - text_width) / 2.0).max(0.0);
        self.write_line(text, size_pt, true, x);
    }

    fn write_wrapped(&mut self, text: &str, size_pt: f64, x_mm: f64, width_mm: f64) {
        for line in wrap(text, max_chars(width_mm, size_pt)) {
            self.ensure_space(line_height(size_pt));
            self.write_line(&line, size_pt, false, x_mm);
        }
    }

    fn write_table_row(&mut self, label: &str, value: &str) {
        let value_x = MARGIN_MM as f64 + TABLE_LABEL_WIDTH_MM;
        let value_width = content_width_mm() as f64 - TABLE_LABEL_WIDTH_MM;
        let lines = wrap(value, max_chars(value_width, BODY_PT));

        self.ensure_space(line_height(BODY_PT) * lines.len().max(1) as f64);

        let row_top = self.cursor_mm;
        self.write_line(label, BODY_PT, true, MARGIN_MM as f64);

        self.cursor_mm = row_top;
        for line in &lines {
            self.write_line(line, BODY_PT, false, value_x);
        }

        // The row advances by whichever column is taller.
        let after_values = self.cursor_mm;
        self.cursor_mm = after_values.max(row_top + line_height(BODY_PT));
    }

    fn caption_lines(caption: &PhotoCaption) -> Vec<String> {
        let mut lines = vec![
            caption.original_filename.clone(),
            format_date(caption.date_taken),
        ];
        if let Some(description) = &caption.description {
            lines.push(description.clone());
        }
        lines
    }

    /// Image on the left, caption column on the right.
    fn write_photo_figure(
        &mut self,
        image: &printpdf::image_crate::DynamicImage,
        width_mm: f64,
        height_mm: f64,
        caption: &PhotoCaption,
    ) {
        let caption_x = MARGIN_MM as f64 + PHOTO_BOX_WIDTH_MM as f64 + CAPTION_GUTTER_MM as f64;
        let caption_width = content_width_mm() as f64
            - PHOTO_BOX_WIDTH_MM as f64
            - CAPTION_GUTTER_MM as f64;

        let caption_lines: Vec<String> = Self::caption_lines(caption)
            .iter()
            .flat_map(|l| wrap(l, max_chars(caption_width, BODY_PT)))
            .collect();
        let caption_height = caption_lines.len() as f64 * line_height(BODY_PT);
        let row_height = height_mm.max(caption_height) + line_height(BODY_PT);

        self.ensure_space(row_height);

        let row_top = self.cursor_mm;

        // printpdf places images by their bottom-left corner.
        let image_bottom = PAGE_HEIGHT_MM as f64 - row_top - height_mm;
        let (width_px, height_px) = {
            use printpdf::image_crate::GenericImageView;
            image.dimensions()
        };
        let natural_w_mm = width_px as f64 * 25.4 / EMBED_DPI;
        let natural_h_mm = height_px as f64 * 25.4 / EMBED_DPI;

        let pdf_image = Image::from_dynamic_image(image);
        pdf_image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(image_bottom as f32)),
                scale_x: Some((width_mm / natural_w_mm) as f32),
                scale_y: Some((height_mm / natural_h_mm) as f32),
                dpi: Some(EMBED_DPI as f32),
                ..Default::default()
            },
        );

        self.cursor_mm = row_top;
        let mut first = true;
        for line in &caption_lines {
            self.write_line(line, BODY_PT, first, caption_x);
            first = false;
        }

        self.cursor_mm = row_top + row_height;
    }

    fn write_photo_placeholder(&mut self, caption: &PhotoCaption, reason: &str) {
        let mut lines = vec![format!(
            "Image could not be loaded ({}): {}",
            reason, caption.original_filename
        )];
        lines.push(format_date(caption.date_taken));
        if let Some(description) = &caption.description {
            lines.push(description.clone());
        }

        self.ensure_space(lines.len() as f64 * line_height(BODY_PT) + line_height(BODY_PT));
        for line in &lines {
            self.write_wrapped(line, BODY_PT, MARGIN_MM as f64, content_width_mm() as f64);
        }
        self.cursor_mm += line_height(BODY_PT) * 0.5;
    }
}

fn line_height(size_pt: f64) -> f64 {
    size_pt * PT_TO_MM * 1.4
}

fn max_chars(width_mm: f64, size_pt: f64) -> usize {
    ((width_mm / (size_pt * AVG_GLYPH_EM * PT_TO_MM)) as usize).max(1)
}

/// Greedy word wrap; words longer than a line are hard-split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();

        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }

            while current.chars().count() > max_chars {
                let head: String = current.chars().take(max_chars).collect();
                let tail: String = current.chars().skip(max_chars).collect();
                lines.push(head);
                current = tail;
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
