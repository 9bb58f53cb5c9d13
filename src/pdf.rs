use std::io::BufWriter;

use chrono::{DateTime, Utc};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;

use crate::error::{CardstmtError, Result};
use crate::fmt::{document_name, ist_timestamp, rupees};
use crate::models::{
    ExtractedRecord, Rgb8, CASH_LIMIT, CREDIT_LIMIT, DUE_DATE, REWARD_POINTS, TOTAL_OUTSTANDING,
};

// A4, laid out from the top-left corner (mm)
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const CENTER_X: f32 = 105.0;
const LABEL_X: f32 = 25.0;
const VALUE_X: f32 = 110.0;
const ROW_TOP: f32 = 90.0;
const ROW_STEP: f32 = 15.0;
const NOTICE_Y: f32 = 200.0;
const DOCUMENT_NAME_CHARS: usize = 80;

const WHITE: Rgb8 = Rgb8(255, 255, 255);
const BLACK: Rgb8 = Rgb8(0, 0, 0);
const LIGHT_GRAY: Rgb8 = Rgb8(245, 245, 245);
const ZEBRA: Rgb8 = Rgb8(250, 250, 250);
const DARK_GRAY: Rgb8 = Rgb8(100, 100, 100);
const NOTICE_FILL: Rgb8 = Rgb8(255, 243, 205);
const NOTICE_BORDER: Rgb8 = Rgb8(255, 193, 7);
const NOTICE_TEXT: Rgb8 = Rgb8(133, 100, 4);

fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.18
}

fn color(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        c.0 as f32 / 255.0,
        c.1 as f32 / 255.0,
        c.2 as f32 / 255.0,
        None,
    ))
}

/// First wrapped line of `text`, with an ellipsis when anything was cut.
fn fit_line(text: &str, width: usize) -> String {
    let lines = textwrap::wrap(text, width);
    match lines.len() {
        0 => String::new(),
        1 => lines[0].to_string(),
        _ => format!("{}...", lines[0]),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker {
    pub page: usize,
    pub total: usize,
}

struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    current_page: PdfPageIndex,
    current_layer: PdfLayerIndex,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CardstmtError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CardstmtError::Pdf(format!("{e:?}")))?;
        Ok(Self {
            doc,
            font,
            font_bold,
            current_page: page,
            current_layer: layer,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer");
        self.current_page = page;
        self.current_layer = layer;
    }

    fn layer(&self) -> PdfLayerReference {
        self.doc
            .get_page(self.current_page)
            .get_layer(self.current_layer)
    }

    fn corners(x: f32, y: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
        let top = PAGE_H - y;
        let bottom = PAGE_H - y - h;
        vec![
            (Point::new(Mm(x), Mm(top)), false),
            (Point::new(Mm(x + w), Mm(top)), false),
            (Point::new(Mm(x + w), Mm(bottom)), false),
            (Point::new(Mm(x), Mm(bottom)), false),
        ]
    }

    fn fill_rect(&self, x: f32, y: f32, w: f32, h: f32, fill: Rgb8) {
        let layer = self.layer();
        layer.set_fill_color(color(fill));
        layer.add_polygon(Polygon {
            rings: vec![Self::corners(x, y, w, h)],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn stroke_rect(&self, x: f32, y: f32, w: f32, h: f32, outline: Rgb8) {
        let layer = self.layer();
        layer.set_outline_color(color(outline));
        layer.set_outline_thickness(0.5);
        layer.add_line(Line {
            points: Self::corners(x, y, w, h),
            is_closed: true,
        });
    }

    fn text(&self, s: &str, x: f32, y: f32, size: f32, bold: bool, fill: Rgb8) {
        let font = if bold { &self.font_bold } else { &self.font };
        let layer = self.layer();
        layer.set_fill_color(color(fill));
        layer.use_text(s, size, Mm(x), Mm(PAGE_H - y), font);
    }

    fn text_centered(&self, s: &str, y: f32, size: f32, bold: bool, fill: Rgb8) {
        let x = CENTER_X - approx_text_width(s, size) / 2.0;
        self.text(s, x, y, size, bold, fill);
    }

    fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| CardstmtError::Pdf(format!("{e:?}")))?;
        buf.into_inner().map_err(|e| CardstmtError::Pdf(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Statement template
// ---------------------------------------------------------------------------

fn detail_rows(record: &ExtractedRecord) -> Vec<(&'static str, String)> {
    let bank = record.bank_identity();
    let fifth = record.field_or_na(REWARD_POINTS);
    vec![
        ("Available Credit Limit", rupees(&record.field_or_na(CREDIT_LIMIT))),
        ("Available Cash Limit", rupees(&record.field_or_na(CASH_LIMIT))),
        ("Payment Due Date", record.field_or_na(DUE_DATE)),
        ("Total Outstanding", rupees(&record.field_or_na(TOTAL_OUTSTANDING))),
        (
            bank.fifth_field_label(),
            if bank.fifth_field_is_money() { rupees(&fifth) } else { fifth },
        ),
    ]
}

/// Lay out one statement summary on the current page.
fn draw_statement_page(
    pdf: &PdfWriter,
    record: &ExtractedRecord,
    index: usize,
    marker: Option<PageMarker>,
    generated: &str,
) {
    let tag = record.bank_tag();
    let palette = record.bank_identity().palette();
    let document = document_name(&record.file, index);

    // Header band
    pdf.fill_rect(0.0, 0.0, PAGE_W, 45.0, palette.primary);
    pdf.text_centered(&format!("{tag} CREDIT CARD"), 20.0, 24.0, true, WHITE);
    pdf.text_centered("Statement Summary", 32.0, 16.0, false, WHITE);
    if let Some(m) = marker {
        pdf.text_centered(&format!("Page {} of {}", m.page, m.total), 39.0, 10.0, false, WHITE);
    }

    // Document strip
    pdf.fill_rect(15.0, 50.0, 180.0, 12.0, LIGHT_GRAY);
    pdf.text("Document:", 20.0, 57.0, 10.0, true, BLACK);
    pdf.text(&fit_line(&document, DOCUMENT_NAME_CHARS), 45.0, 57.0, 10.0, false, BLACK);

    // Account details panel
    pdf.stroke_rect(15.0, 70.0, 180.0, 120.0, palette.secondary);
    pdf.fill_rect(15.0, 70.0, 180.0, 10.0, palette.primary);
    pdf.text_centered("ACCOUNT DETAILS", 77.0, 12.0, true, WHITE);

    for (i, (label, value)) in detail_rows(record).iter().enumerate() {
        let y = ROW_TOP + i as f32 * ROW_STEP;
        if i % 2 == 0 {
            pdf.fill_rect(16.0, y - 5.0, 170.0, 12.0, ZEBRA);
        }
        pdf.text(label, LABEL_X, y, 11.0, true, BLACK);
        pdf.text(value, VALUE_X, y, 11.0, false, BLACK);
    }

    // Notice
    pdf.fill_rect(15.0, NOTICE_Y, 180.0, 25.0, NOTICE_FILL);
    pdf.stroke_rect(15.0, NOTICE_Y, 180.0, 25.0, NOTICE_BORDER);
    pdf.text("IMPORTANT:", 20.0, NOTICE_Y + 7.0, 9.0, true, NOTICE_TEXT);
    pdf.text(
        "Please ensure timely payment to avoid late fees and maintain good credit score.",
        20.0,
        NOTICE_Y + 14.0,
        9.0,
        false,
        NOTICE_TEXT,
    );
    pdf.text(
        &format!("For queries, contact {tag} Credit Card customer care."),
        20.0,
        NOTICE_Y + 20.0,
        9.0,
        false,
        NOTICE_TEXT,
    );

    // Footer
    pdf.fill_rect(0.0, 270.0, PAGE_W, 27.0, DARK_GRAY);
    pdf.text_centered(
        "This is a computer-generated document. No signature required.",
        280.0,
        8.0,
        false,
        WHITE,
    );
    pdf.text_centered(&format!("Generated on: {generated}"), 286.0, 8.0, false, WHITE);
    pdf.text_centered(
        "(c) 2025 Credit Statement Parser - All Rights Reserved",
        291.0,
        7.0,
        false,
        WHITE,
    );
}

// ---------------------------------------------------------------------------
// Render functions
// ---------------------------------------------------------------------------

/// `index` is the record's position in the store, used to name untitled statements.
pub fn render_one(
    record: &ExtractedRecord,
    index: usize,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let pdf = PdfWriter::new(&format!("{} Statement Summary", record.bank_tag()))?;
    draw_statement_page(&pdf, record, index, None, &ist_timestamp(generated_at));
    pdf.to_bytes()
}

pub fn render_all(records: &[ExtractedRecord], generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Err(CardstmtError::Pdf("no statements to export".into()));
    }
    let generated = ist_timestamp(generated_at);
    let total = records.len();
    let mut pdf = PdfWriter::new("Statement Summaries")?;
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            pdf.new_page();
        }
        let marker = PageMarker { page: i + 1, total };
        draw_statement_page(&pdf, record, i, Some(marker), &generated);
    }
    pdf.to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 10, 15, 30).unwrap()
    }

    /// Largest `/Count` in the file, i.e. the root page tree's page count.
    fn page_count(bytes: &[u8]) -> Option<usize> {
        let text = String::from_utf8_lossy(bytes);
        text.split("/Count")
            .skip(1)
            .filter_map(|rest| {
                let digits: String = rest
                    .trim_start()
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                digits.parse().ok()
            })
            .max()
    }

    fn sbi() -> ExtractedRecord {
        ExtractedRecord::new("Jan.pdf", Some("SBI"))
            .with_field(CREDIT_LIMIT, "50,000.00")
            .with_field(REWARD_POINTS, "120")
    }

    #[test]
    fn test_render_one_produces_pdf() {
        let bytes = render_one(&sbi(), 0, at()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_one_with_unknown_bank_and_no_fields() {
        let record = ExtractedRecord::new("", None);
        let bytes = render_one(&record, 4, at()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_all_produces_multipage_pdf() {
        let records = vec![
            sbi(),
            ExtractedRecord::new("Feb.pdf", Some("HDFC")).with_field(REWARD_POINTS, "2,500"),
            ExtractedRecord::new("Mar.pdf", Some("KOTAK")),
        ];
        let single = render_one(&records[0], 0, at()).unwrap();
        let combined = render_all(&records, at()).unwrap();
        assert!(combined.starts_with(b"%PDF"));
        assert_eq!(page_count(&single), Some(1));
        assert_eq!(page_count(&combined), Some(3));
    }

    #[test]
    fn test_render_all_rejects_empty() {
        assert!(render_all(&[], at()).is_err());
    }

    #[test]
    fn test_render_all_one_page_per_record() {
        let records: Vec<ExtractedRecord> = (1..=5)
            .map(|i| ExtractedRecord::new(&format!("m{i}.pdf"), Some("SBI")))
            .collect();
        let combined = render_all(&records, at()).unwrap();
        assert_eq!(page_count(&combined), Some(5));
    }

    #[test]
    fn test_detail_rows_hdfc_fifth_is_money() {
        let record = ExtractedRecord::new("Feb.pdf", Some("HDFC")).with_field(REWARD_POINTS, "2,500");
        let rows = detail_rows(&record);
        assert_eq!(rows[4], ("Minimum Amount Due", "Rs. 2,500".to_string()));
        assert_eq!(rows[2], ("Payment Due Date", "N/A".to_string()));
        assert_eq!(rows[0], ("Available Credit Limit", "Rs. N/A".to_string()));
    }

    #[test]
    fn test_detail_rows_reward_points_plain() {
        let rows = detail_rows(&sbi());
        assert_eq!(rows[4], ("Reward Points Earned", "120".to_string()));
        assert_eq!(rows[0].1, "Rs. 50,000.00");
    }

    #[test]
    fn test_fit_line_truncates_long_names() {
        assert_eq!(fit_line("Jan.pdf", 80), "Jan.pdf");
        let long = "statement ".repeat(20);
        let fitted = fit_line(&long, 30);
        assert!(fitted.ends_with("..."));
        assert!(fitted.len() <= 33);
    }
}
