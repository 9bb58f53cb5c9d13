//! Results view model: a pure projection of the store, rendered elsewhere.

use serde::Serialize;

use crate::models::{
    Bank, ExtractedRecord, CASH_LIMIT, CREDIT_LIMIT, DUE_DATE, REWARD_POINTS, TOTAL_OUTSTANDING,
    UNKNOWN_BANK,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Blue,
    Red,
    Gray,
}

impl Badge {
    pub fn for_bank(tag: &str) -> Self {
        match tag {
            "SBI" => Badge::Blue,
            "HDFC" => Badge::Red,
            _ => Badge::Gray,
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            Badge::Blue => "#1976d2",
            Badge::Red => "#d32f2f",
            Badge::Gray => "#757575",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordCard {
    pub title: String,
    pub bank: String,
    pub badge: Badge,
    pub badge_color: &'static str,
    pub fields: Vec<FieldRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankCount {
    pub bank: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub total: usize,
    pub bank_counts: Vec<BankCount>,
    pub summary_line: String,
    pub cards: Vec<RecordCard>,
    pub export_all: bool,
}

/// Per-bank counts in first-seen order.
pub fn bank_counts(records: &[ExtractedRecord]) -> Vec<BankCount> {
    let mut counts: Vec<BankCount> = Vec::new();
    for record in records {
        let tag = record.bank_tag();
        match counts.iter_mut().find(|c| c.bank == tag) {
            Some(c) => c.count += 1,
            None => counts.push(BankCount {
                bank: tag.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

pub fn summary_line(counts: &[BankCount]) -> String {
    counts
        .iter()
        .map(|c| format!("{}: {}", c.bank, c.count))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// The five fields of a card in display order. The fifth label follows the
/// bank; its value is always the reward-points key.
pub fn card_fields(record: &ExtractedRecord) -> Vec<FieldRow> {
    let fifth = match record.bank_identity() {
        Bank::Hdfc => "Minimum Amount Due (Rs.)",
        _ => REWARD_POINTS,
    };
    [
        ("Available Credit Limit (Rs.)", CREDIT_LIMIT),
        ("Available Cash Limit (Rs.)", CASH_LIMIT),
        ("Payment Due Date", DUE_DATE),
        ("Total Outstanding (Rs.)", TOTAL_OUTSTANDING),
        (fifth, REWARD_POINTS),
    ]
    .into_iter()
    .map(|(label, key)| FieldRow {
        label: label.to_string(),
        value: record.field_or_na(key),
    })
    .collect()
}

pub fn card(record: &ExtractedRecord) -> RecordCard {
    let title = if record.file.is_empty() {
        "Statement".to_string()
    } else {
        record.file.clone()
    };
    let bank = record.bank_tag().to_string();
    let badge = Badge::for_bank(&bank);
    RecordCard {
        title,
        badge,
        badge_color: badge.hex(),
        bank,
        fields: card_fields(record),
    }
}

pub fn project(records: &[ExtractedRecord]) -> ResultsView {
    let counts = bank_counts(records);
    ResultsView {
        total: records.len(),
        summary_line: summary_line(&counts),
        bank_counts: counts,
        cards: records.iter().map(card).collect(),
        export_all: !records.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(file: &str, bank: Option<&str>) -> ExtractedRecord {
        ExtractedRecord::new(file, bank)
    }

    #[test]
    fn test_summary_counts_in_first_seen_order() {
        let records = vec![
            rec("a.pdf", Some("SBI")),
            rec("b.pdf", Some("SBI")),
            rec("c.pdf", Some("HDFC")),
        ];
        let view = project(&records);
        assert_eq!(view.summary_line, "SBI: 2 | HDFC: 1");
        assert_eq!(view.total, 3);
        assert!(view.export_all);
    }

    #[test]
    fn test_blank_bank_counts_as_unknown() {
        let records = vec![rec("a.pdf", None), rec("b.pdf", Some("")), rec("c.pdf", Some("SBI"))];
        assert_eq!(project(&records).summary_line, format!("{UNKNOWN_BANK}: 2 | SBI: 1"));
    }

    #[test]
    fn test_empty_view() {
        let view = project(&[]);
        assert_eq!(view.total, 0);
        assert!(view.summary_line.is_empty());
        assert!(view.cards.is_empty());
        assert!(!view.export_all);
    }

    #[test]
    fn test_card_fields_fixed_order_with_placeholders() {
        let record = rec("Jan.pdf", Some("SBI"))
            .with_field(CREDIT_LIMIT, "50000")
            .with_field(REWARD_POINTS, "120");
        let c = card(&record);
        let labels: Vec<&str> = c.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Available Credit Limit (Rs.)",
                "Available Cash Limit (Rs.)",
                "Payment Due Date",
                "Total Outstanding (Rs.)",
                "Reward Points Earned",
            ]
        );
        let values: Vec<&str> = c.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["50000", "N/A", "N/A", "N/A", "120"]);
        assert_eq!(c.badge, Badge::Blue);
    }

    #[test]
    fn test_hdfc_relabels_fifth_field_but_reads_same_key() {
        let record = rec("Feb.pdf", Some("HDFC")).with_field(REWARD_POINTS, "2,500.00");
        let c = card(&record);
        assert_eq!(c.fields[4].label, "Minimum Amount Due (Rs.)");
        assert_eq!(c.fields[4].value, "2,500.00");
        assert_eq!(c.badge, Badge::Red);
    }

    #[test]
    fn test_untitled_record_and_other_banks_are_gray() {
        let c = card(&rec("", Some("AXIS")));
        assert_eq!(c.title, "Statement");
        assert_eq!(c.badge, Badge::Gray);
        assert_eq!(c.badge_color, "#757575");
    }
}
