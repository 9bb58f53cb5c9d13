use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const CREDIT_LIMIT: &str = "Available Credit Limit";
pub const CASH_LIMIT: &str = "Available Cash Limit";
pub const DUE_DATE: &str = "Payment Due Date";
pub const TOTAL_OUTSTANDING: &str = "Total Outstanding";
/// Backs the fifth slot for every bank, whatever label is shown over it.
pub const REWARD_POINTS: &str = "Reward Points Earned";

pub const UNKNOWN_BANK: &str = "UNKNOWN";
pub const NOT_AVAILABLE: &str = "N/A";

/// One statement's fields as returned by the extraction service.
///
/// `File` is the record key. Every other key the service sends is kept
/// verbatim in `fields`, so persisting and restoring never drops data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(rename = "File", default)]
    pub file: String,
    #[serde(rename = "Bank", default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl ExtractedRecord {
    #[cfg(test)]
    pub fn new(file: &str, bank: Option<&str>) -> Self {
        Self {
            file: file.to_string(),
            bank: bank.map(str::to_string),
            fields: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::Value::String(value.to_string()));
        self
    }

    /// Bank tag as displayed; absent or blank becomes `UNKNOWN`.
    pub fn bank_tag(&self) -> &str {
        match self.bank.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => tag,
            _ => UNKNOWN_BANK,
        }
    }

    pub fn bank_identity(&self) -> Bank {
        Bank::from_tag(self.bank_tag())
    }

    /// Field value if present and non-empty. Numbers are accepted as text.
    pub fn field(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn field_or_na(&self, key: &str) -> String {
        self.field(key).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb8,
    pub secondary: Rgb8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    Sbi,
    Hdfc,
    Icici,
    Axis,
    Kotak,
    Unknown,
}

impl Bank {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "SBI" => Bank::Sbi,
            "HDFC" => Bank::Hdfc,
            "ICICI" => Bank::Icici,
            "AXIS" => Bank::Axis,
            "KOTAK" => Bank::Kotak,
            _ => Bank::Unknown,
        }
    }

    pub fn palette(self) -> Palette {
        let (primary, secondary) = match self {
            Bank::Sbi => (Rgb8(25, 118, 210), Rgb8(13, 71, 161)),
            Bank::Hdfc => (Rgb8(211, 47, 47), Rgb8(183, 28, 28)),
            Bank::Icici => (Rgb8(245, 124, 0), Rgb8(230, 81, 0)),
            Bank::Axis => (Rgb8(123, 31, 162), Rgb8(74, 20, 140)),
            Bank::Kotak => (Rgb8(198, 40, 40), Rgb8(148, 0, 0)),
            Bank::Unknown => (Rgb8(117, 117, 117), Rgb8(66, 66, 66)),
        };
        Palette { primary, secondary }
    }

    /// HDFC statements carry minimum amount due in the fifth slot.
    pub fn fifth_field_label(self) -> &'static str {
        match self {
            Bank::Hdfc => "Minimum Amount Due",
            _ => REWARD_POINTS,
        }
    }

    pub fn fifth_field_is_money(self) -> bool {
        self == Bank::Hdfc
    }
}

/// A PDF waiting in the upload queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFile {
    pub name: String,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_server_shape() {
        let json = r#"{
            "File": "Jan.pdf",
            "Bank": "SBI",
            "Available Credit Limit": "50,000.00",
            "Available Cash Limit": null,
            "Reward Points Earned": 120
        }"#;
        let rec: ExtractedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.file, "Jan.pdf");
        assert_eq!(rec.bank_tag(), "SBI");
        assert_eq!(rec.field(CREDIT_LIMIT).as_deref(), Some("50,000.00"));
        assert_eq!(rec.field(CASH_LIMIT), None);
        assert_eq!(rec.field(REWARD_POINTS).as_deref(), Some("120"));
        assert_eq!(rec.field_or_na(DUE_DATE), "N/A");
    }

    #[test]
    fn test_record_serializes_with_original_keys() {
        let rec = ExtractedRecord::new("Feb.pdf", Some("HDFC")).with_field(TOTAL_OUTSTANDING, "1,200");
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["File"], "Feb.pdf");
        assert_eq!(value["Bank"], "HDFC");
        assert_eq!(value[TOTAL_OUTSTANDING], "1,200");
    }

    #[test]
    fn test_blank_or_missing_bank_is_unknown() {
        assert_eq!(ExtractedRecord::new("a.pdf", None).bank_tag(), UNKNOWN_BANK);
        assert_eq!(ExtractedRecord::new("a.pdf", Some("  ")).bank_tag(), UNKNOWN_BANK);
        assert_eq!(
            ExtractedRecord::new("a.pdf", Some("CITI")).bank_identity(),
            Bank::Unknown
        );
    }

    #[test]
    fn test_fifth_label_switches_on_hdfc_only() {
        assert_eq!(Bank::Hdfc.fifth_field_label(), "Minimum Amount Due");
        assert_eq!(Bank::Sbi.fifth_field_label(), "Reward Points Earned");
        assert_eq!(Bank::Unknown.fifth_field_label(), "Reward Points Earned");
    }

    #[test]
    fn test_unrecognized_bank_uses_gray_palette() {
        let p = Bank::from_tag("Citibank").palette();
        assert_eq!(p.primary, Rgb8(117, 117, 117));
        assert_eq!(p.secondary, Rgb8(66, 66, 66));
    }
}
