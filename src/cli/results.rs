use colored::{ColoredString, Colorize};
use comfy_table::{Cell, Table};

use crate::cli::open_session;
use crate::error::Result;
use crate::view::{project, Badge, RecordCard, ResultsView};

fn badge(card: &RecordCard) -> ColoredString {
    let label = format!(" {} ", card.bank);
    match card.badge {
        Badge::Blue => label.white().on_blue().bold(),
        Badge::Red => label.white().on_red().bold(),
        Badge::Gray => label.white().on_bright_black().bold(),
    }
}

fn format_card(card: &RecordCard) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    for field in &card.fields {
        table.add_row(vec![Cell::new(&field.label), Cell::new(&field.value)]);
    }
    format!("{}  {}\n{table}", card.title.bold(), badge(card))
}

pub fn format_results(view: &ResultsView) -> String {
    if view.total == 0 {
        return "No processed statements yet. Queue PDFs with `cardstmt queue add` and run `cardstmt submit`."
            .to_string();
    }
    let mut out = vec![
        format!("Total Processed Files: {}", view.total).bold().to_string(),
        view.summary_line.clone(),
        "You can add more files and process them to merge with these results".dimmed().to_string(),
    ];
    for card in &view.cards {
        out.push(String::new());
        out.push(format_card(card));
    }
    if view.export_all {
        out.push(String::new());
        out.push("Export one: cardstmt export <file>   Export all: cardstmt export --all".to_string());
    }
    out.join("\n")
}

pub fn run(json: bool) -> Result<()> {
    let (session, _) = open_session();
    let records = session.store.records();
    let view = project(records);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }
    if !records.is_empty() {
        eprintln!("Restored {} previously processed file(s)", records.len());
    }
    println!("{}", format_results(&view));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtractedRecord, REWARD_POINTS};

    #[test]
    fn test_format_results_empty() {
        let out = format_results(&project(&[]));
        assert!(out.starts_with("No processed statements yet"));
    }

    #[test]
    fn test_format_results_lists_summary_and_cards() {
        colored::control::set_override(false);
        let records = vec![
            ExtractedRecord::new("Jan.pdf", Some("SBI")),
            ExtractedRecord::new("Feb.pdf", Some("SBI")),
            ExtractedRecord::new("Mar.pdf", Some("HDFC")).with_field(REWARD_POINTS, "900"),
        ];
        let out = format_results(&project(&records));
        assert!(out.contains("Total Processed Files: 3"));
        assert!(out.contains("SBI: 2 | HDFC: 1"));
        assert!(out.contains("Mar.pdf"));
        assert!(out.contains("Minimum Amount Due (Rs.)"));
        assert!(out.contains("900"));
        assert!(out.contains("N/A"));
        assert!(out.contains("cardstmt export --all"));
    }
}
