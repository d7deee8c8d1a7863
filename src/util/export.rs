//! CSV report export.
//!
//! One CSV file per sheet: the market sheet always, the receipt sheet only
//! when the calculator holds lines. Files land in the platform data
//! directory so desktop sandboxing never blocks the write.

use std::fs;
use std::path::PathBuf;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

use crate::domain::entities::{CalculatorLine, YardPrice};
use crate::domain::valuation;
use crate::util::persistence::{export_dir, PersistSaveError};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A single table ready to serialise.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

pub fn market_sheet(prices: &[YardPrice]) -> Sheet {
    let rows = prices
        .iter()
        .map(|price| {
            vec![
                price.material.clone(),
                price.location.clone(),
                format!("{:.2}", price.price_per_kg),
                format_date(price.date),
                price.trend.label().to_string(),
                format!("{}%", price.change_percentage),
            ]
        })
        .collect();
    Sheet {
        name: "Live Market Prices",
        header: vec!["Material", "Location", "Price (£/kg)", "Date", "Trend", "Change %"],
        rows,
    }
}

/// `None` when there is nothing in the calculator.
pub fn receipt_sheet(catalogue: &[YardPrice], lines: &[CalculatorLine]) -> Option<Sheet> {
    if lines.is_empty() {
        return None;
    }

    let mut rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| {
            let material = valuation::resolve_material(catalogue, &line.material_id)
                .map(|price| price.material.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            let unit = valuation::unit_price(catalogue, line);
            vec![
                material,
                format!("{}", line.weight_kg),
                format!("{:.2}", unit),
                format!("{:.2}", unit * line.weight_kg),
            ]
        })
        .collect();

    let summary = valuation::summarise_load(catalogue, lines);
    rows.push(vec![
        "TOTAL".to_string(),
        format!("{}", summary.total_weight_kg),
        String::new(),
        format!("{:.2}", summary.total_value),
    ]);

    Some(Sheet {
        name: "Load Receipt",
        header: vec!["Material", "Weight (kg)", "Unit Price (£)", "Total (£)"],
        rows,
    })
}

pub fn render_csv(sheet: &Sheet) -> String {
    let mut out = String::new();
    out.push_str(
        &sheet
            .header
            .iter()
            .map(|cell| csv_escape(cell))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');
    for row in &sheet.rows {
        out.push_str(
            &row.iter()
                .map(|cell| csv_escape(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
        out.push('\n');
    }
    out
}

/// Write the report files and return their paths.
pub fn export_report(
    catalogue: &[YardPrice],
    lines: &[CalculatorLine],
    today: Date,
) -> Result<Vec<PathBuf>, PersistSaveError> {
    let dir = export_dir().ok_or(PersistSaveError::StorageUnavailable)?;
    fs::create_dir_all(&dir)?;

    let mut sheets = vec![market_sheet(catalogue)];
    if let Some(receipt) = receipt_sheet(catalogue, lines) {
        sheets.push(receipt);
    }

    let date = format_date(today);
    let mut written = Vec::new();
    for sheet in &sheets {
        let file_name = format!(
            "UK_Scrap_Prices_Report_{date}_{}.csv",
            sheet.name.replace(' ', "_")
        );
        let path = dir.join(file_name);
        fs::write(&path, render_csv(sheet))?;
        tracing::info!("exported {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Trend;
    use time::macros::date;

    fn yard(id: &str, material: &str, price: f64, trend: Trend, change: f64) -> YardPrice {
        YardPrice {
            id: id.to_string(),
            material: material.to_string(),
            location: "Sheffield".to_string(),
            price_per_kg: price,
            date: date!(2025 - 06 - 02),
            trend,
            change_percentage: change,
        }
    }

    fn line(material_id: &str, weight: f64) -> CalculatorLine {
        CalculatorLine {
            id: "abc123def".to_string(),
            material_id: material_id.to_string(),
            weight_kg: weight,
        }
    }

    #[test]
    fn market_sheet_formats_every_column() {
        let sheet = market_sheet(&[yard("shf-braziery-1", "Braziery Copper", 5.1, Trend::Rising, 0.6)]);
        assert_eq!(sheet.name, "Live Market Prices");
        assert_eq!(
            sheet.rows[0],
            vec!["Braziery Copper", "Sheffield", "5.10", "2025-06-02", "UP", "0.6%"]
        );
    }

    #[test]
    fn receipt_sheet_is_absent_without_lines() {
        assert!(receipt_sheet(&[], &[]).is_none());
    }

    #[test]
    fn receipt_ends_with_a_total_row() {
        let catalogue = vec![
            yard("a", "Clean Copper Tube", 5.95, Trend::Flat, 0.0),
            yard("b", "Mixed Brass", 3.65, Trend::Flat, 0.0),
        ];
        let lines = vec![line("a", 10.0), line("b", 20.0)];
        let sheet = receipt_sheet(&catalogue, &lines).unwrap();

        assert_eq!(sheet.rows.len(), 3);
        let total = sheet.rows.last().unwrap();
        assert_eq!(total[0], "TOTAL");
        assert_eq!(total[1], "30");
        assert_eq!(total[3], "132.50");
    }

    #[test]
    fn stale_references_export_as_unknown() {
        let catalogue = vec![yard("a", "Lead Scrap", 1.48, Trend::Flat, 0.0)];
        let lines = vec![line("gone", 5.0)];
        let sheet = receipt_sheet(&catalogue, &lines).unwrap();
        assert_eq!(sheet.rows[0][0], "Unknown");
        assert_eq!(sheet.rows[0][2], "0.00");
    }

    #[test]
    fn csv_quotes_cells_with_commas() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn rendered_csv_has_header_then_rows() {
        let sheet = market_sheet(&[yard("a", "Zinc Diecast", 0.78, Trend::Falling, -1.2)]);
        let csv = render_csv(&sheet);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Material,Location,Price (£/kg),Date,Trend,Change %"
        );
        assert!(lines.next().unwrap().starts_with("Zinc Diecast,Sheffield,0.78,"));
    }
}
