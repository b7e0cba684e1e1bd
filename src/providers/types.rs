//! Common dashboard domain types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unit suffix attached to a ratio metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    None,
    Percent,
    Billions,
    Multiple,
}

impl Unit {
    /// Display suffix, concatenated directly after the raw value
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Percent => "%",
            Unit::Billions => "B",
            Unit::Multiple => "x",
        }
    }
}

/// Direction a metric has been moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// Marker the frontend renders for this direction; there is no third state
    pub fn marker(&self) -> TrendMarker {
        match self {
            TrendDirection::Up => TrendMarker::Positive,
            TrendDirection::Down => TrendMarker::Negative,
        }
    }
}

/// Trend marker rendered next to a value (arrow icon, chip color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMarker {
    Positive,
    Negative,
}

impl TrendMarker {
    /// Marker for a signed change value; zero counts as positive
    pub fn from_change(change: f64) -> Self {
        if change >= 0.0 {
            TrendMarker::Positive
        } else {
            TrendMarker::Negative
        }
    }
}

/// One row of a ratio statement table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRow {
    pub metric: String,
    pub company_value: f64,
    /// Never zero; variance computation divides by it
    pub industry_average: f64,
    pub unit: Unit,
    pub trend: TrendDirection,
}

/// Financial statement backing one ratio-dashboard tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl StatementKind {
    /// Table title shown above the statement's ratio rows
    pub fn title(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "Balance Sheet Ratios",
            StatementKind::IncomeStatement => "Income Statement Ratios",
            StatementKind::CashFlow => "Cash Flow Ratios",
        }
    }
}

/// One equity in the screener universe; `symbol` is the stable row key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityRecord {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub market_cap_billions: f64,
    pub pe_ratio: f64,
    pub dividend_yield_percent: f64,
    pub price_usd: f64,
    pub daily_change_percent: f64,
}

/// Company header resolved for the ratio dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    pub name: String,
    pub sector: String,
}

impl From<&EquityRecord> for CompanyProfile {
    fn from(record: &EquityRecord) -> Self {
        CompanyProfile {
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            sector: record.sector.clone(),
        }
    }
}

/// Kind of a managed workspace file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Excel,
    Pdf,
    Csv,
    Ppt,
    Doc,
    Other,
}

impl FileKind {
    /// Classify by file-name extension; anything unrecognized is `Other`
    pub fn from_file_name(name: &str) -> Self {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xls" => FileKind::Excel,
            "pdf" => FileKind::Pdf,
            "csv" => FileKind::Csv,
            "pptx" | "ppt" => FileKind::Ppt,
            "docx" | "doc" => FileKind::Doc,
            _ => FileKind::Other,
        }
    }

    /// Icon descriptor lookup; unknown kinds fall back to the generic marker
    pub fn icon(&self) -> FileIcon {
        match self {
            FileKind::Excel => FileIcon::new(IconGlyph::Document, IconTone::Success),
            FileKind::Pdf => FileIcon::new(IconGlyph::Document, IconTone::Error),
            FileKind::Csv => FileIcon::new(IconGlyph::GenericFile, IconTone::Neutral),
            FileKind::Ppt => FileIcon::new(IconGlyph::Document, IconTone::Warning),
            FileKind::Doc => FileIcon::new(IconGlyph::Document, IconTone::Info),
            FileKind::Other => FileIcon::new(IconGlyph::GenericFile, IconTone::Default),
        }
    }
}

/// Icon descriptor the frontend maps onto its icon set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIcon {
    pub glyph: IconGlyph,
    pub tone: IconTone,
}

impl FileIcon {
    fn new(glyph: IconGlyph, tone: IconTone) -> Self {
        Self { glyph, tone }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconGlyph {
    Document,
    GenericFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconTone {
    Success,
    Error,
    Warning,
    Info,
    Neutral,
    Default,
}

/// A managed workspace file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub kind: FileKind,
    pub uploaded: NaiveDate,
    pub size_label: String,
    pub starred: bool,
    /// Set only for entries that arrived via the shared tab
    pub shared_by: Option<String>,
}

/// Tabs of the file-management screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilesTab {
    MyFiles,
    SharedWithMe,
    Templates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(Unit::None.suffix(), "");
        assert_eq!(Unit::Percent.suffix(), "%");
        assert_eq!(Unit::Billions.suffix(), "B");
        assert_eq!(Unit::Multiple.suffix(), "x");
    }

    #[test]
    fn test_trend_direction_maps_to_marker() {
        assert_eq!(TrendDirection::Up.marker(), TrendMarker::Positive);
        assert_eq!(TrendDirection::Down.marker(), TrendMarker::Negative);
    }

    #[test]
    fn test_change_marker_treats_zero_as_positive() {
        assert_eq!(TrendMarker::from_change(1.2), TrendMarker::Positive);
        assert_eq!(TrendMarker::from_change(0.0), TrendMarker::Positive);
        assert_eq!(TrendMarker::from_change(-0.5), TrendMarker::Negative);
    }

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_file_name("Q3 Earnings.xlsx"), FileKind::Excel);
        assert_eq!(FileKind::from_file_name("report.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_file_name("holdings.csv"), FileKind::Csv);
        assert_eq!(FileKind::from_file_name("deck.pptx"), FileKind::Ppt);
        assert_eq!(FileKind::from_file_name("thesis.docx"), FileKind::Doc);
    }

    #[test]
    fn test_unknown_extension_falls_back_to_other() {
        assert_eq!(FileKind::from_file_name("archive.tar.gz"), FileKind::Other);
        assert_eq!(FileKind::from_file_name("no_extension"), FileKind::Other);

        let icon = FileKind::Other.icon();
        assert_eq!(icon.glyph, IconGlyph::GenericFile);
        assert_eq!(icon.tone, IconTone::Default);
    }

    #[test]
    fn test_icon_lookup_is_total_over_kinds() {
        // Every kind resolves to a descriptor; document kinds carry a tone.
        assert_eq!(FileKind::Excel.icon().tone, IconTone::Success);
        assert_eq!(FileKind::Pdf.icon().tone, IconTone::Error);
        assert_eq!(FileKind::Ppt.icon().tone, IconTone::Warning);
        assert_eq!(FileKind::Doc.icon().tone, IconTone::Info);
        assert_eq!(FileKind::Csv.icon().glyph, IconGlyph::GenericFile);
    }
}
