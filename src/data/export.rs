use serde::{Deserialize, Serialize};

use super::model::{Field, Record};
use super::sort::{sort_records, SortSpec};
use crate::error::ExportError;

/// Suggested file name for a table export.
pub const EXPORT_FILE_NAME: &str = "plant_data.csv";

/// How cell values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Values are joined as-is. A value containing the delimiter or a
    /// newline corrupts the row.
    #[default]
    None,
    /// RFC 4180: fields holding the delimiter, a quote or a line break are
    /// wrapped in quotes with inner quotes doubled.
    Rfc4180,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: u8,
    pub quoting: Quoting,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { delimiter: b',', quoting: Quoting::None }
    }
}

/// Serialize every record in the given sort order as comma-joined text.
///
/// Search and pagination are ignored. Zero records produce an empty string.
pub fn export_delimited(records: &[Record], sort: SortSpec) -> String {
    let rows = sort_records(records, sort);
    join_rows(&rows, ',')
}

/// Like [`export_delimited`] with an explicit delimiter and quoting style.
pub fn export_with(
    records: &[Record],
    sort: SortSpec,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let rows = sort_records(records, sort);
    export_rows(&rows, options)
}

/// Serialize rows that are already in display order.
pub fn export_rows(rows: &[&Record], options: &ExportOptions) -> Result<String, ExportError> {
    if !options.delimiter.is_ascii() {
        return Err(ExportError::InvalidDelimiter(options.delimiter));
    }
    match options.quoting {
        Quoting::None => Ok(join_rows(rows, char::from(options.delimiter))),
        Quoting::Rfc4180 => write_quoted(rows, options.delimiter),
    }
}

fn join_rows(rows: &[&Record], delimiter: char) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let sep = delimiter.to_string();
    let sep = sep.as_str();
    let header = Field::ALL.map(Field::key).join(sep);
    let lines = rows.iter().map(|rec| {
        Field::ALL
            .iter()
            .map(|&f| rec.get(f).to_string())
            .collect::<Vec<_>>()
            .join(sep)
    });
    std::iter::once(header).chain(lines).collect::<Vec<_>>().join("\n")
}

fn write_quoted(rows: &[&Record], delimiter: u8) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Ok(String::new());
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(Field::ALL.map(Field::key))?;
    for rec in rows {
        writer.write_record(Field::ALL.map(|f| rec.get(f).to_string()))?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes)?;
    // Rows are joined by the terminator, not followed by it.
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sort::SortDirection;

    fn rec(day: &str, height: f64) -> Record {
        Record {
            day: day.to_string(),
            height,
            biomass: 80.0,
            leaf_temp: 31.2,
            humidity: 60.0,
            growth_rate: 2.2,
        }
    }

    #[test]
    fn empty_records_export_nothing() {
        assert_eq!(export_delimited(&[], SortSpec::default()), "");
        let quoted = ExportOptions { quoting: Quoting::Rfc4180, ..Default::default() };
        assert_eq!(export_with(&[], SortSpec::default(), &quoted).unwrap(), "");
    }

    #[test]
    fn plain_export_joins_header_and_rows() {
        let records = vec![rec("D2", 34.0), rec("D1", 30.0)];
        let text = export_delimited(&records, SortSpec::default());
        assert_eq!(
            text,
            "day,height,biomass,leafTemp,humidity,growthRate\n\
             D1,30,80,31.2,60,2.2\n\
             D2,34,80,31.2,60,2.2"
        );
    }

    #[test]
    fn export_follows_sort_order() {
        let records = vec![rec("D1", 30.0), rec("D2", 34.0)];
        let sort = SortSpec::new(Field::Height, SortDirection::Descending);
        let text = export_delimited(&records, sort);
        let days: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(days, vec!["D2", "D1"]);
    }

    #[test]
    fn plain_export_does_not_escape_delimiters() {
        let records = vec![rec("D1,late", 30.0)];
        let text = export_delimited(&records, SortSpec::default());
        assert_eq!(text.lines().nth(1).unwrap().split(',').count(), 7);
    }

    #[test]
    fn rfc4180_quotes_fields_that_need_it() {
        let records = vec![rec("D1,late", 30.0), rec("say \"hi\"", 31.0)];
        let options = ExportOptions { delimiter: b',', quoting: Quoting::Rfc4180 };
        let text = export_with(&records, SortSpec::default(), &options).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "day,height,biomass,leafTemp,humidity,growthRate");
        assert_eq!(lines[1], "\"D1,late\",30,80,31.2,60,2.2");
        assert_eq!(lines[2], "\"say \"\"hi\"\"\",31,80,31.2,60,2.2");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn custom_delimiter_is_used() {
        let records = vec![rec("D1", 30.0)];
        let options = ExportOptions { delimiter: b';', quoting: Quoting::None };
        let text = export_with(&records, SortSpec::default(), &options).unwrap();
        assert!(text.starts_with("day;height;"));
        assert!(text.ends_with("D1;30;80;31.2;60;2.2"));
    }

    #[test]
    fn non_ascii_delimiter_is_rejected_in_both_modes() {
        let records = vec![rec("D1", 30.0)];
        for quoting in [Quoting::None, Quoting::Rfc4180] {
            let options = ExportOptions { delimiter: 0xA7, quoting };
            assert!(matches!(
                export_with(&records, SortSpec::default(), &options),
                Err(ExportError::InvalidDelimiter(0xA7))
            ));
        }
    }

    #[test]
    fn extreme_values_export_in_exponent_form() {
        let records = vec![Record {
            day: "D1".to_string(),
            height: -0.0,
            biomass: 1e21,
            leaf_temp: 1e-7,
            humidity: 1.0,
            growth_rate: 1.0,
        }];
        let text = export_delimited(&records, SortSpec::default());
        assert_eq!(text.lines().nth(1), Some("D1,0,1e+21,1e-7,1,1"));
        // The search text form is the same, so the exported cell is searchable.
        assert!(crate::data::filter::matches_search(&records[0], "1e+21"));
    }
}
