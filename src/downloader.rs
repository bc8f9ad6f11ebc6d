use crate::error::{DashboardError, Result};
use crate::medicine::{MedicineRecord, REQUIRED_COLUMNS};

/// Convert table rows to CSV format
///
/// The header row uses the dataset column names, so an exported file can be
/// loaded back as a dataset.
///
/// # Arguments
/// * `rows` - Filtered table rows, in display order
///
/// # Returns
/// * `Result<String>` - CSV content or `DashboardError::Export`
///
/// # Examples
/// ```
/// use medicine_dashboard::MedicineRecord;
/// use medicine_dashboard::downloader::to_csv;
///
/// let rows = vec![MedicineRecord::new("Aspirin", 5.0, 100.0, 40, "Fever")];
/// let csv = to_csv(&rows).unwrap();
/// assert_eq!(csv, "Medicine,Price,Dosage,Quantity,Category\nAspirin,5.0,100.0,40,Fever\n");
/// ```
pub fn to_csv(rows: &[MedicineRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    // Header is written explicitly so an empty table still has one
    writer
        .write_record(REQUIRED_COLUMNS)
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    for row in rows {
        writer
            .write_record(&[
                row.name.clone(),
                format_number(row.price),
                format_number(row.dosage),
                row.quantity.to_string(),
                row.category.clone(),
            ])
            .map_err(|e| DashboardError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DashboardError::Export(e.to_string()))
}

/// Convert table rows to XLSX format
///
/// Writes a single worksheet with a bold header row followed by one row per
/// record. Numbers are stored as numeric cells.
///
/// # Arguments
/// * `rows` - Filtered table rows, in display order
///
/// # Returns
/// * `Result<Vec<u8>>` - XLSX file content or `DashboardError::Export`
#[cfg(feature = "web")]
pub fn to_xlsx(rows: &[MedicineRecord]) -> Result<Vec<u8>> {
    use rust_xlsxwriter::{Format, Workbook};

    let export = |e: rust_xlsxwriter::XlsxError| DashboardError::Export(e.to_string());

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in REQUIRED_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &bold)
            .map_err(export)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.name).map_err(export)?;
        worksheet.write_number(r, 1, row.price).map_err(export)?;
        worksheet.write_number(r, 2, row.dosage).map_err(export)?;
        worksheet
            .write_number(r, 3, row.quantity as f64)
            .map_err(export)?;
        worksheet.write_string(r, 4, &row.category).map_err(export)?;
    }

    workbook.save_to_buffer().map_err(export)
}

/// Render a float the way the loader reads it back: always with a decimal part
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn empty_table_still_has_header() {
        assert_eq!(to_csv(&[]).unwrap(), "Medicine,Price,Dosage,Quantity,Category\n");
    }

    #[test]
    fn quotes_fields_with_commas() {
        let rows = vec![MedicineRecord::new("Cough syrup, 100ml", 7.25, 10.0, 3, "Cold")];
        let csv = to_csv(&rows).unwrap();
        assert!(csv.contains("\"Cough syrup, 100ml\",7.25,10.0,3,Cold"));
    }

    #[test]
    fn exported_csv_loads_back() {
        let rows = vec![
            MedicineRecord::new("A", 10.0, 5.0, 2, "Pain"),
            MedicineRecord::new("B", 50.5, 10.0, 1, "Fever"),
        ];
        let csv = to_csv(&rows).unwrap();
        let data = Dataset::from_reader(csv.as_bytes(), "export.csv").unwrap();
        assert_eq!(data.records(), rows.as_slice());
    }

    #[cfg(feature = "web")]
    #[test]
    fn xlsx_is_a_zip_container() {
        let rows = vec![MedicineRecord::new("A", 10.0, 5.0, 2, "Pain")];
        let bytes = to_xlsx(&rows).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
