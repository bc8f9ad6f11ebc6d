use medicine_dashboard::{DashboardError, load_dataset};
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_sample_file() {
    let file = csv_file(
        "Medicine,Price,Dosage,Quantity,Category\n\
         Paracetamol,12,500,120,Pain Relief\n\
         Amoxicillin,45.5,250,60,Antibiotic\n",
    );
    let data = load_dataset(file.path()).unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data.origin(), file.path());
    assert_eq!(data.records()[0].name, "Paracetamol");
    assert_eq!(data.records()[0].category, "Pain Relief");
    assert_eq!(data.records()[1].price, 45.5);
    assert_eq!(data.price_bounds(), Some((12.0, 45.5)));
    assert_eq!(data.distinct_categories(), vec!["Pain Relief", "Antibiotic"]);
}

#[test]
fn extra_columns_and_reordered_headers_are_accepted() {
    let file = csv_file(
        "Category,Supplier,Quantity,Medicine,Dosage,Price\n\
         Fever,Acme,40,Aspirin,100,5\n",
    );
    let data = load_dataset(file.path()).unwrap();
    let record = &data.records()[0];
    assert_eq!(record.name, "Aspirin");
    assert_eq!(record.price, 5.0);
    assert_eq!(record.dosage, 100.0);
    assert_eq!(record.quantity, 40);
    assert_eq!(record.category, "Fever");
}

#[test]
fn header_only_file_is_an_empty_dataset() {
    let file = csv_file("Medicine,Price,Dosage,Quantity,Category\n");
    let data = load_dataset(file.path()).unwrap();
    assert!(data.is_empty());
    assert_eq!(data.price_bounds(), None);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dataset(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, DashboardError::Io { .. }), "got {err:?}");
}

#[test]
fn missing_columns_are_all_reported() {
    let file = csv_file("Medicine,Price,Category\nAspirin,5,Fever\n");
    match load_dataset(file.path()).unwrap_err() {
        DashboardError::Schema { missing, .. } => {
            assert_eq!(missing, vec!["Dosage".to_string(), "Quantity".to_string()]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn empty_file_is_schema_error() {
    let file = csv_file("");
    let err = load_dataset(file.path()).unwrap_err();
    assert!(matches!(err, DashboardError::Schema { ref missing, .. } if missing.len() == 5));
}

#[test]
fn non_numeric_price_names_the_line() {
    let file = csv_file(
        "Medicine,Price,Dosage,Quantity,Category\n\
         Aspirin,5,100,40,Fever\n\
         Ibuprofen,cheap,200,15,Pain\n",
    );
    match load_dataset(file.path()).unwrap_err() {
        DashboardError::Parse { line, .. } => assert_eq!(line, 3),
        other => panic!("expected parse error, got {other:?}"),
    }
}
