use std::fs;

use slap_lookup::{LookupStore, StoreError};
use slap_model::{LookupKey, LookupName};
use tempfile::TempDir;

fn store_with(files: &[(&str, &str)]) -> (TempDir, LookupStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write lookup");
    }
    let store = LookupStore::new(dir.path());
    (dir, store)
}

#[test]
fn loads_single_key_table() {
    let (_dir, store) = store_with(&[(
        "zsex.csv",
        "ZSEXID,SHORTDESC\n1,\"Male\"\n2,\"Female\"\n",
    )]);
    let table = store.load(LookupName::Sex).expect("load sex");

    assert_eq!(table.len(), 2);
    assert_eq!(table.key_columns(), ["ZSEXID"]);
    let male = table.get_code("1").expect("male row");
    assert_eq!(male.flat_description(), Some("Male"));
    assert!(table.get_code("9").is_none());
}

#[test]
fn missing_file_is_not_found_with_expected_path() {
    let (dir, store) = store_with(&[]);
    let err = store.load(LookupName::Grade).unwrap_err();
    match err {
        StoreError::NotFound { name, path } => {
            assert_eq!(name, LookupName::Grade);
            assert_eq!(path, dir.path().join("zgrade.csv"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn codes_keep_leading_zeros() {
    let (_dir, store) = store_with(&[(
        "zethnicity.csv",
        "ZETHNICITYID,SHORTDESC\n0,Zero\n00,Double zero\n07,Seven\n",
    )]);
    let table = store.load(LookupName::Ethnicity).expect("load");

    assert_eq!(table.len(), 3);
    assert_eq!(
        table.get_code("07").and_then(|r| r.flat_description()),
        Some("Seven")
    );
    assert!(table.get_code("7").is_none());
    assert_eq!(
        table.get_code("00").and_then(|r| r.flat_description()),
        Some("Double zero")
    );
}

#[test]
fn composite_table_is_keyed_on_both_columns() {
    let (_dir, store) = store_with(&[(
        "zhistologylookup.csv",
        "ZMORPHOLOGYID,ZBEHAVIOURID,DESCRIPTION\n8140,3,Adenocarcinoma\n8140,2,Adenocarcinoma in situ\n",
    )]);
    let table = store.load(LookupName::HistologyLookup).expect("load");

    assert_eq!(table.len(), 2);
    let record = table
        .get(&LookupKey::composite("8140", "2"))
        .expect("in situ row");
    assert_eq!(record.composite_description(), Some("Adenocarcinoma in situ"));
}

#[test]
fn duplicate_keys_keep_first_row() {
    let (_dir, store) = store_with(&[(
        "zstage.csv",
        "ZSTAGEID,SHORTDESC\n1,Stage 1\n1,Stage one\n2,Stage 2\n",
    )]);
    let table = store.load(LookupName::Stage).expect("load");

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.get_code("1").and_then(|r| r.flat_description()),
        Some("Stage 1")
    );
}

#[test]
fn rejects_file_without_key_column() {
    let (_dir, store) = store_with(&[("zsex.csv", "CODE,SHORTDESC\n1,Male\n")]);
    let err = store.load(LookupName::Sex).unwrap_err();
    assert!(
        matches!(err, StoreError::MissingKeyColumn { ref column, .. } if column == "ZSEXID"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn rejects_file_without_description_column() {
    let (_dir, store) = store_with(&[("zsex.csv", "ZSEXID,LABEL\n1,Male\n")]);
    let err = store.load(LookupName::Sex).unwrap_err();
    assert!(matches!(err, StoreError::MissingDescriptionColumn { .. }));
}

#[test]
fn extra_columns_are_kept_as_fields() {
    let (_dir, store) = store_with(&[(
        "zicdfull.csv",
        "ZICDFULLID,ICD_GROUP,ICD_GROUP_DESC,SHORTDESC\nC500,C50,Breast,Nipple\n",
    )]);
    let table = store.load(LookupName::IcdFull).expect("load");
    let record = table.get_code("C500").expect("row");
    assert_eq!(record.field("ICD_GROUP_DESC"), Some("Breast"));
    assert_eq!(record.field("ZICDFULLID"), None);
    assert_eq!(
        table.columns(),
        ["ZICDFULLID", "ICD_GROUP", "ICD_GROUP_DESC", "SHORTDESC"]
    );
}

#[test]
fn strips_byte_order_mark_and_padding() {
    let (_dir, store) = store_with(&[("zsex.csv", "\u{feff}ZSEXID, SHORTDESC\n 1 , Male \n")]);
    let table = store.load(LookupName::Sex).expect("load sex");

    assert_eq!(table.key_columns(), ["ZSEXID"]);
    let male = table.get_code("1").expect("male row");
    assert_eq!(male.flat_description(), Some("Male"));
}

#[test]
fn custom_prefix_changes_file_name() {
    let (dir, store) = store_with(&[("lk_sex.csv", "ZSEXID,SHORTDESC\n1,Male\n")]);
    let store = store.with_prefix("lk_");
    assert_eq!(store.prefix(), "lk_");
    assert_eq!(store.path_for(LookupName::Sex), dir.path().join("lk_sex.csv"));
    assert!(store.load(LookupName::Sex).is_ok());

    let status = store.status();
    assert_eq!(status.len(), LookupName::ALL.len());
    let present: Vec<_> = status.iter().filter(|s| s.present).map(|s| s.name).collect();
    assert_eq!(present, vec![LookupName::Sex]);
}
