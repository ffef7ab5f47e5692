use std::fs;

use slap_etl::{
    EtlError, SqlSource, convert_icd_file, convert_morphology_file, convert_sql_dumps,
    parse_icd, parse_morphology, parse_sql_inserts,
};
use slap_lookup::{LookupStore, read_canonical};
use slap_model::LookupName;

const SEX_DUMP: &str = "\
set define off;
prompt Loading ZSEX...
insert into ZSEX (ZSEXID,SHORTDESC,UPDATED) values ('1','Male',to_date('2018-01-01','YYYY-MM-DD'));
insert into ZSEX (ZSEXID,SHORTDESC,UPDATED) values ('2','Female, \"F\"',to_date('2018-01-01','YYYY-MM-DD'));
insert into ZSEX (ZSEXID,SHORTDESC,UPDATED) values ('9',null,null);
commit;
";

#[test]
fn sql_dump_becomes_canonical_csv() {
    let dump = parse_sql_inserts(SEX_DUMP).expect("parse dump");
    assert_eq!(dump.table, "ZSEX");

    let text = dump.canonical.to_csv_string().expect("serialize");
    insta::assert_snapshot!(text.trim_end(), @r#"
    ZSEXID,SHORTDESC,UPDATED
    1,Male,2018-01-01
    2,"Female, ""F""",2018-01-01
    9,,
    "#);
}

#[test]
fn sql_row_with_wrong_width_reports_line() {
    let input = "\
insert into ZGRADE (ZGRADEID,SHORTDESC) values ('G1','Well differentiated');
insert into ZGRADE (ZGRADEID,SHORTDESC) values ('G2','Moderately','extra');
";
    let err = parse_sql_inserts(input).unwrap_err();
    assert!(
        matches!(err, EtlError::MalformedInput { line: 2, .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn sql_header_follows_final_statement() {
    let input = "\
insert into ZSTAGE (A,B) values ('1','One');
insert into ZSTAGE (ZSTAGEID,SHORTDESC) values ('2','Two');
";
    let dump = parse_sql_inserts(input).expect("parse");
    assert_eq!(dump.canonical.headers, vec!["ZSTAGEID", "SHORTDESC"]);
    assert_eq!(dump.canonical.rows.len(), 2);
}

#[test]
fn sql_statement_for_another_table_is_malformed() {
    let input = "\
insert into ZSEX (ZSEXID,SHORTDESC) values ('1','Male');
insert into ZGRADE (ZGRADEID,SHORTDESC) values ('G1','Well differentiated');
";
    let err = parse_sql_inserts(input).unwrap_err();
    assert!(
        matches!(err, EtlError::MalformedInput { line: 1, .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn empty_sql_dump_is_malformed() {
    let err = parse_sql_inserts("set define off;\n").unwrap_err();
    assert!(matches!(err, EtlError::MalformedInput { .. }));
}

#[test]
fn sql_dumps_convert_into_store() {
    let raw = tempfile::tempdir().expect("raw dir");
    let out = tempfile::tempdir().expect("out dir");
    fs::write(raw.path().join("insert_lookups_zsex.sql"), SEX_DUMP).expect("write dump");

    let store = LookupStore::new(out.path());
    let written = convert_sql_dumps(&SqlSource::new(raw.path()), &store, &[LookupName::Sex])
        .expect("convert");
    assert_eq!(written, vec![out.path().join("zsex.csv")]);

    let table = store.load(LookupName::Sex).expect("load converted");
    assert_eq!(
        table.get_code("2").and_then(|r| r.flat_description()),
        Some("Female, \"F\"")
    );
    assert_eq!(table.get_code("9").and_then(|r| r.flat_description()), None);

    // rerun overwrites
    convert_sql_dumps(&SqlSource::new(raw.path()), &store, &[LookupName::Sex]).expect("rerun");
    assert_eq!(store.load(LookupName::Sex).expect("reload").len(), 3);
}

#[test]
fn missing_sql_dump_is_io_error() {
    let raw = tempfile::tempdir().expect("raw dir");
    let store = LookupStore::new(raw.path());
    let err = convert_sql_dumps(&SqlSource::new(raw.path()), &store, &[LookupName::Grade])
        .unwrap_err();
    assert!(matches!(err, EtlError::Io { .. }));
}

const MORPHOLOGY_DUMP: &str = "\
(800) Neoplasms, NOS
M8000/0 Neoplasm, benign
M8000/1 Neoplasm, uncertain whether benign or malignant
M8000/3 Neoplasm, malignant
M8001/0 Tumour cells, benign
(814) Adenomas and adenocarcinomas
M8140/0 Adenoma, NOS
M8140/3 Adenocarcinoma, NOS
";

#[test]
fn morphology_groups_descriptions_by_id() {
    let table = parse_morphology(MORPHOLOGY_DUMP).expect("parse");
    assert_eq!(
        table.headers,
        vec!["ZMORPHOLOGYID", "MORPH_GROUP", "MORPH_GROUP_DESC", "SHORTDESC"]
    );
    let expected: Vec<Vec<String>> = [
        ["8000", "800", "Neoplasms, NOS", "Neoplasm"],
        ["8001", "800", "Neoplasms, NOS", "Tumour cells"],
        ["8140", "814", "Adenomas and adenocarcinomas", "Adenoma/Adenocarcinoma"],
    ]
    .iter()
    .map(|row| row.iter().map(|cell| cell.to_string()).collect())
    .collect();
    assert_eq!(table.rows, expected);
}

#[test]
fn morphology_skips_descriptions_made_only_of_qualifiers() {
    let input = "\
(800) Neoplasms, NOS
M8000/0 Neoplasm, benign
M8000/6 Malignant
M8000/9 benign
";
    let table = parse_morphology(input).expect("parse");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][3], "Neoplasm/Malignant");
}

#[test]
fn truncated_morphology_record_is_malformed() {
    let err = parse_morphology("(800) Neoplasms\nM8000\n").unwrap_err();
    assert!(matches!(err, EtlError::MalformedInput { line: 2, .. }));
}

#[test]
fn morphology_file_conversion_names_file_on_error() {
    let dir = tempfile::tempdir().expect("dir");
    let input = dir.path().join("morph.txt");
    fs::write(&input, "M80\n").expect("write");
    let err = convert_morphology_file(&input, &LookupStore::new(dir.path())).unwrap_err();
    match err {
        EtlError::MalformedInput { path, line, .. } => {
            assert_eq!(path.as_deref(), Some(input.as_path()));
            assert_eq!(line, 1);
        }
        other => panic!("expected MalformedInput, got {other:?}"),
    }
}

#[test]
fn icd_record_under_category_fills_both_tables() {
    let tables = parse_icd("(C50) Breast\nC500  Nipple\n").expect("parse");

    assert_eq!(
        tables.full.headers,
        vec![
            "ZICDFULLID",
            "ICD_GROUP",
            "ICD_GROUP_DESC",
            "ZICD3CHARID",
            "ICD3CHAR_DESC",
            "SHORTDESC"
        ]
    );
    assert_eq!(
        tables.full.rows,
        vec![vec!["C500", "C50", "Breast", "C50", "Nipple", "Nipple"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()]
    );
    assert_eq!(tables.three_char.headers, vec!["ZICD3CHARID", "SHORTDESC"]);
    assert_eq!(
        tables.three_char.rows,
        vec![vec!["C50".to_string(), "Nipple".to_string()]]
    );
}

#[test]
fn icd_codes_drop_the_dot() {
    let input = "\
(A00-A09) Intestinal infectious diseases
A00 Cholera
A00.0 Cholera due to Vibrio cholerae 01, biovar cholerae
A00.9 Cholera, unspecified
";
    let tables = parse_icd(input).expect("parse");
    let codes: Vec<&str> = tables.full.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(codes, vec!["A00", "A000", "A009"]);
    assert!(tables.full.rows.iter().all(|r| r[1] == "A00-A09"));
    assert!(tables.full.rows.iter().all(|r| r[4] == "Cholera"));
    assert_eq!(tables.three_char.rows.len(), 1);
}

#[test]
fn icd_code_without_description_is_malformed() {
    let err = parse_icd("(C50) Breast\nC50.1\n").unwrap_err();
    assert!(
        matches!(err, EtlError::MalformedInput { line: 2, .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn icd_file_conversion_writes_loadable_tables() {
    let dir = tempfile::tempdir().expect("dir");
    let input = dir.path().join("cod.txt");
    fs::write(&input, "(C50) Breast\nC50 Malignant neoplasm of breast\nC50.0 Nipple and areola\n")
        .expect("write");
    let store = LookupStore::new(dir.path().join("lookups"));

    let (full, three_char) = convert_icd_file(&input, &store).expect("convert");
    assert_eq!(full, store.path_for(LookupName::IcdFull));
    assert_eq!(read_canonical(&three_char).expect("read").rows.len(), 1);

    let table = store.load(LookupName::IcdFull).expect("load");
    let record = table.get_code("C500").expect("row");
    assert_eq!(record.flat_description(), Some("Nipple and areola"));
    assert_eq!(record.field("ICD3CHAR_DESC"), Some("Malignant neoplasm of breast"));
}
