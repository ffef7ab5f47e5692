#![allow(dead_code)]

use std::fs;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use slap_lookup::LookupStore;
use tempfile::TempDir;

const FIXTURES: &[(&str, &str)] = &[
    ("zsex.csv", "ZSEXID,SHORTDESC\n1,Male\n2,Female\n"),
    ("zgrade.csv", "ZGRADEID,SHORTDESC\nG1,Well differentiated\nG3,Poorly differentiated\n"),
    (
        "zicdfull.csv",
        "ZICDFULLID,ICD_GROUP,ICD_GROUP_DESC,ZICD3CHARID,ICD3CHAR_DESC,SHORTDESC\n\
         C500,C50,Breast,C50,Nipple,Nipple\n\
         C509,C50,Breast,C50,Nipple,\"Breast, unspecified\"\n\
         I219,I21,Acute myocardial infarction,I21,Acute MI,Acute myocardial infarction\n",
    ),
    (
        "zhistologylookup.csv",
        "ZMORPHOLOGYID,ZBEHAVIOURID,DESCRIPTION\n\
         8140,3,\"Adenocarcinoma, NOS\"\n\
         8140,2,\"Adenocarcinoma in situ, NOS\"\n\
         8500,3,\"Infiltrating duct carcinoma, NOS\"\n",
    ),
];

/// A lookup directory holding a handful of small tables.
pub fn fixture_store() -> (TempDir, LookupStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    for (name, contents) in FIXTURES {
        fs::write(dir.path().join(name), contents).expect("write fixture");
    }
    let store = LookupStore::new(dir.path());
    (dir, store)
}

pub fn codes(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|v| v.map(str::to_string)).collect()
}

pub fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).expect("frame")
}
