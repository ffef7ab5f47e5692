//! Command implementations behind the `slap` binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use slap_describe::{ColumnMappings, DescribeOptions, Describer, Resolver};
use slap_etl::{SqlSource, convert_icd_file, convert_morphology_file, convert_sql_dumps};
use slap_ingest::{DEFAULT_TABLE_PREFIX, read_clinical_csv, write_csv};
use slap_lookup::LookupStore;
use slap_model::{ClinicalTable, LookupName, Resolution};
use tracing::{info, info_span};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn resolution_kind(name: LookupName) -> String {
    match name.flat_alternative() {
        Some(alternative) => format!("via {alternative}"),
        None if name.is_multi_valued_capable() => format!(
            "{}, {} ({})",
            Resolution::Flat(name).kind(),
            Resolution::MultiValued(name).kind(),
            Resolution::MultiValued(name)
        ),
        None => Resolution::Flat(name).kind().to_string(),
    }
}

/// Every registered lookup with its key columns and whether its file exists.
pub fn lookups_table(store: &LookupStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Lookup", "Key columns", "Resolution", "File"]);
    apply_table_style(&mut table);
    for status in store.status() {
        let file = if status.present {
            status.path.display().to_string()
        } else {
            "missing".to_string()
        };
        table.add_row(vec![
            status.name.as_str().to_string(),
            status.name.key_columns().join(", "),
            resolution_kind(status.name),
            file,
        ]);
    }
    table
}

pub fn run_lookups(store: &LookupStore) -> Result<()> {
    println!("{}", lookups_table(store));
    let missing = store.status().iter().filter(|s| !s.present).count();
    if missing > 0 {
        info!(
            missing,
            dir = %store.dir().display(),
            "some lookup files are missing, run `slap convert` to build them"
        );
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCode {
    pub code: String,
    pub description: Option<String>,
}

/// Resolve codes given on the command line through a lookup name or route
/// alias.
pub fn resolve_codes(store: &LookupStore, lookup: &str, codes: &[String]) -> Result<Vec<ResolvedCode>> {
    let mut resolver = Resolver::new(store.clone());
    let input: Vec<Option<String>> = codes.iter().cloned().map(Some).collect();
    let described = resolver
        .resolve(&input, lookup)
        .with_context(|| format!("resolve codes through {lookup}"))?;
    Ok(codes
        .iter()
        .cloned()
        .zip(described)
        .map(|(code, description)| ResolvedCode { code, description })
        .collect())
}

/// `code<TAB>description`, one per line; unresolved codes get an empty
/// description.
pub fn render_resolved_text(resolved: &[ResolvedCode]) -> String {
    resolved
        .iter()
        .map(|r| format!("{}\t{}", r.code, r.description.as_deref().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run_resolve(store: &LookupStore, lookup: &str, codes: &[String], json: bool) -> Result<()> {
    let resolved = resolve_codes(store, lookup, codes)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolved).context("serialize resolutions")?
        );
    } else {
        println!("{}", render_resolved_text(&resolved));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct DescribeRequest {
    pub input: PathBuf,
    /// Clinical table name; inferred from the file name when absent.
    pub table: Option<String>,
    pub columns: Option<Vec<String>>,
    pub histology: bool,
    pub output: Option<PathBuf>,
    pub mappings: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DescribeSummary {
    pub table: String,
    pub output: PathBuf,
    pub rows: usize,
    pub appended: Vec<String>,
}

/// `sim_av_patient.csv` -> `av_patient`
pub fn infer_table_name(input: &Path) -> Option<String> {
    let stem = input.file_stem()?.to_str()?;
    let name = stem.strip_prefix(DEFAULT_TABLE_PREFIX).unwrap_or(stem);
    name.parse::<ClinicalTable>()
        .ok()
        .map(|table| table.as_str().to_string())
}

/// `<dir>/<stem>_described.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());
    input.with_file_name(format!("{stem}_described.csv"))
}

pub fn run_describe(store: &LookupStore, request: &DescribeRequest) -> Result<DescribeSummary> {
    let _span = info_span!("describe", input = %request.input.display()).entered();
    let table = match &request.table {
        Some(table) => table.clone(),
        None => match infer_table_name(&request.input) {
            Some(table) => table,
            None => bail!(
                "cannot tell which clinical table {} is, pass --table (one of: {})",
                request.input.display(),
                ClinicalTable::known_list()
            ),
        },
    };
    let mappings = match &request.mappings {
        Some(path) => ColumnMappings::from_path(path)?,
        None => ColumnMappings::embedded()?,
    };

    let mut df = read_clinical_csv(&request.input)
        .with_context(|| format!("load {}", request.input.display()))?;
    let mut describer = Describer::new(store.clone(), mappings);
    let appended = describer
        .apply(
            &mut df,
            &table,
            DescribeOptions {
                columns: request.columns.as_deref(),
                histology: request.histology,
            },
        )
        .with_context(|| format!("describe {}", request.input.display()))?;

    let output = request
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&request.input));
    write_csv(&mut df, &output)?;
    Ok(DescribeSummary {
        table,
        output,
        rows: df.height(),
        appended,
    })
}

/// Convert SQL dumps; every dump-sourced lookup when `names` is empty.
pub fn run_convert_sql(
    store: &LookupStore,
    source: &SqlSource,
    names: &[LookupName],
) -> Result<Vec<PathBuf>> {
    let _span = info_span!("convert_sql", dir = %source.dir.display()).entered();
    let names = if names.is_empty() {
        &LookupName::SQL_DUMPS[..]
    } else {
        names
    };
    convert_sql_dumps(source, store, names)
        .with_context(|| format!("convert SQL dumps in {}", source.dir.display()))
}

pub fn run_convert_morphology(store: &LookupStore, input: &Path) -> Result<PathBuf> {
    let _span = info_span!("convert_morphology").entered();
    convert_morphology_file(input, store)
        .with_context(|| format!("convert morphology dump {}", input.display()))
}

pub fn run_convert_icd(store: &LookupStore, input: &Path) -> Result<Vec<PathBuf>> {
    let _span = info_span!("convert_icd").entered();
    let (full, three_char) = convert_icd_file(input, store)
        .with_context(|| format!("convert ICD-10 dump {}", input.display()))?;
    Ok(vec![full, three_char])
}
