//! SQL insert dump -> canonical lookup table.
//!
//! The registry release ships its lookup tables as one `.sql` file per
//! table, each holding line-oriented statements of the form
//!
//! ```text
//! insert into ZSEX (ZSEXID,SHORTDESC) values ('1','Male');
//! ```
//!
//! Every statement becomes one row. The header is taken from the column list
//! of the final statement, `to_date('<literal>','YYYY-MM-DD')` calls are
//! reduced to the literal and SQL quoting is rewritten to CSV quoting.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use slap_lookup::{CanonicalTable, LookupStore};
use slap_model::LookupName;
use tracing::{debug, info};

use crate::error::{EtlError, read_input};

/// File name prefix of the raw dumps (`insert_lookups_zsex.sql`).
pub const DEFAULT_SQL_PREFIX: &str = "insert_lookups_z";

static INSERT_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*insert\s+into\s+([^\s(]+)\s*\(([^)]*)\)\s*values\s*\((.*)\)\s*;?\s*$")
        .expect("Invalid insert statement regex")
});

static INSERT_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*insert\s").expect("Invalid insert keyword regex"));

/// A parsed dump: the target table and its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlDump {
    pub table: String,
    pub canonical: CanonicalTable,
}

/// Where raw dumps live and how they are named.
#[derive(Debug, Clone)]
pub struct SqlSource {
    pub dir: PathBuf,
    pub prefix: String,
}

impl SqlSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_SQL_PREFIX.to_string(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn path_for(&self, name: LookupName) -> PathBuf {
        self.dir.join(format!("{}{}.sql", self.prefix, name.as_str()))
    }
}

struct Statement {
    table: String,
    columns: Vec<String>,
    values: Vec<String>,
}

fn unquote_identifier(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

/// Split a value list on top-level commas, leaving quoted text and nested
/// calls intact.
fn split_values(raw: &str) -> Result<Vec<String>, &'static str> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut depth = 0usize;
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                current.push(ch);
                if in_quotes && chars.peek() == Some(&'\'') {
                    // '' is an escaped quote inside a literal
                    current.push('\'');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            '(' if !in_quotes => {
                depth += 1;
                current.push(ch);
            }
            ')' if !in_quotes => {
                depth = depth.checked_sub(1).ok_or("unbalanced parentheses")?;
                current.push(ch);
            }
            ',' if !in_quotes && depth == 0 => parts.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err("unterminated string literal");
    }
    if depth != 0 {
        return Err("unbalanced parentheses");
    }
    parts.push(current);
    Ok(parts)
}

/// Strip `function(` ... `)` around a value, case-insensitively.
fn call_arguments<'a>(token: &'a str, function: &str) -> Option<&'a str> {
    let open = token.find('(')?;
    let (head, rest) = token.split_at(open);
    if !head.trim().eq_ignore_ascii_case(function) {
        return None;
    }
    rest.strip_prefix('(')?.strip_suffix(')')
}

/// Reduce one SQL value to the text stored in the canonical table.
fn sql_value(token: &str) -> Result<String, &'static str> {
    let token = token.trim();
    if let Some(arguments) = call_arguments(token, "to_date") {
        let arguments = split_values(arguments)?;
        return match arguments.first() {
            Some(literal) if !literal.trim().is_empty() => sql_value(literal),
            _ => Err("to_date without a literal"),
        };
    }
    if token.eq_ignore_ascii_case("null") {
        return Ok(String::new());
    }
    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        return Ok(token[1..token.len() - 1].replace("''", "'"));
    }
    Ok(token.to_string())
}

fn parse_statement(line: &str, line_no: usize) -> Result<Statement, EtlError> {
    let captures = INSERT_STATEMENT
        .captures(line)
        .ok_or_else(|| EtlError::malformed(line_no, "expected `insert into T (cols) values (...)`"))?;

    let table = unquote_identifier(&captures[1]);
    let columns: Vec<String> = captures[2].split(',').map(unquote_identifier).collect();
    if columns.iter().any(String::is_empty) {
        return Err(EtlError::malformed(line_no, "empty column name"));
    }
    let values: Vec<String> = split_values(&captures[3])
        .and_then(|tokens| tokens.iter().map(|t| sql_value(t)).collect())
        .map_err(|message| EtlError::malformed(line_no, message))?;

    if values.len() != columns.len() {
        return Err(EtlError::malformed(
            line_no,
            format!(
                "{} values for {} columns",
                values.len(),
                columns.len()
            ),
        ));
    }
    Ok(Statement {
        table,
        columns,
        values,
    })
}

/// Parse a dump of insert statements for a single table.
///
/// Lines that are not insert statements (`set define off;`, `prompt`,
/// comments, blanks) are skipped. Every row must match the width of the
/// final statement's column list.
pub fn parse_sql_inserts(input: &str) -> Result<SqlDump, EtlError> {
    let mut statements: Vec<(usize, Statement)> = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if !INSERT_KEYWORD.is_match(line) {
            if !line.trim().is_empty() {
                debug!(line = line_no, "skipping non-insert line");
            }
            continue;
        }
        statements.push((line_no, parse_statement(line, line_no)?));
    }

    let Some((_, last)) = statements.last() else {
        return Err(EtlError::malformed(0, "no insert statements found"));
    };
    let table = last.table.clone();
    let headers = last.columns.clone();

    let mut canonical = CanonicalTable::new(headers);
    for (line_no, statement) in statements {
        if !statement.table.eq_ignore_ascii_case(&table) {
            return Err(EtlError::malformed(
                line_no,
                format!(
                    "statement targets {} but the dump is for {table}",
                    statement.table
                ),
            ));
        }
        if statement.columns.len() != canonical.headers.len() {
            return Err(EtlError::malformed(
                line_no,
                format!(
                    "{} columns where the header has {}",
                    statement.columns.len(),
                    canonical.headers.len()
                ),
            ));
        }
        canonical.push_row(statement.values);
    }

    Ok(SqlDump { table, canonical })
}

/// Convert one dump file and write it to the store as `name`.
pub fn convert_sql_file(
    input: &Path,
    store: &LookupStore,
    name: LookupName,
) -> Result<PathBuf, EtlError> {
    let text = read_input(input)?;
    let dump = parse_sql_inserts(&text).map_err(|e| e.in_file(input))?;
    let path = store.write(name, &dump.canonical)?;
    info!(
        lookup = %name,
        table = %dump.table,
        rows = dump.canonical.rows.len(),
        input = %input.display(),
        output = %path.display(),
        "converted SQL dump"
    );
    Ok(path)
}

/// Convert the dumps of several tables; stops at the first failure.
pub fn convert_sql_dumps(
    source: &SqlSource,
    store: &LookupStore,
    names: &[LookupName],
) -> Result<Vec<PathBuf>, EtlError> {
    names
        .iter()
        .map(|&name| convert_sql_file(&source.path_for(name), store, name))
        .collect()
}
