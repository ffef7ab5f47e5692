//! Appends `<column>_DESC` columns to a clinical table.

use polars::prelude::{DataFrame, NamedFrom, Series};
use slap_lookup::LookupStore;
use tracing::info;

use crate::error::{DescribeError, Result};
use crate::frame::{column_codes, has_column};
use crate::mappings::{ColumnMapping, ColumnMappings, HistologyMapping};
use crate::resolver::Resolver;

/// Which coded columns [`Describer::apply`] describes.
#[derive(Debug, Clone, Copy)]
pub struct DescribeOptions<'a> {
    /// `None` describes every mapped column.
    pub columns: Option<&'a [String]>,
    /// Append the composite histology description where the table has one.
    pub histology: bool,
}

impl Default for DescribeOptions<'_> {
    fn default() -> Self {
        Self {
            columns: None,
            histology: true,
        }
    }
}

/// Schema mapping over a [`Resolver`].
#[derive(Debug)]
pub struct Describer {
    resolver: Resolver,
    mappings: ColumnMappings,
}

impl Describer {
    pub fn new(store: LookupStore, mappings: ColumnMappings) -> Self {
        Self {
            resolver: Resolver::new(store),
            mappings,
        }
    }

    /// A describer using the embedded column mappings.
    pub fn with_default_mappings(store: LookupStore) -> Result<Self> {
        Ok(Self::new(store, ColumnMappings::embedded()?))
    }

    pub fn mappings(&self) -> &ColumnMappings {
        &self.mappings
    }

    pub fn resolver(&mut self) -> &mut Resolver {
        &mut self.resolver
    }

    /// Describe the coded columns of `df`, a frame of clinical table
    /// `table_name`, and return the names of the appended columns.
    ///
    /// Everything is validated and resolved before the first column is
    /// appended, so on error `df` is left as it was.
    pub fn apply(
        &mut self,
        df: &mut DataFrame,
        table_name: &str,
        options: DescribeOptions<'_>,
    ) -> Result<Vec<String>> {
        let mappings = self.mappings.table(table_name)?;
        let table = mappings.table.as_str();

        let selected: Vec<ColumnMapping> = match options.columns {
            Some(requested) => requested
                .iter()
                .map(|column| {
                    mappings.column(column).cloned().ok_or_else(|| {
                        DescribeError::UnknownColumn {
                            table: table.to_string(),
                            column: column.clone(),
                        }
                    })
                })
                .collect::<Result<_>>()?,
            None => mappings.columns.clone(),
        };
        let histology: Option<HistologyMapping> = if options.histology {
            mappings.histology.clone()
        } else {
            None
        };

        let mut sources: Vec<&str> = selected.iter().map(|m| m.column.as_str()).collect();
        if let Some(histology) = &histology {
            sources.push(&histology.morphology);
            sources.push(&histology.behaviour);
        }
        if let Some(missing) = sources.iter().find(|column| !has_column(df, column)) {
            return Err(DescribeError::MissingColumn {
                table: table.to_string(),
                column: (*missing).to_string(),
            });
        }

        let mut outputs: Vec<String> = selected.iter().map(ColumnMapping::output_column).collect();
        if let Some(histology) = &histology {
            outputs.push(histology.output.clone());
        }
        for (idx, output) in outputs.iter().enumerate() {
            if has_column(df, output) || outputs[..idx].contains(output) {
                return Err(DescribeError::DescriptionColumnExists {
                    column: output.clone(),
                });
            }
        }

        let mut described: Vec<Vec<Option<String>>> = Vec::with_capacity(outputs.len());
        for mapping in &selected {
            let codes = column_codes(df, &mapping.column)?;
            described.push(self.resolver.resolve_route(&codes, mapping.route)?);
        }
        if let Some(histology) = &histology {
            let morphology = column_codes(df, &histology.morphology)?;
            let behaviour = column_codes(df, &histology.behaviour)?;
            described.push(self.resolver.resolve_composite(&morphology, &behaviour)?);
        }

        for (name, values) in outputs.iter().zip(described) {
            df.with_column(Series::new(name.as_str().into(), values))?;
        }
        info!(
            table,
            rows = df.height(),
            appended = outputs.len(),
            "added description columns"
        );
        Ok(outputs)
    }
}
