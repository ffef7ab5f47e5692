//! Reading coded columns out of a `DataFrame`.

use polars::prelude::{AnyValue, DataFrame, PolarsResult};

/// Renders a cell as a code. `Null` is absent; numbers lose trailing zeros
/// so a column inferred as float still matches `1` rather than `1.0`.
pub fn any_to_code(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Float32(v) => Some(format_numeric(f64::from(v))),
        AnyValue::Float64(v) => Some(format_numeric(v)),
        other => Some(other.to_string()),
    }
}

fn format_numeric(value: f64) -> String {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    let fits = value >= i64::MIN as f64 && value < i64::MAX as f64;
    if value.fract() == 0.0 && fits {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Every cell of `name` as a code, in row order.
pub fn column_codes(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    Ok((0..df.height())
        .map(|idx| any_to_code(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

#[cfg(test)]
mod tests {
    use polars::prelude::{NamedFrom, Series};

    use super::*;

    #[test]
    fn reads_codes_with_nulls() {
        let df = DataFrame::new(vec![
            Series::new("SEX".into(), vec![Some("1"), None, Some("02")]).into(),
        ])
        .unwrap();
        assert_eq!(
            column_codes(&df, "SEX").unwrap(),
            vec![Some("1".to_string()), None, Some("02".to_string())]
        );
    }

    #[test]
    fn numeric_cells_render_without_fraction() {
        assert_eq!(any_to_code(AnyValue::Float64(2.0)).as_deref(), Some("2"));
        assert_eq!(any_to_code(AnyValue::Int64(7)).as_deref(), Some("7"));
        assert_eq!(any_to_code(AnyValue::Float64(2.5)).as_deref(), Some("2.5"));
    }

    #[test]
    fn floats_outside_integer_range_keep_their_value() {
        assert_eq!(
            any_to_code(AnyValue::Float64(1e20)).as_deref(),
            Some("100000000000000000000")
        );
        assert_eq!(
            any_to_code(AnyValue::Float64(-4096.0)).as_deref(),
            Some("-4096")
        );
    }
}
