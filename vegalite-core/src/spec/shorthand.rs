use crate::error::{Result, VegaLiteError};
use crate::spec::encoding::{EncodingType, FieldDef};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::str::FromStr;

lazy_static! {
    static ref AGGREGATE_RE: Regex =
        Regex::new(r"^(?P<op>[A-Za-z_][A-Za-z0-9_]*)\((?P<field>.*)\)$").unwrap();
    static ref TYPE_SUFFIX_RE: Regex =
        Regex::new(r"^(?P<body>.+):(?P<type>[A-Za-z]+)$").unwrap();
    pub static ref AGGREGATE_OPS: HashSet<&'static str> = vec![
        "argmax", "argmin", "average", "count", "distinct", "max", "mean", "median", "min",
        "missing", "q1", "q3", "ci0", "ci1", "stderr", "stdev", "stdevp", "sum", "valid",
        "values", "variance", "variancep",
    ]
    .into_iter()
    .collect();
}

/// Parse `field`, `field:T`, `op(field)`, `op(field):T`, or `count()` into a field definition.
///
/// `T` is a single letter code (`Q`, `O`, `N`, `T`) or a full type name.
pub fn parse_shorthand(shorthand: &str) -> Result<FieldDef> {
    let shorthand = shorthand.trim();
    if shorthand.is_empty() {
        return Err(VegaLiteError::parse("Shorthand may not be empty"));
    }

    let (body, type_) = match TYPE_SUFFIX_RE.captures(shorthand) {
        Some(captures) => {
            let type_ = EncodingType::from_str(&captures["type"])
                .map_err(|err| err.with_context(|| format!("Parsing shorthand {shorthand:?}")))?;
            (captures["body"].to_string(), Some(type_))
        }
        None => (shorthand.to_string(), None),
    };

    let mut def = FieldDef {
        type_,
        ..Default::default()
    };

    match AGGREGATE_RE.captures(&body) {
        Some(captures) => {
            let op = captures["op"].to_string();
            if !AGGREGATE_OPS.contains(op.as_str()) {
                return Err(VegaLiteError::parse(format!(
                    "Unknown aggregate {op:?} in shorthand {shorthand:?}"
                )));
            }
            let field = captures["field"].trim();
            if field.is_empty() {
                if op != "count" {
                    return Err(VegaLiteError::parse(format!(
                        "Aggregate {op:?} requires a field in shorthand {shorthand:?}"
                    )));
                }
                // count() is always quantitative unless stated otherwise
                def.type_.get_or_insert(EncodingType::Quantitative);
            } else {
                def.field = Some(field.to_string());
            }
            def.aggregate = Some(op);
        }
        None => {
            def.field = Some(body);
        }
    }

    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest(
        shorthand,
        field,
        aggregate,
        type_,
        case("X", Some("X"), None, None),
        case("X:Q", Some("X"), None, Some(EncodingType::Quantitative)),
        case("Series:nominal", Some("Series"), None, Some(EncodingType::Nominal)),
        case(" date:T ", Some("date"), None, Some(EncodingType::Temporal)),
        case("mean(Y)", Some("Y"), Some("mean"), None),
        case("sum(Y):O", Some("Y"), Some("sum"), Some(EncodingType::Ordinal)),
        case("count()", None, Some("count"), Some(EncodingType::Quantitative)),
        case("count():O", None, Some("count"), Some(EncodingType::Ordinal))
    )]
    fn test_parse(
        shorthand: &str,
        field: Option<&str>,
        aggregate: Option<&str>,
        type_: Option<EncodingType>,
    ) {
        let def = parse_shorthand(shorthand).unwrap();
        assert_eq!(def.field.as_deref(), field);
        assert_eq!(def.aggregate.as_deref(), aggregate);
        assert_eq!(def.type_, type_);
    }

    #[rstest(
        shorthand,
        case(""),
        case("X:Z"),
        case("X:quantity"),
        case("median2(Y)"),
        case("mean()")
    )]
    fn test_parse_errors(shorthand: &str) {
        let err = parse_shorthand(shorthand).unwrap_err();
        assert!(matches!(err, VegaLiteError::ParseError(..)), "{err:?}");
    }
}
