//! SQL predicate builder that turns property filters into WHERE clauses using sea-query.
//!
//! One filter becomes one expression; a multi-property filter ORs the same
//! comparison across its properties; a filter list is ANDed together. The
//! LIKE family and BTD, which have no single SQL comparison symbol, are
//! expanded here: wildcard patterns for LIKE/LLIKE/RLIKE and a one-day range
//! for BTD.

use crate::filter::PropertyFilter;
use crate::types::{MatchType, PropertyType, PropertyValue};
use chrono::{Duration, NaiveDateTime};
use sea_query::{Asterisk, Expr, Iden, PostgresQueryBuilder, SelectStatement, SimpleExpr, Value};
use thiserror::Error;

/// Table identifier wrapper for sea-query
#[derive(Debug, Clone)]
pub struct TableIdent(pub String);

impl Iden for TableIdent {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "{}", self.0).unwrap();
    }
}

/// Column identifier wrapper
#[derive(Debug, Clone)]
pub struct ColumnIdent(pub String);

impl Iden for ColumnIdent {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "{}", self.0).unwrap();
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("filter on `{property}` needs a comparison value but none was present")]
    MissingValue { property: String },
    #[error("wildcard filter on `{property}` requires a string typed value")]
    NotText { property: String },
    #[error("between-day filter on `{property}` requires a date typed value")]
    NotADate { property: String },
}

/// Which side of the needle carries the wildcard.
enum LikePattern {
    Contains,
    StartsWith,
    EndsWith,
}

/// Build `SELECT * FROM <table>` with the filters as WHERE clause.
pub fn select_sql(table: &str, filters: &[PropertyFilter]) -> Result<String, BuildError> {
    let mut select = SelectStatement::new();
    select.from(TableIdent(table.to_string()));
    select.column(Asterisk);

    if !filters.is_empty() {
        select.and_where(where_condition(filters)?);
    }

    Ok(select.to_string(PostgresQueryBuilder))
}

/// Combine every filter's condition with AND. An empty list is always true.
pub fn where_condition(filters: &[PropertyFilter]) -> Result<SimpleExpr, BuildError> {
    let conditions = filters
        .iter()
        .map(filter_condition)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(conditions
        .into_iter()
        .reduce(|acc, expr| acc.and(expr))
        .unwrap_or_else(|| Expr::val(true).into()))
}

/// Compile a single filter, ORing the comparison across its property names.
pub fn filter_condition(filter: &PropertyFilter) -> Result<SimpleExpr, BuildError> {
    let conditions = filter
        .property_names()
        .iter()
        .map(|property| property_condition(filter, property))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(conditions
        .into_iter()
        .reduce(|acc, expr| acc.or(expr))
        .unwrap_or_else(|| Expr::val(true).into()))
}

fn property_condition(
    filter: &PropertyFilter,
    property: &str,
) -> Result<SimpleExpr, BuildError> {
    let expr = match filter.match_type() {
        MatchType::Eq => column(property).eq(comparison_value(filter, property)?),
        MatchType::Ne => column(property).ne(comparison_value(filter, property)?),
        MatchType::Gt => column(property).gt(comparison_value(filter, property)?),
        MatchType::Lt => column(property).lt(comparison_value(filter, property)?),
        MatchType::Ge => column(property).gte(comparison_value(filter, property)?),
        MatchType::Le => column(property).lte(comparison_value(filter, property)?),
        MatchType::IsNull => column(property).is_null(),
        MatchType::NotNull => column(property).is_not_null(),
        MatchType::Like => {
            column(property).like(like_pattern(filter, property, LikePattern::Contains)?)
        }
        MatchType::LeftLike => {
            column(property).like(like_pattern(filter, property, LikePattern::StartsWith)?)
        }
        MatchType::RightLike => {
            column(property).like(like_pattern(filter, property, LikePattern::EndsWith)?)
        }
        MatchType::BetweenDay => {
            // Match the whole day: col >= day 00:00:00 AND col < next day
            let start = date_value(filter, property)?;
            let end = start + Duration::days(1);
            column(property)
                .gte(to_sql_value(&PropertyValue::Date(start)))
                .and(column(property).lt(to_sql_value(&PropertyValue::Date(end))))
        }
    };

    Ok(expr)
}

fn column(property: &str) -> Expr {
    Expr::col(ColumnIdent(property.to_string()))
}

fn comparison_value(filter: &PropertyFilter, property: &str) -> Result<Value, BuildError> {
    let value = filter
        .match_value()
        .ok_or_else(|| BuildError::MissingValue {
            property: property.to_string(),
        })?;
    Ok(to_sql_value(value))
}

fn like_pattern(
    filter: &PropertyFilter,
    property: &str,
    pattern: LikePattern,
) -> Result<String, BuildError> {
    let raw = match filter.match_value() {
        Some(PropertyValue::Text(text)) => text,
        Some(_) => {
            return Err(BuildError::NotText {
                property: property.to_string(),
            })
        }
        None => {
            return Err(BuildError::MissingValue {
                property: property.to_string(),
            })
        }
    };

    // S values are matched literally; W values carry caller-supplied wildcards
    let needle = if filter.property_type() == PropertyType::RawText {
        raw.clone()
    } else {
        escape_like(raw)
    };

    Ok(match pattern {
        LikePattern::Contains => format!("%{needle}%"),
        LikePattern::StartsWith => format!("{needle}%"),
        LikePattern::EndsWith => format!("%{needle}"),
    })
}

fn date_value(filter: &PropertyFilter, property: &str) -> Result<NaiveDateTime, BuildError> {
    match filter.match_value() {
        Some(PropertyValue::Date(datetime)) => Ok(*datetime),
        Some(_) => Err(BuildError::NotADate {
            property: property.to_string(),
        }),
        None => Err(BuildError::MissingValue {
            property: property.to_string(),
        }),
    }
}

fn to_sql_value(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Text(text) => Value::String(Some(Box::new(text.clone()))),
        PropertyValue::Integer(number) => Value::Int(Some(*number)),
        PropertyValue::Long(number) => Value::BigInt(Some(*number)),
        PropertyValue::Float(number) => Value::Float(Some(*number)),
        PropertyValue::Double(number) => Value::Double(Some(*number)),
        PropertyValue::Boolean(flag) => Value::Bool(Some(*flag)),
        PropertyValue::Date(datetime) => Value::ChronoDateTime(Some(Box::new(*datetime))),
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(name: &str, value: &str) -> PropertyFilter {
        PropertyFilter::new(name, value).unwrap()
    }

    #[test]
    fn test_eq_select() {
        let sql = select_sql("users", &[filter("EQS_name", "Alice")]).unwrap();
        assert!(sql.contains("users"));
        assert!(sql.contains("name"));
        assert!(sql.contains("Alice"));
        assert!(sql.contains("WHERE"));
    }

    #[test]
    fn test_no_filters_means_no_where_clause() {
        let sql = select_sql("users", &[]).unwrap();
        assert!(sql.contains("users"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_filters_are_anded() {
        let sql = select_sql("users", &[filter("EQS_name", "Alice"), filter("GTI_age", "30")])
            .unwrap();
        assert!(sql.contains("AND"));
        assert!(sql.contains("name"));
        assert!(sql.contains("age"));
    }

    #[test]
    fn test_multi_property_filter_is_ored() {
        let sql = select_sql("users", &[filter("LIKES_name_OR_login_name", "ad")]).unwrap();
        assert!(sql.contains("OR"));
        assert!(sql.contains("login_name"));
    }

    #[test]
    fn test_like_patterns() {
        let sql = select_sql("users", &[filter("LIKES_name", "ad")]).unwrap();
        assert!(sql.contains("LIKE"));
        assert!(sql.contains("%ad%"));

        let sql = select_sql("users", &[filter("LLIKES_name", "ad")]).unwrap();
        assert!(sql.contains("'ad%'"));

        let sql = select_sql("users", &[filter("RLIKES_name", "ad")]).unwrap();
        assert!(sql.contains("'%ad'"));
    }

    #[test]
    fn test_raw_text_keeps_caller_wildcards() {
        let sql = select_sql("users", &[filter("LIKEW_name", "a%b")]).unwrap();
        assert!(sql.contains("%a%b%"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_null_checks() {
        let sql = select_sql("users", &[filter("INS_deleted_at", "")]).unwrap();
        assert!(sql.contains("IS NULL"));

        let sql = select_sql("users", &[filter("NNS_deleted_at", "")]).unwrap();
        assert!(sql.contains("IS NOT NULL"));
    }

    #[test]
    fn test_between_day_expands_to_one_day_range() {
        let sql = select_sql("orders", &[filter("BTDD_created_at", "2010-09-09")]).unwrap();
        assert!(sql.contains(">="));
        assert!(sql.contains("<"));
        assert!(sql.contains("2010-09-09 00:00:00"));
        assert!(sql.contains("2010-09-10 00:00:00"));
    }

    #[test]
    fn test_numeric_and_bool_values() {
        let sql = select_sql("users", &[filter("GEI_age", "30")]).unwrap();
        assert!(sql.contains(">="));
        assert!(sql.contains("30"));

        let sql = select_sql("users", &[filter("EQB_active", "true")]).unwrap();
        assert!(sql.contains("active"));

        let sql = select_sql("users", &[filter("LTN_score", "2.5")]).unwrap();
        assert!(sql.contains("2.5"));
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let stripped = filter("EQS_name", "Alice").with_match_value(None);
        let result = filter_condition(&stripped);
        assert!(matches!(result, Err(BuildError::MissingValue { .. })));
    }

    #[test]
    fn test_like_on_non_text_value_is_an_error() {
        let result = filter_condition(&filter("LIKEI_age", "42"));
        assert!(matches!(result, Err(BuildError::NotText { .. })));
    }

    #[test]
    fn test_between_day_on_non_date_value_is_an_error() {
        let result = filter_condition(&filter("BTDI_age", "42"));
        assert!(matches!(result, Err(BuildError::NotADate { .. })));
    }
}
