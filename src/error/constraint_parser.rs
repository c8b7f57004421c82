use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Constraint names follow the `<table>_<column>_<suffix>` convention used by
/// the migrations in this repository (e.g. `books_title_key`,
/// `order_items_book_id_fkey`). Table names may themselves contain
/// underscores, so the parser matches against the known table list instead of
/// splitting blindly.
pub struct ConstraintParser;

/// Tables managed by this crate, longest name first so that prefix matching
/// is unambiguous (`order_items` before `orders`).
const TABLES: &[&str] = &["order_items", "orders", "genres", "books", "users"];

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" in PostgreSQL detail messages
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation into `(entity, field, value)`.
    ///
    /// The constraint name is preferred; the message detail is the fallback
    /// for constraints that do not follow the naming convention.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                if let Some((_, value)) = Self::extract_key_value_from_message(message) {
                    return Some((entity, field, value));
                }
                return Some((entity, field, "duplicate_value".to_string()));
            }
        }

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity =
                Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e)))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a foreign key violation into `(entity, field, referenced value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .or_else(|| {
                    constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
                })
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        constraint_name
            .and_then(Self::parse_constraint_name)
            .map(|(entity, field)| (entity, field, "unknown".to_string()))
    }

    /// Parses a check constraint violation into `(entity, field)`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        constraint_name
            .and_then(Self::parse_constraint_name)
            .or_else(|| {
                let entity = Self::extract_table_from_message(message)?;
                Some((entity, "unknown".to_string()))
            })
    }

    /// Splits a constraint name like `books_title_key` into
    /// `("books", "title")` by matching the known table prefixes.
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        let trimmed = constraint
            .strip_suffix("_fkey")
            .or_else(|| constraint.strip_suffix("_key"))
            .or_else(|| constraint.strip_suffix("_check"))
            .unwrap_or(constraint);

        for table in TABLES {
            if let Some(rest) = trimmed.strip_prefix(*table) {
                let field = rest.strip_prefix('_')?;
                if field.is_empty() {
                    return None;
                }
                return Some(((*table).to_string(), field.to_string()));
            }
        }
        None
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` detail line.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns()
            .key_value
            .captures(message)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
    }

    /// Extracts a quoted column name from the message.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .map(|caps| caps[1].to_string())
    }

    /// Extracts a quoted table name from the message.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_unique_constraint_names() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("genres_name_key"),
            Some(("genres".to_string(), "name".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("books_title_key"),
            Some(("books".to_string(), "title".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_key"),
            Some(("users".to_string(), "email".to_string()))
        );
    }

    #[test]
    fn parses_underscored_table_names() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("order_items_book_id_fkey"),
            Some(("order_items".to_string(), "book_id".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_constraint_shapes() {
        assert_eq!(ConstraintParser::parse_constraint_name("genres"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("something_else"), None);
    }

    #[test]
    fn extracts_key_value_from_detail_message() {
        let message = "duplicate key value violates unique constraint \"books_title_key\"\nDETAIL: Key (title)=(Dune) already exists.";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(message),
            Some(("title".to_string(), "Dune".to_string()))
        );
    }

    #[test]
    fn parses_full_unique_violation() {
        let message = "duplicate key value violates unique constraint \"books_title_key\"\nDETAIL: Key (title)=(Dune) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, Some("books_title_key")),
            Some(("books".to_string(), "title".to_string(), "Dune".to_string()))
        );
    }

    #[test]
    fn parses_not_null_violation_from_message() {
        let message = "null value in column \"name\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message, None),
            Some(("resource".to_string(), "name".to_string()))
        );
    }

    #[test]
    fn parses_foreign_key_violation() {
        let message = "insert or update on table \"books\" violates foreign key constraint \"books_genre_id_fkey\"\nDETAIL: Key (genre_id)=(999) is not present in table \"genres\".";
        let result = ConstraintParser::parse_foreign_key_violation(message, Some("books_genre_id_fkey"));
        let (entity, field, value) = result.expect("should parse");
        assert_eq!(entity, "books");
        assert_eq!(field, "genre_id");
        assert_eq!(value, "999");
    }
}
