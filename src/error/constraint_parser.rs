use std::sync::OnceLock;

use regex::Regex;

/// Tables created by the catalog migrations, longest names first so that
/// `installer_issue_replies` wins over `installer_issues` when matching a
/// constraint prefix.
const KNOWN_TABLES: &[&str] = &[
    "installer_issue_replies",
    "installer_revisions",
    "installer_issues",
    "installers",
    "games",
    "users",
];

/// Suffixes PostgreSQL appends to generated constraint names.
const CONSTRAINT_SUFFIXES: &[&str] = &["_fkey", "_key", "_check", "_idx", "_pkey"];

/// Parses PostgreSQL constraint violation messages into (table, column, value).
pub struct ConstraintParser;

struct Patterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("static regex"),
        column_name: Regex::new(r#"column "([^"]+)""#).expect("static regex"),
        table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("static regex"),
    })
}

impl ConstraintParser {
    /// Splits a generated constraint name such as `installers_slug_key` or
    /// `installer_issues_installer_id_fkey` into its table and column parts.
    pub fn split_constraint_name(constraint: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))?;

        KNOWN_TABLES.iter().find_map(|table| {
            let column = stem.strip_prefix(table)?.strip_prefix('_')?;
            (!column.is_empty()).then(|| (table.to_string(), column.to_string()))
        })
    }

    /// `duplicate key value violates unique constraint "installers_slug_key"`
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::key_value(message);

        if let Some((table, column)) = constraint_name.and_then(Self::split_constraint_name) {
            let value = key_value
                .map(|(_, v)| v)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((table, column, value));
        }

        let (column, value) = key_value?;
        let table = Self::table(message).unwrap_or_else(|| "resource".to_string());
        Some((table, column, value))
    }

    /// `null value in column "slug" of relation "installers" violates not-null constraint`
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let column = patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())?;
        let table = Self::table(message).unwrap_or_else(|| "resource".to_string());
        Some((table, column))
    }

    /// `insert or update on table "installer_issues" violates foreign key constraint ...`
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::key_value(message);

        if let Some((table, column)) = constraint_name.and_then(Self::split_constraint_name) {
            let value = key_value
                .map(|(_, v)| v)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((table, column, value));
        }

        let (column, value) = key_value?;
        let table = Self::table(message).unwrap_or_else(|| "resource".to_string());
        Some((table, column, value))
    }

    fn key_value(message: &str) -> Option<(String, String)> {
        let caps = patterns().key_value.captures(message)?;
        Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
    }

    fn table(message: &str) -> Option<String> {
        patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
