//! ColumnSpec: one unit of additive schema evolution.
//!
//! A spec is built once through the constructor/builder methods and never
//! mutated afterwards. The release history is an append-only sequence of
//! these; re-ordering it would change where "after" hints place columns on a
//! fresh database.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic column types understood by the applier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "max_len")]
pub enum SemanticType {
    /// Whole numbers (counts, amounts).
    Integer,
    /// Boolean-like 0/1 survey answer.
    Flag,
    /// Bounded free text.
    VarText(u32),
    /// Unbounded free text.
    Text,
    /// JSON-encoded array of strings stored in a text column.
    TagSet,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    Date,
}

impl SemanticType {
    /// The declared SQL type written into the table definition.
    pub fn sql_type(&self) -> String {
        match self {
            Self::Integer => "INTEGER".to_string(),
            Self::Flag => "BOOLEAN".to_string(),
            Self::VarText(n) => format!("VARCHAR({n})"),
            Self::Text | Self::TagSet => "TEXT".to_string(),
            Self::Date => "DATE".to_string(),
        }
    }

    /// Recover a semantic type from a declared SQL type.
    ///
    /// `TEXT` maps to [`SemanticType::Text`]; a tag-set column is
    /// indistinguishable from plain text once declared.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let upper = declared.trim().to_ascii_uppercase();
        match upper.as_str() {
            "INTEGER" | "INT" | "BIGINT" => Some(Self::Integer),
            "BOOLEAN" | "BOOL" | "TINYINT(1)" => Some(Self::Flag),
            "TEXT" => Some(Self::Text),
            "DATE" => Some(Self::Date),
            _ => {
                let inner = upper
                    .strip_prefix("VARCHAR(")
                    .and_then(|rest| rest.strip_suffix(')'))?;
                inner.trim().parse::<u32>().ok().map(Self::VarText)
            }
        }
    }

    /// Whether a column declared as `self` may be widened to `target`.
    ///
    /// Widening must be value-preserving: every value storable under `self`
    /// is storable under `target`. Equal types are not a widening.
    pub fn widens_to(&self, target: &SemanticType) -> bool {
        match (self, target) {
            (from, to) if from.sql_type() == to.sql_type() => false,
            (_, Self::Text) => true,
            (Self::Flag, Self::Integer) => true,
            (Self::VarText(a), Self::VarText(b)) => b > a,
            _ => false,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql_type())
    }
}

/// Default literal for a newly added column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    Integer(i64),
    Text(String),
}

impl DefaultValue {
    /// Render as a SQL literal, escaping single quotes.
    pub fn sql_literal(&self) -> String {
        match self {
            Self::Integer(v) => v.to_string(),
            Self::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

/// What a spec does to its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOp {
    /// Add a new column.
    Add,
    /// Change an existing column's declared type to a strictly more
    /// permissive one.
    Widen,
}

/// One schema-evolution unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    op: ColumnOp,
    table: String,
    column: String,
    semantic_type: SemanticType,
    nullable: bool,
    default: Option<DefaultValue>,
    after: Option<String>,
}

impl ColumnSpec {
    /// A nullable column addition with no default and no placement hint.
    pub fn add(table: &str, column: &str, semantic_type: SemanticType) -> Self {
        Self {
            op: ColumnOp::Add,
            table: table.to_string(),
            column: column.to_string(),
            semantic_type,
            nullable: true,
            default: None,
            after: None,
        }
    }

    /// Widen an existing column to `semantic_type`.
    pub fn widen(table: &str, column: &str, semantic_type: SemanticType) -> Self {
        Self {
            op: ColumnOp::Widen,
            ..Self::add(table, column, semantic_type)
        }
    }

    /// Mark the column `NOT NULL`. SQLite requires a non-null default for
    /// this on tables that already hold rows.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default_int(mut self, value: i64) -> Self {
        self.default = Some(DefaultValue::Integer(value));
        self
    }

    pub fn default_text(mut self, value: &str) -> Self {
        self.default = Some(DefaultValue::Text(value.to_string()));
        self
    }

    /// Placement hint: the column belongs after `anchor`.
    pub fn after(mut self, anchor: &str) -> Self {
        self.after = Some(anchor.to_string());
        self
    }

    pub fn op(&self) -> ColumnOp {
        self.op
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn after_column(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Column definition fragment used by `ALTER TABLE ... ADD COLUMN`.
    pub fn column_definition(&self) -> String {
        let mut def = format!("\"{}\" {}", self.column, self.semantic_type.sql_type());
        if !self.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default {
            def.push_str(" DEFAULT ");
            def.push_str(&default.sql_literal());
        }
        def
    }

    /// Returns the first identifier that is not a plain SQL identifier.
    pub fn invalid_identifier(&self) -> Option<&str> {
        [Some(self.table.as_str()), Some(self.column.as_str()), self.after.as_deref()]
            .into_iter()
            .flatten()
            .find(|ident| !is_plain_identifier(ident))
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.op {
            ColumnOp::Add => "add",
            ColumnOp::Widen => "widen",
        };
        write!(f, "{verb} {}.{} {}", self.table, self.column, self.semantic_type)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
