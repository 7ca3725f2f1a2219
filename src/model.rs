//! Pieces shared by every entity's model operations.

use serde::Serialize;
use sqlx::{Postgres, QueryBuilder};

use crate::error::{ModelError, ModelResult};

/// A column an entity lets callers change through `update`.
///
/// Implementors are closed enums, one variant per updatable column, so the
/// SET clause is only ever built from the static names returned here.
pub trait UpdateField {
    fn column(&self) -> &'static str;
    fn value(&self) -> &str;
    fn validate(&self) -> ModelResult<()>;
}

/// `{ id }` result of `drop` and `archive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityId {
    pub id: String,
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self { id }
    }
}

pub(crate) fn non_empty(column: &'static str, value: &str, max_len: usize) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid(format!("{column} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(ModelError::invalid(format!(
            "{column} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Unwraps a required payload field and runs its validator.
pub(crate) fn required<F: UpdateField>(
    name: &'static str,
    value: Option<String>,
    field: fn(String) -> F,
) -> ModelResult<F> {
    let value = value.ok_or_else(|| ModelError::invalid(format!("{name} is required")))?;
    let field = field(value);
    field.validate()?;
    Ok(field)
}

/// `UPDATE <table> SET <col> = $n, ... WHERE id = $m`; caller appends RETURNING.
pub(crate) fn update_query<'a, F: UpdateField>(
    table: &'static str,
    id: &'a str,
    fields: &'a [F],
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {table} SET "));
    {
        let mut set = qb.separated(", ");
        for field in fields {
            set.push(field.column());
            set.push_unseparated(" = ");
            set.push_bind_unseparated(field.value());
        }
    }
    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum TestField {
        Title(String),
        Text(String),
    }

    impl UpdateField for TestField {
        fn column(&self) -> &'static str {
            match self {
                TestField::Title(_) => "title",
                TestField::Text(_) => "text",
            }
        }

        fn value(&self) -> &str {
            match self {
                TestField::Title(v) | TestField::Text(v) => v,
            }
        }

        fn validate(&self) -> ModelResult<()> {
            non_empty(self.column(), self.value(), 8)
        }
    }

    #[test]
    fn update_query_uses_static_columns_and_binds_values() {
        let fields = vec![TestField::Title("a".into()), TestField::Text("b".into())];
        let qb = update_query("cards", "id1", &fields);
        assert_eq!(
            qb.sql(),
            "UPDATE cards SET title = $1, text = $2 WHERE id = $3"
        );
    }

    #[test]
    fn required_rejects_missing_and_blank_values() {
        let missing = required("title", None, TestField::Title).unwrap_err();
        assert_eq!(missing.to_string(), "invalid input: title is required");

        let blank = required("title", Some("   ".into()), TestField::Title).unwrap_err();
        assert!(matches!(blank, ModelError::Invalid(_)));

        let long = required("title", Some("123456789".into()), TestField::Title).unwrap_err();
        assert!(long.to_string().contains("at most 8"));

        let ok = required("title", Some("board".into()), TestField::Title).unwrap();
        assert_eq!(ok.value(), "board");
    }
}
