//! Sorting and offset pagination shared by listing queries.
use thiserror::Error;

#[derive(Default, std::fmt::Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDirection {
    #[default]
    Ascending,
    Descending,
}

impl ListDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "ASC" => Some(Self::Ascending),
            "DESC" => Some(Self::Descending),
            _ => None,
        }
    }
}

#[derive(std::fmt::Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<T> {
    pub by: T,
    pub direction: ListDirection,
}

/// A field that may appear in an order-by expression.
///
/// The name returned here is what user input is matched against, so only
/// values the caller put into the allow-list can ever leave the resolver.
pub trait SortField: Copy {
    fn field_name(&self) -> &'static str;
}

impl SortField for &'static str {
    fn field_name(&self) -> &'static str {
        self
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrderByError {
    #[error("invalid order by parameter: {0}")]
    InvalidParameter(String),
    #[error("cannot order by {0}")]
    UnknownField(String),
    #[error("invalid order direction: {0}")]
    InvalidDirection(String),
}

/// Resolves an expression such as `"id DESC,updated_at"` against `allowed`.
///
/// Tokens are split on `separator`, trimmed and empty ones skipped. Each token
/// is `field` or `field direction`; the direction defaults to ascending and is
/// matched case-insensitively. The first occurrence of a field wins and the
/// output keeps first-occurrence order.
pub fn resolve_order_by<T: SortField>(
    expr: &str,
    separator: char,
    allowed: &[T],
) -> Result<Vec<Sort<T>>, OrderByError> {
    let mut sorts: Vec<Sort<T>> = Vec::new();
    for token in expr.split(separator) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let parts: Vec<&str> = token.split_whitespace().collect();
        let (name, direction) = match parts.as_slice() {
            [name] => (*name, None),
            [name, direction] => (*name, Some(direction.to_uppercase())),
            _ => return Err(OrderByError::InvalidParameter(token.to_string())),
        };
        let field = allowed
            .iter()
            .find(|field| field.field_name() == name)
            .copied()
            .ok_or_else(|| OrderByError::UnknownField(token.to_string()))?;
        let direction = match direction {
            None => ListDirection::default(),
            Some(direction) => {
                ListDirection::parse(&direction).ok_or(OrderByError::InvalidDirection(direction))?
            }
        };
        if sorts.iter().any(|s| s.by.field_name() == name) {
            continue;
        }
        sorts.push(Sort {
            by: field,
            direction,
        });
    }
    Ok(sorts)
}

#[derive(Debug, Clone, Copy)]
pub struct OffsetPaginatedArgs {
    pub offset: i64,
    pub count: i64,
}

impl Default for OffsetPaginatedArgs {
    fn default() -> Self {
        Self {
            offset: 0,
            count: 100,
        }
    }
}

pub struct OffsetPaginatedRet<T> {
    pub entities: Vec<T>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: [&str; 2] = ["id", "updated_at"];

    fn pairs(sorts: Vec<Sort<&'static str>>) -> Vec<(&'static str, ListDirection)> {
        sorts.into_iter().map(|s| (s.by, s.direction)).collect()
    }

    #[test]
    fn keeps_first_occurrence_and_order() {
        let sorts = resolve_order_by("id DESC,updated_at,id ASC", ',', &ALLOWED).unwrap();
        assert_eq!(
            pairs(sorts),
            vec![
                ("id", ListDirection::Descending),
                ("updated_at", ListDirection::Ascending)
            ]
        );
    }

    #[test]
    fn direction_is_case_insensitive() {
        let sorts = resolve_order_by("updated_at desc, id Asc", ',', &ALLOWED).unwrap();
        assert_eq!(
            pairs(sorts),
            vec![
                ("updated_at", ListDirection::Descending),
                ("id", ListDirection::Ascending)
            ]
        );
    }

    #[test]
    fn skips_empty_tokens() {
        assert!(resolve_order_by("", ',', &ALLOWED).unwrap().is_empty());
        let sorts = resolve_order_by(" , ,id  DESC ,", ',', &ALLOWED).unwrap();
        assert_eq!(pairs(sorts), vec![("id", ListDirection::Descending)]);
    }

    #[test]
    fn rejects_malformed_token() {
        let err = resolve_order_by("updated_at,id DESC ASC", ',', &ALLOWED).unwrap_err();
        assert_eq!(err, OrderByError::InvalidParameter("id DESC ASC".to_string()));
        assert_eq!(err.to_string(), "invalid order by parameter: id DESC ASC");
    }

    #[test]
    fn rejects_unknown_field() {
        let err = resolve_order_by("foo ASC", ',', &ALLOWED).unwrap_err();
        assert_eq!(err.to_string(), "cannot order by foo ASC");
    }

    #[test]
    fn field_match_is_case_sensitive() {
        let err = resolve_order_by("ID", ',', &ALLOWED).unwrap_err();
        assert_eq!(err.to_string(), "cannot order by ID");
    }

    #[test]
    fn unknown_field_is_reported_before_bad_direction() {
        let err = resolve_order_by("foo BAD", ',', &ALLOWED).unwrap_err();
        assert_eq!(err, OrderByError::UnknownField("foo BAD".to_string()));
    }

    #[test]
    fn rejects_bad_direction() {
        let err = resolve_order_by("id up", ',', &ALLOWED).unwrap_err();
        assert_eq!(err.to_string(), "invalid order direction: UP");
    }

    #[test]
    fn supports_other_separators() {
        let sorts = resolve_order_by("updated_at DESC;id", ';', &ALLOWED).unwrap();
        assert_eq!(
            pairs(sorts),
            vec![
                ("updated_at", ListDirection::Descending),
                ("id", ListDirection::Ascending)
            ]
        );
    }
}
