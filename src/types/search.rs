use serde::Deserialize;

use crate::types::question::Question;

/// Query string of `GET /questions/search`.
#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    pub title: Option<String>,
    pub category: Option<String>,
}

/// A validated conjunctive filter. Each present field is a case-insensitive
/// substring match; an empty filter matches every question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub title: Option<String>,
    pub category: Option<String>,
}

impl SearchFilter {
    /// Renders the `WHERE` clause (empty when unfiltered) with `$n`
    /// placeholders, and the values to bind in placeholder order.
    pub fn to_sql(&self) -> (String, Vec<String>) {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        for (column, term) in [("title", &self.title), ("category", &self.category)] {
            if let Some(term) = term {
                values.push(format!("%{}%", escape_like(term)));
                clauses.push(format!("{} ILIKE ${}", column, values.len()));
            }
        }

        if clauses.is_empty() {
            (String::new(), values)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), values)
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            needle
                .as_ref()
                .map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
        }

        contains(&question.title, &self.title) && contains(&question.category, &self.category)
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
