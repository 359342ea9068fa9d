//! Named parameter maps and placeholder allocation.
//!
//! Compiled SQL refers to bound values through named placeholders such as
//! `:qp0`. [`Params`] stores the name → value mapping in insertion order and
//! [`PlaceholderAllocator`] hands out fresh `:qp<N>` names while a query is
//! being compiled.

use crate::error::{QueryError, QueryResult};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix of every placeholder generated by the compiler.
pub const PARAM_PREFIX: &str = ":qp";

/// How a backend expects positional parameters to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` for every parameter (MySQL).
    QuestionMark,
    /// `$1`, `$2`, ... (PostgreSQL).
    Dollar,
}

/// Insertion-ordered mapping from placeholder name to bound value.
///
/// Inserting an existing name overwrites the value in place, so merging two
/// maps keeps the first-seen order with last-write-wins values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Bind `value` under `name`, replacing any previous value for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove a binding. Later allocations never reuse names still present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Merge `other` into this map; values from `other` win on collision.
    pub fn merge(&mut self, other: &Params) {
        for (name, value) in &other.entries {
            self.insert(name.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Rewrite named placeholders into the positional form a driver expects.
    ///
    /// Placeholders are `:name` tokens. Quoted strings and identifiers are
    /// skipped, as are PostgreSQL `::type` casts. With [`PlaceholderStyle::Dollar`]
    /// a repeated name reuses its index; with [`PlaceholderStyle::QuestionMark`]
    /// every occurrence gets its own `?` and its own copy of the value.
    pub fn to_positional(
        &self,
        sql: &str,
        style: PlaceholderStyle,
    ) -> QueryResult<(String, Vec<Value>)> {
        let mut out = String::with_capacity(sql.len());
        let mut values = Vec::new();
        let mut indexes: HashMap<&str, usize> = HashMap::new();
        let mut quote: Option<char> = None;
        let mut chars = sql.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if let Some(q) = quote {
                out.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '\'' | '"' | '`' => {
                    quote = Some(c);
                    out.push(c);
                }
                ':' => match chars.peek() {
                    Some((_, ':')) => {
                        out.push_str("::");
                        chars.next();
                    }
                    Some((_, n)) if n.is_ascii_alphabetic() || *n == '_' => {
                        let mut end = i + 1;
                        while let Some((j, n)) = chars.peek() {
                            if n.is_ascii_alphanumeric() || *n == '_' {
                                end = j + n.len_utf8();
                                chars.next();
                            } else {
                                break;
                            }
                        }
                        let name = &sql[i..end];
                        let value = self
                            .get(name)
                            .ok_or_else(|| QueryError::MissingParam(name.to_string()))?;
                        match style {
                            PlaceholderStyle::QuestionMark => {
                                values.push(value.clone());
                                out.push('?');
                            }
                            PlaceholderStyle::Dollar => {
                                let idx = match indexes.get(name) {
                                    Some(idx) => *idx,
                                    None => {
                                        values.push(value.clone());
                                        indexes.insert(name, values.len());
                                        values.len()
                                    }
                                };
                                out.push('$');
                                out.push_str(&idx.to_string());
                            }
                        }
                    }
                    _ => out.push(c),
                },
                _ => out.push(c),
            }
        }

        Ok((out, values))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Generates unique `:qp<N>` placeholder names while binding values.
///
/// The counter starts at the size of the map it wraps and only moves forward.
/// A candidate name that is already bound is skipped, so a caller-seeded
/// `:qp0` or a value removed out of band can never cause a collision.
#[derive(Debug, Default)]
pub struct PlaceholderAllocator {
    params: Params,
    next: usize,
}

impl PlaceholderAllocator {
    pub fn new(params: Params) -> Self {
        let next = params.len();
        Self { params, next }
    }

    /// Bind `value` under a fresh placeholder and return the placeholder name.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        let name = loop {
            let candidate = format!("{PARAM_PREFIX}{}", self.next);
            self.next += 1;
            if !self.params.contains_key(&candidate) {
                break candidate;
            }
        };
        self.params.insert(name.clone(), value);
        name
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}
