//! Query keys and invalidation patterns.

use std::fmt;

/// Identifier under which a fetched result is cached.
///
/// A key is an entity scope (`"evento"`, `"miembros"`, ...) followed by the
/// parameters that discriminate one result from another (ids, filters).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: &'static str,
    params: Vec<String>,
}

impl QueryKey {
    pub fn new(scope: &'static str) -> Self {
        Self {
            scope,
            params: Vec::new(),
        }
    }

    /// Append a discriminating parameter
    pub fn with(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scope)?;
        for param in &self.params {
            write!(f, "/{}", param)?;
        }
        Ok(())
    }
}

/// Selects cached keys for invalidation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyPattern {
    /// Exactly one key
    Exact(QueryKey),
    /// Every key sharing the scope, whatever its parameters
    Scope(&'static str),
}

impl KeyPattern {
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            KeyPattern::Exact(exact) => exact == key,
            KeyPattern::Scope(scope) => key.scope == *scope,
        }
    }
}

impl From<QueryKey> for KeyPattern {
    fn from(key: QueryKey) -> Self {
        KeyPattern::Exact(key)
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPattern::Exact(key) => write!(f, "{}", key),
            KeyPattern::Scope(scope) => write!(f, "{}/*", scope),
        }
    }
}
