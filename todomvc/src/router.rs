//! URL-fragment router.
//!
//! Three static routes, each selecting a filter. There are no guards and
//! no parameters: navigating always overwrites the current filter.

use crate::error::TodoError;
use crate::types::FilterMode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A known location in the app
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// `/`
    #[default]
    All,
    /// `/active`
    Active,
    /// `/completed`
    Completed,
}

impl Route {
    /// Every route, in filter-bar order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Parses a URL fragment
    ///
    /// Accepts the bare path (`/active`) or the fragment as it appears in a
    /// link (`#/active`). An empty fragment is the root.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::UnknownRoute`] for anything else.
    pub fn parse(fragment: &str) -> Result<Self, TodoError> {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        match path {
            "" | "/" => Ok(Self::All),
            "/active" => Ok(Self::Active),
            "/completed" => Ok(Self::Completed),
            _ => Err(TodoError::UnknownRoute(fragment.to_string())),
        }
    }

    /// The path this route is served at
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::All => "/",
            Self::Active => "/active",
            Self::Completed => "/completed",
        }
    }

    /// The filter this route selects
    #[must_use]
    pub const fn filter(self) -> FilterMode {
        match self {
            Self::All => FilterMode::All,
            Self::Active => FilterMode::Active,
            Self::Completed => FilterMode::Completed,
        }
    }
}

impl From<FilterMode> for Route {
    fn from(filter: FilterMode) -> Self {
        match filter {
            FilterMode::All => Self::All,
            FilterMode::Active => Self::Active,
            FilterMode::Completed => Self::Completed,
        }
    }
}

impl FromStr for Route {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
