//! Customer event kinds.
//!
//! Each kind maps to one relationship type between a `Customer` and a
//! `Product`. The set is closed: raw event types outside of it are rejected
//! instead of being turned into new relationship types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ShopgraphError;

/// A known customer interaction with a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    View,
    Click,
    AddToCart,
}

impl EventKind {
    /// Every known kind, in declaration order.
    pub const ALL: [EventKind; 3] = [EventKind::View, EventKind::Click, EventKind::AddToCart];

    /// Kinds that seed category recommendations: every known kind.
    pub const INTERACTIONS: [EventKind; 3] = Self::ALL;

    /// Relationship type written to the graph for this kind.
    pub fn rel_type(&self) -> &'static str {
        match self {
            EventKind::View => "VIEW",
            EventKind::Click => "CLICK",
            EventKind::AddToCart => "ADD_TO_CART",
        }
    }

    /// Normalize a raw event type (trim + upper-case) and resolve it.
    pub fn parse(raw: &str) -> Result<Self, ShopgraphError> {
        let normalized = raw.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.rel_type() == normalized)
            .ok_or(ShopgraphError::UnknownEventKind(normalized))
    }

    /// `VIEW|CLICK|ADD_TO_CART` style alternation for relationship patterns.
    pub fn pattern(kinds: &[EventKind]) -> String {
        kinds
            .iter()
            .map(|k| k.rel_type())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl FromStr for EventKind {
    type Err = ShopgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rel_type())
    }
}
