//! Boundary policies for interval overlap tests.

use serde::{Deserialize, Serialize};

/// How two intervals that merely touch at an endpoint are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Touching endpoints overlap: `s1 <= e2 && e1 >= s2`.
    /// Back-to-back bookings (09:00-10:00, 10:00-11:00) are a conflict.
    #[default]
    Inclusive,
    /// Touching endpoints do not overlap: `s1 < e2 && e1 > s2`.
    HalfOpen,
}

impl BoundaryPolicy {
    /// Parse a policy name as written in config files and CLI flags.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Some(Self::Inclusive),
            "half_open" | "half-open" | "halfopen" => Some(Self::HalfOpen),
            _ => None,
        }
    }
}
