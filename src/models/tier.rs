//! Closed enumerations used for classification and scoring.
//!
//! Each enumeration is a fixed set of variants whose numeric weight is
//! supplied by configuration. The engine never assigns a weight to a
//! variant on its own: a missing table entry is a configuration error.
//!
//! # Ordering
//! Variants are declared from most to least significant, so the derived
//! `Ord` places `UrgencyTier::Critical` before `UrgencyTier::Low`. The
//! priority tie-break chain relies on this order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseTierError {
    /// Enumeration being parsed (e.g., "pillar").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! define_tier {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical lowercase name (matches the configuration key).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseTierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseTierError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

define_tier! {
    /// Strategic category used as the first scoring axis.
    Pillar ("pillar") {
        /// Work that directly earns money.
        Revenue => "revenue",
        /// Tooling, hosting, build and deploy plumbing.
        Infrastructure => "infrastructure",
        /// Recurring output (regular streams, posts).
        Consistency => "consistency",
        /// Experiments and new directions.
        Innovation => "innovation",
        /// Debt paydown and housekeeping.
        Cleanup => "cleanup",
    }
}

define_tier! {
    /// How soon the work must happen. Earlier variants are more urgent.
    UrgencyTier ("urgency tier") {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

define_tier! {
    /// How much the work matters once done.
    ImportanceTier ("importance tier") {
        /// Blocks other work; meant to dominate the product score.
        Blocking => "blocking",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

define_tier! {
    /// Which daily block a task is packed into.
    Bucket ("bucket") {
        /// Eligible for live, on-camera work.
        Streamable => "streamable",
        /// Everything else.
        OffStream => "off_stream",
    }
}
