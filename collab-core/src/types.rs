use std::borrow::Borrow;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Typed ID wrappers ──────────────────────────────────────────────

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        // Ord and Hash are derived from the inner String, so map lookups by &str agree.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(EmployeeId);
string_id!(ExternalId);

// ── Registry records ───────────────────────────────────────────────

/// A company identity. Registered once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub department: String,
}

impl Employee {
    pub fn new(
        id: impl Into<EmployeeId>,
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }
}

/// A chat-system account mapped to exactly one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatIdentity {
    /// Account id in the chat system (e.g. `U1024`). Unique per store.
    pub external_id: ExternalId,
    /// Display handle, informational only.
    pub handle: String,
    pub employee_id: EmployeeId,
}

impl ChatIdentity {
    pub fn new(
        external_id: impl Into<ExternalId>,
        handle: impl Into<String>,
        employee_id: impl Into<EmployeeId>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            handle: handle.into(),
            employee_id: employee_id.into(),
        }
    }
}

// ── Interactions ───────────────────────────────────────────────────

/// What kind of work two employees collaborated on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionKind {
    /// A tracked ticket.
    Issue,
    /// A bug report.
    Bug,
    /// A code review exchange.
    CodeReview,
    /// A free-form discussion thread.
    Discussion,
}

impl InteractionKind {
    pub const ALL: [Self; 4] = [Self::Issue, Self::Bug, Self::CodeReview, Self::Discussion];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "ISSUE",
            Self::Bug => "BUG",
            Self::CodeReview => "CODE_REVIEW",
            Self::Discussion => "DISCUSSION",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name an [`InteractionKind`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown interaction kind: {0}")]
pub struct ParseKindError(pub String);

impl std::str::FromStr for InteractionKind {
    type Err = ParseKindError;

    /// Accepts the canonical names case-insensitively, `-` in place of `_`,
    /// and the legacy `JIRA` alias for [`InteractionKind::Issue`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "ISSUE" | "JIRA" => Ok(Self::Issue),
            "BUG" => Ok(Self::Bug),
            "CODE_REVIEW" => Ok(Self::CodeReview),
            "DISCUSSION" => Ok(Self::Discussion),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// One collaboration event between two employees on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Free-form ticket key, e.g. `BUG-77`.
    pub issue_key: String,
    pub employee_a: EmployeeId,
    pub employee_b: EmployeeId,
    pub kind: InteractionKind,
    pub timestamp: DateTime<Utc>,
}

impl Interaction {
    /// Whether `employee` is either participant.
    pub fn involves(&self, employee: &str) -> bool {
        self.employee_a.as_str() == employee || self.employee_b.as_str() == employee
    }

    /// The participants ordered by id, independent of recording order.
    pub fn unordered_pair(&self) -> (&EmployeeId, &EmployeeId) {
        if self.employee_a <= self.employee_b {
            (&self.employee_a, &self.employee_b)
        } else {
            (&self.employee_b, &self.employee_a)
        }
    }
}

// ── Derived views ──────────────────────────────────────────────────

/// One employee's neighbors and the interaction count with each.
pub type AdjacencyRow = BTreeMap<EmployeeId, u32>;

/// Employee id → neighbor id → interaction count. Always symmetric.
///
/// Ordered maps make every traversal (exports, BFS expansion, tie-breaks)
/// follow ascending employee id.
pub type Adjacency = BTreeMap<EmployeeId, AdjacencyRow>;

/// Result of a successful record call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Appended to the log and counted in the adjacency.
    Recorded,
    /// Both sides resolved to the same employee; nothing changed.
    IgnoredSelfInteraction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn kind_parse_canonical_and_aliases() {
        assert_eq!("ISSUE".parse::<InteractionKind>(), Ok(InteractionKind::Issue));
        assert_eq!("JIRA".parse::<InteractionKind>(), Ok(InteractionKind::Issue));
        assert_eq!(
            "code-review".parse::<InteractionKind>(),
            Ok(InteractionKind::CodeReview)
        );
        assert_eq!(
            " discussion ".parse::<InteractionKind>(),
            Ok(InteractionKind::Discussion)
        );
        assert_eq!(
            "PAIRING".parse::<InteractionKind>(),
            Err(ParseKindError("PAIRING".to_string()))
        );
    }

    #[test]
    fn kind_serde_matches_as_str() {
        for kind in InteractionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: InteractionKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn string_id_display_and_borrow() {
        let id = EmployeeId::from("E-1001");
        assert_eq!(id.to_string(), "E-1001");

        let mut row = AdjacencyRow::new();
        row.insert(id.clone(), 3);
        assert_eq!(row.get("E-1001"), Some(&3));
    }

    #[test]
    fn string_id_serializes_transparently() {
        let id = ExternalId::new("U1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"U1\"");
    }

    #[test]
    fn unordered_pair_is_sorted() {
        let i = Interaction {
            issue_key: "BUG-1".into(),
            employee_a: "E-2".into(),
            employee_b: "E-1".into(),
            kind: InteractionKind::Bug,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        };
        let (lo, hi) = i.unordered_pair();
        assert_eq!(lo.as_str(), "E-1");
        assert_eq!(hi.as_str(), "E-2");
        assert!(i.involves("E-1"));
        assert!(!i.involves("E-3"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_kind() -> impl Strategy<Value = InteractionKind> {
            prop_oneof![
                Just(InteractionKind::Issue),
                Just(InteractionKind::Bug),
                Just(InteractionKind::CodeReview),
                Just(InteractionKind::Discussion),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn kind_as_str_parses_back(kind in arb_kind()) {
                let s = kind.as_str();
                prop_assert_eq!(kind.to_string(), s);
                prop_assert_eq!(s.parse::<InteractionKind>().unwrap(), kind);
                prop_assert_eq!(s.to_lowercase().parse::<InteractionKind>().unwrap(), kind);
            }

            #[test]
            fn id_ordering_matches_str(a in "[A-Za-z0-9-]{0,12}", b in "[A-Za-z0-9-]{0,12}") {
                let ia = EmployeeId::new(a.clone());
                let ib = EmployeeId::new(b.clone());
                prop_assert_eq!(ia.cmp(&ib), a.as_str().cmp(b.as_str()));
            }
        }
    }
}
