use std::str::FromStr;

/// Why a generation attempt was discarded.
///
/// Rejections are ordinary outcomes: the caller counts them and moves on to
/// the next seed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum RejectReason {
    /// No solution could be synthesized within the search budget.
    #[display("no_solution")]
    NoSolution,
    /// The final uniqueness check found two or more completions.
    #[display("not_unique")]
    NotUnique,
    /// The final uniqueness check found no completion at all.
    ///
    /// The reducer only ever hides cells of a valid solution, so this points
    /// at a defect rather than bad luck.
    #[display("no_final_solution")]
    NoFinalSolution,
    /// The region structure was rejected.
    #[display("invalid_rooms")]
    InvalidRooms,
    /// The final uniqueness check ran out of budget.
    #[display("uniqueness_timeout")]
    UniquenessTimeout,
}

impl RejectReason {
    /// All reasons, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::NoSolution,
        Self::NotUnique,
        Self::NoFinalSolution,
        Self::InvalidRooms,
        Self::UniquenessTimeout,
    ];

    /// The stable snake_case name of this reason.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSolution => "no_solution",
            Self::NotUnique => "not_unique",
            Self::NoFinalSolution => "no_final_solution",
            Self::InvalidRooms => "invalid_rooms",
            Self::UniquenessTimeout => "uniqueness_timeout",
        }
    }
}

/// Error returned when parsing an unknown [`RejectReason`] name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown rejection reason {name:?}")]
pub struct ParseRejectReasonError {
    #[error(not(source))]
    name: String,
}

impl FromStr for RejectReason {
    type Err = ParseRejectReasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| ParseRejectReasonError { name: s.to_owned() })
    }
}
