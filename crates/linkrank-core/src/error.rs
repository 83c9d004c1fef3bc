use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes for scripted consumers of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DatasetUnreadable,
    MalformedEdgeList,
    AllocationFailure,
    DegenerateVector,
    InvalidK,
    ConfigParseError,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DatasetUnreadable => "E1001",
            Self::MalformedEdgeList => "E1002",
            Self::ConfigParseError => "E1003",
            Self::AllocationFailure => "E2001",
            Self::DegenerateVector => "E3001",
            Self::InvalidK => "E4001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DatasetUnreadable => "Dataset could not be read",
            Self::MalformedEdgeList => "Malformed edge list",
            Self::ConfigParseError => "Config file parse error",
            Self::AllocationFailure => "Matrix storage could not be reserved",
            Self::DegenerateVector => "Score vector cannot be normalized",
            Self::InvalidK => "Requested k exceeds node count",
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DatasetUnreadable => Some("Check the dataset path and read permissions."),
            Self::MalformedEdgeList => {
                Some("Each non-comment line must hold exactly two integer node ids.")
            }
            Self::ConfigParseError => Some("Fix syntax in linkrank.toml and retry."),
            Self::AllocationFailure => {
                Some("The graph is too large for available memory; try a smaller dataset.")
            }
            Self::DegenerateVector => Some("The graph has no edges to propagate scores along."),
            Self::InvalidK => Some("Use k values no larger than the dataset's node count."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which HITS score vector an error or request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Vector {
    Authority,
    Hub,
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authority => f.write_str("authority"),
            Self::Hub => f.write_str("hub"),
        }
    }
}

/// Errors produced while loading a graph or ranking its nodes.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// Dataset file could not be opened or read.
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Loader contract violated. `line` is 1-based when the problem comes
    /// from a specific input line, 0 for whole-list violations.
    #[error("malformed edge list (line {line}): {reason}")]
    MalformedEdgeList { line: usize, reason: String },

    /// Backing storage for a matrix buffer could not be reserved.
    #[error("could not reserve {requested} entries for {what}")]
    AllocationFailure { what: &'static str, requested: usize },

    /// A score vector summed to exactly zero and cannot be normalized.
    #[error("{vector} vector sums to zero and cannot be normalized")]
    DegenerateVector { vector: Vector },

    /// A requested k is larger than the number of scored nodes.
    #[error("k = {k} exceeds the {available} scored nodes")]
    InvalidK { k: usize, available: usize },
}

impl RankError {
    /// Map the error to its stable code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::DatasetUnreadable,
            Self::MalformedEdgeList { .. } => ErrorCode::MalformedEdgeList,
            Self::AllocationFailure { .. } => ErrorCode::AllocationFailure,
            Self::DegenerateVector { .. } => ErrorCode::DegenerateVector,
            Self::InvalidK { .. } => ErrorCode::InvalidK,
        }
    }

    /// Shorthand for a whole-list contract violation.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEdgeList {
            line: 0,
            reason: reason.into(),
        }
    }
}

/// Reserve exactly `additional` slots or report [`RankError::AllocationFailure`].
///
/// # Errors
///
/// [`RankError::AllocationFailure`] naming `what` and the slot count.
pub fn reserve<T>(
    buf: &mut Vec<T>,
    additional: usize,
    what: &'static str,
) -> Result<(), RankError> {
    buf.try_reserve_exact(additional)
        .map_err(|_| RankError::AllocationFailure {
            what,
            requested: additional,
        })
}

/// A vector of `len` copies of `value`, allocated fallibly.
///
/// # Errors
///
/// [`RankError::AllocationFailure`] if `len` slots cannot be reserved.
pub fn filled<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>, RankError> {
    let mut buf = Vec::new();
    reserve(&mut buf, len, what)?;
    buf.resize(len, value);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, RankError, Vector, filled, reserve};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::DatasetUnreadable,
            ErrorCode::MalformedEdgeList,
            ErrorCode::ConfigParseError,
            ErrorCode::AllocationFailure,
            ErrorCode::DegenerateVector,
            ErrorCode::InvalidK,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::DegenerateVector.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn errors_map_to_codes() {
        let err = RankError::InvalidK {
            k: 10,
            available: 4,
        };
        assert_eq!(err.code(), ErrorCode::InvalidK);
        assert_eq!(err.to_string(), "k = 10 exceeds the 4 scored nodes");

        let err = RankError::DegenerateVector {
            vector: Vector::Hub,
        };
        assert_eq!(err.code(), ErrorCode::DegenerateVector);
        assert!(err.to_string().starts_with("hub vector"));
    }

    #[test]
    fn reserve_reports_allocation_failure() {
        let mut buf: Vec<u64> = Vec::new();
        let err = reserve(&mut buf, usize::MAX, "test buffer").expect_err("cannot reserve");
        assert!(matches!(
            err,
            RankError::AllocationFailure {
                what: "test buffer",
                requested: usize::MAX,
            }
        ));
        assert_eq!(err.code(), ErrorCode::AllocationFailure);
    }

    #[test]
    fn filled_sizes_exactly() {
        let buf = filled(3, 0.5_f64, "scores").expect("small");
        assert_eq!(buf, vec![0.5; 3]);
        assert!(filled(usize::MAX, 0_u64, "scores").is_err());
    }
}
