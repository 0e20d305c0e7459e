//! Policy for duplicate task descriptions.

use super::ParseDescriptionUniquenessError;

/// Controls whether a user may hold two open tasks with the same
/// description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DescriptionUniqueness {
    /// A description may be reused only once the earlier task has ended.
    #[default]
    WhileOpen,
    /// Descriptions are never checked.
    Disabled,
}

impl DescriptionUniqueness {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WhileOpen => "while_open",
            Self::Disabled => "disabled",
        }
    }

    /// Returns `true` when duplicates among open tasks are rejected.
    #[must_use]
    pub const fn is_enforced(self) -> bool {
        matches!(self, Self::WhileOpen)
    }
}

impl TryFrom<&str> for DescriptionUniqueness {
    type Error = ParseDescriptionUniquenessError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "while_open" => Ok(Self::WhileOpen),
            "disabled" => Ok(Self::Disabled),
            _ => Err(ParseDescriptionUniquenessError(value.to_owned())),
        }
    }
}
