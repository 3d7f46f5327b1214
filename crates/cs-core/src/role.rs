//! Agent roles and the two competing sides.

/// What an agent is.  A single `Agent` type is parameterised by this tag;
/// the behavior layer looks up a role-specific profile instead of relying on
/// a type hierarchy.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// Completes tasks; flees when witnessing an elimination.
    #[default]
    Crewmate,
    /// Fakes tasks and eliminates crewmates.
    Adversary,
}

impl Role {
    #[inline]
    pub fn is_adversary(self) -> bool {
        matches!(self, Role::Adversary)
    }

    /// The side this role plays for.
    #[inline]
    pub fn side(self) -> Side {
        match self {
            Role::Crewmate  => Side::Crew,
            Role::Adversary => Side::Adversaries,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Crewmate  => "crewmate",
            Role::Adversary => "adversary",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The winning side recorded when the simulation reaches a terminal state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Crew,
    Adversaries,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Crew        => "crew",
            Side::Adversaries => "adversaries",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
