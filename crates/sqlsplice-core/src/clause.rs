//! Clause slots of a SELECT statement.

use std::fmt;

/// One named position in the fixed clause ordering of a SELECT statement.
///
/// The declaration order is the order in which clauses are rendered and in
/// which their parameters are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseSlot {
    /// `ALL`, `DISTINCT`, `SQL_NO_CACHE`, ...
    Modifiers,
    /// The select list.
    Columns,
    /// `INTO` placed before `FROM`.
    FirstInto,
    /// `FROM` together with its joins.
    Tables,
    /// `PARTITION (...)`.
    Partition,
    /// `WHERE`.
    Where,
    /// `GROUP BY`.
    GroupBy,
    /// `HAVING`.
    Having,
    /// `ORDER BY`.
    OrderBy,
    /// `LIMIT`.
    Limit,
    /// `PROCEDURE`.
    Procedure,
    /// `INTO` placed after the table expression.
    SecondInto,
    /// `FOR UPDATE`, `LOCK IN SHARE MODE`, ...
    Flags,
}

impl ClauseSlot {
    /// Number of slots.
    pub const COUNT: usize = 13;

    /// Every slot, in rendering order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Modifiers,
        Self::Columns,
        Self::FirstInto,
        Self::Tables,
        Self::Partition,
        Self::Where,
        Self::GroupBy,
        Self::Having,
        Self::OrderBy,
        Self::Limit,
        Self::Procedure,
        Self::SecondInto,
        Self::Flags,
    ];

    /// Returns the dense index of the slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the keyword emitted in front of the clause, if any.
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Tables => Some("FROM"),
            Self::Partition => Some("PARTITION"),
            Self::Where => Some("WHERE"),
            Self::GroupBy => Some("GROUP BY"),
            Self::Having => Some("HAVING"),
            Self::OrderBy => Some("ORDER BY"),
            Self::Limit => Some("LIMIT"),
            Self::Procedure => Some("PROCEDURE"),
            Self::Modifiers
            | Self::Columns
            | Self::FirstInto
            | Self::SecondInto
            | Self::Flags => None,
        }
    }

    /// Returns the slot name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Modifiers => "MODIFIERS",
            Self::Columns => "COLUMNS",
            Self::FirstInto => "FIRST_INTO",
            Self::Tables => "TABLES",
            Self::Partition => "PARTITION",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP_BY",
            Self::Having => "HAVING",
            Self::OrderBy => "ORDER_BY",
            Self::Limit => "LIMIT",
            Self::Procedure => "PROCEDURE",
            Self::SecondInto => "SECOND_INTO",
            Self::Flags => "FLAGS",
        }
    }

    /// Whether existing content is wrapped in parentheses once a second
    /// fragment is appended.
    ///
    /// Predicates joined with `AND` need every operand parenthesized, token
    /// lists such as columns or joins must stay as they are.
    #[must_use]
    pub const fn parenthesizes_on_append(self) -> bool {
        matches!(self, Self::Where | Self::Having)
    }
}

impl fmt::Display for ClauseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
