//! Token condition flags
//!
//! Conditions are stored as a 32-bit set, one bit per [`Condition`].

use std::fmt;

/// Named status effects a token can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
    Concentrating,
}

impl Condition {
    pub const ALL: [Condition; 15] = [
        Condition::Blinded,
        Condition::Charmed,
        Condition::Deafened,
        Condition::Frightened,
        Condition::Grappled,
        Condition::Incapacitated,
        Condition::Invisible,
        Condition::Paralyzed,
        Condition::Petrified,
        Condition::Poisoned,
        Condition::Prone,
        Condition::Restrained,
        Condition::Stunned,
        Condition::Unconscious,
        Condition::Concentrating,
    ];

    fn bit(self) -> u32 {
        1 << (self as u32)
    }

    pub fn label(self) -> &'static str {
        match self {
            Condition::Blinded => "Blinded",
            Condition::Charmed => "Charmed",
            Condition::Deafened => "Deafened",
            Condition::Frightened => "Frightened",
            Condition::Grappled => "Grappled",
            Condition::Incapacitated => "Incapacitated",
            Condition::Invisible => "Invisible",
            Condition::Paralyzed => "Paralyzed",
            Condition::Petrified => "Petrified",
            Condition::Poisoned => "Poisoned",
            Condition::Prone => "Prone",
            Condition::Restrained => "Restrained",
            Condition::Stunned => "Stunned",
            Condition::Unconscious => "Unconscious",
            Condition::Concentrating => "Concentrating",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of conditions backed by a `u32`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Conditions(u32);

impl Conditions {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, condition: Condition) -> bool {
        self.0 & condition.bit() != 0
    }

    pub fn insert(&mut self, condition: Condition) {
        self.0 |= condition.bit();
    }

    pub fn remove(&mut self, condition: Condition) {
        self.0 &= !condition.bit();
    }

    /// Flip a condition, returning whether it is now set
    pub fn toggle(&mut self, condition: Condition) -> bool {
        if self.contains(condition) {
            self.remove(condition);
            false
        } else {
            self.insert(condition);
            true
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Condition> {
        Condition::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    pub fn is_blinded(self) -> bool {
        self.contains(Condition::Blinded)
    }

    pub fn is_invisible(self) -> bool {
        self.contains(Condition::Invisible)
    }

    pub fn is_prone(self) -> bool {
        self.contains(Condition::Prone)
    }

    pub fn is_unconscious(self) -> bool {
        self.contains(Condition::Unconscious)
    }
}
