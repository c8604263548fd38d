// Lineup positions and roster-needs accounting.

use std::fmt;

/// A lineup slot designation for a drafted player.
///
/// `Unassigned` stands in for picks recorded without a slot (opponent picks,
/// keeper entries) so a missing position is an explicit state rather than an
/// absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    PointGuard,
    ShootingGuard,
    SmallForward,
    PowerForward,
    Center,
    Utility,
    Guard,
    Forward,
    Unassigned,
}

impl Position {
    /// Parse a user-supplied position token. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PG" => Some(Position::PointGuard),
            "SG" => Some(Position::ShootingGuard),
            "SF" => Some(Position::SmallForward),
            "PF" => Some(Position::PowerForward),
            "C" => Some(Position::Center),
            "UTIL" => Some(Position::Utility),
            "G" | "GUARD" => Some(Position::Guard),
            "F" | "FORWARD" => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
            Position::Utility => "UTIL",
            Position::Guard => "G",
            Position::Forward => "F",
            Position::Unassigned => "-",
        }
    }

    /// How many players a full roster wants in this slot. Generic Guard and
    /// Forward slots carry no minimum, nor do unassigned picks.
    pub fn required_count(&self) -> u32 {
        match self {
            Position::PointGuard
            | Position::ShootingGuard
            | Position::SmallForward
            | Position::PowerForward
            | Position::Center => 2,
            Position::Utility => 3,
            Position::Guard | Position::Forward | Position::Unassigned => 0,
        }
    }

    /// Deterministic ordering index for display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::PointGuard => 0,
            Position::ShootingGuard => 1,
            Position::SmallForward => 2,
            Position::PowerForward => 3,
            Position::Center => 4,
            Position::Guard => 5,
            Position::Forward => 6,
            Position::Utility => 7,
            Position::Unassigned => 8,
        }
    }

    /// All slots with a required minimum, in display order.
    pub fn required_slots() -> [Position; 6] {
        [
            Position::PointGuard,
            Position::ShootingGuard,
            Position::SmallForward,
            Position::PowerForward,
            Position::Center,
            Position::Utility,
        ]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Remaining demand per required slot: required count minus held count,
/// floored at zero.
pub fn roster_needs(held: &[Position]) -> Vec<(Position, u32)> {
    Position::required_slots()
        .iter()
        .map(|&slot| {
            let have = held.iter().filter(|&&p| p == slot).count() as u32;
            (slot, slot.required_count().saturating_sub(have))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_standard_positions() {
        assert_eq!(Position::parse("PG"), Some(Position::PointGuard));
        assert_eq!(Position::parse("SG"), Some(Position::ShootingGuard));
        assert_eq!(Position::parse("SF"), Some(Position::SmallForward));
        assert_eq!(Position::parse("PF"), Some(Position::PowerForward));
        assert_eq!(Position::parse("C"), Some(Position::Center));
        assert_eq!(Position::parse("UTIL"), Some(Position::Utility));
    }

    #[test]
    fn parse_generic_slots() {
        assert_eq!(Position::parse("G"), Some(Position::Guard));
        assert_eq!(Position::parse("guard"), Some(Position::Guard));
        assert_eq!(Position::parse("F"), Some(Position::Forward));
        assert_eq!(Position::parse("Forward"), Some(Position::Forward));
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(Position::parse("pg"), Some(Position::PointGuard));
        assert_eq!(Position::parse("Util"), Some(Position::Utility));
        assert_eq!(Position::parse("c"), Some(Position::Center));
    }

    #[test]
    fn parse_invalid() {
        assert_eq!(Position::parse(""), None);
        assert_eq!(Position::parse("XX"), None);
        assert_eq!(Position::parse("1B"), None);
    }

    #[test]
    fn display_roundtrip() {
        for pos in [
            Position::PointGuard,
            Position::ShootingGuard,
            Position::SmallForward,
            Position::PowerForward,
            Position::Center,
            Position::Utility,
            Position::Guard,
            Position::Forward,
        ] {
            assert_eq!(Position::parse(pos.as_str()), Some(pos));
        }
    }

    #[test]
    fn unassigned_does_not_parse_back() {
        assert_eq!(Position::parse(Position::Unassigned.as_str()), None);
    }

    #[test]
    fn needs_on_empty_roster() {
        let needs = roster_needs(&[]);
        assert_eq!(needs.len(), 6);
        for (slot, need) in needs {
            assert_eq!(need, slot.required_count());
        }
    }

    #[test]
    fn needs_decrease_as_slots_fill() {
        let held = [Position::PointGuard, Position::PointGuard, Position::Center];
        let needs = roster_needs(&held);
        let need_of = |p: Position| needs.iter().find(|(s, _)| *s == p).unwrap().1;
        assert_eq!(need_of(Position::PointGuard), 0);
        assert_eq!(need_of(Position::Center), 1);
        assert_eq!(need_of(Position::Utility), 3);
    }

    #[test]
    fn needs_never_negative() {
        let held = [Position::Center; 7];
        let needs = roster_needs(&held);
        assert!(needs.iter().all(|(_, n)| *n <= 3));
        assert_eq!(
            needs.iter().find(|(s, _)| *s == Position::Center).unwrap().1,
            0
        );
    }

    #[test]
    fn unassigned_and_generic_slots_ignored_by_needs() {
        let held = [Position::Unassigned, Position::Guard, Position::Forward];
        let needs = roster_needs(&held);
        for (slot, need) in needs {
            assert_eq!(need, slot.required_count());
        }
    }
}
