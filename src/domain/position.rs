//! Flat/long position state machine.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Flat,
    Long,
}

impl Position {
    pub fn is_long(self) -> bool {
        self == Position::Long
    }

    /// 0 for flat, 1 for long.
    pub fn exposure(self) -> u8 {
        match self {
            Position::Flat => 0,
            Position::Long => 1,
        }
    }

    pub fn weight(self) -> f64 {
        f64::from(self.exposure())
    }

    /// Next state after a bar's cross events.
    ///
    /// FLAT -> LONG on a cross up, LONG -> FLAT on a cross down, every other
    /// input leaves the state unchanged.
    pub fn transition(self, cross_up: bool, cross_down: bool) -> Position {
        match self {
            Position::Flat if cross_up => Position::Long,
            Position::Long if cross_down => Position::Flat,
            state => state,
        }
    }

    /// |self - previous|, 1 when the state changed.
    pub fn trade_from(self, previous: Position) -> u8 {
        self.exposure().abs_diff(previous.exposure())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.exposure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_flat() {
        assert_eq!(Position::default(), Position::Flat);
        assert!(!Position::Flat.is_long());
        assert!(Position::Long.is_long());
    }

    #[test]
    fn flat_enters_on_cross_up() {
        assert_eq!(Position::Flat.transition(true, false), Position::Long);
    }

    #[test]
    fn flat_ignores_cross_down() {
        assert_eq!(Position::Flat.transition(false, true), Position::Flat);
    }

    #[test]
    fn long_exits_on_cross_down() {
        assert_eq!(Position::Long.transition(false, true), Position::Flat);
    }

    #[test]
    fn long_ignores_cross_up() {
        assert_eq!(Position::Long.transition(true, false), Position::Long);
    }

    #[test]
    fn no_event_self_loops() {
        assert_eq!(Position::Flat.transition(false, false), Position::Flat);
        assert_eq!(Position::Long.transition(false, false), Position::Long);
    }

    #[test]
    fn trade_counts_changes() {
        assert_eq!(Position::Long.trade_from(Position::Flat), 1);
        assert_eq!(Position::Flat.trade_from(Position::Long), 1);
        assert_eq!(Position::Long.trade_from(Position::Long), 0);
        assert_eq!(Position::Flat.trade_from(Position::Flat), 0);
    }

    #[test]
    fn weight_values() {
        assert_eq!(Position::Flat.weight(), 0.0);
        assert_eq!(Position::Long.weight(), 1.0);
    }
}
