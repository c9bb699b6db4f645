use super::board::BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Green,
    Orange,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Green => Player::Orange,
            Player::Orange => Player::Green,
        }
    }

    /// Row delta of a forward move for this player's men.
    /// Green starts on rows 0-2 and advances toward row 7.
    pub fn forward(self) -> i8 {
        match self {
            Player::Green => 1,
            Player::Orange => -1,
        }
    }

    /// The opponent's back row, where this player's men are crowned
    pub fn promotion_row(self) -> usize {
        match self {
            Player::Green => BOARD_SIZE - 1,
            Player::Orange => 0,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Green => "Green",
            Player::Orange => "Orange",
        }
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "green" | "1" => Ok(Player::Green),
            "orange" | "2" => Ok(Player::Orange),
            other => Err(format!("unknown player '{other}' (expected 'green' or 'orange')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::Green.other(), Player::Orange);
        assert_eq!(Player::Orange.other(), Player::Green);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::Green.name(), "Green");
        assert_eq!(Player::Orange.name(), "Orange");
    }

    #[test]
    fn test_forward_points_at_promotion_row() {
        assert_eq!(Player::Green.forward(), 1);
        assert_eq!(Player::Green.promotion_row(), 7);
        assert_eq!(Player::Orange.forward(), -1);
        assert_eq!(Player::Orange.promotion_row(), 0);
    }

    #[test]
    fn test_parse_player() {
        assert_eq!("Green".parse::<Player>(), Ok(Player::Green));
        assert_eq!("2".parse::<Player>(), Ok(Player::Orange));
        assert!("blue".parse::<Player>().is_err());
    }
}
