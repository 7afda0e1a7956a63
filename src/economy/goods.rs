use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Good {
    // Raw materials gathered in the new world
    Food,
    Sugar,
    Tobacco,
    Cotton,
    Furs,
    Lumber,
    Ore,
    Silver,
    Horses,

    // Processed goods (refined in colony buildings)
    Rum,    // from Sugar
    Cigars, // from Tobacco
    Cloth,  // from Cotton
    Coats,  // from Furs

    // Manufactured goods (bought in the old world)
    TradeGoods,
    Tools,
    Muskets,
}

impl Good {
    /// Returns true if this is a raw material gathered from terrain
    pub fn is_raw_material(self) -> bool {
        matches!(
            self,
            Good::Food
                | Good::Sugar
                | Good::Tobacco
                | Good::Cotton
                | Good::Furs
                | Good::Lumber
                | Good::Ore
                | Good::Silver
                | Good::Horses
        )
    }

    /// Returns true if this is a processed good (refined from a raw material)
    pub fn is_processed(self) -> bool {
        matches!(self, Good::Rum | Good::Cigars | Good::Cloth | Good::Coats)
    }

    /// Returns true if this is a manufactured good imported from the old world
    pub fn is_manufactured(self) -> bool {
        matches!(self, Good::TradeGoods | Good::Tools | Good::Muskets)
    }
}

impl fmt::Display for Good {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Good::Food => write!(f, "Food"),
            Good::Sugar => write!(f, "Sugar"),
            Good::Tobacco => write!(f, "Tobacco"),
            Good::Cotton => write!(f, "Cotton"),
            Good::Furs => write!(f, "Furs"),
            Good::Lumber => write!(f, "Lumber"),
            Good::Ore => write!(f, "Ore"),
            Good::Silver => write!(f, "Silver"),
            Good::Horses => write!(f, "Horses"),
            Good::Rum => write!(f, "Rum"),
            Good::Cigars => write!(f, "Cigars"),
            Good::Cloth => write!(f, "Cloth"),
            Good::Coats => write!(f, "Coats"),
            Good::TradeGoods => write!(f, "Trade Goods"),
            Good::Tools => write!(f, "Tools"),
            Good::Muskets => write!(f, "Muskets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::economy::*;

    #[test]
    fn display_formats() {
        assert_eq!(Good::Ore.to_string(), "Ore");
        assert_eq!(Good::Silver.to_string(), "Silver");
        assert_eq!(Good::TradeGoods.to_string(), "Trade Goods");
        assert_eq!(Good::Muskets.to_string(), "Muskets");
        assert_eq!(Good::Food.to_string(), "Food");
    }

    #[test]
    fn raw_material_classification() {
        assert!(Good::Food.is_raw_material());
        assert!(Good::Silver.is_raw_material());
        assert!(Good::Horses.is_raw_material());
        assert!(!Good::Rum.is_raw_material());
        assert!(!Good::Muskets.is_raw_material());
    }

    #[test]
    fn processed_classification() {
        assert!(Good::Rum.is_processed());
        assert!(Good::Coats.is_processed());
        assert!(!Good::Sugar.is_processed());
        assert!(!Good::Tools.is_processed());
    }

    #[test]
    fn manufactured_classification() {
        assert!(Good::TradeGoods.is_manufactured());
        assert!(Good::Tools.is_manufactured());
        assert!(Good::Muskets.is_manufactured());
        assert!(!Good::Cloth.is_manufactured());
        assert!(!Good::Ore.is_manufactured());
    }
}
