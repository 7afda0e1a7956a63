//! Game constants and configuration values
//!
//! This module centralizes all magic numbers and configuration values used throughout the game.

// ============================================================================
// CARGO CONSTANTS
// ============================================================================

/// Maximum quantity of a single commodity that fits in one cargo slot
pub const MAX_GOODS_PER_SLOT: u32 = 100;

/// Default quantity taken when a commodity is dragged from the market
pub const DEFAULT_MARKET_QUANTITY: u32 = 100;

// ============================================================================
// HIGH SEAS
// ============================================================================

/// Turns a ship spends crossing the high seas in either direction
pub const HIGH_SEAS_TURNS: u32 = 2;

// ============================================================================
// TREASURY
// ============================================================================

/// Starting gold for a new game
pub const STARTING_GOLD: u32 = 1_000;
