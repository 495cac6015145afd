use serde::{Deserialize, Serialize};

/// A whole-unit chip or money amount.
///
/// Buy-ins and cash-outs are always non-negative; net results are signed.
/// A single unit is used for the whole night, so one chip equals one unit
/// of the currency shown by [`GameConfig::currency_symbol`].
pub type Chips = i64;

/// Largest single buy-in a player may request by default.
pub const DEFAULT_MAX_BUY_IN: Chips = 100_000;

/// Longest display name accepted after trimming.
pub const DEFAULT_MAX_NAME_LEN: usize = 30;

/// Settings for a game night.
///
/// The limits are enforced by the request layer before any record is
/// created; the summary and settlement computations never re-check them.
///
/// # Examples
///
/// ```
/// use homegame_settlement::core::chips::GameConfig;
///
/// let config = GameConfig::default();
/// assert!(config.is_valid_buy_in(100));
/// assert!(!config.is_valid_buy_in(0));
/// assert!(!config.is_valid_buy_in(config.max_buy_in + 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Upper bound (inclusive) for a single buy-in request.
    pub max_buy_in: Chips,
    /// Upper bound (inclusive) on display name length, in characters.
    pub max_name_len: usize,
    /// Symbol used when rendering amounts.
    pub currency_symbol: char,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_buy_in: DEFAULT_MAX_BUY_IN,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            currency_symbol: '£',
        }
    }
}

impl GameConfig {
    /// A buy-in must be positive and no larger than `max_buy_in`.
    pub fn is_valid_buy_in(&self, amount: Chips) -> bool {
        amount > 0 && amount <= self.max_buy_in
    }

    /// Render an unsigned amount with the configured symbol, e.g. `£100`.
    pub fn format_amount(&self, amount: Chips) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }

    /// Render a signed net result with the configured symbol.
    pub fn format_net(&self, net: Chips) -> String {
        format_net(net, self.currency_symbol)
    }
}

/// Render a signed net result: `+£50` for winnings, `-£50` for losses.
///
/// Break-even renders as `+£0`.
pub fn format_net(net: Chips, symbol: char) -> String {
    if net >= 0 {
        format!("+{}{}", symbol, net)
    } else {
        format!("-{}{}", symbol, net.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_net_positive() {
        assert_eq!(format_net(50, '£'), "+£50");
    }

    #[test]
    fn test_format_net_negative() {
        assert_eq!(format_net(-75, '£'), "-£75");
    }

    #[test]
    fn test_format_net_zero() {
        assert_eq!(format_net(0, '$'), "+$0");
    }

    #[test]
    fn test_buy_in_bounds() {
        let config = GameConfig::default();
        assert!(config.is_valid_buy_in(1));
        assert!(config.is_valid_buy_in(DEFAULT_MAX_BUY_IN));
        assert!(!config.is_valid_buy_in(0));
        assert!(!config.is_valid_buy_in(-20));
        assert!(!config.is_valid_buy_in(DEFAULT_MAX_BUY_IN + 1));
    }

    #[test]
    fn test_custom_symbol() {
        let config = GameConfig {
            currency_symbol: '€',
            ..Default::default()
        };
        assert_eq!(config.format_amount(20), "€20");
        assert_eq!(config.format_net(-5), "-€5");
    }
}
