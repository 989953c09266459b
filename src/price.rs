use core::fmt;

use crate::schedule::BlockId;

const BLOCK_PRICES: [(BlockId, f64); 5] = [(1, 1.71), (2, 0.91), (3, 0.16), (4, 0.004), (5, 0.)];

/// Rate per kWh in euro. Zero is a valid free rate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Rate(pub f64);
impl Rate {
    pub fn is_free(&self) -> bool {
        self.0 == 0.
    }
}
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            return write!(f, "0 €");
        }
        let s = format!("{:.3}", self.0).replace('.', ",");
        write!(f, "{s} €")
    }
}

pub fn price_for(block: BlockId) -> Rate {
    let price = BLOCK_PRICES
        .iter()
        .find(|(b, _)| *b == block)
        .map(|&(_, price)| price)
        .unwrap_or_default();
    Rate(price)
}
