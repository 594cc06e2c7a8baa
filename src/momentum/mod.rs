//! Theme momentum calculation.

pub mod calculator;
pub mod deal_value;
pub mod history;
pub mod normalize;
pub mod weights;

pub use calculator::*;
pub use deal_value::*;
pub use history::*;
pub use weights::*;
