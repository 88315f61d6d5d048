use std::fmt::{Debug, Display, Formatter};

use ordered_float::OrderedFloat;

use crate::quantity::Quantity;

pub type Cost = Quantity<0, 1>;

impl Cost {
    /// Charged whenever two consecutive days are assigned to different plants.
    pub const SWITCHING_PENALTY: Self = Self(OrderedFloat(5.0));
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}¤", self.0.0)
    }
}

impl From<Cost> for f64 {
    fn from(value: Cost) -> Self {
        value.0.0
    }
}
