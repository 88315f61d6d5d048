use std::fmt::{Debug, Display, Formatter};

use crate::quantity::{Quantity, cost::Cost};

pub type KilowattHours = Quantity<1, 0>;

impl KilowattHours {
    /// Energy is billed one-to-one: a kilowatt-hour costs one unit.
    pub const fn as_cost(self) -> Cost {
        Quantity(self.0)
    }

    pub const fn is_non_negative(self) -> bool {
        self.0.0 >= 0.0
    }
}

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.0.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}kWh", self.0.0)
    }
}

impl From<KilowattHours> for f64 {
    fn from(value: KilowattHours) -> Self {
        value.0.0
    }
}
