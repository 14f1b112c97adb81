//! Newtypes for the physical quantities used in the simulation.
//!
//! Wrapping every quantity in its own type prevents, say, a U-value being passed
//! where an area is expected. Only the arithmetic the pipeline actually performs is
//! implemented, including the cross-unit operations (e.g. `Area * UValue`).
use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Define a unit type wrapping an `f64`
macro_rules! define_unit {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Create a new quantity with the given value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// The underlying `f64` value
            pub fn value(&self) -> f64 {
                self.0
            }

            /// Whether the value is finite (not NaN or infinite)
            pub fn is_finite(&self) -> bool {
                self.0.is_finite()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;

            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;

            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

define_unit!(Area, "An area (m²)");
define_unit!(UValue, "Thermal transmittance of a fabric element (W/m²K)");
define_unit!(
    EnergyIntensity,
    "Annual energy use normalised by floor area (kWh/m²/yr)"
);
define_unit!(
    HeatLossCoefficient,
    "Aggregate rate of fabric heat loss (W/K)"
);
define_unit!(EnergyPerYear, "Annualised energy (kWh/yr)");
define_unit!(
    HeatLossParameter,
    "Heat-loss coefficient normalised by floor area (W/K/m²)"
);
define_unit!(Money, "An amount of money (€)");
define_unit!(MoneyPerArea, "A cost per unit area (€/m²)");
define_unit!(Dimensionless, "A dimensionless quantity, e.g. a proportion");

impl Mul<UValue> for Area {
    type Output = HeatLossCoefficient;

    fn mul(self, rhs: UValue) -> HeatLossCoefficient {
        HeatLossCoefficient(self.0 * rhs.0)
    }
}

impl Mul<Area> for MoneyPerArea {
    type Output = Money;

    fn mul(self, rhs: Area) -> Money {
        Money(self.0 * rhs.0)
    }
}

impl Div<Area> for HeatLossCoefficient {
    type Output = HeatLossParameter;

    fn div(self, rhs: Area) -> HeatLossParameter {
        HeatLossParameter(self.0 / rhs.0)
    }
}

impl Div<Area> for EnergyPerYear {
    type Output = EnergyIntensity;

    fn div(self, rhs: Area) -> EnergyIntensity {
        EnergyIntensity(self.0 / rhs.0)
    }
}
