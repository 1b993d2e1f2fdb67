use uom::si::{
    angle::degree,
    f64::{Angle, Length, Ratio},
    length::millimeter,
    ratio::ratio,
};

use crate::support::{
    bounds::Band,
    constraint::{NonNegative, StrictlyPositive, finite},
};

use super::EngineError;

/// Drag coefficient of the calibration reference car.
pub const REFERENCE_CD: f64 = 0.70;

/// Total lift coefficient (front plus rear) of the calibration reference car.
pub const REFERENCE_CL: f64 = 3.5;

/// Tire friction coefficient of the calibration reference car.
pub const REFERENCE_FRICTION: f64 = 1.8;

const CD_RANGE: [f64; 2] = [0.5, 1.0];
const CL_RANGE: [f64; 2] = [0.5, 3.0];
const WING_RANGE: [f64; 2] = [0.0, 45.0];
const RIDE_HEIGHT_RANGE: [f64; 2] = [5.0, 80.0];

/// An aerodynamic configuration.
///
/// Values outside the physical ranges (Cd 0.5 to 1.0, CLf and CLr 0.5 to 3.0,
/// wing angles 0 to 45°, ride heights 5 to 80 mm) are clamped on construction, so a
/// configuration in hand is always finite and in range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AeroConfiguration {
    cd: f64,
    clf: f64,
    clr: f64,
    front_wing: Angle,
    rear_wing: Angle,
    front_ride_height: Length,
    rear_ride_height: Length,
}

impl AeroConfiguration {
    /// Creates a configuration from its coefficients, at reference wing
    /// angles (22°/26°) and ride heights (12/14 mm).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if a coefficient is not
    /// finite or not strictly positive.
    pub fn new(cd: f64, clf: f64, clr: f64) -> Result<Self, EngineError> {
        let reference = Self::reference();
        let cd = coefficient("cd", cd)?;
        let clf = coefficient("clf", clf)?;
        let clr = coefficient("clr", clr)?;
        Ok(Self::clamped(
            [cd, clf, clr],
            reference.wings(),
            reference.ride_heights(),
        ))
    }

    /// Replaces the wing angles.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if an angle is not finite.
    pub fn with_wings(self, front: Angle, rear: Angle) -> Result<Self, EngineError> {
        finite(front.get::<degree>()).map_err(EngineError::invalid("front_wing"))?;
        finite(rear.get::<degree>()).map_err(EngineError::invalid("rear_wing"))?;
        Ok(Self::clamped(
            self.coefficients(),
            [front, rear],
            self.ride_heights(),
        ))
    }

    /// Replaces the ride heights.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if a ride height is not
    /// finite or is negative.
    pub fn with_ride_heights(self, front: Length, rear: Length) -> Result<Self, EngineError> {
        let check = |field, height: Length| {
            finite(height.get::<millimeter>())
                .and_then(|_| NonNegative::new(height))
                .map_err(EngineError::invalid(field))
        };
        check("front_ride_height", front)?;
        check("rear_ride_height", rear)?;
        Ok(Self::clamped(
            self.coefficients(),
            self.wings(),
            [front, rear],
        ))
    }

    /// The calibration reference: Cd 0.70, CLf 1.5, CLr 2.0, wings 22°/26°,
    /// ride heights 12/14 mm.
    #[must_use]
    pub fn reference() -> Self {
        Self::clamped(
            [REFERENCE_CD, 1.5, 2.0],
            [Angle::new::<degree>(22.0), Angle::new::<degree>(26.0)],
            [
                Length::new::<millimeter>(12.0),
                Length::new::<millimeter>(14.0),
            ],
        )
    }

    /// Builds a configuration from values already known to be finite,
    /// clamping each into range.
    pub(crate) fn clamped(
        [cd, clf, clr]: [f64; 3],
        [front_wing, rear_wing]: [Angle; 2],
        [front_ride_height, rear_ride_height]: [Length; 2],
    ) -> Self {
        Self {
            cd: clamp("cd", cd, CD_RANGE),
            clf: clamp("clf", clf, CL_RANGE),
            clr: clamp("clr", clr, CL_RANGE),
            front_wing: Angle::new::<degree>(clamp(
                "front_wing",
                front_wing.get::<degree>(),
                WING_RANGE,
            )),
            rear_wing: Angle::new::<degree>(clamp(
                "rear_wing",
                rear_wing.get::<degree>(),
                WING_RANGE,
            )),
            front_ride_height: Length::new::<millimeter>(clamp(
                "front_ride_height",
                front_ride_height.get::<millimeter>(),
                RIDE_HEIGHT_RANGE,
            )),
            rear_ride_height: Length::new::<millimeter>(clamp(
                "rear_ride_height",
                rear_ride_height.get::<millimeter>(),
                RIDE_HEIGHT_RANGE,
            )),
        }
    }

    /// Returns a copy with new coefficients, clamped into range.
    pub(crate) fn with_coefficients(&self, coefficients: [f64; 3]) -> Self {
        Self::clamped(coefficients, self.wings(), self.ride_heights())
    }

    #[must_use]
    pub fn cd(&self) -> f64 {
        self.cd
    }

    #[must_use]
    pub fn clf(&self) -> f64 {
        self.clf
    }

    #[must_use]
    pub fn clr(&self) -> f64 {
        self.clr
    }

    #[must_use]
    pub fn cl_total(&self) -> f64 {
        self.clf + self.clr
    }

    /// Fraction of total downforce carried by the front axle.
    #[must_use]
    pub fn balance(&self) -> Ratio {
        Ratio::new::<ratio>(self.clf / self.cl_total())
    }

    /// Total lift coefficient over drag coefficient.
    #[must_use]
    pub fn lift_to_drag(&self) -> f64 {
        self.cl_total() / self.cd
    }

    #[must_use]
    pub fn front_wing(&self) -> Angle {
        self.front_wing
    }

    #[must_use]
    pub fn rear_wing(&self) -> Angle {
        self.rear_wing
    }

    #[must_use]
    pub fn front_ride_height(&self) -> Length {
        self.front_ride_height
    }

    #[must_use]
    pub fn rear_ride_height(&self) -> Length {
        self.rear_ride_height
    }

    pub(crate) fn coefficients(&self) -> [f64; 3] {
        [self.cd, self.clf, self.clr]
    }

    fn wings(&self) -> [Angle; 2] {
        [self.front_wing, self.rear_wing]
    }

    fn ride_heights(&self) -> [Length; 2] {
        [self.front_ride_height, self.rear_ride_height]
    }
}

impl Default for AeroConfiguration {
    fn default() -> Self {
        Self::reference()
    }
}

fn coefficient(field: &'static str, value: f64) -> Result<f64, EngineError> {
    finite(value)
        .and_then(StrictlyPositive::new)
        .map(|c| c.into_inner())
        .map_err(EngineError::invalid(field))
}

fn clamp(field: &'static str, value: f64, [low, high]: [f64; 2]) -> f64 {
    let clamped = Band::new(low, high).clamp(value);
    if clamped != value {
        tracing::debug!(field, requested = value, clamped, "configuration value clamped");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::constraint::ConstraintError;

    #[test]
    fn derived_quantities() {
        let config = AeroConfiguration::new(0.70, 1.5, 2.0).unwrap();
        assert_relative_eq!(config.cl_total(), 3.5);
        assert_relative_eq!(config.balance().get::<ratio>(), 1.5 / 3.5);
        assert_relative_eq!(config.lift_to_drag(), 5.0, epsilon = 1e-12);
        assert_eq!(config, AeroConfiguration::reference());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = AeroConfiguration::new(1.4, 0.1, 3.5)
            .unwrap()
            .with_wings(Angle::new::<degree>(-4.0), Angle::new::<degree>(60.0))
            .unwrap()
            .with_ride_heights(
                Length::new::<millimeter>(2.0),
                Length::new::<millimeter>(95.0),
            )
            .unwrap();

        assert_relative_eq!(config.cd(), 1.0);
        assert_relative_eq!(config.clf(), 0.5);
        assert_relative_eq!(config.clr(), 3.0);
        assert_relative_eq!(config.front_wing().get::<degree>(), 0.0);
        assert_relative_eq!(config.rear_wing().get::<degree>(), 45.0, epsilon = 1e-12);
        assert_relative_eq!(
            config.front_ride_height().get::<millimeter>(),
            5.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            config.rear_ride_height().get::<millimeter>(),
            80.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn non_positive_coefficients_are_rejected() {
        assert_eq!(
            AeroConfiguration::new(0.0, 1.5, 2.0),
            Err(EngineError::InvalidConfiguration {
                field: "cd",
                source: ConstraintError::Zero,
            })
        );
        assert_eq!(
            AeroConfiguration::new(0.7, -1.5, 2.0),
            Err(EngineError::InvalidConfiguration {
                field: "clf",
                source: ConstraintError::Negative,
            })
        );
        assert!(AeroConfiguration::new(0.7, 1.5, f64::INFINITY).is_err());
    }

    #[test]
    fn negative_ride_height_is_rejected() {
        let result = AeroConfiguration::reference().with_ride_heights(
            Length::new::<millimeter>(-1.0),
            Length::new::<millimeter>(14.0),
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfiguration {
                field: "front_ride_height",
                source: ConstraintError::Negative,
            })
        ));
    }

    #[test]
    fn non_finite_wing_is_rejected() {
        let result = AeroConfiguration::reference()
            .with_wings(Angle::new::<degree>(f64::NAN), Angle::new::<degree>(26.0));
        assert!(result.is_err());
    }
}
