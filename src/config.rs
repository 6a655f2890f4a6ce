//! Label model configuration.
//!
//! The rotated slider, the rotated side slider and the plain slider are one
//! algorithm with different settings, so they share [`ModelConfiguration`]
//! and differ only in the values it carries.

use crate::defaults;
use crate::errors::ConfigError;
use crate::parameter::Side;
use crate::types::check_finite;

/// Which path sides a model offers labels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SideMode {
    /// Only [`Side::Left`], the configured distance.
    #[default]
    Single,
    /// Both [`Side::Left`] and the mirrored [`Side::Right`].
    Both,
}

impl SideMode {
    pub fn sides(self) -> &'static [Side] {
        match self {
            SideMode::Single => &[Side::Left],
            SideMode::Both => &[Side::Left, Side::Right],
        }
    }
}

/// Settings of one label model, fixed for every placement query it answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfiguration {
    distance: f64,
    angle: f64,
    distance_relative_to_edge: bool,
    auto_rotation_enabled: bool,
    sides: SideMode,
}

impl Default for ModelConfiguration {
    fn default() -> Self {
        Self::rotated_slider()
    }
}

impl ModelConfiguration {
    /// Labels follow the segment direction on one side of the edge.
    pub fn rotated_slider() -> Self {
        ModelConfiguration {
            distance: defaults::DISTANCE,
            angle: defaults::ANGLE,
            distance_relative_to_edge: true,
            auto_rotation_enabled: true,
            sides: SideMode::Single,
        }
    }

    /// Labels follow the segment direction on either side of the edge.
    pub fn rotated_side_slider() -> Self {
        ModelConfiguration {
            sides: SideMode::Both,
            ..Self::rotated_slider()
        }
    }

    /// Labels keep the configured angle regardless of the segment direction.
    pub fn slider() -> Self {
        ModelConfiguration {
            auto_rotation_enabled: false,
            ..Self::rotated_slider()
        }
    }

    /// Create a configuration with the given distance and angle (radians).
    pub fn new(distance: f64, angle: f64) -> Result<Self, ConfigError> {
        Self::rotated_slider().with_distance(distance)?.with_angle(angle)
    }

    pub fn with_distance(self, distance: f64) -> Result<Self, ConfigError> {
        let distance = check_finite(distance).map_err(|reason| ConfigError::InvalidDistance {
            value: distance,
            reason,
        })?;
        Ok(ModelConfiguration { distance, ..self })
    }

    pub fn with_angle(self, angle: f64) -> Result<Self, ConfigError> {
        let angle = check_finite(angle)
            .map_err(|reason| ConfigError::InvalidAngle { value: angle, reason })?;
        Ok(ModelConfiguration { angle, ..self })
    }

    pub fn with_distance_relative_to_edge(self, relative: bool) -> Self {
        ModelConfiguration {
            distance_relative_to_edge: relative,
            ..self
        }
    }

    pub fn with_auto_rotation(self, enabled: bool) -> Self {
        ModelConfiguration {
            auto_rotation_enabled: enabled,
            ..self
        }
    }

    pub fn with_sides(self, sides: SideMode) -> Self {
        ModelConfiguration { sides, ..self }
    }

    /// Offset of the label center from the path.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Extra rotation in radians, added to the segment angle when auto
    /// rotation is on.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// `true`: positive distance is left of the direction of travel.
    /// `false`: positive distance is above the label, in its own frame.
    pub fn distance_relative_to_edge(&self) -> bool {
        self.distance_relative_to_edge
    }

    pub fn auto_rotation_enabled(&self) -> bool {
        self.auto_rotation_enabled
    }

    pub fn sides(&self) -> SideMode {
        self.sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    #[test]
    fn presets() {
        let rotated = ModelConfiguration::rotated_slider();
        assert!(rotated.auto_rotation_enabled());
        assert!(rotated.distance_relative_to_edge());
        assert_eq!(rotated.sides(), SideMode::Single);
        assert_eq!(ModelConfiguration::default(), rotated);

        assert_eq!(ModelConfiguration::rotated_side_slider().sides(), SideMode::Both);
        assert!(!ModelConfiguration::slider().auto_rotation_enabled());
    }

    #[test]
    fn new_validates_inputs() {
        let config = ModelConfiguration::new(12.0, 0.5).unwrap();
        assert_eq!(config.distance(), 12.0);
        assert_eq!(config.angle(), 0.5);

        assert!(matches!(
            ModelConfiguration::new(f64::NAN, 0.0),
            Err(ConfigError::InvalidDistance {
                reason: NumericError::NaN,
                ..
            })
        ));
        assert!(matches!(
            ModelConfiguration::new(0.0, f64::INFINITY),
            Err(ConfigError::InvalidAngle {
                reason: NumericError::Infinite,
                ..
            })
        ));
    }

    #[test]
    fn negative_distance_is_allowed() {
        assert_eq!(ModelConfiguration::new(-8.0, 0.0).unwrap().distance(), -8.0);
    }

    #[test]
    fn builders_keep_other_fields() {
        let config = ModelConfiguration::rotated_side_slider()
            .with_distance(4.0)
            .unwrap()
            .with_auto_rotation(false)
            .with_distance_relative_to_edge(false);
        assert_eq!(config.distance(), 4.0);
        assert_eq!(config.sides(), SideMode::Both);
        assert!(!config.auto_rotation_enabled());
        assert!(!config.distance_relative_to_edge());
    }

    #[test]
    fn side_modes_list_sides() {
        assert_eq!(SideMode::Single.sides(), &[Side::Left]);
        assert_eq!(SideMode::Both.sides(), &[Side::Left, Side::Right]);
    }
}
