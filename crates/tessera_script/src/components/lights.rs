use tessera_core::Color;
use tessera_native::ComponentField;

use super::define_component;

define_component!(PointLightComponent, PointLight);

impl PointLightComponent {
    pub fn color(&self) -> Color {
        self.binding.color(ComponentField::PointLightColor)
    }

    pub fn set_color(&self, color: Color) {
        self.binding.set(ComponentField::PointLightColor, color);
    }

    pub fn intensity(&self) -> f32 {
        self.binding.float(ComponentField::PointLightIntensity)
    }

    pub fn set_intensity(&self, intensity: f32) {
        self.binding.set(ComponentField::PointLightIntensity, intensity);
    }

    pub fn casts_shadows(&self) -> bool {
        self.binding.bool(ComponentField::PointLightCastsShadows)
    }

    pub fn set_casts_shadows(&self, casts: bool) {
        self.binding.set(ComponentField::PointLightCastsShadows, casts);
    }

    pub fn range(&self) -> f32 {
        self.binding.float(ComponentField::PointLightRange)
    }

    pub fn set_range(&self, range: f32) {
        self.binding.set(ComponentField::PointLightRange, range);
    }
}

define_component!(
    /// A cone light. Angles are in degrees.
    SpotlightComponent,
    Spotlight
);

impl SpotlightComponent {
    pub fn color(&self) -> Color {
        self.binding.color(ComponentField::SpotlightColor)
    }

    pub fn set_color(&self, color: Color) {
        self.binding.set(ComponentField::SpotlightColor, color);
    }

    pub fn intensity(&self) -> f32 {
        self.binding.float(ComponentField::SpotlightIntensity)
    }

    pub fn set_intensity(&self, intensity: f32) {
        self.binding.set(ComponentField::SpotlightIntensity, intensity);
    }

    pub fn casts_shadows(&self) -> bool {
        self.binding.bool(ComponentField::SpotlightCastsShadows)
    }

    pub fn set_casts_shadows(&self, casts: bool) {
        self.binding.set(ComponentField::SpotlightCastsShadows, casts);
    }

    pub fn range(&self) -> f32 {
        self.binding.float(ComponentField::SpotlightRange)
    }

    pub fn set_range(&self, range: f32) {
        self.binding.set(ComponentField::SpotlightRange, range);
    }

    pub fn outer_angle(&self) -> f32 {
        self.binding.float(ComponentField::SpotlightOuterAngle)
    }

    pub fn set_outer_angle(&self, degrees: f32) {
        self.binding.set(ComponentField::SpotlightOuterAngle, degrees);
    }

    pub fn inner_angle(&self) -> f32 {
        self.binding.float(ComponentField::SpotlightInnerAngle)
    }

    pub fn set_inner_angle(&self, degrees: f32) {
        self.binding.set(ComponentField::SpotlightInnerAngle, degrees);
    }
}
