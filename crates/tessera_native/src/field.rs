//! Component field selectors and values
//!
//! One selector per (component kind, field) pair keeps the boundary to a
//! single get/set pair instead of a function per field.

use tessera_core::glam::Vec3;
use tessera_core::{AssetHandle, AxisLock, Color, ComponentKind, Transform};

use crate::ffi::{ColorRecord, TransformRecord, Vec3Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentField {
    NameTag,

    TransformLocal,
    /// Read-only.
    TransformWorld,
    TransformPosition,
    TransformRotation,
    TransformScale,

    MeshRendererActive,
    MeshRendererMesh,
    MeshRendererCastsShadows,

    SpriteRendererActive,
    SpriteRendererTexture,
    SpriteRendererTint,
    SpriteRendererFlipX,
    SpriteRendererFlipY,

    TextRendererText,
    TextRendererColor,

    PointLightColor,
    PointLightIntensity,
    PointLightCastsShadows,
    PointLightRange,

    SpotlightColor,
    SpotlightIntensity,
    SpotlightCastsShadows,
    SpotlightRange,
    /// Degrees.
    SpotlightOuterAngle,
    /// Degrees.
    SpotlightInnerAngle,

    RigidbodyMass,
    RigidbodyUseGravity,
    RigidbodyDrag,
    RigidbodyAngularDrag,
    RigidbodyVelocity,
    RigidbodyAngularVelocity,
    RigidbodyPosition,
    RigidbodyRotation,
    RigidbodyConstraints,

    CharacterControllerStepOffset,
    CharacterControllerSlopeLimit,
}

impl ComponentField {
    /// Component kind that owns this field.
    #[must_use]
    pub const fn kind(self) -> ComponentKind {
        use ComponentField::*;
        match self {
            NameTag => ComponentKind::Name,
            TransformLocal | TransformWorld | TransformPosition | TransformRotation
            | TransformScale => ComponentKind::Transform,
            MeshRendererActive | MeshRendererMesh | MeshRendererCastsShadows => {
                ComponentKind::MeshRenderer
            }
            SpriteRendererActive | SpriteRendererTexture | SpriteRendererTint
            | SpriteRendererFlipX | SpriteRendererFlipY => ComponentKind::SpriteRenderer,
            TextRendererText | TextRendererColor => ComponentKind::TextRenderer,
            PointLightColor | PointLightIntensity | PointLightCastsShadows | PointLightRange => {
                ComponentKind::PointLight
            }
            SpotlightColor | SpotlightIntensity | SpotlightCastsShadows | SpotlightRange
            | SpotlightOuterAngle | SpotlightInnerAngle => ComponentKind::Spotlight,
            RigidbodyMass | RigidbodyUseGravity | RigidbodyDrag | RigidbodyAngularDrag
            | RigidbodyVelocity | RigidbodyAngularVelocity | RigidbodyPosition
            | RigidbodyRotation | RigidbodyConstraints => ComponentKind::Rigidbody,
            CharacterControllerStepOffset | CharacterControllerSlopeLimit => {
                ComponentKind::CharacterController
            }
        }
    }

    /// Value a freshly added component reports for this field.
    #[must_use]
    pub fn default_value(self) -> FieldValue {
        use ComponentField::*;
        match self {
            NameTag | TextRendererText => FieldValue::Text(String::new()),
            TransformLocal | TransformWorld => FieldValue::Transform(Transform::IDENTITY.into()),
            TransformPosition | TransformRotation | RigidbodyVelocity
            | RigidbodyAngularVelocity | RigidbodyPosition | RigidbodyRotation => {
                FieldValue::Vec3(Vec3Record::default())
            }
            TransformScale => FieldValue::Vec3(Vec3::ONE.into()),
            MeshRendererActive | SpriteRendererActive | MeshRendererCastsShadows
            | RigidbodyUseGravity => FieldValue::Bool(true),
            PointLightCastsShadows | SpotlightCastsShadows | SpriteRendererFlipX
            | SpriteRendererFlipY => FieldValue::Bool(false),
            MeshRendererMesh | SpriteRendererTexture => FieldValue::Asset(AssetHandle::INVALID),
            SpriteRendererTint | TextRendererColor | PointLightColor | SpotlightColor => {
                FieldValue::Color(Color::WHITE.into())
            }
            PointLightIntensity | SpotlightIntensity | RigidbodyMass => FieldValue::Float(1.0),
            PointLightRange | SpotlightRange => FieldValue::Float(10.0),
            SpotlightOuterAngle | CharacterControllerSlopeLimit => FieldValue::Float(45.0),
            SpotlightInnerAngle => FieldValue::Float(30.0),
            RigidbodyDrag => FieldValue::Float(0.0),
            RigidbodyAngularDrag => FieldValue::Float(0.05),
            RigidbodyConstraints => FieldValue::Axes(AxisLock::NONE),
            CharacterControllerStepOffset => FieldValue::Float(0.3),
        }
    }
}

/// A field payload as it crosses the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Float(f32),
    Text(String),
    Vec3(Vec3Record),
    Color(ColorRecord),
    Transform(TransformRecord),
    Asset(AssetHandle),
    Axes(AxisLock),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some((*v).into()),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(v) => Some((*v).into()),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<Transform> {
        match self {
            Self::Transform(v) => Some((*v).into()),
            _ => None,
        }
    }

    pub fn as_asset(&self) -> Option<AssetHandle> {
        match self {
            Self::Asset(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_axes(&self) -> Option<AxisLock> {
        match self {
            Self::Axes(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether `self` carries the same payload type as `other`.
    pub fn same_type(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Vec3> for FieldValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v.into())
    }
}

impl From<Color> for FieldValue {
    fn from(v: Color) -> Self {
        Self::Color(v.into())
    }
}

impl From<Transform> for FieldValue {
    fn from(v: Transform) -> Self {
        Self::Transform(v.into())
    }
}

impl From<AssetHandle> for FieldValue {
    fn from(v: AssetHandle) -> Self {
        Self::Asset(v)
    }
}

impl From<AxisLock> for FieldValue {
    fn from(v: AxisLock) -> Self {
        Self::Axes(v)
    }
}
