// SPDX-License-Identifier: MIT OR Apache-2.0
//! Binding of tracks to host objects.
//!
//! The sequencer never touches engine objects directly. A host implements
//! [`TargetHost`] to report which components a target carries and to read and
//! write individual properties. When a track is bound, its kind and the
//! target's [`Capabilities`] are resolved once into a [`PropertyWriter`], which
//! is then reused for every tick.

use crate::clip::ClipSample;
use crate::curve::Interpolation;
use crate::track::TrackKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity ID for binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Optional components present on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Positioned through an anchored UI rect
    pub rect_transform: bool,
    /// Has a canvas group with its own alpha
    pub canvas_group: bool,
    /// Has a colored graphic
    pub graphic: bool,
}

impl Capabilities {
    /// Whether an alpha-capable component is present
    pub fn has_alpha(&self) -> bool {
        self.canvas_group || self.graphic
    }
}

/// A single host property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertySlot {
    /// Active flag
    Active,
    /// Anchored position of a UI rect
    AnchoredPosition,
    /// Local position
    LocalPosition,
    /// Local rotation as Euler angles in degrees
    LocalRotation,
    /// Local scale
    LocalScale,
    /// Graphic color (RGBA)
    GraphicColor,
    /// Canvas group alpha
    CanvasGroupAlpha,
}

/// Value read from or written to a [`PropertySlot`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Boolean
    Bool(bool),
    /// Scalar
    Float(f32),
    /// 3D vector
    Vec3([f32; 3]),
    /// Color (RGBA)
    Color([f32; 4]),
}

/// Host side of the binding: the engine objects tracks animate
pub trait TargetHost {
    /// Report which optional components `target` carries
    fn capabilities(&self, target: EntityId) -> Capabilities;

    /// Read the current value of a property, if the target has it
    fn read(&self, target: EntityId, slot: PropertySlot) -> Option<PropertyValue>;

    /// Write a property. Hosts ignore writes to properties the target lacks.
    fn write(&mut self, target: EntityId, slot: PropertySlot, value: PropertyValue);
}

/// Bind-time strategy that turns a clip sample into a property write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyWriter {
    /// Nothing to write to (not yet bound, or the component is missing)
    #[default]
    Unbound,
    /// Active flag from component 0
    Active,
    /// Position from components 0..=2 into the given slot
    Position(PropertySlot),
    /// Cubic bezier path in the XY plane
    BezierPosition,
    /// Euler rotation from components 0..=2
    Rotation,
    /// Scale from components 0..=2
    Scale,
    /// Graphic color from all components
    Color,
    /// Canvas group alpha from component 3
    CanvasAlpha,
    /// Alpha channel of the graphic color from component 3
    GraphicAlpha,
}

impl PropertyWriter {
    /// Pick the writer for `kind` on a target with `capabilities`
    pub fn resolve(kind: TrackKind, capabilities: Capabilities) -> Self {
        match kind {
            TrackKind::Active => Self::Active,
            TrackKind::Position if capabilities.rect_transform => {
                Self::Position(PropertySlot::AnchoredPosition)
            }
            TrackKind::Position => Self::Position(PropertySlot::LocalPosition),
            TrackKind::Position2DBezier => Self::BezierPosition,
            TrackKind::Rotation => Self::Rotation,
            TrackKind::Scale => Self::Scale,
            TrackKind::Color if capabilities.graphic => Self::Color,
            TrackKind::Alpha if capabilities.canvas_group => Self::CanvasAlpha,
            TrackKind::Alpha if capabilities.graphic => Self::GraphicAlpha,
            TrackKind::Color | TrackKind::Alpha => Self::Unbound,
        }
    }

    /// Property this writer targets
    pub fn slot(&self) -> Option<PropertySlot> {
        match self {
            Self::Unbound => None,
            Self::Active => Some(PropertySlot::Active),
            Self::Position(slot) => Some(*slot),
            Self::BezierPosition => Some(PropertySlot::LocalPosition),
            Self::Rotation => Some(PropertySlot::LocalRotation),
            Self::Scale => Some(PropertySlot::LocalScale),
            Self::Color | Self::GraphicAlpha => Some(PropertySlot::GraphicColor),
            Self::CanvasAlpha => Some(PropertySlot::CanvasGroupAlpha),
        }
    }

    /// Write `sample` to `target`
    pub fn apply<H: TargetHost + ?Sized>(&self, host: &mut H, target: EntityId, sample: &ClipSample) {
        match *self {
            Self::Unbound => {}
            Self::Active => {
                host.write(target, PropertySlot::Active, PropertyValue::Bool(sample.value().x() > 0.0));
            }
            Self::Position(slot) => {
                host.write(target, slot, PropertyValue::Vec3(sample.value().xyz()));
            }
            Self::BezierPosition => {
                let (start, end) = (sample.start, sample.end);
                let position = Interpolation::bezier_vec3(
                    [start.x(), start.y(), 0.0],
                    [start.z(), end.z(), 0.0],
                    [start.w(), end.w(), 0.0],
                    [end.x(), end.y(), 0.0],
                    sample.factor,
                );
                host.write(target, PropertySlot::LocalPosition, PropertyValue::Vec3(position));
            }
            Self::Rotation => {
                host.write(target, PropertySlot::LocalRotation, PropertyValue::Vec3(sample.value().xyz()));
            }
            Self::Scale => {
                host.write(target, PropertySlot::LocalScale, PropertyValue::Vec3(sample.value().xyz()));
            }
            Self::Color => {
                host.write(target, PropertySlot::GraphicColor, PropertyValue::Color(sample.value().0));
            }
            Self::CanvasAlpha => {
                let alpha = Interpolation::lerp(sample.start.w(), sample.end.w(), sample.factor);
                host.write(target, PropertySlot::CanvasGroupAlpha, PropertyValue::Float(alpha));
            }
            Self::GraphicAlpha => {
                if let Some(PropertyValue::Color(mut color)) = host.read(target, PropertySlot::GraphicColor) {
                    color[3] = Interpolation::lerp(sample.start.w(), sample.end.w(), sample.factor);
                    host.write(target, PropertySlot::GraphicColor, PropertyValue::Color(color));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipId;
    use crate::host::{MemoryHost, MemoryTarget};
    use crate::value::GenericValue;

    fn sample(start: GenericValue, end: GenericValue, factor: f32) -> ClipSample {
        ClipSample { clip: ClipId::new(), start, end, factor }
    }

    #[test]
    fn position_prefers_anchored_rect() {
        let rect = Capabilities { rect_transform: true, ..Default::default() };
        assert_eq!(
            PropertyWriter::resolve(TrackKind::Position, rect),
            PropertyWriter::Position(PropertySlot::AnchoredPosition)
        );
        assert_eq!(
            PropertyWriter::resolve(TrackKind::Position, Capabilities::default()),
            PropertyWriter::Position(PropertySlot::LocalPosition)
        );
    }

    #[test]
    fn alpha_prefers_canvas_group_over_graphic() {
        let both = Capabilities { canvas_group: true, graphic: true, ..Default::default() };
        let graphic = Capabilities { graphic: true, ..Default::default() };
        assert_eq!(PropertyWriter::resolve(TrackKind::Alpha, both), PropertyWriter::CanvasAlpha);
        assert_eq!(PropertyWriter::resolve(TrackKind::Alpha, graphic), PropertyWriter::GraphicAlpha);
        assert_eq!(PropertyWriter::resolve(TrackKind::Alpha, Capabilities::default()), PropertyWriter::Unbound);
        assert_eq!(PropertyWriter::resolve(TrackKind::Color, Capabilities::default()), PropertyWriter::Unbound);
    }

    #[test]
    fn graphic_alpha_keeps_rgb() {
        let mut host = MemoryHost::new();
        let id = host.spawn(MemoryTarget::new("Label").with_graphic([0.2, 0.4, 0.6, 1.0]));

        let s = sample(GenericValue::from_alpha(1.0), GenericValue::from_alpha(0.0), 0.25);
        PropertyWriter::GraphicAlpha.apply(&mut host, id, &s);

        assert_eq!(
            host.read(id, PropertySlot::GraphicColor),
            Some(PropertyValue::Color([0.2, 0.4, 0.6, 0.75]))
        );
    }

    #[test]
    fn active_threshold_is_strictly_positive() {
        let mut host = MemoryHost::new();
        let id = host.spawn(MemoryTarget::new("Panel"));

        let off = sample(GenericValue::from_bool(true), GenericValue::from_bool(false), 1.0);
        PropertyWriter::Active.apply(&mut host, id, &off);
        assert_eq!(host.read(id, PropertySlot::Active), Some(PropertyValue::Bool(false)));

        let half = sample(GenericValue::from_bool(false), GenericValue::from_bool(true), 0.5);
        PropertyWriter::Active.apply(&mut host, id, &half);
        assert_eq!(host.read(id, PropertySlot::Active), Some(PropertyValue::Bool(true)));
    }

    #[test]
    fn bezier_uses_packed_control_points() {
        let mut host = MemoryHost::new();
        let id = host.spawn(MemoryTarget::new("Coin"));

        // Path (0,0) -> (10,0) with controls (0,5) and (10,5)
        let start = GenericValue::new(0.0, 0.0, 0.0, 10.0);
        let end = GenericValue::new(10.0, 0.0, 5.0, 5.0);

        PropertyWriter::BezierPosition.apply(&mut host, id, &sample(start, end, 0.5));
        let Some(PropertyValue::Vec3(p)) = host.read(id, PropertySlot::LocalPosition) else {
            panic!("position not written");
        };
        assert!((p[0] - 5.0).abs() < 1e-5);
        assert!((p[1] - 3.75).abs() < 1e-5);
        assert_eq!(p[2], 0.0);
    }
}
