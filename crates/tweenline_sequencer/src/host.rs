// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory [`TargetHost`] for previews and tests.
//!
//! Stores a flat set of named targets with the properties tracks can animate,
//! and records every write so callers can inspect what a tick produced.

use crate::binding::{Capabilities, EntityId, PropertySlot, PropertyValue, TargetHost};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A host object held by [`MemoryHost`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryTarget {
    /// Display name
    pub name: String,
    /// Whether the object is positioned through an anchored rect
    pub rect_transform: bool,
    /// Active flag
    pub active: bool,
    /// Local position
    pub position: [f32; 3],
    /// Anchored position (only meaningful with a rect transform)
    pub anchored_position: [f32; 3],
    /// Local rotation in Euler degrees
    pub rotation: [f32; 3],
    /// Local scale
    pub scale: [f32; 3],
    /// Graphic color, if the object has a graphic
    pub graphic_color: Option<[f32; 4]>,
    /// Canvas group alpha, if the object has a canvas group
    pub canvas_alpha: Option<f32>,
}

impl MemoryTarget {
    /// Create an active object at the origin with unit scale
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rect_transform: false,
            active: true,
            position: [0.0; 3],
            anchored_position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            graphic_color: None,
            canvas_alpha: None,
        }
    }

    /// Position through an anchored rect
    pub fn with_rect_transform(mut self) -> Self {
        self.rect_transform = true;
        self
    }

    /// Attach a graphic with the given color
    pub fn with_graphic(mut self, color: [f32; 4]) -> Self {
        self.graphic_color = Some(color);
        self
    }

    /// Attach a canvas group with the given alpha
    pub fn with_canvas_group(mut self, alpha: f32) -> Self {
        self.canvas_alpha = Some(alpha);
        self
    }

    /// Components this object carries
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            rect_transform: self.rect_transform,
            canvas_group: self.canvas_alpha.is_some(),
            graphic: self.graphic_color.is_some(),
        }
    }
}

/// A recorded property write
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyWrite {
    /// Written object
    pub target: EntityId,
    /// Written property
    pub slot: PropertySlot,
    /// Written value
    pub value: PropertyValue,
}

/// [`TargetHost`] backed by a map of [`MemoryTarget`]s
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryHost {
    targets: IndexMap<EntityId, MemoryTarget>,
    #[serde(skip)]
    writes: Vec<PropertyWrite>,
}

impl MemoryHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its new ID
    pub fn spawn(&mut self, target: MemoryTarget) -> EntityId {
        let id = EntityId::new();
        self.targets.insert(id, target);
        id
    }

    /// Get an object
    pub fn target(&self, id: EntityId) -> Option<&MemoryTarget> {
        self.targets.get(&id)
    }

    /// Get a mutable object
    pub fn target_mut(&mut self, id: EntityId) -> Option<&mut MemoryTarget> {
        self.targets.get_mut(&id)
    }

    /// Find an object by name
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.targets.iter().find(|(_, t)| t.name == name).map(|(id, _)| *id)
    }

    /// Iterate objects in insertion order
    pub fn targets(&self) -> impl Iterator<Item = (EntityId, &MemoryTarget)> {
        self.targets.iter().map(|(id, t)| (*id, t))
    }

    /// Writes recorded since the last call
    pub fn take_writes(&mut self) -> Vec<PropertyWrite> {
        std::mem::take(&mut self.writes)
    }

    /// Writes recorded so far
    pub fn writes(&self) -> &[PropertyWrite] {
        &self.writes
    }

    /// Serialize to RON format
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON format
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

impl TargetHost for MemoryHost {
    fn capabilities(&self, target: EntityId) -> Capabilities {
        self.targets.get(&target).map(MemoryTarget::capabilities).unwrap_or_default()
    }

    fn read(&self, target: EntityId, slot: PropertySlot) -> Option<PropertyValue> {
        let t = self.targets.get(&target)?;
        match slot {
            PropertySlot::Active => Some(PropertyValue::Bool(t.active)),
            PropertySlot::AnchoredPosition => {
                t.rect_transform.then_some(PropertyValue::Vec3(t.anchored_position))
            }
            PropertySlot::LocalPosition => Some(PropertyValue::Vec3(t.position)),
            PropertySlot::LocalRotation => Some(PropertyValue::Vec3(t.rotation)),
            PropertySlot::LocalScale => Some(PropertyValue::Vec3(t.scale)),
            PropertySlot::GraphicColor => t.graphic_color.map(PropertyValue::Color),
            PropertySlot::CanvasGroupAlpha => t.canvas_alpha.map(PropertyValue::Float),
        }
    }

    fn write(&mut self, target: EntityId, slot: PropertySlot, value: PropertyValue) {
        let Some(t) = self.targets.get_mut(&target) else {
            return;
        };

        let applied = match (slot, value) {
            (PropertySlot::Active, PropertyValue::Bool(active)) => {
                t.active = active;
                true
            }
            (PropertySlot::AnchoredPosition, PropertyValue::Vec3(v)) if t.rect_transform => {
                t.anchored_position = v;
                true
            }
            (PropertySlot::LocalPosition, PropertyValue::Vec3(v)) => {
                t.position = v;
                true
            }
            (PropertySlot::LocalRotation, PropertyValue::Vec3(v)) => {
                t.rotation = v;
                true
            }
            (PropertySlot::LocalScale, PropertyValue::Vec3(v)) => {
                t.scale = v;
                true
            }
            (PropertySlot::GraphicColor, PropertyValue::Color(c)) if t.graphic_color.is_some() => {
                t.graphic_color = Some(c);
                true
            }
            (PropertySlot::CanvasGroupAlpha, PropertyValue::Float(a)) if t.canvas_alpha.is_some() => {
                t.canvas_alpha = Some(a);
                true
            }
            _ => false,
        };

        if applied {
            self.writes.push(PropertyWrite { target, slot, value });
        }
    }
}
