//! Render target abstraction and an in-memory retained tree.
//!
//! The coordinator never touches a concrete UI toolkit. It measures regions
//! through [`RenderTarget::bounds`] and writes numeric style properties
//! through [`RenderTarget::write`]. [`Scene`] is the retained tree used by the
//! terminal preview and by tests.

use std::fmt;

use serde::Serialize;

use crate::error::FrameFault;
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Animatable style property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
}

impl Property {
    /// Value of the property on an untouched element
    pub fn identity(self) -> f64 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            Property::TranslateX | Property::TranslateY => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::TranslateX => "x",
            Property::TranslateY => "y",
            Property::Scale => "scale",
        }
    }
}

/// Anything the coordinator can measure and animate
pub trait RenderTarget {
    /// Layout box of an element, `None` once it has left the tree
    fn bounds(&self, id: ElementId) -> Option<Rect>;

    /// Write one style property
    fn write(&mut self, id: ElementId, property: Property, value: f64) -> Result<(), FrameFault>;
}

/// Current style values of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Style {
    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::Opacity => self.opacity,
            Property::TranslateX => self.translate_x,
            Property::TranslateY => self.translate_y,
            Property::Scale => self.scale,
        }
    }

    pub fn set(&mut self, property: Property, value: f64) {
        match property {
            Property::Opacity => self.opacity = value,
            Property::TranslateX => self.translate_x = value,
            Property::TranslateY => self.translate_y = value,
            Property::Scale => self.scale = value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub parent: Option<ElementId>,
    pub bounds: Rect,
    pub style: Style,
    attached: bool,
}

impl Element {
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Retained element tree with inherited translate and opacity
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<Element>,
    writes: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root element
    pub fn insert(&mut self, name: impl Into<String>, bounds: Rect) -> ElementId {
        self.push(name.into(), None, bounds)
    }

    /// Add an element under `parent`
    pub fn insert_child(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        bounds: Rect,
    ) -> ElementId {
        self.push(name.into(), Some(parent), bounds)
    }

    fn push(&mut self, name: String, parent: Option<ElementId>, bounds: Rect) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element {
            id,
            name,
            parent,
            bounds,
            style: Style::default(),
            attached: true,
        });
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    pub fn style(&self, id: ElementId) -> Option<Style> {
        self.element(id).map(|e| e.style)
    }

    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.elements.iter().find(|e| e.name == name).map(|e| e.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.attached)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Update an element's layout box
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(element) = self.elements.get_mut(id.0 as usize) {
            element.bounds = bounds;
        }
    }

    /// Reset every style to its identity values
    pub fn reset_styles(&mut self) {
        for element in &mut self.elements {
            element.style = Style::default();
        }
    }

    /// Remove an element and its descendants from the tree
    pub fn detach(&mut self, id: ElementId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.get_mut(current.0 as usize) {
                element.attached = false;
            }
            stack.extend(
                self.elements
                    .iter()
                    .filter(|e| e.parent == Some(current) && e.attached)
                    .map(|e| e.id),
            );
        }
    }

    /// Translation accumulated from the element and all of its ancestors
    pub fn world_offset(&self, id: ElementId) -> (f64, f64) {
        let mut offset = (0.0, 0.0);
        let mut current = self.element(id);
        while let Some(element) = current {
            offset.0 += element.style.translate_x;
            offset.1 += element.style.translate_y;
            current = element.parent.and_then(|p| self.element(p));
        }
        offset
    }

    /// Opacity multiplied down from the root
    pub fn world_opacity(&self, id: ElementId) -> f64 {
        let mut opacity = 1.0;
        let mut current = self.element(id);
        while let Some(element) = current {
            opacity *= element.style.opacity;
            current = element.parent.and_then(|p| self.element(p));
        }
        opacity.clamp(0.0, 1.0)
    }

    /// Number of successful property writes so far
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl RenderTarget for Scene {
    fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.element(id).filter(|e| e.attached).map(|e| e.bounds)
    }

    fn write(&mut self, id: ElementId, property: Property, value: f64) -> Result<(), FrameFault> {
        match self.elements.get_mut(id.0 as usize) {
            Some(element) if element.attached => {
                element.style.set(property, value);
                self.writes += 1;
                Ok(())
            }
            _ => Err(FrameFault::TargetDetached(id)),
        }
    }
}
