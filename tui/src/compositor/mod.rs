//! Layered Compositor
//!
//! The screen is a stack of layers: the stat panel and pet card at the
//! back, the lion above them, the devotional modal and dev overlay on top.
//! Each layer renders into its own buffer; [`Compositor::composite`] blits
//! the visible ones back to front.
//!
//! See-through layers only overwrite cells they actually drew, so the lion
//! can move around inside its card without clearing it. Opaque layers
//! (the modal) hide everything beneath their bounds.

mod layer;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    /// Layers, kept sorted back to front
    layers: Vec<Layer>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
    /// Total area
    area: Rect,
}

impl Compositor {
    /// Create a new compositor for the given area
    pub fn new(area: Rect) -> Self {
        Self {
            layers: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(Layer::new(id, bounds, z_index));
        self.sort();
        id
    }

    /// Create a layer that hides everything underneath it
    pub fn create_opaque_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = self.create_layer(bounds, z_index);
        if let Some(layer) = self.layer_mut(id) {
            layer.opaque = true;
        }
        id
    }

    /// Mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layer_mut(id).map(|l| &mut l.buffer)
    }

    /// Screen bounds of a layer
    pub fn bounds(&self, id: LayerId) -> Option<Rect> {
        self.layer(id).map(|l| l.bounds)
    }

    /// Move and resize a layer
    pub fn set_bounds(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layer_mut(id) {
            layer.set_bounds(bounds);
        }
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layer_mut(id) {
            layer.visible = visible;
        }
    }

    /// Whether a layer is visible
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layer(id).is_some_and(|l| l.visible)
    }

    /// Set a layer's z-index
    pub fn set_z_index(&mut self, id: LayerId, z_index: i32) {
        let changed = match self.layer_mut(id) {
            Some(layer) if layer.z_index != z_index => {
                layer.z_index = z_index;
                true
            }
            _ => false,
        };
        if changed {
            self.sort();
        }
    }

    /// Resize the whole screen
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();
        for layer in self.layers.iter().filter(|l| l.visible) {
            Self::blit_layer(&mut self.output, self.area, layer);
        }
        &self.output
    }

    fn blit_layer(output: &mut Buffer, area: Rect, layer: &Layer) {
        let lb = layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x.saturating_add(lx);
                let dst_y = lb.y.saturating_add(ly);
                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let Some(src) = layer.buffer.cell((lx, ly)) else {
                    continue;
                };
                if !layer.opaque && src.symbol() == " " && src.bg == ratatui::style::Color::Reset {
                    continue;
                }

                if let Some(dst) = output.cell_mut((dst_x, dst_y)) {
                    *dst = src.clone();
                }
            }
        }
    }

    /// Topmost visible layer at a screen position (for mouse clicks)
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        self.layers
            .iter()
            .rev()
            .find(|l| l.visible && l.contains(x, y))
            .map(|l| l.id)
    }

    fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Stable sort keeps creation order among equal z-indices
    fn sort(&mut self) {
        self.layers.sort_by_key(|l| l.z_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    fn symbol(buf: &Buffer, x: u16, y: u16) -> String {
        buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default()
    }

    #[test]
    fn test_front_layer_wins() {
        let mut c = Compositor::new(Rect::new(0, 0, 10, 3));
        let back = c.create_layer(Rect::new(0, 0, 10, 3), 0);
        let front = c.create_layer(Rect::new(2, 1, 3, 1), 50);

        c.layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 1, "..........", Style::default());
        c.layer_buffer_mut(front)
            .unwrap()
            .set_string(0, 0, "LEO", Style::default());

        let out = c.composite();
        assert_eq!(symbol(out, 1, 1), ".");
        assert_eq!(symbol(out, 2, 1), "L");
        assert_eq!(symbol(out, 4, 1), "O");
        assert_eq!(symbol(out, 5, 1), ".");
    }

    #[test]
    fn test_blank_cells_are_see_through() {
        let mut c = Compositor::new(Rect::new(0, 0, 4, 1));
        let back = c.create_layer(Rect::new(0, 0, 4, 1), 0);
        let front = c.create_layer(Rect::new(0, 0, 4, 1), 10);
        c.layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "abcd", Style::default());
        c.layer_buffer_mut(front)
            .unwrap()
            .set_string(1, 0, "X", Style::default());

        let out = c.composite();
        assert_eq!(symbol(out, 0, 0), "a");
        assert_eq!(symbol(out, 1, 0), "X");
        assert_eq!(symbol(out, 2, 0), "c");
    }

    #[test]
    fn test_opaque_layer_hides_background() {
        let mut c = Compositor::new(Rect::new(0, 0, 4, 1));
        let back = c.create_layer(Rect::new(0, 0, 4, 1), 0);
        let modal = c.create_opaque_layer(Rect::new(1, 0, 2, 1), 100);
        c.layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "abcd", Style::default());

        let out = c.composite();
        assert_eq!(symbol(out, 0, 0), "a");
        assert_eq!(symbol(out, 1, 0), " ");
        assert_eq!(symbol(out, 3, 0), "d");

        c.set_visible(modal, false);
        let out = c.composite();
        assert_eq!(symbol(out, 1, 0), "b");
    }

    #[test]
    fn test_layer_at_skips_hidden_layers() {
        let mut c = Compositor::new(Rect::new(0, 0, 20, 10));
        let card = c.create_layer(Rect::new(0, 0, 20, 10), 0);
        let lion = c.create_layer(Rect::new(5, 3, 6, 4), 50);

        assert_eq!(c.layer_at(6, 4), Some(lion));
        assert_eq!(c.layer_at(1, 1), Some(card));

        c.set_visible(lion, false);
        assert_eq!(c.layer_at(6, 4), Some(card));
        assert_eq!(c.layer_at(30, 30), None);
    }

    #[test]
    fn test_set_bounds_and_z_index() {
        let mut c = Compositor::new(Rect::new(0, 0, 20, 10));
        let a = c.create_layer(Rect::new(0, 0, 4, 4), 10);
        let b = c.create_layer(Rect::new(0, 0, 4, 4), 20);
        assert_eq!(c.layer_at(1, 1), Some(b));

        c.set_z_index(a, 30);
        assert_eq!(c.layer_at(1, 1), Some(a));

        c.set_bounds(a, Rect::new(10, 5, 2, 2));
        assert_eq!(c.bounds(a), Some(Rect::new(10, 5, 2, 2)));
        assert_eq!(c.layer_buffer_mut(a).unwrap().area, Rect::new(0, 0, 2, 2));
        assert_eq!(c.layer_at(1, 1), Some(b));
    }
}
