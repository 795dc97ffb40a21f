//! Desktop shell wiring the egui UI to the drawing session.

use std::cell::Cell;
use std::rc::Rc;

use ab_glyph::{FontArc, FontRef, FontVec};
use eframe::egui::{self, Color32, PointerButton, Sense, TextureHandle, TextureOptions};
use rand::Rng;
use sketchpad_core::{Compositor, DrawingSession, Rgba, Tool};
use sketchpad_render::{export_png, ExportOptions, Pixmap};

use crate::config::Config;

pub const APP_NAME: &str = "Sketch Pad";

/// On-screen magnification of the live canvas.
const CANVAS_ZOOM: f32 = 2.0;

/// Dirty flags shared with the session's observers.
#[derive(Clone, Default)]
struct RedrawFlags {
    content: Rc<Cell<bool>>,
    preview: Rc<Cell<bool>>,
}

pub struct SketchpadApp {
    config: Config,
    session: DrawingSession,
    flags: RedrawFlags,
    fonts: Vec<FontArc>,
    texture: Option<TextureHandle>,
    custom_sticker: String,
    /// Width of the most recent marker selection, so swatch clicks keep
    /// the current nib.
    marker_width: f64,
    last_hover: Option<egui::Pos2>,
}

impl SketchpadApp {
    pub fn new(config: Config) -> Self {
        let marker_width = config.thin_width;
        let mut session = DrawingSession::new(Tool::Marker {
            width: marker_width,
            color: random_marker_color(),
        });

        let flags = RedrawFlags::default();
        let content = flags.content.clone();
        session.on_content_changed(move || content.set(true));
        let preview = flags.preview.clone();
        session.on_preview_moved(move || preview.set(true));
        flags.content.set(true);

        Self {
            config,
            session,
            flags,
            fonts: proportional_fonts(),
            texture: None,
            custom_sticker: String::new(),
            marker_width,
            last_hover: None,
        }
    }

    fn select_marker(&mut self, width: f64) {
        self.marker_width = width;
        self.session.set_tool(Tool::Marker {
            width,
            color: random_marker_color(),
        });
    }

    fn select_marker_colored(&mut self, color: Rgba) {
        self.session.set_tool(Tool::Marker {
            width: self.marker_width,
            color,
        });
    }

    fn select_sticker(&mut self, glyph: String) {
        self.session.set_tool(Tool::Sticker {
            glyph,
            size: self.config.sticker_size,
            rotation: random_rotation(),
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Thin").clicked() {
                self.select_marker(self.config.thin_width);
            }
            if ui.button("Thick").clicked() {
                self.select_marker(self.config.thick_width);
            }
            ui.separator();
            for color in SWATCHES {
                let [r, g, b, _] = color.to_array();
                let button = egui::Button::new("  ")
                    .fill(Color32::from_rgb(r, g, b))
                    .stroke(egui::Stroke::new(1.0, Color32::BLACK));
                if ui.add(button).clicked() {
                    self.select_marker_colored(color);
                }
            }
            ui.separator();
            for glyph in self.config.stickers.clone() {
                if ui.button(glyph.clone()).clicked() {
                    self.select_sticker(glyph);
                }
            }
            ui.add(
                egui::TextEdit::singleline(&mut self.custom_sticker)
                    .desired_width(60.0)
                    .hint_text("custom"),
            );
            if ui.button("Add").clicked() && !self.custom_sticker.trim().is_empty() {
                let glyph = self.custom_sticker.trim().to_string();
                self.custom_sticker.clear();
                self.config.stickers.push(glyph.clone());
                self.select_sticker(glyph);
            }
        });

        ui.horizontal(|ui| {
            if ui.button("Undo").clicked() {
                self.session.undo();
            }
            if ui.button("Redo").clicked() {
                self.session.redo();
            }
            if ui.button("Clear").clicked() {
                self.session.clear();
            }
            ui.separator();
            if ui.button("Export").clicked() {
                self.export();
            }
        });

        let pressed_undo = ui
            .ctx()
            .input(|i| i.key_pressed(egui::Key::Z) && i.modifiers.ctrl);
        let pressed_redo = ui.ctx().input(|i| {
            (i.key_pressed(egui::Key::Y) && i.modifiers.ctrl)
                || (i.key_pressed(egui::Key::Z) && i.modifiers.ctrl && i.modifiers.shift)
        });
        if pressed_undo {
            self.session.undo();
        }
        if pressed_redo {
            self.session.redo();
        }
    }

    /// Repaint the backing pixmap when the session signaled, upload it,
    /// and feed pointer events back into the session.
    fn canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = self.config.canvas_size;

        if self.flags.content.take() | self.flags.preview.take() | self.texture.is_none() {
            let mut surface = Pixmap::new(size, size).with_fonts(self.fonts.clone());
            let compositor = Compositor::new(self.config.background_color());
            compositor.redraw(self.session.history(), &mut surface);
            compositor.overlay(self.session.preview(), &mut surface);
            let pixels = surface.into_image();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [size as usize, size as usize],
                pixels.as_raw(),
            );
            match &mut self.texture {
                Some(texture) => texture.set(color_image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("canvas", color_image, TextureOptions::NEAREST))
                }
            }
        }

        let display = egui::vec2(size as f32 * CANVAS_ZOOM, size as f32 * CANVAS_ZOOM);
        let (response, painter) = ui.allocate_painter(display, Sense::drag());
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                response.rect,
                egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        let rect_min = response.rect.min;
        let to_canvas = |pos: egui::Pos2| ((pos - rect_min) / CANVAS_ZOOM).to_pos2();

        if response.drag_started_by(PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = to_canvas(pos);
                self.session.pointer_pressed(p.x as f64, p.y as f64);
            }
        }
        if response.dragged_by(PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = to_canvas(pos);
                self.session.pointer_moved(p.x as f64, p.y as f64);
            }
        }
        if response.drag_stopped_by(PointerButton::Primary) {
            self.session.pointer_released();
        }
        if !response.dragged() {
            if let Some(pos) = response.hover_pos() {
                if self.last_hover != Some(pos) {
                    self.last_hover = Some(pos);
                    let p = to_canvas(pos);
                    self.session.pointer_moved(p.x as f64, p.y as f64);
                }
            }
        }
    }

    fn export(&mut self) {
        let options = ExportOptions {
            live_size: self.config.canvas_size,
            export_size: self.config.export_size,
            background: self.config.background_color(),
            fonts: self.fonts.clone(),
        };
        match export_png(self.session.history(), &options) {
            Ok(bytes) => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PNG Image", &["png"])
                    .set_file_name("sketchpad.png")
                    .save_file()
                {
                    match std::fs::write(&path, &bytes) {
                        Ok(()) => log::info!("exported {} bytes to {}", bytes.len(), path.display()),
                        Err(err) => log::error!("failed to write {}: {err}", path.display()),
                    }
                }
            }
            Err(err) => log::error!("export failed: {err}"),
        }
    }
}

impl eframe::App for SketchpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(APP_NAME);
            self.toolbar(ui);
            ui.separator();
            self.canvas(ui, ctx);
        });
    }
}

/// Fixed marker palette offered next to the randomized selections.
const SWATCHES: [Rgba; 5] = [
    Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    },
    Rgba {
        r: 220,
        g: 50,
        b: 47,
        a: 255,
    },
    Rgba {
        r: 38,
        g: 139,
        b: 210,
        a: 255,
    },
    Rgba {
        r: 133,
        g: 153,
        b: 0,
        a: 255,
    },
    Rgba {
        r: 181,
        g: 137,
        b: 0,
        a: 255,
    },
];

/// Markers get a fresh random color on every (re-)selection.
fn random_marker_color() -> Rgba {
    let mut rng = rand::thread_rng();
    Rgba::new(rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255), 255)
}

/// Stickers get a fresh random rotation on every (re-)selection.
fn random_rotation() -> f64 {
    rand::thread_rng().gen_range(0.0..360.0)
}

/// Extract the default proportional font stack from egui so the canvas
/// rasterizer resolves the same glyphs the toolbar shows, emoji
/// included.
fn proportional_fonts() -> Vec<FontArc> {
    let definitions = egui::FontDefinitions::default();
    let Some(family) = definitions.families.get(&egui::FontFamily::Proportional) else {
        return Vec::new();
    };
    family
        .iter()
        .filter_map(|name| {
            let data = definitions.font_data.get(name)?.clone();
            match data.font {
                std::borrow::Cow::Borrowed(bytes) => {
                    FontRef::try_from_slice_and_index(bytes, data.index)
                        .map(FontArc::from)
                        .ok()
                }
                std::borrow::Cow::Owned(bytes) => {
                    FontVec::try_from_vec_and_index(bytes, data.index)
                        .map(FontArc::from)
                        .ok()
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_marker_colors_are_opaque() {
        for _ in 0..32 {
            assert_eq!(random_marker_color().a, 255);
        }
    }

    #[test]
    fn random_rotation_stays_in_degree_range() {
        for _ in 0..32 {
            let rotation = random_rotation();
            assert!((0.0..360.0).contains(&rotation));
        }
    }
}
