//! Sprite preview boundary
//!
//! The editor only needs an image to trace hitboxes over. Sources are
//! tagged variants, not filename-string comparisons; anything that
//! cannot be decoded here surfaces an error and the preview falls back
//! to the built-in demo sprite.

use std::path::{Path, PathBuf};

use eframe::egui;
use glam::{vec2, Vec2};

use shaper_core::{EditorError, ViewTransform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteSource {
    /// Built-in procedural placeholder.
    Demo,
    Png(PathBuf),
    /// Listed so the file is visible in the picker, but not decodable
    /// here; selecting one reports `UnsupportedFileType`.
    Aseprite(PathBuf),
}

#[derive(Debug, Clone)]
pub struct SpriteEntry {
    pub label: String,
    pub source: SpriteSource,
}

pub struct SpritePreview {
    entries: Vec<SpriteEntry>,
    selected: usize,
    texture: Option<egui::TextureHandle>,
}

impl SpritePreview {
    /// List the demo sprite plus any sprite files in the working
    /// directory.
    pub fn scan_working_dir() -> Self {
        Self {
            entries: scan_entries(),
            selected: 0,
            texture: None,
        }
    }

    /// Re-list sprite files, keeping the current selection when its
    /// label is still present. Returns true when the selection had to
    /// fall back to the demo sprite (caller should reload).
    pub fn rescan(&mut self) -> bool {
        let current = self.entries[self.selected].label.clone();
        self.entries = scan_entries();
        match self.entries.iter().position(|e| e.label == current) {
            Some(index) => {
                self.selected = index;
                false
            }
            None => {
                self.selected = 0;
                true
            }
        }
    }

    /// Sprite selection combo; returns true when the user picked a
    /// different entry.
    pub fn combo(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        egui::ComboBox::from_id_salt("sprite_combo")
            .selected_text(self.entries[self.selected].label.clone())
            .show_ui(ui, |ui| {
                for index in 0..self.entries.len() {
                    let label = self.entries[index].label.clone();
                    if ui
                        .selectable_value(&mut self.selected, index, label)
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
        changed
    }

    pub fn select_demo(&mut self) {
        self.selected = 0;
    }

    /// Decode the selected source and upload it as the preview
    /// texture.
    pub fn load_selected(&mut self, ctx: &egui::Context) -> Result<(), EditorError> {
        let image = match &self.entries[self.selected].source {
            SpriteSource::Demo => demo_image(),
            SpriteSource::Png(path) => decode_png(path)?,
            SpriteSource::Aseprite(path) => {
                let ext = path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default();
                return Err(EditorError::UnsupportedFileType(ext));
            }
        };
        self.texture = Some(ctx.load_texture("sprite", image, egui::TextureOptions::NEAREST));
        Ok(())
    }

    /// Native pixel size of the loaded texture.
    pub fn size(&self) -> Option<Vec2> {
        self.texture.as_ref().map(|t| {
            let [w, h] = t.size();
            vec2(w as f32, h as f32)
        })
    }

    /// Draw centered on the world origin, one world unit per texel.
    pub fn draw(&self, painter: &egui::Painter, view: &ViewTransform, center: Vec2) {
        let Some(texture) = &self.texture else {
            return;
        };
        let Some(size) = self.size() else {
            return;
        };
        let half = size * 0.5;
        let a = view.world_to_screen(center, -half);
        let b = view.world_to_screen(center, half);
        let rect = egui::Rect::from_two_pos(egui::pos2(a.x, a.y), egui::pos2(b.x, b.y));
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
    }
}

fn scan_entries() -> Vec<SpriteEntry> {
    let mut entries = vec![SpriteEntry {
        label: "demo sprite".to_owned(),
        source: SpriteSource::Demo,
    }];

    let Ok(dir) = std::env::current_dir() else {
        return entries;
    };
    let Ok(read) = std::fs::read_dir(&dir) else {
        return entries;
    };

    let mut found = Vec::new();
    for entry in read.flatten() {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let source = match ext.to_ascii_lowercase().as_str() {
            "png" => SpriteSource::Png(path.clone()),
            "ase" | "aseprite" => SpriteSource::Aseprite(path.clone()),
            _ => continue,
        };
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        found.push(SpriteEntry { label, source });
    }
    found.sort_by(|a, b| a.label.cmp(&b.label));
    entries.extend(found);
    entries
}

fn decode_png(path: &Path) -> Result<egui::ColorImage, EditorError> {
    let image = image::open(path).map_err(|e| EditorError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Checkerboard stand-in for the demo sprite.
fn demo_image() -> egui::ColorImage {
    const SIZE: usize = 64;
    const CELL: usize = 8;
    let mut image = egui::ColorImage::new([SIZE, SIZE], egui::Color32::BLACK);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dark = ((x / CELL) + (y / CELL)) % 2 == 0;
            image.pixels[y * SIZE + x] = if dark {
                egui::Color32::from_rgb(90, 70, 120)
            } else {
                egui::Color32::from_rgb(160, 140, 190)
            };
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_lists_demo_sprite_first() {
        let entries = scan_entries();
        assert_eq!(entries[0].source, SpriteSource::Demo);
    }

    #[test]
    fn test_demo_image_dimensions() {
        let image = demo_image();
        assert_eq!(image.size, [64, 64]);
    }

    #[test]
    fn test_rescan_falls_back_to_demo_for_missing_selection() {
        let mut preview = SpritePreview {
            entries: vec![
                SpriteEntry {
                    label: "demo sprite".to_owned(),
                    source: SpriteSource::Demo,
                },
                SpriteEntry {
                    label: "gone.png".to_owned(),
                    source: SpriteSource::Png(PathBuf::from("gone.png")),
                },
            ],
            selected: 1,
            texture: None,
        };
        // The file list on disk no longer contains "gone.png"
        let changed = preview.rescan();
        assert!(changed);
        assert_eq!(preview.selected, 0);
    }
}
