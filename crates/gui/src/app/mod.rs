//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::path::PathBuf;

use eframe::egui;

use shaper_core::{Session, WindowTitle, MAX_VERTICES};

use crate::commands::{self, DiskStore, FileCommand};
use crate::sprite::SpritePreview;
use crate::viewport::Viewport;

/// Main application
pub struct ShaperApp {
    pub(crate) session: Session,
    pub(crate) sprite: SpritePreview,
    viewport: Viewport,
    title: WindowTitle,
    /// At most one file command per frame; the first request wins.
    pub(crate) pending_command: Option<FileCommand>,
    /// Single pending error message; a newer error replaces an
    /// unacknowledged one.
    pub(crate) pending_error: Option<String>,
    pub(crate) show_help: bool,
    pub(crate) show_sprite_window: bool,
}

impl ShaperApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        styles::configure_styles(&cc.egui_ctx);

        let mut session = Session::new();
        let mut pending_error = None;
        if let Some(path) = initial_file {
            match shaper_core::document::load_from_path(&path, &DiskStore) {
                Ok(shape) => session.open_shape(shape, path),
                Err(e) => {
                    tracing::error!("{e}");
                    pending_error = Some(e.to_string());
                }
            }
        }

        let mut app = Self {
            session,
            sprite: SpritePreview::scan_working_dir(),
            viewport: Viewport::default(),
            title: WindowTitle::default(),
            pending_command: None,
            pending_error,
            show_help: false,
            show_sprite_window: true,
        };
        app.reload_sprite(&cc.egui_ctx);
        app
    }

    /// Queue a file command; later requests in the same frame lose.
    pub(crate) fn queue_command(&mut self, command: FileCommand) {
        if self.pending_command.is_none() {
            self.pending_command = Some(command);
        }
    }

    /// Undo is blocked while a drag holds an address into the current
    /// history slot.
    pub(crate) fn undo(&mut self) {
        if !self.session.is_dragging() {
            self.session.history.undo();
        }
    }

    pub(crate) fn redo(&mut self) {
        if !self.session.is_dragging() {
            self.session.history.redo();
        }
    }

    pub(crate) fn report_error(&mut self, message: String) {
        tracing::error!("{message}");
        self.pending_error = Some(message);
    }

    /// Load the selected sprite, falling back to the demo sprite when
    /// the selection cannot be decoded.
    pub(crate) fn reload_sprite(&mut self, ctx: &egui::Context) {
        if let Err(e) = self.sprite.load_selected(ctx) {
            self.report_error(e.to_string());
            self.sprite.select_demo();
            if let Err(e) = self.sprite.load_selected(ctx) {
                tracing::error!("demo sprite failed to load: {e}");
            }
        }
    }
}

impl eframe::App for ShaperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        keyboard::handle_keyboard(ctx, self);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, self);
                menus::edit_menu(ui, self);
                menus::view_menu(ui, self);
            });
        });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .show(ctx, |ui| {
                self.status_bar(ui);
            });

        // ── Floating windows ─────────────────────────────────
        self.sprite_window(ctx);
        self.help_window(ctx);
        self.error_window(ctx);

        // ── Central panel: editing viewport ──────────────────
        let Self {
            viewport,
            session,
            sprite,
            ..
        } = self;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                viewport.show(ui, session, sprite);
            });

        // ── Deferred file command (one per frame) ────────────
        if let Some(command) = self.pending_command.take() {
            if let Err(e) = commands::execute(command, &mut self.session) {
                self.report_error(e.to_string());
            }
        }

        // ── Window title (only on version/path changes) ──────
        let version = self.session.history.current_version();
        if let Some(new_title) = self.title.refresh(&self.session.document, version) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(new_title.to_owned()));
        }
    }
}

impl ShaperApp {
    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let shape = self.session.history.current_shape();
            ui.weak(format!("vertices: {}/{MAX_VERTICES}", shape.len()));
            ui.separator();
            ui.weak(format!("zoom: {:.2}x", self.session.view.scale));
            if self
                .session
                .document
                .is_dirty(self.session.history.current_version())
            {
                ui.separator();
                ui.weak("unsaved changes");
            }
        });
    }

    fn sprite_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_sprite_window;
        let mut selection_changed = false;
        egui::Window::new("Sprite")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    selection_changed |= self.sprite.combo(ui);
                    if ui.button("Rescan").clicked() {
                        selection_changed |= self.sprite.rescan();
                    }
                });
                if let Some(size) = self.sprite.size() {
                    ui.weak(format!("{}x{} px", size.x as u32, size.y as u32));
                }
            });
        self.show_sprite_window = open;

        if selection_changed {
            self.reload_sprite(ctx);
        }
    }

    fn help_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_help;
        egui::Window::new("Help")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Left click: add or drag a vertex");
                ui.label("Right click: remove a vertex");
                ui.label("Middle mouse drag: pan");
                ui.label("Scroll: zoom");
            });
        self.show_help = open;
    }

    fn error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.pending_error.clone() else {
            return;
        };
        let mut acknowledged = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged {
            self.pending_error = None;
        }
    }
}
