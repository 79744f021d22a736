//! Application menu bar

use eframe::egui;

use shaper_core::ViewTransform;

use crate::app::ShaperApp;
use crate::commands::FileCommand;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, app: &mut ShaperApp) {
    ui.menu_button("File", |ui| {
        if ui.button("New").clicked() {
            app.queue_command(FileCommand::New);
            ui.close_menu();
        }
        if ui.button("Open...").clicked() {
            app.queue_command(FileCommand::Open);
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Save").clicked() {
            app.queue_command(FileCommand::Save);
            ui.close_menu();
        }
        if ui.button("Save As...").clicked() {
            app.queue_command(FileCommand::SaveAs);
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            std::process::exit(0);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, app: &mut ShaperApp) {
    let can_undo = app.session.history.can_undo() && !app.session.is_dragging();
    let can_redo = app.session.history.can_redo() && !app.session.is_dragging();
    ui.menu_button("Edit", |ui| {
        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            app.undo();
            ui.close_menu();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            app.redo();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, app: &mut ShaperApp) {
    ui.menu_button("View", |ui| {
        ui.checkbox(&mut app.show_sprite_window, "Sprite window");
        ui.separator();
        if ui.button("Reset view").clicked() {
            app.session.view = ViewTransform::default();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Help").clicked() {
            app.show_help = true;
            ui.close_menu();
        }
    });
}
