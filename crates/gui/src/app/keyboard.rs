//! Keyboard shortcut handling

use eframe::egui;

use crate::app::ShaperApp;
use crate::commands::FileCommand;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, app: &mut ShaperApp) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+N — new document
        if i.modifiers.command && i.key_pressed(egui::Key::N) {
            app.queue_command(FileCommand::New);
        }
        // Ctrl+O — open
        if i.modifiers.command && i.key_pressed(egui::Key::O) {
            app.queue_command(FileCommand::Open);
        }
        // Ctrl+Shift+S — save as, Ctrl+S — save
        if i.modifiers.command && i.key_pressed(egui::Key::S) {
            if i.modifiers.shift {
                app.queue_command(FileCommand::SaveAs);
            } else {
                app.queue_command(FileCommand::Save);
            }
        }
        // Ctrl+Z — undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            app.undo();
        }
        // Ctrl+Shift+Z or Ctrl+Y — redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            app.redo();
        }
    });
}
