//! Editing viewport: input sampling and painting
//!
//! Adapts egui's input state to the core's [`FrameInput`], steps the
//! session once per frame, then paints the sprite, the polygon and the
//! vertex handles.

use eframe::egui;
use glam::{vec2, Vec2};

use shaper_core::{ButtonState, FrameInput, Session, VERTEX_RADIUS};

use crate::sprite::SpritePreview;

#[derive(Default)]
pub struct Viewport {
    /// Last known cursor position, kept across frames where egui
    /// reports none (pointer outside the window).
    last_cursor: Vec2,
}

impl Viewport {
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut Session, sprite: &SpritePreview) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let center = vec2(rect.center().x, rect.center().y);

        let input = self.sample_input(ui, &response, center);
        let status = session.step(&input);

        if !ui.is_rect_visible(rect) {
            return;
        }
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0, egui::Color32::from_gray(64));

        sprite.draw(&painter, &session.view, center);

        // Shape outline in world space, handles in screen space so
        // they keep a constant size under zoom
        let shape = session.history.current_shape();
        let points: Vec<egui::Pos2> = shape
            .points()
            .iter()
            .map(|&v| {
                let s = session.view.world_to_screen(center, v);
                egui::pos2(s.x, s.y)
            })
            .collect();

        if points.len() >= 2 {
            painter.add(egui::Shape::closed_line(
                points.clone(),
                egui::Stroke::new(1.5, egui::Color32::LIGHT_GRAY),
            ));
        }

        for (i, point) in points.iter().enumerate() {
            let color = if status.hovered_vertex == Some(i) {
                egui::Color32::from_rgba_unmultiplied(0, 255, 0, 128)
            } else {
                egui::Color32::from_rgba_unmultiplied(255, 255, 255, 128)
            };
            painter.circle_filled(*point, VERTEX_RADIUS, color);
        }
    }

    fn sample_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        center: Vec2,
    ) -> FrameInput {
        let ctx = ui.ctx();
        if let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) {
            self.last_cursor = vec2(pos.x, pos.y);
        }

        let (left, middle, right, wheel) = ctx.input(|i| {
            (
                button_state(i, egui::PointerButton::Primary),
                button_state(i, egui::PointerButton::Middle),
                button_state(i, egui::PointerButton::Secondary),
                i.smooth_scroll_delta.y * 0.01,
            )
        });

        FrameInput {
            cursor: self.last_cursor,
            view_center: center,
            left,
            middle,
            right,
            wheel,
            // Menus, dialogs and floating windows sit above the
            // viewport and take the hover away from it
            ui_wants_input: !(response.hovered() || response.dragged()),
        }
    }
}

fn button_state(input: &egui::InputState, button: egui::PointerButton) -> ButtonState {
    ButtonState {
        down: input.pointer.button_down(button),
        pressed: input.pointer.button_pressed(button),
    }
}
