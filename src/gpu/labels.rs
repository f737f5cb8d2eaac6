//! Button label text through egui.
//!
//! Labels are queued during the frame, laid out by egui on a background
//! layer and drawn on top of the shape pass by `egui_wgpu`.

use crate::geometry::Rgb;
use glam::Vec2;
use std::sync::Arc;
use winit::window::Window;

/// Label height in physical pixels.
pub const LABEL_FONT_SIZE: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
struct Label {
    text: String,
    center: Vec2,
    color: Rgb,
}

/// Egui state used only to paint text.
pub struct LabelRenderer {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    queued: Vec<Label>,
}

/// Tessellated labels ready to be drawn.
pub struct LabelFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    screen_descriptor: egui_wgpu::ScreenDescriptor,
}

impl LabelRenderer {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(device, output_format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
            queued: Vec::new(),
        }
    }

    /// Queue `text` centered on `center` (physical pixels) for this frame.
    pub fn queue(&mut self, text: &str, center: Vec2, color: Rgb) {
        self.queued.push(Label {
            text: text.to_string(),
            center,
            color,
        });
    }

    /// Drop everything queued so far.
    pub fn discard(&mut self) {
        self.queued.clear();
    }

    /// Lay out queued labels and upload their buffers.
    ///
    /// Returns command buffers that must be submitted before `encoder`.
    pub fn prepare(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        size_in_pixels: [u32; 2],
    ) -> (LabelFrame, Vec<wgpu::CommandBuffer>) {
        let labels = std::mem::take(&mut self.queued);
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.ctx.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            let ppp = ctx.pixels_per_point();
            for label in &labels {
                painter.text(
                    egui::pos2(label.center.x / ppp, label.center.y / ppp),
                    egui::Align2::CENTER_CENTER,
                    &label.text,
                    egui::FontId::proportional(LABEL_FONT_SIZE / ppp),
                    label.color.to_color32(),
                );
            }
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let extra = self
            .renderer
            .update_buffers(device, queue, encoder, &paint_jobs, &screen_descriptor);

        let frame = LabelFrame {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            screen_descriptor,
        };
        (frame, extra)
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'static>, frame: &LabelFrame) {
        self.renderer
            .render(pass, &frame.paint_jobs, &frame.screen_descriptor);
    }

    /// Free textures egui no longer needs.
    pub fn cleanup(&mut self, frame: LabelFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
