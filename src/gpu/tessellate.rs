//! CPU tessellation of 2D shapes into colored triangles.
//!
//! Every shape becomes plain triangle-list vertices in window pixels,
//! so a whole frame is drawn with one pipeline. Text is drawn in a
//! separate pass, so the batch remembers where the last label was
//! queued: vertices before that mark go under the labels, the rest on
//! top of them.

use crate::geometry::{Rect, Rgb};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::f32::consts::TAU;
use std::ops::Range;

/// Number of triangles in an ellipse fan.
pub const ELLIPSE_SEGMENTS: usize = 32;

/// One vertex of the shape pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Window pixels, origin top-left.
    pub position: [f32; 2],
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Triangles collected for one frame.
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    label_mark: Option<usize>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.label_mark = None;
    }

    /// Record that a label was queued after everything pushed so far.
    pub fn mark_label(&mut self) {
        self.label_mark = Some(self.vertices.len());
    }

    /// Vertices drawn before the labels.
    pub fn below_labels(&self) -> Range<u32> {
        0..self.split() as u32
    }

    /// Vertices pushed after the last label, drawn over the labels.
    pub fn above_labels(&self) -> Range<u32> {
        self.split() as u32..self.vertices.len() as u32
    }

    fn split(&self) -> usize {
        self.label_mark.unwrap_or(self.vertices.len())
    }

    fn push_triangle(&mut self, points: [Vec2; 3], color: [f32; 4]) {
        self.vertices.extend(points.map(|p| Vertex {
            position: p.to_array(),
            color,
        }));
    }

    fn push_quad(&mut self, corners: [Vec2; 4], color: [f32; 4]) {
        let [a, b, c, d] = corners;
        self.push_triangle([a, b, c], color);
        self.push_triangle([a, c, d], color);
    }

    pub fn push_rect(&mut self, rect: Rect, color: Rgb) {
        let min = rect.min;
        let max = rect.max();
        self.push_quad(
            [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
            rgba(color),
        );
    }

    /// Fill the ellipse inscribed in `rect` as a triangle fan.
    pub fn push_ellipse(&mut self, rect: Rect, color: Rgb) {
        let color = rgba(color);
        let center = rect.center();
        let radii = rect.size * 0.5;
        let point = |i: usize| {
            let theta = i as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
            center + radii * Vec2::new(theta.cos(), theta.sin())
        };

        for i in 0..ELLIPSE_SEGMENTS {
            self.push_triangle([center, point(i), point(i + 1)], color);
        }
    }

    /// A segment `width` pixels thick. Zero-length segments draw nothing.
    pub fn push_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb) {
        let Some(dir) = (to - from).try_normalize() else {
            return;
        };
        let offset = dir.perp() * (width * 0.5);
        self.push_quad(
            [from + offset, to + offset, to - offset, from - offset],
            rgba(color),
        );
    }
}

fn rgba(color: Rgb) -> [f32; 4] {
    let [r, g, b] = color.to_linear();
    [r, g, b, 1.0]
}
