//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Outline of a star: alternating outer and inner points, starting with an
/// outer point at angle 0
pub fn star_outline(center: Vec2, inner_radius: f32, outer_radius: f32, points: u32) -> Vec<Vec2> {
    let angle = TAU / points as f32;
    let half_angle = angle / 2.0;

    let mut outline = Vec::with_capacity(points as usize * 2);
    for k in 0..points {
        let a = k as f32 * angle;
        outline.push(center + Vec2::new(a.cos(), a.sin()) * outer_radius);
        let b = a + half_angle;
        outline.push(center + Vec2::new(b.cos(), b.sin()) * inner_radius);
    }
    outline
}

/// Generate vertices for a filled star (triangle fan around the center)
pub fn star(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    points: u32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let outline = star_outline(center, inner_radius, outer_radius, points);
    let mut vertices = Vec::with_capacity(outline.len() * 3);

    for (k, p1) in outline.iter().enumerate() {
        let p2 = outline[(k + 1) % outline.len()];

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}
