//! Rotating tesseract projected 4D -> 3D -> 2D

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

/// Edge list of the 16-vertex hypercube
const EDGES: [(usize, usize); 32] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (0, 8),
    (1, 3),
    (1, 5),
    (1, 9),
    (2, 3),
    (2, 6),
    (2, 10),
    (3, 7),
    (3, 11),
    (4, 5),
    (4, 6),
    (4, 12),
    (5, 7),
    (5, 13),
    (6, 7),
    (6, 14),
    (7, 15),
    (8, 9),
    (8, 10),
    (8, 12),
    (9, 11),
    (9, 13),
    (10, 11),
    (10, 14),
    (11, 15),
    (12, 13),
    (12, 14),
    (13, 15),
    (14, 15),
];

fn rotate(a: &mut f32, b: &mut f32, angle: f32) {
    let (sin, cos) = angle.sin_cos();
    let (na, nb) = (*a * cos - *b * sin, *a * sin + *b * cos);
    *a = na;
    *b = nb;
}

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let sf = p.min_dim() / 400.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.001;
    let scale = 200.0 * sf * (1.0 + intensity * 0.5);

    // Project all 16 vertices
    let mut projected = [(0.0f32, 0.0f32); 16];
    for (i, point) in projected.iter_mut().enumerate() {
        let mut x = if i & 1 == 0 { -1.0 } else { 1.0 };
        let mut y = if i & 2 == 0 { -1.0 } else { 1.0 };
        let mut z = if i & 4 == 0 { -1.0 } else { 1.0 };
        let mut w = if i & 8 == 0 { -1.0 } else { 1.0 };

        rotate(&mut x, &mut y, time * 0.5);
        rotate(&mut y, &mut z, time * 0.3);
        rotate(&mut z, &mut w, time * 0.7);
        rotate(&mut x, &mut w, time * 0.4);

        // 4D -> 3D perspective, then drop z for the screen
        let persp = 2.0 / (2.0 + w);
        *point = (cx + x * persp * scale, cy + y * persp * scale);
    }

    for (i, &(a, b)) in EDGES.iter().enumerate() {
        let audio = bins[i * n / EDGES.len()] as f32 / 255.0;
        let hue = (time * 50.0 + i as f32 * 360.0 / EDGES.len() as f32) % 360.0;
        p.line(
            projected[a].0,
            projected[a].1,
            projected[b].0,
            projected[b].1,
            hsl(hue, 100.0, 50.0),
            ((3.0 + audio * 4.0) * sf).max(1.0),
            0.6 + audio * 0.4,
        );
    }

    for (i, &(x, y)) in projected.iter().enumerate() {
        let audio = bins[i * n / projected.len()] as f32 / 255.0;
        let hue = (time * 50.0 + i as f32 * 360.0 / projected.len() as f32) % 360.0;
        p.disc(
            x,
            y,
            ((4.0 + audio * 4.0) * sf).max(1.0),
            hsl(hue, 100.0, 50.0),
            0.7 + audio * 0.3,
        );
    }
}
