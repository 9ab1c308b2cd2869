//! Spinning octahedron wireframe with perspective

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

const EDGES: [(usize, usize); 12] = [
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 4),
    (2, 5),
    (3, 4),
    (3, 5),
];

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let sf = p.min_dim() / 235.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.001;
    let size = 100.0 * sf * (1.0 + intensity * 0.5);

    let vertices = [
        [0.0, size, 0.0],
        [0.0, -size, 0.0],
        [size, 0.0, 0.0],
        [-size, 0.0, 0.0],
        [0.0, 0.0, size],
        [0.0, 0.0, -size],
    ];

    let (sin_y, cos_y) = (time * 0.8).sin_cos();
    let (sin_x, cos_x) = (time * 0.5).sin_cos();

    let projected: Vec<(f32, f32)> = vertices
        .iter()
        .map(|&[x, y, z]| {
            // Rotate around Y, then X, then perspective-project
            let (x, z) = (x * cos_y - z * sin_y, x * sin_y + z * cos_y);
            let (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);
            let persp = 1000.0 / (1000.0 + z);
            (cx + x * persp, cy + y * persp)
        })
        .collect();

    for (i, &(a, b)) in EDGES.iter().enumerate() {
        let audio = bins[i * n / EDGES.len()] as f32 / 255.0;
        let hue = (time * 50.0 + i as f32 * 360.0 / EDGES.len() as f32) % 360.0;
        p.line(
            projected[a].0,
            projected[a].1,
            projected[b].0,
            projected[b].1,
            hsl(hue, 100.0, 50.0),
            ((2.0 + audio * 4.0) * sf).max(1.0),
            0.6 + audio * 0.4,
        );
    }

    for (i, &(x, y)) in projected.iter().enumerate() {
        let audio = bins[i * n / projected.len()] as f32 / 255.0;
        let hue = (time * 50.0 + i as f32 * 60.0) % 360.0;
        p.disc(
            x,
            y,
            ((4.0 + audio * 4.0) * sf).max(1.0),
            hsl(hue, 100.0, 50.0),
            0.8,
        );
    }
}
