//! Grid of spinning outlined cubes, sized by distance-mapped frequency

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let (cx, cy) = (w / 2.0, h / 2.0);
    let sf = p.min_dim() / 800.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.001;

    // Roughly ten cubes across the short side, breathing with the signal
    let spacing = (p.min_dim() / 10.0) * (0.8 + intensity * 0.4);
    let grid_x = (w / spacing).ceil() as i32;
    let grid_y = (h / spacing).ceil() as i32;
    let base_size = spacing * 0.8;
    let max_dist = (grid_x.max(grid_y) as f32) * std::f32::consts::SQRT_2;

    for gx in -(grid_x / 2 + 1)..=(grid_x / 2 + 1) {
        for gy in -(grid_y / 2 + 1)..=(grid_y / 2 + 1) {
            let dist = ((gx * gx + gy * gy) as f32).sqrt();
            let idx = ((dist / max_dist) * n as f32) as usize;
            let audio = bins[idx.min(n - 1)] as f32 / 255.0;

            let size = base_size * (0.6 + audio * 0.4);
            let half = size / 2.0;

            p.save();
            p.translate(cx + gx as f32 * spacing, cy + gy as f32 * spacing);
            p.rotate(time + dist * 0.5);

            let hue = (time * 50.0 + dist * 30.0) % 360.0;
            let color = hsl(hue, 100.0, 50.0);
            let width = ((2.0 + audio * 3.0) * sf).max(1.0);
            let alpha = 0.6 + audio * 0.4;

            p.stroke_rect(-half, -half, size, size, color, width, alpha);
            p.line(-half, -half, half, half, color, width, alpha);
            p.line(half, -half, -half, half, color, width, alpha);

            p.restore();
        }
    }
}
