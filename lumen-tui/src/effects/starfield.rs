//! Stars rushing toward the viewer, speed keyed to intensity

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

const MAX_DEPTH: f32 = 2000.0;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let (cx, cy) = (w / 2.0, h / 2.0);
    let sf = p.min_dim() / 800.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let count = fx.stars.len();
    for (i, star) in fx.stars.iter_mut().enumerate() {
        let audio = bins[i * n / count] as f32 / 255.0;

        star.z -= 10.0 + intensity * 20.0;
        if star.z <= 0.0 {
            star.x = ctx.rng.signed();
            star.y = ctx.rng.signed();
            star.z = MAX_DEPTH;
        }

        // Perspective projection from unit space
        let k = 128.0 / star.z;
        let px = star.x * w * k + cx;
        let py = star.y * h * k + cy;
        if px < 0.0 || px >= w || py < 0.0 || py >= h {
            continue;
        }

        let near = 1.0 - star.z / MAX_DEPTH;
        let size = (near * 3.0 * (1.0 + audio) * sf).max(0.5);
        let hue = (i as f32 * 2.0) % 360.0;
        let color = hsl(hue, 80.0, 80.0);

        // Soft halo behind the core
        p.disc(px, py, size * 2.0, color, near * 0.25);
        p.disc(px, py, size, color, near);
    }
}
