//! Drifting rotating shapes that wrap at the edges

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::FRAC_PI_6;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let sf = p.min_dim() / 800.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.001;
    let count = fx.shapes.len();

    for (i, shape) in fx.shapes.iter_mut().enumerate() {
        let audio = bins[i * n / count] as f32 / 255.0;

        // Positions live in normalized space so resizes keep the drift
        shape.x += shape.speed_x * (1.0 + intensity * 2.0);
        shape.y += shape.speed_y * (1.0 + intensity * 2.0);
        shape.rotation += shape.rotation_speed * (1.0 + intensity);

        if shape.x < -0.1 {
            shape.x = 1.1;
        }
        if shape.x > 1.1 {
            shape.x = -0.1;
        }
        if shape.y < -0.1 {
            shape.y = 1.1;
        }
        if shape.y > 1.1 {
            shape.y = -0.1;
        }

        let size = shape.size * (1.0 + audio * 0.5) * sf;
        let hue = (time * 50.0 + i as f32 * 360.0 / count as f32) % 360.0;
        let fill = hsl(hue, 100.0, 50.0);
        let edge = hsl(hue, 100.0, 80.0);
        let fill_alpha = 0.6 + audio * 0.4;
        let edge_alpha = 0.8 + audio * 0.2;
        let width = ((2.0 + audio * 3.0) * sf).max(1.0);

        p.save();
        p.translate(shape.x * w, shape.y * h);
        p.rotate(shape.rotation);

        match shape.kind {
            0 => {
                p.disc(0.0, 0.0, size, fill, fill_alpha);
                p.stroke_circle(0.0, 0.0, size, edge, width, edge_alpha);
            }
            1 => {
                p.fill_rect(-size, -size, size * 2.0, size * 2.0, fill, fill_alpha);
                p.stroke_rect(-size, -size, size * 2.0, size * 2.0, edge, width, edge_alpha);
            }
            _ => {
                let tri = [
                    (0.0, -size),
                    (size * FRAC_PI_6.cos(), size * FRAC_PI_6.sin()),
                    (-size * FRAC_PI_6.cos(), size * FRAC_PI_6.sin()),
                ];
                p.fill_poly(&tri, fill, fill_alpha);
                p.polyline(&[tri[0], tri[1], tri[2], tri[0]], edge, width, edge_alpha);
            }
        }

        p.restore();
    }
}
