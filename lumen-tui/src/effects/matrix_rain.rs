//! Falling glyph columns, speed and color keyed to the spectrum

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

const CHARACTERS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let columns = p.cols();
    let rows = p.rows() as f32;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    // The drop list follows the terminal width
    if fx.rain_drops.len() != columns {
        fx.rain_drops.resize(columns, 1.0);
    }

    for i in 0..columns {
        let value = bins[i * n / columns.max(1)] as f32 / 255.0;
        let ch = CHARACTERS[ctx.rng.below(CHARACTERS.len())] as char;
        let row = fx.rain_drops[i];

        let hue = (i as f32 / columns as f32 * 120.0 + value * 240.0) % 360.0;
        let brightness = 50.0 + value * 50.0;
        p.glyph(
            i as i32,
            row as i32,
            ch,
            hsl(hue, 100.0, brightness),
            0.5 + value * 0.5,
        );

        if row > rows && ctx.rng.next_f32() > 0.975 - intensity * 0.1 {
            fx.rain_drops[i] = 0.0;
        }
        fx.rain_drops[i] += 1.0;
    }
}
