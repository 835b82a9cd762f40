//! Decorative radar panel. The blips are random; no radar data is fetched.

use rand::Rng;
use std::f64::consts::PI;

pub const LAYERS: [&str; 5] = ["precipitation", "temperature", "wind", "clouds", "pressure"];
const BLIPS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blip {
    /// Degrees clockwise from north.
    pub angle: f64,
    /// In `[0.2, 1.0)`.
    pub intensity: f64,
    /// In `[10, 40)`.
    pub size: f64,
}

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Vec<Blip> {
    (0..BLIPS)
        .map(|i| Blip {
            angle: i as f64 / BLIPS as f64 * 360.0,
            intensity: rng.gen_range(0.2..1.0),
            size: rng.gen_range(10.0..40.0),
        })
        .collect()
}

/// Render blips on a circular scope `radius` rows tall above and below the
/// centre. Columns are doubled to keep the scope round in a terminal.
pub fn draw(blips: &[Blip], radius: usize) -> Vec<String> {
    let rows = radius * 2 + 1;
    let cols = radius * 4 + 1;
    let (cy, cx) = (radius as f64, (radius * 2) as f64);
    let mut grid = vec![vec![' '; cols]; rows];

    for (r, row) in grid.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            let dy = r as f64 - cy;
            let dx = (c as f64 - cx) / 2.0;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - radius as f64).abs() < 0.5 {
                *cell = '.';
            }
        }
    }
    grid[radius][radius * 2] = '+';

    for blip in blips {
        let theta = blip.angle.to_radians() - PI / 2.0;
        let reach = blip.size / 40.0 * (radius as f64 - 1.0);
        let r = (cy + reach * theta.sin()).round() as usize;
        let c = (cx + 2.0 * reach * theta.cos()).round() as usize;
        if let Some(cell) = grid.get_mut(r).and_then(|row| row.get_mut(c)) {
            *cell = shade(blip.intensity);
        }
    }

    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

fn shade(intensity: f64) -> char {
    match intensity {
        i if i < 0.4 => '░',
        i if i < 0.6 => '▒',
        i if i < 0.8 => '▓',
        _ => '█',
    }
}
