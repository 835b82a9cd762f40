//! Temperature trend chart for the hourly forecast.

/// Chart viewport, in the same units as the points.
const LEFT: f64 = 10.0;
const WIDTH: f64 = 380.0;
const BASELINE: f64 = 140.0;
const HEIGHT: f64 = 120.0;

/// Polyline vertices for `temps`. The hottest sample sits at `y = 20`, the
/// coldest on the baseline. A flat series stays on the baseline.
pub fn points(temps: &[f64]) -> Vec<(f64, f64)> {
    let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let last = temps.len().saturating_sub(1).max(1) as f64;

    temps
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let x = i as f64 / last * WIDTH + LEFT;
            let y = if range > 0.0 {
                BASELINE - (t - min) / range * HEIGHT
            } else {
                BASELINE
            };
            (x, y)
        })
        .collect()
}

/// Draw the polyline on a `cols` × `rows` character grid. Vertices are `●`,
/// the segments between them `·`.
pub fn plot(temps: &[f64], cols: usize, rows: usize) -> Vec<String> {
    let mut grid = vec![vec![' '; cols]; rows];
    if temps.is_empty() || cols < 2 || rows < 2 {
        return grid.into_iter().map(|r| r.into_iter().collect()).collect();
    }

    let cell = |(x, y): (f64, f64)| {
        let col = ((x - LEFT) / WIDTH * (cols - 1) as f64).round() as usize;
        let row = ((y - (BASELINE - HEIGHT)) / HEIGHT * (rows - 1) as f64).round() as usize;
        (col.min(cols - 1), row.min(rows - 1))
    };

    let vertices: Vec<(usize, usize)> = points(temps).into_iter().map(cell).collect();

    for pair in vertices.windows(2) {
        let ((c0, r0), (c1, r1)) = (pair[0], pair[1]);
        for c in c0..=c1 {
            let t = if c1 == c0 { 0.0 } else { (c - c0) as f64 / (c1 - c0) as f64 };
            let r = (r0 as f64 + (r1 as f64 - r0 as f64) * t).round() as usize;
            grid[r][c] = '·';
        }
    }
    for &(c, r) in &vertices {
        grid[r][c] = '●';
    }

    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}
