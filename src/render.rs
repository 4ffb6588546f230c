//! ASCII layout rendering, lifted from the teacher's `render.rs` and
//! generalized to this crate's `Placement`/`SheetResult`. Non-essential to
//! the engine; used only by the CLI's `--layout` flag.

use crate::types::{Placement, SheetResult};

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

pub fn render_sheet(sheet: &SheetResult) -> String {
    let scale = f64::min(MAX_WIDTH / sheet.width as f64, MAX_HEIGHT / sheet.height as f64);
    let grid_w = (sheet.width as f64 * scale).round() as usize;
    let grid_h = (sheet.height as f64 * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for p in &sheet.placements {
        render_placement(&mut grid, p, scale);
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn render_placement(grid: &mut [Vec<char>], p: &Placement, scale: f64) {
    let sx = (p.x as f64 * scale).round() as usize;
    let sy = (p.y as f64 * scale).round() as usize;
    let sw = (p.width as f64 * scale).round() as usize;
    let sh = (p.height as f64 * scale).round() as usize;

    if sw == 0 || sh == 0 {
        return;
    }

    draw_rect(grid, sx, sy, sw, sh);

    let label = format!("{}x{}", p.width, p.height);
    let label_chars: Vec<char> = label.chars().collect();

    if sw > 2 && sh > 0 {
        let cx = sx + sw / 2;
        let cy = sy + sh / 2;
        let half = label_chars.len() / 2;
        let start_x = cx.saturating_sub(half);

        for (i, &ch) in label_chars.iter().enumerate() {
            let x = start_x + i;
            if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                grid[cy][x] = ch;
            }
        }
    }
}

#[allow(clippy::needless_range_loop)]
fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    for i in x..=x + w {
        if i < cols {
            if y < rows {
                grid[y][i] = if grid[y][i] == '|' || grid[y][i] == '+' { '+' } else { '-' };
            }
            if y + h < rows {
                grid[y + h][i] = if grid[y + h][i] == '|' || grid[y + h][i] == '+' { '+' } else { '-' };
            }
        }
    }

    for j in y..=y + h {
        if j < rows {
            if x < cols {
                grid[j][x] = if grid[j][x] == '-' || grid[j][x] == '+' { '+' } else { '|' };
            }
            if x + w < cols {
                grid[j][x + w] = if grid[j][x + w] == '-' || grid[j][x + w] == '+' { '+' } else { '|' };
            }
        }
    }

    for &cx in &[x, x + w] {
        for &cy in &[y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(width: u32, height: u32, placements: Vec<Placement>) -> SheetResult {
        SheetResult {
            stock_id: "s1".into(),
            width,
            height,
            placements,
            waste_area: 0,
            waste_percentage: 0.0,
            waste_rects: Vec::new(),
        }
    }

    fn placement(x: u32, y: u32, w: u32, h: u32) -> Placement {
        Placement {
            piece_id: "p".into(),
            order_item_id: "oi".into(),
            x,
            y,
            width: w,
            height: h,
            rotated: false,
        }
    }

    #[test]
    fn renders_border_and_label() {
        let output = render_sheet(&sheet(100, 50, vec![placement(0, 0, 100, 50)]));
        assert!(output.contains('+'));
        assert!(output.contains('-'));
        assert!(output.contains('|'));
        assert!(output.contains("100x50"));
    }

    #[test]
    fn renders_empty_sheet_border_only() {
        let output = render_sheet(&sheet(100, 100, Vec::new()));
        assert!(output.contains('+'));
    }
}
