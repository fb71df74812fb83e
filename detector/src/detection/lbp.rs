use std::ops::Range;

use itertools::Itertools;
use nalgebra::DMatrix;

use super::params::CellGrid;

pub const LBP_BINS: usize = 256;

// Clockwise from the top-left neighbour, the first one being the most significant bit.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Computes the 3x3 LBP code of every pixel. A neighbour sets its bit when it is
/// not darker than the centre; pixels outside the image replicate the border.
pub fn lbp_image(img: &DMatrix<u8>) -> DMatrix<u8> {
    let rows = img.nrows();
    let cols = img.ncols();
    if rows == 0 || cols == 0 {
        return DMatrix::zeros(rows, cols);
    }

    let clamp = |v: isize, len: usize| v.clamp(0, len as isize - 1) as usize;

    DMatrix::from_fn(rows, cols, |r, c| {
        let center = img[(r, c)];
        NEIGHBOURS.iter().fold(0u8, |code, (dr, dc)| {
            let n = img[(clamp(r as isize + dr, rows), clamp(c as isize + dc, cols))];
            (code << 1) | (n >= center) as u8
        })
    })
}

/// Normalised histogram of the LBP codes inside the given region.
pub fn cell_histogram(lbp: &DMatrix<u8>, rows: Range<usize>, cols: Range<usize>) -> [f32; LBP_BINS] {
    let mut hist = [0f32; LBP_BINS];
    let mut count = 0usize;
    for (r, c) in rows.cartesian_product(cols) {
        hist[lbp[(r, c)] as usize] += 1.0;
        count += 1;
    }

    if count > 0 {
        let total = count as f32;
        hist.iter_mut().for_each(|h| *h /= total);
    }

    hist
}

pub fn descriptor_len(cells: &CellGrid) -> usize {
    cells.count() * LBP_BINS
}

fn cell_span(index: usize, count: usize, len: usize) -> Range<usize> {
    (index * len / count)..((index + 1) * len / count)
}

/// Concatenates the cell histograms of a `win_rows` x `win_cols` window whose
/// top-left corner is at `(top, left)`, row-major over the cell grid.
pub fn window_descriptor(
    lbp: &DMatrix<u8>,
    top: usize,
    left: usize,
    win_rows: usize,
    win_cols: usize,
    cells: &CellGrid,
) -> Vec<f32> {
    let mut descriptor = Vec::with_capacity(descriptor_len(cells));
    for (cr, cc) in (0..cells.rows).cartesian_product(0..cells.cols) {
        let rows = cell_span(cr, cells.rows, win_rows);
        let cols = cell_span(cc, cells.cols, win_cols);
        let hist = cell_histogram(
            lbp,
            (top + rows.start)..(top + rows.end),
            (left + cols.start)..(left + cols.end),
        );
        descriptor.extend_from_slice(&hist);
    }

    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_sets_every_bit() {
        let img = DMatrix::from_element(4, 5, 80u8);
        let lbp = lbp_image(&img);
        assert!(lbp.iter().all(|&code| code == 255));
    }

    #[test]
    fn bright_centre_clears_every_bit() {
        let mut img = DMatrix::from_element(3, 3, 10u8);
        img[(1, 1)] = 200;
        let lbp = lbp_image(&img);
        assert_eq!(lbp[(1, 1)], 0);
    }

    #[test]
    fn bit_order_is_clockwise_from_top_left() {
        let mut img = DMatrix::from_element(3, 3, 0u8);
        img[(1, 1)] = 100;
        // Only the right neighbour is as bright as the centre.
        img[(1, 2)] = 100;
        assert_eq!(lbp_image(&img)[(1, 1)], 0b0001_0000);

        img[(1, 2)] = 0;
        // Only the top-left neighbour.
        img[(0, 0)] = 150;
        assert_eq!(lbp_image(&img)[(1, 1)], 0b1000_0000);
    }

    #[test]
    fn histograms_are_normalised() {
        let img = DMatrix::from_fn(12, 8, |r, c| ((r * 31 + c * 17) % 256) as u8);
        let lbp = lbp_image(&img);
        let hist = cell_histogram(&lbp, 0..6, 0..4);
        let sum: f32 = hist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn descriptor_has_one_histogram_per_cell() {
        let cells = CellGrid { rows: 6, cols: 4 };
        let img = DMatrix::from_fn(140, 70, |r, c| ((r * c) % 251) as u8);
        let lbp = lbp_image(&img);
        let descriptor = window_descriptor(&lbp, 3, 2, 128, 64, &cells);

        assert_eq!(descriptor.len(), descriptor_len(&cells));
        assert_eq!(descriptor.len(), 6 * 4 * 256);
        for hist in descriptor.chunks(LBP_BINS) {
            let sum: f32 = hist.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn cells_cover_uneven_windows() {
        let spans: Vec<_> = (0..3).map(|i| cell_span(i, 3, 10)).collect();
        assert_eq!(spans, vec![0..3, 3..6, 6..10]);
    }
}
