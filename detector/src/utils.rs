use anyhow::bail;
use nalgebra::DMatrix;
use opencv::{core::CV_8UC1, prelude::*};


pub fn mat_to_dmatrix(mat: &Mat) -> anyhow::Result<DMatrix<u8>> {
    if mat.typ() != CV_8UC1 {
        bail!("Expected a single channel 8 bit image");
    }
    let rows = mat.rows() as usize;
    let cols = mat.cols() as usize;
    let mut res = DMatrix::zeros(rows, cols);

    for r in 0..rows {
        for c in 0..cols {
            res[(r, c)] = *mat.at_2d::<u8>(r as i32, c as i32)?;
        }
    }

    Ok(res)
}
