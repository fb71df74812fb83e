use anyhow::bail;
use opencv::{core::{Mat, MatTraitConst, CV_8UC1, CV_8UC3}, imgproc::{cvt_color_def, COLOR_BGR2GRAY}};


pub fn to_grayscale(img: &Mat) -> anyhow::Result<Mat> {
    let mut img_gray = Mat::default();
    match img.typ() {
        CV_8UC1 => {
            img_gray = img.clone();
        },
        CV_8UC3 => {
            cvt_color_def(img, &mut img_gray, COLOR_BGR2GRAY)?;
        },
        _ => {
            bail!("Image of unknown color type");
        }
    }

    Ok(img_gray)
}

#[cfg(test)]
mod tests {
    use opencv::core::Scalar;

    use super::*;

    #[test]
    fn converts_bgr_to_single_channel() {
        let bgr = Mat::new_rows_cols_with_default(4, 4, CV_8UC3, Scalar::new(10.0, 20.0, 30.0, 0.0)).unwrap();
        let gray = to_grayscale(&bgr).unwrap();
        assert_eq!(gray.typ(), CV_8UC1);
        assert_eq!((gray.rows(), gray.cols()), (4, 4));
    }

    #[test]
    fn keeps_gray_images() {
        let gray = Mat::new_rows_cols_with_default(3, 5, CV_8UC1, Scalar::all(42.0)).unwrap();
        let out = to_grayscale(&gray).unwrap();
        assert_eq!(*out.at_2d::<u8>(2, 4).unwrap(), 42);
    }
}
