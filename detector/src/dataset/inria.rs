use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context};

use crate::detection::bounding_box::BoundingBox;

const BOX_PREFIX: &str = "Bounding box for object";
const COUNT_PREFIX: &str = "Objects with ground truth";

/// Reads the ground truth boxes of an INRIA (PASCAL v1.0) annotation file.
pub fn read_inria_annotations(path: &Path) -> anyhow::Result<Vec<BoundingBox>> {
    let bytes = fs::read(path).with_context(|| format!("could not parse annotations file '{}'", path.display()))?;
    // Some INRIA files are latin-1, only ASCII is needed here.
    let contents = String::from_utf8_lossy(&bytes);

    parse_inria_annotations(&contents).with_context(|| format!("could not parse annotations file '{}'", path.display()))
}

pub fn parse_inria_annotations(contents: &str) -> anyhow::Result<Vec<BoundingBox>> {
    let mut boxes = Vec::new();
    let mut expected = None;

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.starts_with(COUNT_PREFIX) {
            expected = Some(parse_count(line).ok_or_else(|| anyhow!("line {}: bad object count", line_no + 1))?);
        } else if line.starts_with(BOX_PREFIX) {
            let bbox = parse_box(line).ok_or_else(|| anyhow!("line {}: bad bounding box '{line}'", line_no + 1))?;
            boxes.push(bbox);
        }
    }

    if let Some(expected) = expected {
        if expected != boxes.len() {
            bail!("header announces {expected} objects but {} bounding boxes were found", boxes.len());
        }
    }

    Ok(boxes)
}

// "Objects with ground truth : 2 { "PASperson" "PASperson" }"
fn parse_count(line: &str) -> Option<usize> {
    let (_, rest) = line.split_once(':')?;
    rest.split_whitespace().next()?.parse().ok()
}

// "... (Xmin, Ymin) - (Xmax, Ymax) : (113, 86) - (304, 480)"
fn parse_box(line: &str) -> Option<BoundingBox> {
    let (_, coords) = line.rsplit_once(':')?;
    // Split after the first point, coordinates may carry a sign.
    let (min, rest) = coords.split_at(coords.find(')')? + 1);
    let max = rest.trim_start().strip_prefix('-')?;
    let (xmin, ymin) = parse_point(min)?;
    let (xmax, ymax) = parse_point(max)?;
    if xmax < xmin || ymax < ymin {
        return None;
    }

    Some(BoundingBox::from_corners(xmin, ymin, xmax, ymax))
}

fn parse_point(s: &str) -> Option<(i32, i32)> {
    let inner = s.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}
