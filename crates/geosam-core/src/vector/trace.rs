//! Raster mask to pixel-space polygon rings.
//!
//! Regions are 4-connected runs of equal nonzero mask values. Each region
//! is traced along its pixel edges into one exterior ring plus any hole
//! rings, with coordinates on the pixel-corner lattice.

use std::collections::HashMap;

use image::GrayImage;

/// One traced mask region in pixel-corner coordinates.
#[derive(Debug, Clone)]
pub struct TracedRegion {
    pub value: u8,
    pub exterior: Vec<(f64, f64)>,
    pub interiors: Vec<Vec<(f64, f64)>>,
}

/// Trace every nonzero region of the mask.
pub fn trace_regions(mask: &GrayImage) -> Vec<TracedRegion> {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let at = |x: u32, y: u32| mask.get_pixel(x, y).0[0];
    let idx = |x: u32, y: u32| (y * width + x) as usize;

    // Label 4-connected components of equal nonzero value.
    let mut labels = vec![0u32; (width * height) as usize];
    let mut region_values: Vec<u8> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let v = at(x, y);
            if v == 0 || labels[idx(x, y)] != 0 {
                continue;
            }
            let label = region_values.len() as u32 + 1;
            region_values.push(v);

            let mut stack = vec![(x, y)];
            labels[idx(x, y)] = label;
            while let Some((cx, cy)) = stack.pop() {
                let mut visit = |nx: u32, ny: u32| {
                    if at(nx, ny) == v && labels[idx(nx, ny)] == 0 {
                        labels[idx(nx, ny)] = label;
                        stack.push((nx, ny));
                    }
                };
                if cx > 0 {
                    visit(cx - 1, cy);
                }
                if cx + 1 < width {
                    visit(cx + 1, cy);
                }
                if cy > 0 {
                    visit(cx, cy - 1);
                }
                if cy + 1 < height {
                    visit(cx, cy + 1);
                }
            }
        }
    }

    // Collect exposed pixel edges per region, directed so the region
    // interior stays on the left when walking in image coordinates.
    let mut edges: Vec<HashMap<(u32, u32), Vec<(u32, u32)>>> =
        vec![HashMap::new(); region_values.len()];

    for y in 0..height {
        for x in 0..width {
            let label = labels[idx(x, y)];
            if label == 0 {
                continue;
            }
            let comp = (label - 1) as usize;
            let same = |nx: i64, ny: i64| -> bool {
                nx >= 0
                    && ny >= 0
                    && (nx as u32) < width
                    && (ny as u32) < height
                    && labels[idx(nx as u32, ny as u32)] == label
            };
            let (xi, yi) = (i64::from(x), i64::from(y));
            let mut push = |from: (u32, u32), to: (u32, u32)| {
                edges[comp].entry(from).or_default().push(to);
            };
            if !same(xi, yi - 1) {
                push((x, y), (x + 1, y));
            }
            if !same(xi + 1, yi) {
                push((x + 1, y), (x + 1, y + 1));
            }
            if !same(xi, yi + 1) {
                push((x + 1, y + 1), (x, y + 1));
            }
            if !same(xi - 1, yi) {
                push((x, y + 1), (x, y));
            }
        }
    }

    let mut regions = Vec::with_capacity(region_values.len());
    for (comp, value) in region_values.iter().enumerate() {
        let rings = chain_rings(&mut edges[comp]);
        if rings.is_empty() {
            continue;
        }

        let mut exterior: Option<Vec<(f64, f64)>> = None;
        let mut interiors = Vec::new();
        for ring in rings {
            // Positive shoelace area marks the exterior under our edge
            // orientation (y grows down); holes come out negative.
            if shoelace(&ring) > 0.0 {
                match &exterior {
                    Some(existing) if shoelace(existing) >= shoelace(&ring) => {
                        interiors.push(ring)
                    }
                    _ => {
                        if let Some(prev) = exterior.replace(ring) {
                            interiors.push(prev);
                        }
                    }
                }
            } else {
                interiors.push(ring);
            }
        }

        if let Some(exterior) = exterior {
            regions.push(TracedRegion { value: *value, exterior, interiors });
        }
    }
    regions
}

/// Chain directed edges into closed rings, dropping collinear midpoints.
fn chain_rings(edges: &mut HashMap<(u32, u32), Vec<(u32, u32)>>) -> Vec<Vec<(f64, f64)>> {
    let mut rings = Vec::new();

    loop {
        let Some(start) = edges.iter().find(|(_, ends)| !ends.is_empty()).map(|(k, _)| *k)
        else {
            break;
        };
        let mut ring: Vec<(u32, u32)> = vec![start];
        let mut current = start;

        loop {
            let Some(ends) = edges.get_mut(&current) else { break };
            let Some(next) = ends.pop() else { break };
            if next == start {
                break;
            }
            ring.push(next);
            current = next;
        }

        if ring.len() >= 3 {
            rings.push(close_ring(simplify_collinear(ring)));
        }
        edges.retain(|_, ends| !ends.is_empty());
    }

    rings
}

fn simplify_collinear(ring: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    let n = ring.len();
    if n < 4 {
        return ring;
    }
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let here = ring[i];
        let next = ring[(i + 1) % n];
        let collinear = (prev.0 == here.0 && here.0 == next.0) || (prev.1 == here.1 && here.1 == next.1);
        if !collinear {
            out.push(here);
        }
    }
    if out.len() < 3 {
        ring
    } else {
        out
    }
}

fn close_ring(ring: Vec<(u32, u32)>) -> Vec<(f64, f64)> {
    let mut out: Vec<(f64, f64)> =
        ring.iter().map(|&(x, y)| (f64::from(x), f64::from(y))).collect();
    if out.first() != out.last() {
        if let Some(&first) = out.first() {
            out.push(first);
        }
    }
    out
}

fn shoelace(ring: &[(f64, f64)]) -> f64 {
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let (x0, y0) = ring[i];
        let (x1, y1) = ring[(i + 1) % ring.len()];
        sum += x0 * y1 - x1 * y0;
    }
    sum / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn mask_with_square() -> GrayImage {
        let mut mask = GrayImage::new(16, 16);
        for y in 4..8 {
            for x in 4..8 {
                mask.put_pixel(x, y, Luma([7]));
            }
        }
        mask
    }

    #[test]
    fn test_empty_mask_traces_nothing() {
        assert!(trace_regions(&GrayImage::new(8, 8)).is_empty());
    }

    #[test]
    fn test_single_square() {
        let regions = trace_regions(&mask_with_square());
        assert_eq!(regions.len(), 1);
        let region = &regions[0];
        assert_eq!(region.value, 7);
        assert!(region.interiors.is_empty());
        // A 4x4 square simplifies to its 4 corners plus the closing vertex.
        assert_eq!(region.exterior.len(), 5);
        assert!(region.exterior.contains(&(4.0, 4.0)));
        assert!(region.exterior.contains(&(8.0, 8.0)));
    }

    #[test]
    fn test_two_values_make_two_regions() {
        let mut mask = mask_with_square();
        mask.put_pixel(12, 12, Luma([9]));
        let mut regions = trace_regions(&mask);
        regions.sort_by_key(|r| r.value);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].value, 7);
        assert_eq!(regions[1].value, 9);
    }

    #[test]
    fn test_donut_has_hole() {
        let mut mask = GrayImage::new(16, 16);
        for y in 2..10 {
            for x in 2..10 {
                mask.put_pixel(x, y, Luma([3]));
            }
        }
        for y in 5..7 {
            for x in 5..7 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
        let regions = trace_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].interiors.len(), 1);
    }

    #[test]
    fn test_diagonal_pixels_are_separate_regions() {
        let mut mask = GrayImage::new(8, 8);
        mask.put_pixel(1, 1, Luma([5]));
        mask.put_pixel(2, 2, Luma([5]));
        let regions = trace_regions(&mask);
        assert_eq!(regions.len(), 2);
    }
}
