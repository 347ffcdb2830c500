//! Small fixed-anchor colormaps for mask rendering.

/// Palette applied when colorizing mask values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Viridis,
    Greens,
}

impl Colormap {
    /// Resolve a palette by its conventional name ("viridis", "Greens").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "viridis" => Some(Colormap::Viridis),
            "Greens" => Some(Colormap::Greens),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Greens => "Greens",
        }
    }

    fn anchors(&self) -> &'static [[u8; 3]] {
        match self {
            Colormap::Viridis => &[
                [68, 1, 84],
                [59, 82, 139],
                [33, 145, 140],
                [94, 201, 98],
                [253, 231, 37],
            ],
            Colormap::Greens => &[[247, 252, 245], [116, 196, 118], [0, 68, 27]],
        }
    }

    /// Sample the palette at `t` in [0, 1] with linear interpolation
    /// between anchors. Out-of-range values clamp.
    pub fn sample(&self, t: f64) -> [u8; 3] {
        let anchors = self.anchors();
        let t = t.clamp(0.0, 1.0);
        let scaled = t * (anchors.len() - 1) as f64;
        let lo = scaled.floor() as usize;
        let hi = (lo + 1).min(anchors.len() - 1);
        let frac = scaled - lo as f64;

        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            let a = f64::from(anchors[lo][i]);
            let b = f64::from(anchors[hi][i]);
            *channel = (a + (b - a) * frac).round() as u8;
        }
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Colormap::from_name("viridis"), Some(Colormap::Viridis));
        assert_eq!(Colormap::from_name("Greens"), Some(Colormap::Greens));
        assert_eq!(Colormap::from_name("magma"), None);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(Colormap::Viridis.sample(0.0), [68, 1, 84]);
        assert_eq!(Colormap::Viridis.sample(1.0), [253, 231, 37]);
        assert_eq!(Colormap::Greens.sample(0.0), [247, 252, 245]);
        assert_eq!(Colormap::Greens.sample(1.0), [0, 68, 27]);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(Colormap::Greens.sample(-1.0), Colormap::Greens.sample(0.0));
        assert_eq!(Colormap::Greens.sample(2.0), Colormap::Greens.sample(1.0));
    }

    #[test]
    fn test_midpoint_interpolates() {
        let mid = Colormap::Greens.sample(0.5);
        assert_eq!(mid, [116, 196, 118]);
    }
}
