//! Globe point-of-view values used by the orbital → map transition.

use super::easing::{lerp, Lerp};

/// Camera point of view over the globe.  `altitude` is in globe radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoView {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

impl GeoView {
    pub const fn new(lat: f64, lng: f64, altitude: f64) -> Self {
        Self { lat, lng, altitude }
    }

    /// Opening orbital view over the Arabian Sea.
    pub const ORBITAL: GeoView = GeoView::new(20.0, 70.0, 2.5);

    /// Close-up over Karachi.
    pub const KARACHI: GeoView = GeoView::new(24.8607, 67.0011, 0.02);

    /// Longitude/latitude span visible from this altitude, assuming an
    /// altitude of [`FULL_GLOBE_ALTITUDE`] frames the whole world.
    pub fn span_degrees(&self) -> (f64, f64) {
        let k = (self.altitude / FULL_GLOBE_ALTITUDE).clamp(MIN_SPAN_FRACTION, 1.0);
        (360.0 * k, 180.0 * k)
    }

    /// `[west, east]`, `[south, north]` bounds of the visible region,
    /// clamped to valid coordinates.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let (lng_span, lat_span) = self.span_degrees();
        // Slide the window rather than shrink it when it hits an edge.
        let west = (self.lng - lng_span / 2.0).clamp(-180.0, 180.0 - lng_span);
        let south = (self.lat - lat_span / 2.0).clamp(-90.0, 90.0 - lat_span);
        ([west, west + lng_span], [south, south + lat_span])
    }
}

/// Altitude at which the full world fits the view.
pub const FULL_GLOBE_ALTITUDE: f64 = 2.5;

/// Smallest fraction of the world span the view will zoom to.
const MIN_SPAN_FRACTION: f64 = 0.01;

impl Lerp for GeoView {
    fn lerp(self, target: Self, t: f64) -> Self {
        Self {
            lat: lerp(self.lat, target.lat, t),
            lng: lerp(self.lng, target.lng, t),
            altitude: lerp(self.altitude, target.altitude, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = GeoView::ORBITAL;
        let b = GeoView::KARACHI;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn orbital_view_frames_the_world() {
        let (lng, lat) = GeoView::ORBITAL.bounds();
        assert_eq!(lng, [-180.0, 180.0]);
        assert_eq!(lat, [-90.0, 90.0]);
    }

    #[test]
    fn close_view_is_small_and_contains_target() {
        let v = GeoView::KARACHI;
        let ([w, e], [s, n]) = v.bounds();
        assert!(e - w < 10.0);
        assert!(w < v.lng && v.lng < e);
        assert!(s < v.lat && v.lat < n);
    }
}
