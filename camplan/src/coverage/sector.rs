//! Camera coverage sectors on the floor-plan canvas.
//!
//! A camera sees a circular sector (wedge): apex at the mount point, radius
//! equal to its modelled range and opening angle equal to its horizontal
//! field of view, centred on the camera heading. Headings are measured in
//! degrees clockwise from the +x axis, which on a y-down canvas is the same
//! as the counter-clockwise mathematical angle of `atan2(dy, dx)`.

use std::f64::consts::PI;

use camplan_types::{CameraSpec, CanvasPoint};
use nalgebra::{Point2, Vector2};

/// Wrap an angle in degrees into `[-180, 180)`.
pub fn normalize_angle_deg(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// The wedge of floor area visible to one camera, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageSector {
    apex: Point2<f64>,
    heading_deg: f64,
    half_angle_deg: f64,
    radius_px: f64,
    pixels_per_meter: f64,
}

impl CoverageSector {
    /// Build the sector for a camera using a fixed canvas scale.
    pub fn from_camera(camera: &CameraSpec, pixels_per_meter: f64) -> Self {
        Self {
            apex: Point2::new(camera.position.x, camera.position.y),
            heading_deg: camera.rotation,
            half_angle_deg: camera.field_of_view / 2.0,
            radius_px: camera.range * pixels_per_meter,
            pixels_per_meter,
        }
    }

    pub fn apex(&self) -> CanvasPoint {
        CanvasPoint::new(self.apex.x, self.apex.y)
    }

    pub fn radius_px(&self) -> f64 {
        self.radius_px
    }

    /// Whether a canvas point lies inside the sector, boundary included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let offset: Vector2<f64> = Point2::new(x, y) - self.apex;
        let distance = offset.norm();
        if distance > self.radius_px {
            return false;
        }
        if distance == 0.0 {
            return true;
        }

        let bearing = offset.y.atan2(offset.x).to_degrees();
        normalize_angle_deg(bearing - self.heading_deg).abs() <= self.half_angle_deg
    }

    /// Floor area of the sector in square meters.
    pub fn area_m2(&self) -> f64 {
        let radius_m = self.radius_px / self.pixels_per_meter;
        let fraction = (2.0 * self.half_angle_deg / 360.0).min(1.0);
        fraction * PI * radius_m * radius_m
    }

    /// Outline of the sector as a closed polygon for vector renderers.
    ///
    /// The arc is approximated with `arc_segments` straight edges. Sectors
    /// narrower than a full circle start with the apex; a full circle is
    /// returned as the arc alone.
    pub fn polygon(&self, arc_segments: usize) -> Vec<CanvasPoint> {
        let segments = arc_segments.max(1);
        let full_circle = self.half_angle_deg >= 180.0;
        let sweep = (2.0 * self.half_angle_deg).min(360.0);
        let start = self.heading_deg - sweep / 2.0;

        let mut vertices = Vec::with_capacity(segments + 2);
        if !full_circle {
            vertices.push(self.apex());
        }
        // The closing vertex of a full circle would duplicate the first one
        let arc_points = if full_circle { segments } else { segments + 1 };
        for i in 0..arc_points {
            let angle = (start + sweep * i as f64 / segments as f64).to_radians();
            let edge = self.apex + Vector2::new(angle.cos(), angle.sin()) * self.radius_px;
            vertices.push(CanvasPoint::new(edge.x, edge.y));
        }
        vertices
    }
}
