use serde::Serialize;

/// Reference canvas size all font sizes and offsets are authored against.
pub const REFERENCE_SIZE_PX: f64 = 300.0;
/// Tape widths and the compass circle are authored against a 360 px canvas.
const TAPE_REFERENCE_PX: f64 = 360.0;

/// Pixel dimensions of the dial for one canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DialLayout {
    pub canvas_size_px: f64,
    pub scale_ratio: f64,
    pub center: f64,
    pub tape_background_width: f64,
    pub tape_width: f64,
    pub tape_radius: f64,
    pub background_start_deg: f64,
    pub background_end_deg: f64,
    pub compass_radius: f64,
    pub compass_label_radius: f64,
}

impl DialLayout {
    pub fn new(canvas_size_px: u32, show_altitude: bool) -> Self {
        let size = f64::from(canvas_size_px);
        let scale_ratio = size / REFERENCE_SIZE_PX;
        let tape_background_width = 80.0 * size / TAPE_REFERENCE_PX;
        let compass_radius = 90.0 * size / TAPE_REFERENCE_PX;
        DialLayout {
            canvas_size_px: size,
            scale_ratio,
            center: size / 2.0,
            tape_background_width,
            tape_width: 60.0 * size / TAPE_REFERENCE_PX,
            tape_radius: size / 2.0 - tape_background_width / 2.0,
            // the background extends over the altitude readout when it is shown
            background_start_deg: if show_altitude { -120.0 } else { -60.0 },
            background_end_deg: 120.0,
            compass_radius,
            compass_label_radius: compass_radius - 35.0 * scale_ratio,
        }
    }

    /// Scales a length given in reference canvas units.
    pub fn px(&self, reference: f64) -> f64 {
        reference * self.scale_ratio
    }
}
