/// Cel (toon) shading: diffuse light quantized into a few flat bands
use crate::vector::Vector3f;

/// Band thresholds on `n . l` and the intensity each band is drawn with,
/// brightest first
pub const TOON_BANDS: [(f32, f32); 3] = [(0.95, 1.0), (0.5, 0.6), (0.25, 0.4)];

/// Intensity for surfaces facing away from every band
pub const AMBIENT_BAND: f32 = 0.2;

/// Quantize a diffuse term `n . l` into a toon band intensity
pub fn toon_band(diffuse: f32) -> f32 {
    TOON_BANDS
        .iter()
        .find(|(threshold, _)| diffuse > *threshold)
        .map_or(AMBIENT_BAND, |(_, intensity)| *intensity)
}

/// Quantized diffuse intensity for a surface normal and a direction towards the light.
///
/// Both vectors are expected to be unit length.
pub fn toon_intensity(normal: &Vector3f, light_dir: &Vector3f) -> f32 {
    toon_band(normal.dot(light_dir).max(0.0))
}

/// Index of the band an intensity falls into, 0 for the darkest
pub fn band_index(intensity: f32) -> usize {
    TOON_BANDS
        .iter()
        .filter(|(_, level)| intensity >= *level)
        .count()
}

/// Scale a colour by an intensity, clamped to `[0, 1]`
pub fn shade(color: &Vector3f, intensity: f32) -> Vector3f {
    let mut out = *color * intensity;
    for i in 0..3 {
        out[i] = out[i].clamp(0.0, 1.0);
    }
    out
}
