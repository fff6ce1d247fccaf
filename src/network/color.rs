// ============================================================================
// HSL COLOR SPACE - hue cycling for node shells, the core knot and the web
// ============================================================================

use bevy::math::{Vec3, Vec4};

/// Hue cycling rate of node shells, degrees per second
pub const NODE_HUE_RATE: f32 = 60.0;

/// Extra hue per node index so neighbours never share a color
pub const NODE_HUE_STRIDE: f32 = 5.0;

/// Wrap any hue (degrees) into [0, 360)
///
/// Non-finite input maps to 0 so color conversion never sees garbage.
pub fn normalize_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }

    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shell hue of node `index` at time `t`
pub fn shell_hue(base_hue: f32, t: f32, index: usize) -> f32 {
    normalize_hue(base_hue + t * NODE_HUE_RATE + index as f32 * NODE_HUE_STRIDE)
}

/// Convert HSL (hue in degrees, saturation and lightness in [0, 1]) to RGB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = normalize_hue(hue) / 60.0; // Hue in [0, 6)
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Vec3::new(r + m, g + m, b + m)
}

/// HSL plus alpha, packed for materials
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Vec4 {
    hsl_to_rgb(hue, saturation, lightness).extend(alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_normalize_hue_wraps() {
        assert!(close(normalize_hue(725.0), 5.0));
        assert!(close(normalize_hue(-30.0), 330.0));
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(f32::NAN), 0.0);
        assert_eq!(normalize_hue(f32::INFINITY), 0.0);

        let tiny = normalize_hue(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_shell_hue_wraps_to_five() {
        // 300 + 60t + 0 = 725  =>  t = 425 / 60
        let hue = shell_hue(300.0, 425.0 / 60.0, 0);
        assert!(close(hue, 5.0), "got {hue}");

        // Same wrap reached through the index stride
        let hue = shell_hue(300.0, 7.0, 1);
        assert!(close(hue, 5.0), "got {hue}");
    }

    #[test]
    fn test_shell_hue_always_in_range() {
        for step in 0..5000 {
            let t = step as f32 * 0.37;
            for index in [0, 1, 19, 149] {
                let hue = shell_hue(300.0, t, index);
                assert!((0.0..360.0).contains(&hue), "hue {hue} at t={t}");
            }
        }
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!(close(red.x, 1.0) && close(red.y, 0.0) && close(red.z, 0.0));

        let cyan = hsl_to_rgb(180.0, 1.0, 0.5);
        assert!(close(cyan.x, 0.0) && close(cyan.y, 1.0) && close(cyan.z, 1.0));

        // 60% lightness lifts the floor to 0.2
        let magenta = hsl_to_rgb(300.0, 1.0, 0.6);
        assert!(close(magenta.x, 1.0) && close(magenta.y, 0.2) && close(magenta.z, 1.0));
    }

    #[test]
    fn test_hsl_grey_without_saturation() {
        let grey = hsl_to_rgb(123.0, 0.0, 0.4);
        assert!(close(grey.x, 0.4) && close(grey.y, 0.4) && close(grey.z, 0.4));
    }

    #[test]
    fn test_hsla_clamps_alpha() {
        assert_eq!(hsla(0.0, 1.0, 0.5, 1.7).w, 1.0);
        assert_eq!(hsla(0.0, 1.0, 0.5, -0.2).w, 0.0);
    }
}
