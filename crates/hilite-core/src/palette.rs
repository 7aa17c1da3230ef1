//! Highlight color palette generation.
//!
//! Each podium word gets an independent random RGB color, folded away from
//! the dark corner of the cube: square-rooting a channel in (0, 1) strictly
//! increases it toward 1, so both folding loops terminate.

use rand::Rng;
use serde::Serialize;

/// Minimum Euclidean norm of a generated color.
pub const MIN_NORM: f64 = 0.75;

/// Minimum value of every individual channel.
pub const MIN_CHANNEL: f64 = 0.4;

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Euclidean norm of the channel triple.
    pub fn norm(self) -> f64 {
        self.r.hypot(self.g).hypot(self.b)
    }

    /// Channels scaled to `0..=255` for terminal truecolor output.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let scale = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Fold a color out of the dark corner.
///
/// Square-roots the whole triple while its norm is below [`MIN_NORM`], then
/// square-roots each channel on its own while it is below [`MIN_CHANNEL`],
/// and finally rounds every channel to two decimals.
pub fn brighten(color: Color) -> Color {
    let mut channels = [color.r, color.g, color.b];
    while norm_of(channels) < MIN_NORM {
        channels = channels.map(f64::sqrt);
    }
    for channel in &mut channels {
        while *channel < MIN_CHANNEL {
            *channel = channel.sqrt();
        }
    }
    let [r, g, b] = channels.map(round2);
    Color { r, g, b }
}

/// Generate `n` independent non-dark colors.
///
/// Colors are not deduplicated against each other; two words may receive
/// similar colors. Pass a seeded RNG for a reproducible palette.
#[tracing::instrument(skip(rng))]
pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Color> {
    (0..n)
        .map(|_| {
            brighten(Color {
                r: draw(rng),
                g: draw(rng),
                b: draw(rng),
            })
        })
        .collect()
}

/// One uniform channel sample, bounded away from zero so the folding loops
/// in [`brighten`] always make progress.
fn draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(f64::EPSILON..1.0)
}

fn norm_of(channels: [f64; 3]) -> f64 {
    channels[0].hypot(channels[1]).hypot(channels[2])
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Rounding to two decimals can nudge either constraint by half a cent.
    const TOLERANCE: f64 = 0.005;

    #[test]
    fn brighten_lifts_a_dark_color() {
        let color = brighten(Color {
            r: 0.01,
            g: 0.02,
            b: 0.03,
        });
        assert!(color.norm() >= MIN_NORM - TOLERANCE);
        assert!(color.r >= MIN_CHANNEL - TOLERANCE);
        assert!(color.g >= MIN_CHANNEL - TOLERANCE);
        assert!(color.b >= MIN_CHANNEL - TOLERANCE);
    }

    #[test]
    fn brighten_keeps_an_already_bright_color() {
        let color = brighten(Color {
            r: 0.9,
            g: 0.8,
            b: 0.7,
        });
        assert!((color.r - 0.9).abs() < TOLERANCE);
        assert!((color.g - 0.8).abs() < TOLERANCE);
        assert!((color.b - 0.7).abs() < TOLERANCE);
    }

    #[test]
    fn channels_are_rounded_to_two_decimals() {
        let color = brighten(Color {
            r: 0.123_456,
            g: 0.654_321,
            b: 0.999_999,
        });
        for channel in [color.r, color.g, color.b] {
            assert!(
                ((channel * 100.0).round() - channel * 100.0).abs() < 1e-9,
                "channel {channel} not rounded"
            );
        }
    }

    #[test]
    fn generated_colors_satisfy_both_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for color in generate(200, &mut rng) {
            assert!(color.norm() >= MIN_NORM - TOLERANCE, "norm of {color:?}");
            for channel in [color.r, color.g, color.b] {
                assert!(channel >= MIN_CHANNEL - TOLERANCE, "channel of {color:?}");
                assert!(channel <= 1.0);
            }
        }
    }

    #[test]
    fn generated_count_matches_request() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate(0, &mut rng).len(), 0);
        assert_eq!(generate(15, &mut rng).len(), 15);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(generate(10, &mut a), generate(10, &mut b));
    }
}
