//! Starfield and parallax

use rand::{Rng, RngCore};

use crate::engine::Stage;
use crate::page::Star;

/// Horizontal and vertical parallax travel at speed 1 (px)
pub const PARALLAX_PX: f64 = 20.0;

/// A star at a random position with random twinkle timing
pub fn random_star(rng: &mut dyn RngCore) -> Star {
    Star {
        left: rng.random::<f64>() * 100.0,
        top: rng.random::<f64>() * 100.0,
        delay: rng.random::<f64>() * 3.0,
        duration: 1.0 + rng.random::<f64>() * 2.0,
        offset: (0.0, 0.0),
    }
}

/// Scatter `count` stars over the background
pub fn create(stage: &mut Stage, count: usize) {
    for _ in 0..count {
        let star = random_star(stage.rng());
        stage.page.add_star(star);
    }
}

/// Parallax speed of star `index`: three depth layers
pub fn speed(index: usize) -> f64 {
    (index % 3 + 1) as f64 * 0.3
}

/// Shift every star against the pointer position
pub fn parallax(stage: &mut Stage, pointer: (f64, f64)) {
    let (width, height) = stage.page.viewport();
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let mx = pointer.0 / width - 0.5;
    let my = pointer.1 / height - 0.5;

    for index in 0..stage.page.stars().len() {
        let s = speed(index);
        stage
            .page
            .set_star_offset(index, (mx * PARALLAX_PX * s, my * PARALLAX_PX * s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stage::test_stage;
    use crate::page::MemoryPage;
    use approx::assert_relative_eq;

    #[test]
    fn test_star_ranges() {
        let (mut stage, _) = test_stage(MemoryPage::default());
        create(&mut stage, 100);

        let stars = stage.page.stars();
        assert_eq!(stars.len(), 100);
        for star in stars {
            assert!((0.0..100.0).contains(&star.left));
            assert!((0.0..3.0).contains(&star.delay));
            assert!((1.0..3.0).contains(&star.duration));
        }
    }

    #[test]
    fn test_parallax_layers() {
        let (mut stage, _) = test_stage(MemoryPage::default());
        create(&mut stage, 4);

        // Right edge, vertical centre of a 1280x800 viewport
        parallax(&mut stage, (1280.0, 400.0));
        let stars = stage.page.stars();
        assert_relative_eq!(stars[0].offset.0, 0.5 * 20.0 * 0.3, epsilon = 1e-9);
        assert_relative_eq!(stars[1].offset.0, 0.5 * 20.0 * 0.6, epsilon = 1e-9);
        assert_relative_eq!(stars[2].offset.0, 0.5 * 20.0 * 0.9, epsilon = 1e-9);
        assert_relative_eq!(stars[3].offset.0, stars[0].offset.0, epsilon = 1e-9);
        assert_relative_eq!(stars[0].offset.1, 0.0, epsilon = 1e-9);
    }
}
