//! Particle shapes
//!
//! Pure builders for the transient elements the page spawns. Randomness
//! comes from the caller's source so runs are reproducible.

use std::f64::consts::TAU;

use rand::{Rng, RngCore};

use crate::engine::Millis;
use crate::page::{Element, ElementKind, Rect};

/// A ring of particles flying outward from a centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstShape {
    pub count: usize,
    /// Minimum flight distance (px)
    pub distance: f64,
    /// Extra random distance (px)
    pub spread: f64,
    pub kind: ElementKind,
    pub lifetime: Millis,
}

/// Hovering a planet
pub const PLANET_BURST: BurstShape = BurstShape {
    count: 6,
    distance: 30.0,
    spread: 20.0,
    kind: ElementKind::PlanetParticle,
    lifetime: 1000,
};

/// Clicking a stat item
pub const STAT_BURST: BurstShape = BurstShape {
    count: 12,
    distance: 50.0,
    spread: 30.0,
    kind: ElementKind::BurstParticle,
    lifetime: 1000,
};

/// Hovering an experience stat card
pub const STAT_CARD_BURST: BurstShape = BurstShape {
    count: 5,
    distance: 30.0,
    spread: 20.0,
    kind: ElementKind::BurstParticle,
    lifetime: 1000,
};

/// Evenly spaced particles around `bounds`' centre, each flying a random
/// distance outward
pub fn burst(bounds: Rect, shape: &BurstShape, rng: &mut dyn RngCore) -> Vec<Element> {
    let (cx, cy) = bounds.center();
    (0..shape.count)
        .map(|i| {
            let angle = i as f64 / shape.count as f64 * TAU;
            let distance = shape.distance + rng.random::<f64>() * shape.spread;
            Element {
                kind: shape.kind,
                x: cx,
                y: cy,
                target: Some((cx + angle.cos() * distance, cy + angle.sin() * distance)),
                lifetime: shape.lifetime,
            }
        })
        .collect()
}

/// A particle at a random angle, `distance + U[0, spread)` from the centre
pub fn orbiting(
    bounds: Rect,
    distance: f64,
    spread: f64,
    kind: ElementKind,
    lifetime: Millis,
    rng: &mut dyn RngCore,
) -> Element {
    let (cx, cy) = bounds.center();
    let angle = rng.random::<f64>() * TAU;
    let distance = distance + rng.random::<f64>() * spread;
    Element {
        kind,
        x: cx + angle.cos() * distance,
        y: cy + angle.sin() * distance,
        target: None,
        lifetime,
    }
}

/// Earth atmosphere particle: 60..80 px out, four seconds
pub fn earth_atmosphere(earth: Rect, rng: &mut dyn RngCore) -> Element {
    orbiting(earth, 60.0, 20.0, ElementKind::AtmosphereParticle, 4000, rng)
}

/// Planet atmosphere particle: just outside the rim, three seconds
pub fn planet_atmosphere(planet: Rect, rng: &mut dyn RngCore) -> Element {
    orbiting(
        planet,
        planet.width / 2.0 + 10.0,
        20.0,
        ElementKind::AtmosphereParticle,
        3000,
        rng,
    )
}

/// Fading trail under a UFO
pub fn ufo_trail(ufo: Rect) -> Element {
    Element {
        kind: ElementKind::UfoTrail,
        x: ufo.x + ufo.width / 2.0,
        y: ufo.y + ufo.height,
        target: None,
        lifetime: 2000,
    }
}

/// A stray UFO at a random viewport position, crossing for twelve seconds
pub fn random_ufo(viewport: (f64, f64), rng: &mut dyn RngCore) -> Element {
    Element {
        kind: ElementKind::RandomUfo,
        x: rng.random::<f64>() * viewport.0,
        y: rng.random::<f64>() * viewport.1,
        target: None,
        lifetime: 12000,
    }
}

/// Sparkle at a random point inside a stat item
pub fn sparkle(item: Rect, rng: &mut dyn RngCore) -> Element {
    Element {
        kind: ElementKind::Sparkle,
        x: item.x + rng.random::<f64>() * item.width,
        y: item.y + rng.random::<f64>() * item.height,
        target: None,
        lifetime: 1000,
    }
}
