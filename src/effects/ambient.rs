//! Ambient effect scheduler
//!
//! Registers the recurring decorative timers once the page comes alive and
//! handles each tick: craft and planet sounds, star twinkles, stray UFOs and
//! atmosphere particles. All of its sounds belong to the ambient layer and
//! fall silent under the ambient mute.

use log::{debug, info};
use rand::Rng;

use super::particles;
use crate::audio::{AmbientVoice, SoundCue};
use crate::config::AmbientConfig;
use crate::engine::{AmbientEvent, Millis, Stage, TimerEvent};

pub const TWINKLE_MS: Millis = 2000;
pub const EARTH_ROTATE_MS: Millis = 2000;
pub const SPAWN_UFO_MS: Millis = 15000;
pub const EARTH_ATMOSPHERE_MS: Millis = 3000;

/// Engine hum period of UFO `i`
pub fn engine_period(i: usize) -> Millis {
    3000 + 500 * i as Millis
}

/// Beam sweep period of UFO `i`
pub fn beam_period(i: usize) -> Millis {
    4000 + 700 * i as Millis
}

/// Doppler pass period of UFO `i`
pub fn pass_period(i: usize) -> Millis {
    8000 + 1000 * i as Millis
}

/// Rotation period of planet `i`
pub fn planet_period(i: usize) -> Millis {
    8000 + 1000 * i as Millis
}

#[derive(Debug, Clone)]
pub struct EffectScheduler {
    settings: AmbientConfig,
    active: bool,
    /// Atmosphere period drawn for each planet at activation
    planet_atmosphere: Vec<Millis>,
}

impl EffectScheduler {
    pub fn new(settings: AmbientConfig) -> Self {
        Self {
            settings,
            active: false,
            planet_atmosphere: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Atmosphere periods drawn for the planets, in planet order
    pub fn planet_atmosphere_periods(&self) -> &[Millis] {
        &self.planet_atmosphere
    }

    /// Register every ambient timer; a second call does nothing
    ///
    /// Returns false if the scheduler was already active.
    pub fn activate(&mut self, stage: &mut Stage) -> bool {
        if self.active {
            return false;
        }
        self.active = true;

        stage.every(TWINKLE_MS, TimerEvent::Ambient(AmbientEvent::StarTwinkle));

        let ufos = stage.page.ufo_bounds();
        for ufo in 0..ufos.len() {
            stage.every(engine_period(ufo), TimerEvent::Ambient(AmbientEvent::UfoEngine { ufo }));
            stage.every(beam_period(ufo), TimerEvent::Ambient(AmbientEvent::UfoBeam { ufo }));
            stage.every(pass_period(ufo), TimerEvent::Ambient(AmbientEvent::UfoPass { ufo }));
        }

        let has_earth = stage.page.earth_bounds().is_some();
        if has_earth {
            stage.every(EARTH_ROTATE_MS, TimerEvent::Ambient(AmbientEvent::EarthRotate));
        }

        let planets = stage.page.planet_bounds();
        for planet in 0..planets.len() {
            stage.every(
                planet_period(planet),
                TimerEvent::Ambient(AmbientEvent::PlanetRotate { planet }),
            );
        }

        if stage.page.effect_quality().allows_particles() {
            for ufo in &ufos {
                stage.spawn(particles::ufo_trail(*ufo));
            }
        }

        stage.every(SPAWN_UFO_MS, TimerEvent::Ambient(AmbientEvent::SpawnUfo));
        if has_earth {
            stage.every(
                EARTH_ATMOSPHERE_MS,
                TimerEvent::Ambient(AmbientEvent::EarthAtmosphere),
            );
        }

        self.planet_atmosphere = (0..planets.len())
            .map(|_| 5000 + stage.rng().random_range(0..5000))
            .collect();
        for (planet, period) in self.planet_atmosphere.iter().enumerate() {
            stage.every(
                *period,
                TimerEvent::Ambient(AmbientEvent::PlanetAtmosphere { planet }),
            );
        }

        info!(
            "ambient effects active: {} ufos, {} planets, earth: {}",
            ufos.len(),
            planets.len(),
            has_earth
        );
        true
    }

    /// Handle one ambient tick
    pub fn on_event(&mut self, stage: &mut Stage, event: AmbientEvent) {
        let voiced = self.settings.voiced;
        match event {
            AmbientEvent::StarTwinkle => {
                if stage.rng().random_bool(self.settings.twinkle_chance) {
                    stage.ambient_cue(SoundCue::StarTwinkle);
                }
            }
            AmbientEvent::UfoEngine { .. } => {
                sound(stage, voiced, AmbientVoice::Engine, SoundCue::UfoEngine)
            }
            AmbientEvent::UfoBeam { .. } => {
                sound(stage, voiced, AmbientVoice::Beam, SoundCue::UfoBeam)
            }
            AmbientEvent::UfoPass { .. } => {
                sound(stage, voiced, AmbientVoice::Pass, SoundCue::UfoPass)
            }
            AmbientEvent::EarthRotate => {
                sound(stage, voiced, AmbientVoice::Hover, SoundCue::EarthRotate)
            }
            AmbientEvent::PlanetRotate { .. } => {
                sound(stage, voiced, AmbientVoice::Scan, SoundCue::PlanetRotate)
            }
            AmbientEvent::SpawnUfo => {
                let viewport = stage.page.viewport();
                let ufo = particles::random_ufo(viewport, stage.rng());
                let id = stage.spawn(ufo);
                debug!("stray ufo {:?} at ({:.0}, {:.0})", id, ufo.x, ufo.y);
                sound(stage, voiced, AmbientVoice::Formation, SoundCue::UfoEngine);
            }
            AmbientEvent::EarthAtmosphere => {
                if !stage.page.effect_quality().allows_particles() {
                    return;
                }
                if let Some(earth) = stage.page.earth_bounds() {
                    let particle = particles::earth_atmosphere(earth, stage.rng());
                    stage.spawn(particle);
                }
            }
            AmbientEvent::PlanetAtmosphere { planet } => {
                if !stage.page.effect_quality().allows_particles() {
                    return;
                }
                if let Some(bounds) = stage.page.planet_bounds().get(planet).copied() {
                    let particle = particles::planet_atmosphere(bounds, stage.rng());
                    stage.spawn(particle);
                }
            }
        }
    }
}

fn sound(stage: &mut Stage, voiced: bool, voice: AmbientVoice, cue: SoundCue) {
    if voiced {
        stage.ambient(voice);
    } else {
        stage.ambient_cue(cue);
    }
}
