//! Shared runtime context
//!
//! The [`Stage`] bundles the collaborators every controller touches: the
//! page, the timeline, the synthesizer and the random source. Controllers
//! borrow it mutably for the duration of one call.

use rand::RngCore;

use super::events::TimerEvent;
use super::timeline::{Millis, TimerId, Timeline};
use crate::audio::{AmbientVoice, ScheduledTone, SoundCue, ToneRequest, ToneSynthesizer};
use crate::page::{Element, ElementId, NotificationId, NotificationKind, Page};

/// How long a notification stays on screen unless configured otherwise
pub const DEFAULT_NOTIFICATION_MS: Millis = 3000;

pub struct Stage {
    pub page: Box<dyn Page>,
    pub timeline: Timeline<TimerEvent>,
    pub synth: ToneSynthesizer,
    rng: Box<dyn RngCore>,
    notification_ttl: Millis,
}

impl Stage {
    pub fn new(page: Box<dyn Page>, synth: ToneSynthesizer, rng: Box<dyn RngCore>) -> Self {
        Self {
            page,
            timeline: Timeline::new(),
            synth,
            rng,
            notification_ttl: DEFAULT_NOTIFICATION_MS,
        }
    }

    pub fn with_notification_ttl(mut self, ttl: Millis) -> Self {
        self.notification_ttl = ttl;
        self
    }

    /// Current virtual time
    pub fn now(&self) -> Millis {
        self.timeline.now()
    }

    /// The injected random source
    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    // ========================================================================
    // Sound
    // ========================================================================

    /// Play a UI cue now; chord tones are queued on the timeline
    pub fn cue(&mut self, cue: SoundCue) {
        let now = self.now();
        if let Some(tones) = self.synth.play_cue(now, cue) {
            self.queue_tones(tones, TimerEvent::Tone);
        }
    }

    /// Play a cue as part of the ambient layer
    pub fn ambient_cue(&mut self, cue: SoundCue) {
        let now = self.now();
        if let Some(tones) = self.synth.play_ambient_cue(now, cue) {
            self.queue_tones(tones, TimerEvent::AmbientTone);
        }
    }

    /// Play an ambient voice
    pub fn ambient(&mut self, voice: AmbientVoice) {
        let now = self.now();
        if let Some(tones) = self.synth.play_ambient(now, voice) {
            self.queue_tones(tones, TimerEvent::AmbientTone);
        }
    }

    pub fn tone(&mut self, request: &ToneRequest) -> bool {
        let now = self.now();
        self.synth.play_tone(now, request)
    }

    pub fn ambient_tone(&mut self, request: &ToneRequest) -> bool {
        let now = self.now();
        self.synth.play_ambient_tone(now, request)
    }

    fn queue_tones(&mut self, tones: Vec<ScheduledTone>, wrap: fn(ToneRequest) -> TimerEvent) {
        for tone in tones {
            self.timeline.schedule(tone.delay, wrap(tone.request));
        }
    }

    // ========================================================================
    // Timers
    // ========================================================================

    pub fn after(&mut self, delay: Millis, event: TimerEvent) -> TimerId {
        self.timeline.schedule(delay, event)
    }

    pub fn every(&mut self, period: Millis, event: TimerEvent) -> TimerId {
        self.timeline.schedule_interval(period, event)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timeline.cancel(id)
    }

    // ========================================================================
    // Page helpers
    // ========================================================================

    /// Append a transient element and schedule its removal
    pub fn spawn(&mut self, element: Element) -> ElementId {
        let lifetime = element.lifetime;
        let id = self.page.spawn(element);
        self.timeline.schedule(lifetime, TimerEvent::Despawn(id));
        id
    }

    /// Show a notification and schedule its expiry
    pub fn notify(&mut self, kind: NotificationKind, message: &str) -> NotificationId {
        let id = self.page.show_notification(kind, message);
        self.timeline
            .schedule(self.notification_ttl, TimerEvent::NotificationExpired(id));
        id
    }
}

/// Stage over `page` with sound enabled, a recording backend and a seeded rng
#[cfg(test)]
pub(crate) fn test_stage(page: crate::page::MemoryPage) -> (Stage, crate::audio::RecordingBackend) {
    use crate::audio::{AudioFlags, RecordingBackend};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    let recorder = RecordingBackend::new();
    let flags = AudioFlags {
        sounds_enabled: true,
        ..AudioFlags::default()
    };
    let synth = ToneSynthesizer::new(flags, Box::new(recorder.clone()));
    let stage = Stage::new(Box::new(page), synth, Box::new(SmallRng::seed_from_u64(7)));
    (stage, recorder)
}
