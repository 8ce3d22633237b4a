//! Stat counter roll-up
//!
//! Each counter climbs from zero to its target over two seconds in 16 ms
//! steps, ticking on every step. On reaching the target it plays the
//! completion cue. The first roll-up after the splash also throws a burst
//! of sparkles over each stat item; replays on entering the section do not.

use log::debug;

use crate::audio::SoundCue;
use crate::effects::particles;
use crate::engine::{Millis, Stage, TimerEvent, TimerId};

pub const TICK_MS: Millis = 16;
pub const ROLL_UP_MS: Millis = 2000;
pub const SPARKLES: usize = 8;
pub const SPARKLE_SPACING_MS: Millis = 100;

#[derive(Debug, Clone)]
struct Counter {
    target: u32,
    current: f64,
    step: f64,
    timer: Option<TimerId>,
}

/// Drives every counter on the page
#[derive(Debug, Clone, Default)]
pub struct CounterAnimator {
    counters: Vec<Counter>,
    sparkles: bool,
}

impl CounterAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any counter is still climbing
    pub fn is_running(&self) -> bool {
        self.counters.iter().any(|c| c.timer.is_some())
    }

    /// Roll every counter up from zero, sparkling on completion
    pub fn start(&mut self, stage: &mut Stage) {
        self.run(stage, true);
    }

    /// Roll every counter up again without the completion sparkles
    pub fn replay(&mut self, stage: &mut Stage) {
        self.run(stage, false);
    }

    fn run(&mut self, stage: &mut Stage, sparkles: bool) {
        self.sparkles = sparkles;
        for counter in &mut self.counters {
            if let Some(timer) = counter.timer.take() {
                stage.cancel(timer);
            }
        }

        let steps = (ROLL_UP_MS / TICK_MS) as f64;
        self.counters = stage
            .page
            .counter_targets()
            .into_iter()
            .map(|target| Counter {
                target,
                current: 0.0,
                step: target as f64 / steps,
                timer: None,
            })
            .collect();

        for (index, counter) in self.counters.iter_mut().enumerate() {
            stage.page.set_counter_value(index, 0, true);
            counter.timer = Some(stage.every(TICK_MS, TimerEvent::CounterTick { counter: index }));
        }
        debug!("rolling up {} counters", self.counters.len());
    }

    /// Advance one counter by one step
    pub fn on_tick(&mut self, stage: &mut Stage, index: usize) {
        let Some(counter) = self.counters.get_mut(index) else {
            return;
        };
        if counter.timer.is_none() {
            return;
        }

        counter.current += counter.step;
        if counter.current >= counter.target as f64 {
            counter.current = counter.target as f64;
            if let Some(timer) = counter.timer.take() {
                stage.cancel(timer);
            }
            stage.page.set_counter_value(index, counter.target, false);
            stage.cue(SoundCue::CounterComplete);
            if !self.sparkles {
                return;
            }
            for i in 0..SPARKLES {
                stage.after(
                    i as Millis * SPARKLE_SPACING_MS,
                    TimerEvent::Sparkle { counter: index },
                );
            }
        } else {
            stage
                .page
                .set_counter_value(index, counter.current.floor() as u32, true);
            stage.cue(SoundCue::CounterTick);
        }
    }

    /// One sparkle of a completion burst
    pub fn on_sparkle(&self, stage: &mut Stage, index: usize) {
        if !stage.page.effect_quality().allows_particles() {
            return;
        }
        if let Some(bounds) = stage.page.counter_bounds(index) {
            let sparkle = particles::sparkle(bounds, stage.rng());
            stage.spawn(sparkle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stage::test_stage;
    use crate::page::{CounterSpec, ElementKind, MemoryPage, PageLayout, Rect};

    fn page(targets: &[u32]) -> MemoryPage {
        MemoryPage::new(PageLayout {
            counters: targets
                .iter()
                .map(|&target| CounterSpec {
                    target,
                    bounds: Rect::new(0.0, 0.0, 100.0, 50.0),
                })
                .collect(),
            ..PageLayout::minimal()
        })
    }

    fn drive(counters: &mut CounterAnimator, stage: &mut Stage, until: Millis) {
        while let Some(event) = stage.timeline.pop_due(until) {
            match event {
                TimerEvent::CounterTick { counter } => counters.on_tick(stage, counter),
                TimerEvent::Sparkle { counter } => counters.on_sparkle(stage, counter),
                TimerEvent::Despawn(id) => {
                    stage.page.despawn(id);
                }
                _ => {}
            }
        }
        stage.timeline.set_now(until);
    }

    #[test]
    fn test_rolls_up_to_target() {
        let (mut stage, _) = test_stage(page(&[50, 250]));
        let mut counters = CounterAnimator::new();
        counters.start(&mut stage);

        drive(&mut counters, &mut stage, 1000);
        let halfway = stage.page.counter_value(1).unwrap();
        assert!(halfway > 100 && halfway < 150, "halfway at {}", halfway);
        assert!(counters.is_running());

        drive(&mut counters, &mut stage, 2100);
        assert_eq!(stage.page.counter_value(0), Some(50));
        assert_eq!(stage.page.counter_value(1), Some(250));
        assert!(!counters.is_running());
    }

    #[test]
    fn test_values_never_decrease() {
        let (mut stage, _) = test_stage(page(&[37]));
        let mut counters = CounterAnimator::new();
        counters.start(&mut stage);

        let mut last = 0;
        for t in (16..=2100).step_by(16) {
            drive(&mut counters, &mut stage, t);
            let value = stage.page.counter_value(0).unwrap();
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 37);
    }

    #[test]
    fn test_completion_sparkles() {
        let (mut stage, _) = test_stage(page(&[0]));
        let mut counters = CounterAnimator::new();
        counters.start(&mut stage);

        // A zero target completes on its first tick
        drive(&mut counters, &mut stage, 16);
        assert!(!counters.is_running());

        drive(&mut counters, &mut stage, 16 + 700);
        let sparkles = stage
            .page
            .elements()
            .iter()
            .filter(|(_, el)| el.kind == ElementKind::Sparkle)
            .count();
        assert_eq!(sparkles, SPARKLES);
    }

    #[test]
    fn test_replay_skips_sparkles() {
        let (mut stage, _) = test_stage(page(&[0]));
        let mut counters = CounterAnimator::new();
        counters.replay(&mut stage);

        drive(&mut counters, &mut stage, 16 + 1000);
        assert_eq!(stage.page.counter_value(0), Some(0));
        assert!(stage
            .page
            .elements()
            .iter()
            .all(|(_, el)| el.kind != ElementKind::Sparkle));
        assert_eq!(stage.timeline.pending(), 0);
    }

    #[test]
    fn test_restart_cancels_previous_run() {
        let (mut stage, _) = test_stage(page(&[100]));
        let mut counters = CounterAnimator::new();
        counters.start(&mut stage);
        drive(&mut counters, &mut stage, 500);

        counters.start(&mut stage);
        assert_eq!(stage.page.counter_value(0), Some(0));
        assert_eq!(stage.timeline.pending(), 1);
    }
}
