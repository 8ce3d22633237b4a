//! Typing effect
//!
//! Reveals the hero line one character at a time with a typewriter sound
//! per character. Timing varies with the character: punctuation pauses,
//! spaces hurry, letters jitter by up to 15 ms and sentence ends hold for
//! half a second.

use log::debug;
use rand::Rng;

use crate::audio::SoundCue;
use crate::engine::{Millis, Stage, TimerEvent};
use crate::page::{CharClass, TypedChar, TypingState};

/// Words whose characters are highlighted
pub const KEYWORDS: [&str; 5] = ["developer", "awesome", "interactive", "innovative", "solutions"];

const PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ':', ';'];

/// Pause after the last character before the line settles (ms)
pub const SETTLE_MS: Millis = 1000;

/// Character class used for both the sound and the styling
pub fn classify(ch: char) -> CharClass {
    if PUNCTUATION.contains(&ch) {
        CharClass::Punctuation
    } else if ch == ' ' {
        CharClass::Space
    } else {
        CharClass::Letter
    }
}

/// Delay before the character after `ch`; `jitter` is in `[-15, 15)`
pub fn delay_after(ch: char, jitter: f64) -> Millis {
    match ch {
        '.' | '!' => 500,
        _ => match classify(ch) {
            CharClass::Punctuation => 200,
            CharClass::Space => 30,
            CharClass::Letter => (50.0 + jitter).round() as Millis,
        },
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// The run of word characters touching position `index`
///
/// A non-word character directly after a word reports that word.
fn word_at(chars: &[char], index: usize) -> String {
    let mut start = index;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = index;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    chars[start..end.max(start)].iter().collect()
}

/// Keyword flag for every character of `text`
pub fn keyword_mask(text: &str) -> Vec<bool> {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len())
        .map(|i| {
            let word = word_at(&chars, i).to_lowercase();
            KEYWORDS.iter().any(|keyword| word.contains(keyword))
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TypingEffect {
    chars: Vec<char>,
    keywords: Vec<bool>,
    index: usize,
}

impl TypingEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the line and type the first character
    ///
    /// Returns false when the page has no typing line.
    pub fn start(&mut self, stage: &mut Stage) -> bool {
        let Some(text) = stage.page.typing_source() else {
            return false;
        };
        self.keywords = keyword_mask(&text);
        self.chars = text.chars().collect();
        self.index = 0;
        stage.page.set_typing_state(TypingState::Typing);
        debug!("typing {} chars", self.chars.len());
        self.type_next(stage);
        true
    }

    /// Reveal the next character, or schedule the settle once done
    pub fn type_next(&mut self, stage: &mut Stage) {
        let Some(&ch) = self.chars.get(self.index) else {
            stage.after(SETTLE_MS, TimerEvent::TypingFinished);
            return;
        };

        let class = classify(ch);
        stage.cue(match class {
            CharClass::Punctuation => SoundCue::Punctuation,
            CharClass::Space => SoundCue::Space,
            CharClass::Letter => SoundCue::Type,
        });
        stage.page.push_typed_char(TypedChar {
            ch,
            class,
            keyword: self.keywords.get(self.index).copied().unwrap_or(false),
        });
        self.index += 1;

        let jitter = if class == CharClass::Letter {
            stage.rng().random_range(-15.0..15.0)
        } else {
            0.0
        };
        stage.after(delay_after(ch, jitter), TimerEvent::TypeNext);
    }

    /// The line settled
    pub fn finish(&mut self, stage: &mut Stage) {
        stage.page.set_typing_state(TypingState::Complete);
        stage.cue(SoundCue::LoadingComplete);
    }
}
