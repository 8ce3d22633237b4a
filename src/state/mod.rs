//! Persistent visitor state

pub mod prefs;

pub use prefs::{
    load_ambient_mute, save_ambient_mute, JsonFileStore, MemoryStore, PreferenceStore,
    AMBIENT_MUTE_KEY,
};
