pub mod prefs;
pub mod store;

pub use prefs::DisplayPreferences;
pub use store::{FileStore, PreferenceStore};

#[cfg(test)]
pub use prefs::STORE_KEY;
#[cfg(test)]
pub use store::MemoryStore;
