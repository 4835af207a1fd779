//! Sound trigger events and the gate that de-duplicates them.

use crate::state::DisplayPreferences;

/// Which sound a trigger asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Any second other than zero
    Tick,
    /// Second zero, a new minute
    Chime,
}

/// "Play this sound now", emitted at most once per second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub second: u32,
    pub kind: TriggerKind,
}

impl TriggerEvent {
    pub fn for_second(second: u32) -> Self {
        let kind = if second == 0 {
            TriggerKind::Chime
        } else {
            TriggerKind::Tick
        };
        Self { second, kind }
    }
}

/// Single authority for sound triggers.
///
/// Both the per-frame path and the background sampler go through the same
/// gate, so a second is never announced twice.
#[derive(Debug, Clone, Default)]
pub struct TriggerGate {
    last_triggered: Option<u32>,
}

impl TriggerGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent second the gate has seen
    #[cfg(test)]
    pub fn last_triggered(&self) -> Option<u32> {
        self.last_triggered
    }

    /// Evaluate `second`.
    ///
    /// Repeats of the previous second are dropped. A new second is recorded
    /// even when sound is off or seconds are hidden, but only produces an
    /// event when both allow it.
    pub fn evaluate(&mut self, second: u32, prefs: &DisplayPreferences) -> Option<TriggerEvent> {
        if self.last_triggered == Some(second) {
            return None;
        }
        self.last_triggered = Some(second);

        if !(prefs.sound_on && prefs.show_seconds) {
            return None;
        }
        Some(TriggerEvent::for_second(second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sound_on() -> DisplayPreferences {
        DisplayPreferences {
            sound_on: true,
            ..DisplayPreferences::default()
        }
    }

    #[test]
    fn test_second_zero_is_chime() {
        assert_eq!(TriggerEvent::for_second(0).kind, TriggerKind::Chime);
        assert_eq!(TriggerEvent::for_second(1).kind, TriggerKind::Tick);
        assert_eq!(TriggerEvent::for_second(59).kind, TriggerKind::Tick);
    }

    #[test]
    fn test_repeated_second_fires_once() {
        let mut gate = TriggerGate::new();
        let prefs = sound_on();

        assert!(gate.evaluate(7, &prefs).is_some());
        assert!(gate.evaluate(7, &prefs).is_none());
        assert!(gate.evaluate(7, &prefs).is_none());
        assert!(gate.evaluate(8, &prefs).is_some());
    }

    #[test]
    fn test_suppressed_without_sound() {
        let mut gate = TriggerGate::new();
        let prefs = DisplayPreferences::default();

        assert!(gate.evaluate(3, &prefs).is_none());
        assert_eq!(gate.last_triggered(), Some(3));
    }

    #[test]
    fn test_suppressed_when_seconds_hidden() {
        let mut gate = TriggerGate::new();
        let prefs = DisplayPreferences {
            show_seconds: false,
            ..sound_on()
        };
        assert!(gate.evaluate(3, &prefs).is_none());
    }

    #[test]
    fn test_same_second_after_wrap_fires_again() {
        let mut gate = TriggerGate::new();
        let prefs = sound_on();

        assert!(gate.evaluate(59, &prefs).is_some());
        assert_eq!(gate.evaluate(0, &prefs).map(|e| e.kind), Some(TriggerKind::Chime));
        assert!(gate.evaluate(59, &prefs).is_some());
    }
}
