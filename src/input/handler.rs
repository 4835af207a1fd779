use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::{Duration, Instant};

/// Maximum gap between two clicks that count as a double-click
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Processed input events for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit the application
    Quit,
    /// Toggle fullscreen (chrome hidden)
    ToggleFullscreen,
    /// Show or hide the seconds ring
    ToggleSeconds,
    /// Switch between 12 and 24 hour display
    Toggle24h,
    /// Turn tick sounds on or off
    ToggleSound,
    /// Show or hide the date line
    ToggleDate,
    /// Toggle help overlay
    ToggleHelp,
    /// Close help (any key when help is shown)
    CloseHelp,
    /// Terminal gained (true) or lost (false) focus
    Visibility(bool),
    /// Mouse moved, scrolled or released
    Activity,
    /// Left click at a cell
    Click { x: u16, y: u16 },
    /// Second left click at the same cell within the double-click window
    DoubleClick { x: u16, y: u16 },
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// Unbound key
    None,
}

impl InputEvent {
    /// Whether the event counts as user activity for the idle timer
    pub fn is_activity(&self) -> bool {
        !matches!(
            self,
            InputEvent::Visibility(_) | InputEvent::Resize { .. }
        )
    }
}

/// Input handler for processing terminal events
pub struct InputHandler {
    help_visible: bool,
    last_click: Option<(Instant, u16, u16)>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            help_visible: false,
            last_click: None,
        }
    }

    /// Set help visibility state
    pub fn set_help_visible(&mut self, visible: bool) {
        self.help_visible = visible;
    }

    /// Poll for input events with timeout
    pub fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        if event::poll(timeout).ok()? {
            self.translate(event::read().ok()?, Instant::now())
        } else {
            None
        }
    }

    /// Map a raw terminal event
    pub fn translate(&mut self, event: Event, now: Instant) -> Option<InputEvent> {
        match event {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                Some(self.handle_key(key_event))
            }
            Event::Mouse(mouse_event) => Some(self.handle_mouse(mouse_event, now)),
            Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            Event::FocusGained => Some(InputEvent::Visibility(true)),
            Event::FocusLost => Some(InputEvent::Visibility(false)),
            _ => None,
        }
    }

    /// Handle keyboard input
    fn handle_key(&self, event: KeyEvent) -> InputEvent {
        // Ctrl+C always quits
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return InputEvent::Quit;
        }

        // If help is visible, any key closes it
        if self.help_visible {
            return InputEvent::CloseHelp;
        }

        match event.code {
            KeyCode::Esc => InputEvent::Quit,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'q' => InputEvent::Quit,
                'f' => InputEvent::ToggleFullscreen,
                's' => InputEvent::ToggleSeconds,
                'p' => InputEvent::Toggle24h,
                'm' => InputEvent::ToggleSound,
                'd' => InputEvent::ToggleDate,
                '?' | 'h' => InputEvent::ToggleHelp,
                _ => InputEvent::None,
            },
            _ => InputEvent::None,
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, event: MouseEvent, now: Instant) -> InputEvent {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = (event.column, event.row);
                let double = self.last_click.is_some_and(|(at, px, py)| {
                    px == x && py == y && now.saturating_duration_since(at) <= DOUBLE_CLICK_WINDOW
                });

                if double {
                    self.last_click = None;
                    InputEvent::DoubleClick { x, y }
                } else {
                    self.last_click = Some((now, x, y));
                    InputEvent::Click { x, y }
                }
            }
            _ => InputEvent::Activity,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_shortcuts_are_case_insensitive() {
        let mut handler = InputHandler::new();
        let now = Instant::now();

        for (c, expected) in [
            ('f', InputEvent::ToggleFullscreen),
            ('S', InputEvent::ToggleSeconds),
            ('p', InputEvent::Toggle24h),
            ('M', InputEvent::ToggleSound),
            ('d', InputEvent::ToggleDate),
            ('?', InputEvent::ToggleHelp),
            ('q', InputEvent::Quit),
        ] {
            assert_eq!(handler.translate(key(KeyCode::Char(c)), now), Some(expected));
        }
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut handler = InputHandler::new();
        handler.set_help_visible(true);
        assert_eq!(
            handler.translate(key(KeyCode::Char('s')), Instant::now()),
            Some(InputEvent::CloseHelp)
        );
    }

    #[test]
    fn test_ctrl_c_quits_even_with_help() {
        let mut handler = InputHandler::new();
        handler.set_help_visible(true);
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handler.translate(event, Instant::now()), Some(InputEvent::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut handler = InputHandler::new();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(handler.translate(release, Instant::now()), None);
    }

    #[test]
    fn test_focus_maps_to_visibility() {
        let mut handler = InputHandler::new();
        let now = Instant::now();
        assert_eq!(handler.translate(Event::FocusLost, now), Some(InputEvent::Visibility(false)));
        assert_eq!(handler.translate(Event::FocusGained, now), Some(InputEvent::Visibility(true)));
    }

    #[test]
    fn test_double_click_detection() {
        let mut handler = InputHandler::new();
        let start = Instant::now();

        assert_eq!(handler.translate(click(3, 4), start), Some(InputEvent::Click { x: 3, y: 4 }));
        assert_eq!(
            handler.translate(click(3, 4), start + Duration::from_millis(200)),
            Some(InputEvent::DoubleClick { x: 3, y: 4 })
        );
        // A third click starts a new pair
        assert_eq!(
            handler.translate(click(3, 4), start + Duration::from_millis(300)),
            Some(InputEvent::Click { x: 3, y: 4 })
        );
    }

    #[test]
    fn test_slow_clicks_are_not_double() {
        let mut handler = InputHandler::new();
        let start = Instant::now();
        handler.translate(click(3, 4), start);
        assert_eq!(
            handler.translate(click(3, 4), start + Duration::from_millis(600)),
            Some(InputEvent::Click { x: 3, y: 4 })
        );
        // Clicks on different cells never pair up
        assert_eq!(
            handler.translate(click(5, 4), start + Duration::from_millis(700)),
            Some(InputEvent::Click { x: 5, y: 4 })
        );
    }

    #[test]
    fn test_activity_classification() {
        assert!(InputEvent::ToggleSeconds.is_activity());
        assert!(InputEvent::Activity.is_activity());
        assert!(!InputEvent::Visibility(true).is_activity());
        assert!(!InputEvent::Resize { width: 1, height: 1 }.is_activity());
    }
}
