//! The ambient (OS-level) light/dark signal.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Mutex;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;

use super::listeners::{ListenerSet, Subscription};
use super::preference::ThemePreference;

/// A source of the system-wide light/dark preference.
///
/// Both methods return `None` when the platform has no such capability;
/// callers treat that as "use the fallback" and never as an error.
pub trait AmbientSignal {
    /// Returns the current system preference.
    fn current(&self) -> Option<ThemePreference>;

    /// Registers `listener` for change notifications.
    ///
    /// The listener is called with the new preference each time the system
    /// preference changes, until the returned [`Subscription`] is cancelled
    /// or dropped.
    fn subscribe(&self, listener: Box<dyn Fn(ThemePreference)>) -> Option<Subscription>;
}

/// A signal for platforms with no color-scheme support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSignal;

impl AmbientSignal for NoSignal {
    fn current(&self) -> Option<ThemePreference> {
        None
    }

    fn subscribe(&self, _listener: Box<dyn Fn(ThemePreference)>) -> Option<Subscription> {
        None
    }
}

/// A signal driven by the host application.
///
/// Useful for embedding (forwarding notifications from a windowing toolkit)
/// and for tests. Clones share state and listeners.
///
/// # Example
///
/// ```rust
/// use shade::{AmbientSignal, ManualSignal, ThemePreference};
///
/// let signal = ManualSignal::new(ThemePreference::Light);
/// signal.emit(ThemePreference::Dark);
/// assert_eq!(signal.current(), Some(ThemePreference::Dark));
/// ```
#[derive(Clone)]
pub struct ManualSignal {
    current: Rc<Cell<ThemePreference>>,
    listeners: ListenerSet<ThemePreference>,
}

impl ManualSignal {
    pub fn new(initial: ThemePreference) -> Self {
        Self {
            current: Rc::new(Cell::new(initial)),
            listeners: ListenerSet::new(),
        }
    }

    /// Changes the system preference and notifies every listener.
    ///
    /// Listeners are notified even if the value did not change, the way a
    /// host forwarding raw platform events would.
    pub fn emit(&self, preference: ThemePreference) {
        self.current.set(preference);
        self.listeners.emit(preference);
    }

    /// Number of live registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl AmbientSignal for ManualSignal {
    fn current(&self) -> Option<ThemePreference> {
        Some(self.current.get())
    }

    fn subscribe(&self, listener: Box<dyn Fn(ThemePreference)>) -> Option<Subscription> {
        Some(self.listeners.add(listener))
    }
}

impl std::fmt::Debug for ManualSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualSignal")
            .field("current", &self.current.get())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// The desktop OS color-scheme signal.
///
/// Detection goes through the process-wide detector (see
/// [`set_ambient_detector`]). The OS offers no portable push channel, so the
/// host event loop calls [`poll`](SystemSignal::poll) periodically; a
/// notification is emitted only when the detected value changes.
#[derive(Clone)]
pub struct SystemSignal {
    last: Rc<Cell<Option<ThemePreference>>>,
    listeners: ListenerSet<ThemePreference>,
}

impl SystemSignal {
    pub fn new() -> Self {
        Self {
            last: Rc::new(Cell::new(detect_ambient())),
            listeners: ListenerSet::new(),
        }
    }

    /// Re-detects the system preference and notifies listeners on change.
    ///
    /// Returns the new preference if it changed.
    pub fn poll(&self) -> Option<ThemePreference> {
        let detected = detect_ambient();
        if detected == self.last.get() {
            return None;
        }
        self.last.set(detected);

        let preference = detected?;
        let notified = self.listeners.emit(preference);
        tracing::debug!(%preference, notified, "system color scheme changed");
        Some(preference)
    }
}

impl Default for SystemSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AmbientSignal for SystemSignal {
    fn current(&self) -> Option<ThemePreference> {
        detect_ambient()
    }

    fn subscribe(&self, listener: Box<dyn Fn(ThemePreference)>) -> Option<Subscription> {
        Some(self.listeners.add(listener))
    }
}

impl std::fmt::Debug for SystemSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemSignal")
            .field("last", &self.last.get())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

type AmbientDetector = fn() -> Option<ThemePreference>;

static AMBIENT_DETECTOR: Lazy<Mutex<AmbientDetector>> = Lazy::new(|| Mutex::new(os_detector));

/// Overrides the detector [`SystemSignal`] uses to read the OS preference.
///
/// This is useful for testing or when you want to force a specific mode.
/// Returning `None` simulates a platform without color-scheme support.
pub fn set_ambient_detector(detector: AmbientDetector) {
    let mut guard = AMBIENT_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores the OS detector.
pub fn reset_ambient_detector() {
    set_ambient_detector(os_detector);
}

fn detect_ambient() -> Option<ThemePreference> {
    let detector = *AMBIENT_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    detector()
}

#[allow(unreachable_patterns)]
fn os_detector() -> Option<ThemePreference> {
    match detect_os_theme() {
        OsThemeMode::Dark => Some(ThemePreference::Dark),
        OsThemeMode::Light => Some(ThemePreference::Light),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::cell::RefCell;

    fn record(signal: &dyn AmbientSignal) -> (Rc<RefCell<Vec<ThemePreference>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = signal
            .subscribe(Box::new(move |p| sink.borrow_mut().push(p)))
            .expect("signal supports subscriptions");
        (seen, sub)
    }

    #[test]
    fn test_no_signal_has_no_capability() {
        assert_eq!(NoSignal.current(), None);
        assert!(NoSignal.subscribe(Box::new(|_| {})).is_none());
    }

    #[test]
    fn test_manual_signal_notifies_until_cancelled() {
        let signal = ManualSignal::new(ThemePreference::Light);
        let (seen, sub) = record(&signal);

        signal.emit(ThemePreference::Dark);
        assert_eq!(signal.listener_count(), 1);
        sub.cancel();
        signal.emit(ThemePreference::Light);

        assert_eq!(*seen.borrow(), vec![ThemePreference::Dark]);
        assert_eq!(signal.listener_count(), 0);
        assert_eq!(signal.current(), Some(ThemePreference::Light));
    }

    #[test]
    #[serial]
    fn test_system_signal_uses_detector() {
        set_ambient_detector(|| Some(ThemePreference::Dark));
        assert_eq!(SystemSignal::new().current(), Some(ThemePreference::Dark));

        set_ambient_detector(|| None);
        assert_eq!(SystemSignal::new().current(), None);

        reset_ambient_detector();
    }

    #[test]
    #[serial]
    fn test_system_signal_poll_emits_only_on_change() {
        set_ambient_detector(|| Some(ThemePreference::Light));
        let signal = SystemSignal::new();
        let (seen, _sub) = record(&signal);

        assert_eq!(signal.poll(), None);

        set_ambient_detector(|| Some(ThemePreference::Dark));
        assert_eq!(signal.poll(), Some(ThemePreference::Dark));
        assert_eq!(signal.poll(), None);

        set_ambient_detector(|| Some(ThemePreference::Light));
        assert_eq!(signal.poll(), Some(ThemePreference::Light));

        assert_eq!(
            *seen.borrow(),
            vec![ThemePreference::Dark, ThemePreference::Light]
        );

        reset_ambient_detector();
    }

    #[test]
    #[serial]
    fn test_system_signal_losing_support_is_silent() {
        set_ambient_detector(|| Some(ThemePreference::Dark));
        let signal = SystemSignal::new();
        let (seen, _sub) = record(&signal);

        set_ambient_detector(|| None);
        assert_eq!(signal.poll(), None);
        assert!(seen.borrow().is_empty());

        reset_ambient_detector();
    }
}
