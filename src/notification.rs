//! Transient user-facing notices.
//!
//! Only one notification is visible at a time: showing a new one replaces whatever
//! is on screen. A timed notification is dismissed once its duration has passed, no
//! later than when the next one is shown; loading notifications stay until their
//! [`LoadingGuard`] is dropped.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::{Duration, Instant};

/// How long an error stays visible.
pub const ERROR_DURATION: Duration = Duration::from_secs(3);
pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// `None` means the notification stays until dismissed
    pub duration: Option<Duration>,
}

/// Draws notifications somewhere.
pub trait Presenter {
    fn show(&mut self, notification: &Notification);
    fn dismiss(&mut self, notification: &Notification);
}

struct Shown {
    notification: Notification,
    at: Instant,
}

struct State {
    current: Option<Shown>,
    next_id: u64,
    presenter: Box<dyn Presenter>,
}

pub struct NotificationCenter {
    state: RefCell<State>,
}

impl NotificationCenter {
    pub fn new<P: Presenter + 'static>(presenter: P) -> NotificationCenter {
        NotificationCenter {
            state: RefCell::new(State {
                current: None,
                next_id: 1,
                presenter: Box::new(presenter),
            }),
        }
    }

    /// Shows a notification, replacing the current one. Returns its id.
    pub fn show<S: ToString>(
        &self,
        kind: NotificationKind,
        message: S,
        duration: Option<Duration>,
    ) -> u64 {
        self.expire(Instant::now());

        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;

        let notification = Notification {
            id,
            kind,
            message: message.to_string(),
            duration,
        };

        if let Some(previous) = state.current.take() {
            state.presenter.dismiss(&previous.notification);
        }
        state.presenter.show(&notification);
        state.current = Some(Shown {
            notification,
            at: Instant::now(),
        });
        id
    }

    pub fn error<S: ToString>(&self, message: S) -> u64 {
        self.show(NotificationKind::Error, message, Some(ERROR_DURATION))
    }

    pub fn success<S: ToString>(&self, message: S) -> u64 {
        self.show(NotificationKind::Success, message, Some(SUCCESS_DURATION))
    }

    /// Shows a loading notification that is dismissed when the guard drops.
    pub fn loading<S: ToString>(&self, message: S) -> LoadingGuard<'_> {
        let id = self.show(NotificationKind::Loading, message, None);
        LoadingGuard { center: self, id }
    }

    /// Dismisses notification `id` if it is still the one showing.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut state = self.state.borrow_mut();
        let is_current = matches!(&state.current, Some(shown) if shown.notification.id == id);
        if !is_current {
            return false;
        }
        if let Some(shown) = state.current.take() {
            state.presenter.dismiss(&shown.notification);
        }
        true
    }

    /// Dismisses the current notification if its duration has passed by `now`.
    pub fn expire(&self, now: Instant) {
        let expired = {
            let state = self.state.borrow();
            match &state.current {
                Some(Shown {
                    notification:
                        Notification {
                            id,
                            duration: Some(duration),
                            ..
                        },
                    at,
                }) if now.saturating_duration_since(*at) >= *duration => Some(*id),
                _ => None,
            }
        };
        if let Some(id) = expired {
            self.dismiss(id);
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<Notification> {
        self.expire(Instant::now());
        self.state
            .borrow()
            .current
            .as_ref()
            .map(|shown| shown.notification.clone())
    }
}

/// Tears down a loading notification on every exit path.
#[must_use = "the loading notification is dismissed as soon as the guard drops"]
pub struct LoadingGuard<'c> {
    center: &'c NotificationCenter,
    id: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.center.dismiss(self.id);
    }
}

/// Terminal presenter: a spinner while loading, coloured lines otherwise.
#[derive(Default)]
pub struct ConsolePresenter {
    spinner: Option<ProgressBar>,
}

impl Presenter for ConsolePresenter {
    fn show(&mut self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Loading => {
                let spinner = ProgressBar::new_spinner();
                if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                    spinner.set_style(spinner_style);
                }
                spinner.set_message(notification.message.clone());
                spinner.enable_steady_tick(Duration::from_millis(100));
                self.spinner = Some(spinner);
            }
            NotificationKind::Success => {
                eprintln!("{} {}", style("✔").green(), notification.message);
            }
            NotificationKind::Error => {
                eprintln!("{}: {}", style("Error").red(), notification.message);
            }
        }
    }

    fn dismiss(&mut self, notification: &Notification) {
        if notification.kind == NotificationKind::Loading {
            if let Some(spinner) = self.spinner.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Show(u64, NotificationKind),
        Dismiss(u64),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Presenter for Recorder {
        fn show(&mut self, n: &Notification) {
            self.0.borrow_mut().push(Event::Show(n.id, n.kind));
        }
        fn dismiss(&mut self, n: &Notification) {
            self.0.borrow_mut().push(Event::Dismiss(n.id));
        }
    }

    #[test]
    fn new_notification_replaces_current() {
        let recorder = Recorder::default();
        let center = NotificationCenter::new(recorder.clone());
        let first = center.error("one");
        let second = center.error("two");

        assert_eq!(
            *recorder.0.borrow(),
            vec![
                Event::Show(first, NotificationKind::Error),
                Event::Dismiss(first),
                Event::Show(second, NotificationKind::Error),
            ]
        );
        assert_eq!(center.current().map(|n| n.message), Some("two".to_string()));
    }

    #[test]
    fn loading_guard_dismisses_on_drop() {
        let recorder = Recorder::default();
        let center = NotificationCenter::new(recorder.clone());
        let id = {
            let guard = center.loading("Generating PDF...");
            assert_eq!(center.current().map(|n| n.kind), Some(NotificationKind::Loading));
            guard.id
        };
        assert!(center.current().is_none());
        assert_eq!(recorder.0.borrow().last(), Some(&Event::Dismiss(id)));
    }

    #[test]
    fn loading_guard_leaves_a_newer_notification_alone() {
        let center = NotificationCenter::new(Recorder::default());
        {
            let _guard = center.loading("Generating PDF...");
            center.error("Failed to generate PDF.");
        }
        assert_eq!(center.current().map(|n| n.kind), Some(NotificationKind::Error));
    }

    #[test]
    fn errors_expire_after_their_duration() {
        let center = NotificationCenter::new(Recorder::default());
        center.error("boom");
        let shown_at = Instant::now();

        center.expire(shown_at);
        assert!(center.state.borrow().current.is_some());

        center.expire(shown_at + ERROR_DURATION + Duration::from_millis(1));
        assert!(center.state.borrow().current.is_none());
    }

    #[test]
    fn loading_never_expires() {
        let center = NotificationCenter::new(Recorder::default());
        let _guard = center.loading("working");
        center.expire(Instant::now() + Duration::from_secs(3600));
        assert!(center.current().is_some());
    }

    #[test]
    fn manual_dismiss_of_stale_id_is_ignored() {
        let center = NotificationCenter::new(Recorder::default());
        let old = center.success("saved");
        center.error("oops");
        assert!(!center.dismiss(old));
        assert!(center.current().is_some());
    }

    #[test]
    fn expired_notification_is_dismissed_once_before_the_next_shows() {
        let recorder = Recorder::default();
        let center = NotificationCenter::new(recorder.clone());
        let first = center.show(NotificationKind::Success, "saved", Some(Duration::ZERO));
        let second = center.error("oops");

        assert_eq!(
            *recorder.0.borrow(),
            vec![
                Event::Show(first, NotificationKind::Success),
                Event::Dismiss(first),
                Event::Show(second, NotificationKind::Error),
            ]
        );
        assert!(!center.dismiss(first));
    }
}
