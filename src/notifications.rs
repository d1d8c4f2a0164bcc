//! Notifications
//!
//! User-facing notices raised by the cart and checkout flows. The front end
//! decides how to show them.

use std::sync::{Arc, Mutex};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    /// Informational
    #[default]
    Default,

    /// Something went wrong
    Destructive,
}

/// A short notice for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Headline
    pub title: String,

    /// Body text
    pub description: String,

    /// Visual weight
    pub variant: ToastVariant,
}

impl Toast {
    /// Create an informational notice.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    /// Create an error notice.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    /// Whether this notice reports a failure.
    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Receives notices from the cart and checkout flows.
pub trait Notifier {
    /// Deliver a notice.
    fn notify(&self, toast: Toast);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast);
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast);
    }
}

/// Discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _toast: Toast) {}
}

/// Keeps every notice in arrival order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }

    /// Titles of the notices received so far.
    pub fn titles(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .map(|toast| toast.title)
            .collect()
    }

    /// Drain the recorded notices.
    pub fn take(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut toasts| std::mem::take(&mut *toasts))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}
