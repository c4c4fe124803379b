use std::{collections::VecDeque, time::Instant};

use engine::{Notice, Notifier};

const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

/// Notification surface: notices stacked bottom-right until they expire.
#[derive(Debug, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
}

impl Toasts {
    pub fn push_at(&mut self, notice: Notice, now: Instant) {
        let expires_at = now + notice.duration;
        self.items.push_back(Toast { notice, expires_at });
        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
    }

    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|toast| toast.expires_at > now);
    }

    /// The action button of the newest toast.
    pub fn dismiss(&mut self) -> bool {
        self.items.pop_back().is_some()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }
}
