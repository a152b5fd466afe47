//! [`FixedHomeProbe`]: a container probe that never starts a container.

use std::cell::RefCell;
use ysenv_core::ContainerHomeProbe;

/// Answers every probe with the same home and records what was asked.
#[derive(Debug, Default)]
pub struct FixedHomeProbe {
    home: String,
    calls: RefCell<Vec<(String, Option<String>)>>,
}

impl FixedHomeProbe {
    pub fn new(home: &str) -> Self {
        Self {
            home: home.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A probe that behaves like a failed `docker run`.
    pub fn failing() -> Self {
        Self::new("")
    }

    /// `(image, user)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.borrow().clone()
    }
}

impl ContainerHomeProbe for FixedHomeProbe {
    fn probe_home(&self, image: &str, user: Option<&str>) -> String {
        self.calls
            .borrow_mut()
            .push((image.to_string(), user.map(str::to_string)));
        self.home.clone()
    }
}
