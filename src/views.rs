//! Tab shell: which game panel is visible.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    Magic,
    Shatter,
    Draw,
    Bubbles,
    Music,
    Memory,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::Magic,
        ViewId::Shatter,
        ViewId::Draw,
        ViewId::Bubbles,
        ViewId::Music,
        ViewId::Memory,
    ];

    /// Value of the nav button's `data-game` attribute.
    pub fn slug(self) -> &'static str {
        match self {
            ViewId::Magic => "magic",
            ViewId::Shatter => "shatter",
            ViewId::Draw => "draw",
            ViewId::Bubbles => "bubbles",
            ViewId::Music => "music",
            ViewId::Memory => "memory",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.slug() == slug)
    }

    /// Id of the panel element, e.g. `game-draw`.
    pub fn element_id(self) -> String {
        format!("game-{}", self.slug())
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Outcome of one activation, consumed by the per-view setup hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activation {
    pub view: ViewId,
    pub previous: ViewId,
    /// True only the first time this view is ever activated.
    pub first: bool,
}

/// Exactly one view is active at any time.
#[derive(Debug)]
pub struct ViewSwitcher {
    active: ViewId,
    seen: [bool; ViewId::ALL.len()],
}

impl Default for ViewSwitcher {
    fn default() -> Self {
        Self::new(ViewId::Magic)
    }
}

impl ViewSwitcher {
    /// `initial` is shown but not yet set up; activate it once at startup so
    /// its hook runs with `first == true`.
    pub fn new(initial: ViewId) -> Self {
        Self { active: initial, seen: [false; ViewId::ALL.len()] }
    }

    pub fn active(&self) -> ViewId {
        self.active
    }

    pub fn is_active(&self, view: ViewId) -> bool {
        self.active == view
    }

    pub fn activate(&mut self, view: ViewId) -> Activation {
        let previous = self.active;
        let first = !self.seen[view.index()];
        self.seen[view.index()] = true;
        self.active = view;
        Activation { view, previous, first }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for v in ViewId::ALL {
            assert_eq!(ViewId::from_slug(v.slug()), Some(v));
        }
        assert_eq!(ViewId::from_slug("pinball"), None);
        assert_eq!(ViewId::Draw.element_id(), "game-draw");
    }

    #[test]
    fn exactly_one_view_active() {
        let mut sw = ViewSwitcher::default();
        assert!(sw.is_active(ViewId::Magic));
        sw.activate(ViewId::Memory);
        let active: Vec<_> = ViewId::ALL.into_iter().filter(|v| sw.is_active(*v)).collect();
        assert_eq!(active, vec![ViewId::Memory]);
    }

    #[test]
    fn first_flag_only_on_first_activation() {
        let mut sw = ViewSwitcher::default();
        assert!(sw.activate(ViewId::Magic).first);
        assert!(sw.activate(ViewId::Memory).first);
        assert!(sw.activate(ViewId::Draw).first);
        let again = sw.activate(ViewId::Memory);
        assert!(!again.first);
        assert_eq!(again.previous, ViewId::Draw);
        assert!(!sw.activate(ViewId::Magic).first);
    }
}
