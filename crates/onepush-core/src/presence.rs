/// Outcome of an existence probe that reached the store.
///
/// Probes return `Result<Presence>`, so "absent" and "store failed" stay
/// distinguishable. The boolean `exists` helpers on the services collapse
/// both into `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    pub fn is_present(self) -> bool {
        self == Presence::Present
    }
}

impl From<bool> for Presence {
    fn from(present: bool) -> Self {
        if present {
            Presence::Present
        } else {
            Presence::Absent
        }
    }
}
