/// Status shown to the user, derived on every read from the persisted status,
/// the due date and the current calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    Open,
    DueToday,
    Late,
    Paid,
}

impl DisplayStatus {
    /// Whether collection is due now (due today or overdue).
    pub fn is_collectable(&self) -> bool {
        matches!(self, DisplayStatus::DueToday | DisplayStatus::Late)
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayStatus::Open => write!(f, "OPEN"),
            DisplayStatus::DueToday => write!(f, "DUE_TODAY"),
            DisplayStatus::Late => write!(f, "LATE"),
            DisplayStatus::Paid => write!(f, "PAID"),
        }
    }
}
