use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallmentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Installment {
    /// 1-based position in the plan.
    pub number: u32,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
}

impl Installment {
    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }
}
