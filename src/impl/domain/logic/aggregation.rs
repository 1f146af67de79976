use chrono::NaiveDate;

use crate::entities::{
    ClientId, ClientSummary, CollectionWorklist, HistorySummary, LoanStatus, PortfolioStats,
    StoredLoan,
};

/// Read-only figures over a snapshot of the loan book. Every status used here
/// goes through `Loan::display_status` with the same `today`.
pub(crate) struct PortfolioAggregator<'a> {
    loans: &'a [StoredLoan],
    today: NaiveDate,
}

impl<'a> PortfolioAggregator<'a> {
    pub(crate) fn new(loans: &'a [StoredLoan], today: NaiveDate) -> Self {
        Self { loans, today }
    }

    fn active(&self) -> impl Iterator<Item = &'a StoredLoan> {
        self.loans
            .iter()
            .filter(|l| l.data.status == LoanStatus::Active)
    }

    pub(crate) fn stats(&self) -> PortfolioStats {
        PortfolioStats {
            total_lent: self.loans.iter().map(|l| l.data.amount).sum(),
            total_receivable: self.active().map(|l| l.data.remaining_balance()).sum(),
            gross_receivable: self.active().map(|l| l.data.total_owing).sum(),
            total_profit: self.loans.iter().map(|l| l.data.profit).sum(),
            active_loans_count: self.active().count(),
            loans_due_today_count: self
                .active()
                .filter(|l| l.data.display_status(self.today).is_collectable())
                .count(),
        }
    }

    pub(crate) fn worklist(&self) -> CollectionWorklist {
        let (due_now, upcoming): (Vec<StoredLoan>, Vec<StoredLoan>) = self
            .active()
            .cloned()
            .partition(|l| l.data.display_status(self.today).is_collectable());
        let total_to_collect_now = due_now.iter().map(|l| l.data.remaining_balance()).sum();
        CollectionWorklist {
            due_now,
            upcoming,
            total_to_collect_now,
        }
    }

    pub(crate) fn history(&self) -> HistorySummary {
        self.loans
            .iter()
            .filter(|l| l.data.status == LoanStatus::Paid)
            .fold(HistorySummary::default(), |mut summary, l| {
                summary.paid_loans_count += 1;
                summary.realized_profit += l.data.profit;
                summary.volume_moved += l.data.total_owing;
                summary
            })
    }

    pub(crate) fn client_summary(&self, client_id: &ClientId) -> ClientSummary {
        self.loans
            .iter()
            .filter(|l| l.data.client_id.as_ref() == Some(client_id))
            .fold(ClientSummary::default(), |mut summary, l| {
                match l.data.status {
                    LoanStatus::Active => {
                        summary.active_loans += 1;
                        summary.outstanding_debt += l.data.remaining_balance();
                    }
                    LoanStatus::Paid => summary.paid_loans += 1,
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{Installment, InstallmentStatus, Loan, LoanId, RepaymentPlan, Stored};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(
        id: &str,
        client: Option<&str>,
        amount: f64,
        due_date: NaiveDate,
        status: LoanStatus,
        plan: RepaymentPlan,
    ) -> StoredLoan {
        Stored {
            id: LoanId::new(id),
            data: Loan {
                client_id: client.map(ClientId::new),
                client_name: client.unwrap_or("Walk-in").to_string(),
                amount,
                interest_rate: 20.0,
                total_owing: amount * 1.2,
                profit: amount * 0.2,
                start_date: date(2025, 1, 1),
                due_date,
                plan,
                status,
                notes: None,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
            },
        }
    }

    fn half_paid_plan() -> RepaymentPlan {
        RepaymentPlan::InstallmentPlan(vec![
            Installment {
                number: 1,
                amount: 600.0,
                due_date: date(2025, 1, 31),
                status: InstallmentStatus::Paid,
            },
            Installment {
                number: 2,
                amount: 600.0,
                due_date: date(2025, 3, 2),
                status: InstallmentStatus::Pending,
            },
        ])
    }

    fn book() -> Vec<StoredLoan> {
        use LoanStatus::{Active, Paid};
        use RepaymentPlan::SinglePayment;
        vec![
            // Due today.
            loan("a", Some("c1"), 100.0, date(2025, 2, 10), Active, SinglePayment),
            // Late.
            loan("b", Some("c2"), 200.0, date(2025, 2, 1), Active, SinglePayment),
            // Open, half paid.
            loan("c", Some("c1"), 1000.0, date(2025, 3, 2), Active, half_paid_plan()),
            loan("d", Some("c1"), 500.0, date(2025, 1, 20), Paid, SinglePayment),
        ]
    }

    #[test]
    fn portfolio_stats() {
        let loans = book();
        let stats = PortfolioAggregator::new(&loans, date(2025, 2, 10)).stats();
        assert!((stats.total_lent - 1800.0).abs() < 1e-9);
        assert!((stats.gross_receivable - (120.0 + 240.0 + 1200.0)).abs() < 1e-9);
        assert!((stats.total_receivable - (120.0 + 240.0 + 600.0)).abs() < 1e-9);
        assert!((stats.total_profit - 360.0).abs() < 1e-9);
        assert_eq!(stats.active_loans_count, 3);
        assert_eq!(stats.loans_due_today_count, 2);
    }

    #[test]
    fn due_today_count_includes_late_loans_only_when_active() {
        let loans = book();
        let before_everything = PortfolioAggregator::new(&loans, date(2025, 1, 1)).stats();
        assert_eq!(before_everything.loans_due_today_count, 0);
        let after_everything = PortfolioAggregator::new(&loans, date(2025, 12, 31)).stats();
        assert_eq!(after_everything.loans_due_today_count, 3);
    }

    #[test]
    fn worklist_splits_active_loans() {
        let loans = book();
        let worklist = PortfolioAggregator::new(&loans, date(2025, 2, 10)).worklist();
        let ids = |v: &[StoredLoan]| v.iter().map(|l| l.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&worklist.due_now), vec!["a", "b"]);
        assert_eq!(ids(&worklist.upcoming), vec!["c"]);
        assert!((worklist.total_to_collect_now - 360.0).abs() < 1e-9);
    }

    #[test]
    fn history_covers_paid_loans() {
        let loans = book();
        let history = PortfolioAggregator::new(&loans, date(2025, 2, 10)).history();
        assert_eq!(history.paid_loans_count, 1);
        assert!((history.realized_profit - 100.0).abs() < 1e-9);
        assert!((history.volume_moved - 600.0).abs() < 1e-9);
    }

    #[test]
    fn client_summary_uses_remaining_balance() {
        let loans = book();
        let aggregator = PortfolioAggregator::new(&loans, date(2025, 2, 10));
        let summary = aggregator.client_summary(&ClientId::new("c1"));
        assert_eq!(summary.active_loans, 2);
        assert_eq!(summary.paid_loans, 1);
        assert!((summary.outstanding_debt - (120.0 + 600.0)).abs() < 1e-9);
        assert_eq!(
            aggregator.client_summary(&ClientId::new("missing")),
            ClientSummary::default()
        );
    }
}
