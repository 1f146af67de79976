use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::{
    entities::{Installment, InstallmentStatus, LoanTerms, ScheduleParams, ScheduleTiming},
    errors::{InvalidInstallmentCount, InvalidScheduleDays},
};

use super::utils::{add_days, minor_unit_factor};

pub(crate) struct InstallmentScheduler {
    decimal_places: u32,
}

impl InstallmentScheduler {
    pub(crate) fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    /// Days between consecutive installments. A span is divided by the
    /// installment count with truncation.
    pub(crate) fn interval_days(params: &ScheduleParams) -> Result<u32, ServerError> {
        if params.installment_count == 0 {
            return Err(InvalidInstallmentCount::new(params.installment_count));
        }
        let interval = match params.timing {
            ScheduleTiming::Interval { days } => days,
            ScheduleTiming::Span { total_days } => total_days / params.installment_count,
        };
        if interval == 0 {
            return Err(InvalidScheduleDays::new(
                "installments must be at least one day apart",
            ));
        }
        Ok(interval)
    }

    /// Builds the repayment schedule starting on `start`. The first
    /// installment is due one full interval after the start date.
    ///
    /// The total is split in whole minor units (cents for two decimal
    /// places): every installment gets the same share, and the leftover
    /// units go one each to the final installments. The last installment
    /// also takes any sub-unit remainder, so the sum is exactly the total
    /// owing and no amount is negative.
    pub(crate) fn schedule(
        &self,
        terms: &LoanTerms,
        params: &ScheduleParams,
        start: NaiveDate,
    ) -> Result<Vec<Installment>, ServerError> {
        let interval = Self::interval_days(params)?;
        let factor = minor_unit_factor(self.decimal_places)?;
        let count = params.installment_count;
        let total_units = (terms.total_owing * factor).round();
        let share_units = (total_units / count as f64).floor();
        let leftover_units = (total_units - share_units * count as f64) as u32;
        let first_with_extra_unit = count - leftover_units + 1;

        let mut installments = Vec::with_capacity(count as usize);
        let mut running_total = 0f64;
        for number in 1..=count {
            let amount = if number < count {
                let extra = if number >= first_with_extra_unit { 1.0 } else { 0.0 };
                (share_units + extra) / factor
            } else {
                (terms.total_owing - running_total).max(0.0)
            };
            running_total += amount;
            installments.push(Installment {
                number,
                amount,
                due_date: add_days(start, interval as u64 * number as u64)?,
                status: InstallmentStatus::Pending,
            });
        }
        Ok(installments)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn terms(principal: f64, rate: f64) -> LoanTerms {
        LoanTerms::compute(principal, rate).unwrap()
    }

    #[test]
    fn single_installment_carries_full_total() {
        let start = date(2025, 3, 1);
        let schedule = InstallmentScheduler::new(2)
            .schedule(&terms(1000.0, 20.0), &ScheduleParams::every(1, 30), start)
            .unwrap();
        assert_eq!(
            schedule,
            vec![Installment {
                number: 1,
                amount: 1200.0,
                due_date: date(2025, 3, 31),
                status: InstallmentStatus::Pending,
            }]
        );
    }

    #[test]
    fn two_installments_split_evenly() {
        let start = date(2025, 3, 1);
        let schedule = InstallmentScheduler::new(2)
            .schedule(&terms(1000.0, 20.0), &ScheduleParams::every(2, 30), start)
            .unwrap();
        let amounts: Vec<f64> = schedule.iter().map(|i| i.amount).collect();
        let dates: Vec<NaiveDate> = schedule.iter().map(|i| i.due_date).collect();
        assert_eq!(amounts, vec![600.0, 600.0]);
        assert_eq!(dates, vec![date(2025, 3, 31), date(2025, 4, 30)]);
        assert!(schedule.iter().all(|i| i.status == InstallmentStatus::Pending));
    }

    #[test]
    fn last_installment_absorbs_rounding_remainder() {
        let terms = terms(1000.0, 0.0);
        let schedule = InstallmentScheduler::new(2)
            .schedule(&terms, &ScheduleParams::every(3, 7), date(2025, 1, 1))
            .unwrap();
        assert_eq!(schedule[0].amount, 333.33);
        assert_eq!(schedule[1].amount, 333.33);
        assert!((schedule[2].amount - 333.34).abs() < 1e-9);
    }

    #[test]
    fn amounts_sum_to_total_owing_for_any_count() {
        let scheduler = InstallmentScheduler::new(2);
        for count in 1..=24u32 {
            for (principal, rate) in [(1000.0, 20.0), (777.77, 13.5), (50.0, 0.0)] {
                let terms = terms(principal, rate);
                let schedule = scheduler
                    .schedule(&terms, &ScheduleParams::every(count, 10), date(2025, 1, 1))
                    .unwrap();
                let sum: f64 = schedule.iter().map(|i| i.amount).sum();
                assert!(
                    (sum - terms.total_owing).abs() <= count as f64 * 1e-9,
                    "count {count}: {sum} != {}",
                    terms.total_owing
                );
                let numbers: Vec<u32> = schedule.iter().map(|i| i.number).collect();
                assert_eq!(numbers, (1..=count).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn many_installments_on_a_small_total_stay_even() {
        let scheduler = InstallmentScheduler::new(2);
        for (principal, count) in [(100.0, 160u32), (1.0, 7), (0.05, 9), (10.0, 1000)] {
            let terms = terms(principal, 0.0);
            let schedule = scheduler
                .schedule(&terms, &ScheduleParams::every(count, 1), date(2025, 1, 1))
                .unwrap();
            let even_share = terms.total_owing / count as f64;
            for installment in &schedule {
                assert!(installment.amount >= 0.0, "negative amount: {installment:?}");
                assert!(
                    (installment.amount - even_share).abs() <= 0.01 + 1e-9,
                    "{} is not within a cent of {even_share}",
                    installment.amount
                );
            }
            let sum: f64 = schedule.iter().map(|i| i.amount).sum();
            assert!((sum - terms.total_owing).abs() < 1e-6);
        }
    }

    #[test]
    fn leftover_cents_go_to_the_final_installments() {
        let schedule = InstallmentScheduler::new(2)
            .schedule(&terms(100.0, 0.0), &ScheduleParams::every(160, 1), date(2025, 1, 1))
            .unwrap();
        assert!(schedule[..80].iter().all(|i| i.amount == 0.62));
        assert!(schedule[80..159].iter().all(|i| i.amount == 0.63));
        assert!((schedule[159].amount - 0.63).abs() < 1e-9);
    }

    #[test]
    fn unsupported_decimal_places_are_rejected() {
        let result = InstallmentScheduler::new(400).schedule(
            &terms(100.0, 0.0),
            &ScheduleParams::every(2, 30),
            date(2025, 1, 1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn span_is_divided_with_truncation() {
        let start = date(2025, 1, 1);
        let params = ScheduleParams::spread(3, 100);
        assert_eq!(InstallmentScheduler::interval_days(&params).unwrap(), 33);
        let schedule = InstallmentScheduler::new(2)
            .schedule(&terms(300.0, 0.0), &params, start)
            .unwrap();
        let dates: Vec<NaiveDate> = schedule.iter().map(|i| i.due_date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 2, 3), date(2025, 3, 8), date(2025, 4, 10)]
        );
    }

    #[test]
    fn rejects_zero_count_and_zero_interval() {
        let scheduler = InstallmentScheduler::new(2);
        let start = date(2025, 1, 1);
        let terms = terms(100.0, 10.0);
        assert!(scheduler
            .schedule(&terms, &ScheduleParams::every(0, 30), start)
            .is_err());
        assert!(scheduler
            .schedule(&terms, &ScheduleParams::every(2, 0), start)
            .is_err());
        assert!(scheduler
            .schedule(&terms, &ScheduleParams::spread(5, 4), start)
            .is_err());
    }
}
