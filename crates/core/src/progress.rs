//! Progress Calculation
//!
//! Percentage-complete math shared by savings goals and loan repayment.

/// Percent of `target` covered by `current`, rounded to the nearest whole
/// number and clamped to 0-100.
///
/// A target of zero or less reports 0 instead of dividing by zero, a
/// negative current amount reports 0, and anything past the target clamps
/// to 100 so an overfunded goal never overflows its progress bar.
pub fn percent_complete(current: f64, target: f64) -> u8 {
    if target <= 0.0 || current <= 0.0 {
        return 0;
    }
    let percent = (current / target * 100.0).round();
    percent.min(100.0) as u8
}

/// Share of the total obligation (paid plus still owed) already paid off.
pub fn repayment_progress(total_paid: f64, remaining_amount: f64) -> u8 {
    percent_complete(total_paid, total_paid + remaining_amount)
}
