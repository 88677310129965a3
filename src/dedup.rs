//! Reduction of a submission history to each user's current submission on
//! each level.

use itertools::Itertools;

use crate::error::InvariantViolation;
use crate::model::{Category, Submission};

/// Removes obsolete submissions, keeping each user's most recent submission
/// on each level.
///
/// `submissions` must already be sorted by level ID, then user ID, then
/// submission date descending (see [`sort_for_history()`]), and must only
/// contain one [`Category`] of submissions. Input in any other order gives an
/// unspecified result; use [`remove_obsolete_checked()`] to detect it.
///
/// The relative order of the remaining submissions is preserved.
pub fn remove_obsolete(mut submissions: Vec<Submission>) -> Vec<Submission> {
    // Within a run of equal (level, user) pairs the first is the newest.
    submissions.dedup_by_key(|s| s.level_user());
    submissions
}

/// Same as [`remove_obsolete()`], but first verifies the ordering
/// precondition.
pub fn remove_obsolete_checked(
    submissions: Vec<Submission>,
) -> Result<Vec<Submission>, InvariantViolation> {
    check_history_order(&submissions)?;
    Ok(remove_obsolete(submissions))
}

/// Returns an error describing the first pair of adjacent submissions that
/// is out of order for [`remove_obsolete()`].
pub fn check_history_order(submissions: &[Submission]) -> Result<(), InvariantViolation> {
    for ((_, prev), (i, next)) in submissions.iter().enumerate().tuple_windows() {
        let violation = |message: String| {
            tracing::warn!(index = i, %message, "Submission history is out of order.");
            Err(InvariantViolation::new("remove_obsolete", i, message))
        };

        if next.level_id < prev.level_id {
            return violation(format!(
                "level {} appears after level {}",
                next.level_id, prev.level_id,
            ));
        }
        if next.level_id == prev.level_id && next.user_id < prev.user_id {
            return violation(format!(
                "user {} appears after user {} on level {}",
                next.user_id, prev.user_id, next.level_id,
            ));
        }
        if next.level_user() == prev.level_user() && next.submitted_at > prev.submitted_at {
            return violation(format!(
                "submission {} by user {} on level {} is newer than submission {} before it",
                next.id, next.user_id, next.level_id, prev.id,
            ));
        }
    }
    Ok(())
}

/// Sorts submissions into the order [`remove_obsolete()`] expects.
pub fn sort_for_history(submissions: &mut [Submission]) {
    submissions.sort_by_key(|s| s.history_sort_key());
}

/// Returns the current submission of every user on every level within
/// `category`, in level then user order.
pub fn current_submissions<'a>(
    submissions: impl IntoIterator<Item = &'a Submission>,
    category: Category,
) -> Vec<Submission> {
    let mut in_category = submissions
        .into_iter()
        .filter(|s| category.includes(s))
        .cloned()
        .collect_vec();
    let total = in_category.len();

    sort_for_history(&mut in_category);
    let current = remove_obsolete(in_category);

    tracing::debug!(
        %category,
        total,
        current = current.len(),
        "Removed obsolete submissions.",
    );
    current
}
