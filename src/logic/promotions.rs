use chrono::{DateTime, Utc};

use crate::state::{Discount, Promotion};

/// Basis points in 100%.
const FULL_BASIS_POINTS: i128 = 10_000;

/// Promotion chosen for an order, with the amount it takes off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestPromotion<'a> {
    /// Winning promotion.
    pub promotion: &'a Promotion,
    /// Discount in minor units, already capped.
    pub discount: i64,
}

/// What: Check whether a promotion applies to an order right now.
///
/// Inputs:
/// - `promotion`: Candidate promotion.
/// - `subtotal`: Order subtotal in minor units.
/// - `now`: Evaluation time.
///
/// Output:
/// - `true` when the minimum order is met and `now` is inside `[starts_at, ends_at)`.
#[must_use]
pub fn is_eligible(promotion: &Promotion, subtotal: i64, now: DateTime<Utc>) -> bool {
    if promotion.min_order.is_some_and(|min| subtotal < min) {
        return false;
    }
    if promotion.starts_at.is_some_and(|start| now < start) {
        return false;
    }
    !promotion.ends_at.is_some_and(|end| now >= end)
}

/// What: Compute what a promotion takes off a subtotal, ignoring eligibility.
///
/// Inputs:
/// - `promotion`: Promotion to apply.
/// - `subtotal`: Order subtotal in minor units.
///
/// Output:
/// - Discount in `0..=subtotal`, after the `max_discount` cap.
///
/// Details:
/// - Percentages use integer basis-point arithmetic, rounding down.
#[must_use]
pub fn discount_for(promotion: &Promotion, subtotal: i64) -> i64 {
    if subtotal <= 0 {
        return 0;
    }
    let raw = match promotion.discount {
        Discount::Percentage { basis_points } => {
            let amount = i128::from(subtotal) * i128::from(basis_points) / FULL_BASIS_POINTS;
            i64::try_from(amount).unwrap_or(i64::MAX)
        }
        Discount::Fixed { amount } => amount,
    };
    let capped = promotion.max_discount.map_or(raw, |cap| raw.min(cap));
    capped.clamp(0, subtotal)
}

/// What: Pick the promotion giving the largest discount on an order.
///
/// Inputs:
/// - `subtotal`: Order subtotal in minor units.
/// - `promotions`: Candidates in server order.
/// - `now`: Evaluation time.
///
/// Output:
/// - Best eligible promotion with its discount, or `None` when nothing eligible
///   takes anything off.
///
/// Details:
/// - On equal discounts the earlier promotion wins.
#[must_use]
pub fn best_promotion(
    subtotal: i64,
    promotions: &[Promotion],
    now: DateTime<Utc>,
) -> Option<BestPromotion<'_>> {
    let mut best: Option<BestPromotion<'_>> = None;
    for promotion in promotions.iter().filter(|p| is_eligible(p, subtotal, now)) {
        let discount = discount_for(promotion, subtotal);
        if discount > best.map_or(0, |b| b.discount) {
            best = Some(BestPromotion {
                promotion,
                discount,
            });
        }
    }
    best
}
