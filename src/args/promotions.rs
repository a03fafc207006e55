//! Command-line promotions output.

use crate::app::render::format_amount;
use crate::i18n;
use crate::logic::best_promotion;
use crate::sources::{ApiClient, fetch_promotions};
use crate::state::{Discount, Promotion};

/// What: Describe a promotion's discount for display.
///
/// Inputs:
/// - `promotion`: Promotion to describe
///
/// Output:
/// - e.g. `"12.5% (max 50.00)"` or `"20.00 off"`
#[must_use]
pub fn describe_discount(promotion: &Promotion) -> String {
    let base = match promotion.discount {
        Discount::Percentage { basis_points } => {
            let whole = basis_points / 100;
            let frac = basis_points % 100;
            if frac == 0 {
                format!("{whole}%")
            } else {
                let digits = format!("{frac:02}");
                let digits = digits.trim_end_matches('0');
                format!("{whole}.{digits}%")
            }
        }
        Discount::Fixed { amount } => format!("{} off", format_amount(amount, "")),
    };
    match promotion.max_discount {
        Some(cap) => format!("{base} (max {})", format_amount(cap, "")),
        None => base,
    }
}

/// What: Print current promotions and, for a subtotal, the best one.
///
/// Inputs:
/// - `api`: Backend client
/// - `subtotal`: Order subtotal in minor units, if any
///
/// Output:
/// - Exit code (`1` when the promotions could not be fetched).
pub async fn handle_promotions(api: &ApiClient, subtotal: Option<i64>) -> i32 {
    tracing::info!(?subtotal, "promotions requested from CLI");
    let promotions = match fetch_promotions(api).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", crate::logic::describe_fetch_error(e.as_ref()));
            return 1;
        }
    };
    for p in &promotions {
        println!("  {}  {}  {}", p.id, p.title, describe_discount(p));
    }
    if promotions.is_empty() {
        println!("{}", i18n::t("app.lists.empty"));
    }
    if let Some(subtotal) = subtotal {
        match best_promotion(subtotal, &promotions, chrono::Utc::now()) {
            Some(best) => println!(
                "{}",
                i18n::t_fmt(
                    "app.promotions.best",
                    &[&best.promotion.title, &format_amount(best.discount, "")]
                )
            ),
            None => println!("{}", i18n::t("app.promotions.none")),
        }
    }
    0
}
