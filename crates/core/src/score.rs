//! Privacy-score calculation.
//!
//! The score is a derived 0–100 composite of a customer's remediation
//! progress, recomputed on every read and never stored. Three sub-scores
//! feed it: completed removal guides, a registered address alert, and the
//! completion ratio of submitted removal URLs.
//!
//! Weighting depends on the subscription plan: the cheapest plan does not
//! include deindexing, so its URL weight is zero and the remaining weight
//! is split evenly between guides and address protection.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Subscription plans sold for the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionPlan {
    #[serde(rename = "1_month")]
    OneMonth,
    #[serde(rename = "6_months")]
    SixMonths,
    #[serde(rename = "12_months")]
    TwelveMonths,
    #[serde(rename = "24_months")]
    TwentyFourMonths,
}

impl SubscriptionPlan {
    /// The wire string stored in `customers.subscription_plan`.
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionPlan::OneMonth => "1_month",
            SubscriptionPlan::SixMonths => "6_months",
            SubscriptionPlan::TwelveMonths => "12_months",
            SubscriptionPlan::TwentyFourMonths => "24_months",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "1_month" => Ok(SubscriptionPlan::OneMonth),
            "6_months" => Ok(SubscriptionPlan::SixMonths),
            "12_months" => Ok(SubscriptionPlan::TwelveMonths),
            "24_months" => Ok(SubscriptionPlan::TwentyFourMonths),
            other => Err(CoreError::Validation(format!(
                "Unknown subscription plan '{other}'. Must be one of: \
                 1_month, 6_months, 12_months, 24_months"
            ))),
        }
    }

    /// Whether the plan includes search-engine deindexing of removal URLs.
    pub fn includes_deindexing(self) -> bool {
        !matches!(self, SubscriptionPlan::OneMonth)
    }
}

/// Everything the score calculation reads. Assembled per request from the
/// checklist, customer, and removal-URL tables.
#[derive(Debug, Clone)]
pub struct ScoreInputs {
    /// Removal guides the customer has completed.
    pub completed_guides: u32,
    /// Total guides available in the catalog (the denominator).
    pub total_guides: u32,
    /// Whether an address alert is registered on the account.
    pub has_street_address: bool,
    /// Removal URLs the customer has submitted.
    pub urls_submitted: u32,
    /// Submitted URLs whose removal has been approved.
    pub urls_approved: u32,
    pub plan: SubscriptionPlan,
}

/// The computed score: the weighted total plus each sub-score rounded
/// independently to 0..=100 for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub total: u8,
    pub guides: u8,
    pub address: u8,
    pub urls: u8,
}

/// Per-plan weights for the three sub-scores. Always sums to 1.0.
fn weights(plan: SubscriptionPlan) -> (f64, f64, f64) {
    if plan.includes_deindexing() {
        (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)
    } else {
        (0.5, 0.5, 0.0)
    }
}

/// Compute the privacy score for one customer.
pub fn calculate_score(inputs: &ScoreInputs) -> ScoreBreakdown {
    // No guides in the catalog means nothing to do, which counts as done.
    let guides = if inputs.total_guides == 0 {
        1.0
    } else {
        f64::from(inputs.completed_guides.min(inputs.total_guides)) / f64::from(inputs.total_guides)
    };

    let address = if inputs.has_street_address { 1.0 } else { 0.0 };

    // Plans without deindexing, and accounts with no submitted URLs, have no
    // outstanding URL work: both score fully.
    let urls = if !inputs.plan.includes_deindexing() || inputs.urls_submitted == 0 {
        1.0
    } else {
        f64::from(inputs.urls_approved.min(inputs.urls_submitted))
            / f64::from(inputs.urls_submitted)
    };

    let (w_guides, w_address, w_urls) = weights(inputs.plan);
    let total = (w_guides * guides + w_address * address + w_urls * urls) * 100.0;

    ScoreBreakdown {
        total: total.round() as u8,
        guides: (guides * 100.0).round() as u8,
        address: (address * 100.0).round() as u8,
        urls: (urls * 100.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn inputs(plan: SubscriptionPlan) -> ScoreInputs {
        ScoreInputs {
            completed_guides: 0,
            total_guides: 10,
            has_street_address: false,
            urls_submitted: 0,
            urls_approved: 0,
            plan,
        }
    }

    #[test]
    fn empty_six_month_account_scores_33() {
        // guides 0, address 0, urls 1.0 (nothing submitted), equal thirds.
        let score = calculate_score(&inputs(SubscriptionPlan::SixMonths));
        assert_eq!(score.total, 33);
        assert_eq!(score.guides, 0);
        assert_eq!(score.address, 0);
        assert_eq!(score.urls, 100);
    }

    #[test]
    fn fully_remediated_twelve_month_account_scores_100() {
        let score = calculate_score(&ScoreInputs {
            completed_guides: 10,
            total_guides: 10,
            has_street_address: true,
            urls_submitted: 2,
            urls_approved: 2,
            plan: SubscriptionPlan::TwelveMonths,
        });
        assert_eq!(
            score,
            ScoreBreakdown {
                total: 100,
                guides: 100,
                address: 100,
                urls: 100
            }
        );
    }

    #[test]
    fn one_month_plan_is_independent_of_url_state() {
        let mut a = inputs(SubscriptionPlan::OneMonth);
        a.urls_submitted = 5;
        a.urls_approved = 0;

        let mut b = inputs(SubscriptionPlan::OneMonth);
        b.urls_submitted = 5;
        b.urls_approved = 5;

        assert_eq!(calculate_score(&a).total, calculate_score(&b).total);
        // Half guides + half address, neither done.
        assert_eq!(calculate_score(&a).total, 0);
    }

    #[test]
    fn one_month_plan_splits_weight_between_guides_and_address() {
        let mut i = inputs(SubscriptionPlan::OneMonth);
        i.has_street_address = true;
        assert_eq!(calculate_score(&i).total, 50);

        i.completed_guides = 10;
        assert_eq!(calculate_score(&i).total, 100);
    }

    #[test]
    fn empty_guide_catalog_counts_as_fully_scored() {
        let mut i = inputs(SubscriptionPlan::SixMonths);
        i.total_guides = 0;
        let score = calculate_score(&i);
        assert_eq!(score.guides, 100);
        // guides 1.0 + urls 1.0, address 0 → round(66.67).
        assert_eq!(score.total, 67);
    }

    #[test]
    fn partial_url_completion_is_a_ratio() {
        let mut i = inputs(SubscriptionPlan::TwelveMonths);
        i.urls_submitted = 4;
        i.urls_approved = 1;
        assert_eq!(calculate_score(&i).urls, 25);
    }

    #[test]
    fn completed_guides_are_capped_at_the_catalog_size() {
        // A stale catalog should never push a sub-score past 100.
        let mut i = inputs(SubscriptionPlan::SixMonths);
        i.total_guides = 3;
        i.completed_guides = 5;
        assert_eq!(calculate_score(&i).guides, 100);
    }

    #[test]
    fn plan_parse_round_trips_wire_strings() {
        for plan in [
            SubscriptionPlan::OneMonth,
            SubscriptionPlan::SixMonths,
            SubscriptionPlan::TwelveMonths,
            SubscriptionPlan::TwentyFourMonths,
        ] {
            assert_eq!(SubscriptionPlan::parse(plan.as_str()).unwrap(), plan);
        }
        assert_matches!(SubscriptionPlan::parse("lifetime"), Err(CoreError::Validation(_)));
    }
}
