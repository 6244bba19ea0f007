//! Secondary source: native ads with URL, bid and geo/device targeting.

use crate::builder::{array, compose, finish, number, object, string};
use crate::error::SchemaError;
use crate::message::ViolationKind;
use crate::rule::Schema;

use super::base;

/// # Errors
///
/// Returns `SchemaError::Construction` if the definition is malformed.
pub fn schema() -> Result<Schema, SchemaError> {
    let composed = compose(
        &base::schema(),
        [
            (
                "targetUrl",
                string().uri().required().with_messages([
                    (ViolationKind::StringUri, "Target URL must be a valid URL"),
                    (ViolationKind::StringEmpty, "Target URL is required"),
                    (ViolationKind::Required, "Target URL is required"),
                ]),
            ),
            (
                "bidAmount",
                number().min(0.01).required().with_messages([
                    (ViolationKind::NumberBase, "Bid amount must be a number"),
                    (ViolationKind::NumberMin, "Bid amount must be at least $0.01"),
                    (ViolationKind::Required, "Bid amount is required"),
                ]),
            ),
            ("dailyBudget", base::daily_budget()),
            ("targeting", targeting()),
        ],
    )?;
    finish(composed)
}

fn targeting() -> Schema {
    object()
        .field(
            "countries",
            array(string()).min_items(1).required().with_messages([
                (ViolationKind::ArrayMin, "At least one country must be selected"),
                (ViolationKind::Required, "Countries are required"),
            ]),
        )
        .field(
            "devices",
            array(string())
                .min_items(1)
                .message(ViolationKind::ArrayMin, "At least one device must be selected"),
        )
        .required()
}
