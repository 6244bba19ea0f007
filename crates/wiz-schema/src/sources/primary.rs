//! Primary source: keyword campaigns with category groups.

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
            ("dailyBudget", base::daily_budget()),
            (
                "bidStrategy",
                string().valid(["cpc", "cpm", "cpv"]).required().with_messages([
                    (ViolationKind::AnyOnly, "Please select a valid bid strategy"),
                    (ViolationKind::Required, "Bid strategy is required"),
                ]),
            ),
            (
                "keywords",
                string()
                    .required()
                    .message(ViolationKind::StringEmpty, "Keywords are required"),
            ),
            ("categoryGroups", category_groups()),
        ],
    )?;
    finish(composed)
}

fn category_groups() -> Schema {
    let group = object()
        .field(
            "name",
            string()
                .required()
                .message(ViolationKind::StringEmpty, "Category group name is required"),
        )
        .field(
            "cpc",
            number().min(0.01).required().with_messages([
                (ViolationKind::NumberBase, "Max CPC must be a number"),
                (ViolationKind::NumberMin, "Max CPC must be at least $0.01"),
                (ViolationKind::Required, "Max CPC is required"),
            ]),
        );

    array(group).min_items(1).required().with_messages([
        (ViolationKind::ArrayMin, "At least one category group is required"),
        (ViolationKind::Required, "Category groups are required"),
    ])
}
