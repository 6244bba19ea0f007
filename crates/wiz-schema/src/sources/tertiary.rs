//! Tertiary source: scheduled campaigns with budget and conditional bidding.

use serde_json::Value;

use crate::builder::{any, compose, date, finish, number, object, string, when};
use crate::error::SchemaError;
use crate::message::ViolationKind;
use crate::rule::{Predicate, Schema};

use super::base;

/// # Errors
///
/// Returns `SchemaError::Construction` if the definition is malformed.
pub fn schema() -> Result<Schema, SchemaError> {
    let composed = compose(
        &base::schema(),
        [
            (
                "projectObjective",
                string()
                    .valid(["visits", "awareness", "conversions"])
                    .required()
                    .with_messages([
                        (ViolationKind::AnyOnly, "Please select a valid project objective"),
                        (ViolationKind::Required, "Project objective is required"),
                    ]),
            ),
            (
                "startDate",
                date().iso().required().with_messages([
                    (ViolationKind::DateBase, "Start date must be a valid date"),
                    (ViolationKind::Required, "Start date is required"),
                ]),
            ),
            (
                "endDate",
                date()
                    .iso()
                    .min_ref("startDate")
                    .allow([Value::Null, Value::from("")])
                    .with_messages([
                        (ViolationKind::DateBase, "End date must be a valid date"),
                        (ViolationKind::DateMin, "End date must be after start date"),
                    ]),
            ),
            ("budget", budget()),
            ("bidding", bidding()),
        ],
    )?;
    finish(composed)
}

fn budget() -> Schema {
    object()
        .field(
            "amount",
            number().min(10.0).required().with_messages([
                (ViolationKind::NumberBase, "Budget amount must be a number"),
                (ViolationKind::NumberMin, "Budget amount must be at least $10"),
                (ViolationKind::Required, "Budget amount is required"),
            ]),
        )
        .field(
            "type",
            string().valid(["daily", "lifetime"]).required().with_messages([
                (ViolationKind::AnyOnly, "Please select a valid budget type"),
                (ViolationKind::Required, "Budget type is required"),
            ]),
        )
        .required()
}

fn bidding() -> Schema {
    let manual_amount = number().min(0.01).required().with_messages([
        (ViolationKind::NumberBase, "Bid amount must be a number"),
        (ViolationKind::NumberMin, "Bid amount must be at least $0.01"),
        (ViolationKind::Required, "Bid amount is required for manual bidding"),
    ]);

    object()
        .field(
            "strategy",
            string().valid(["manual", "auto"]).required().with_messages([
                (ViolationKind::AnyOnly, "Please select a valid bid strategy"),
                (ViolationKind::Required, "Bid strategy is required"),
            ]),
        )
        .field(
            "amount",
            when(
                "strategy",
                Predicate::Equals("manual".into()),
                manual_amount,
                any().allow([Value::Null, Value::from("")]),
            ),
        )
        .required()
}
