//! Fields every source shares.

use crate::builder::{number, object, string};
use crate::message::ViolationKind;
use crate::rule::Schema;

/// The base object rule: a required project name of 3 to 50 characters.
#[must_use]
pub fn schema() -> Schema {
    object().field("projectName", project_name())
}

fn project_name() -> Schema {
    string()
        .min_len(3)
        .max_len(50)
        .required()
        .with_messages([
            (ViolationKind::StringEmpty, "Project name is required"),
            (ViolationKind::Required, "Project name is required"),
            (ViolationKind::StringMin, "Project name must be at least 3 characters"),
            (ViolationKind::StringMax, "Project name cannot exceed 50 characters"),
        ])
}

/// Daily spend cap, at least $5. Shared by the primary and secondary sources.
#[must_use]
pub fn daily_budget() -> Schema {
    number().min(5.0).required().with_messages([
        (ViolationKind::NumberBase, "Daily budget must be a number"),
        (ViolationKind::NumberMin, "Daily budget must be at least $5"),
        (ViolationKind::Required, "Daily budget is required"),
    ])
}
