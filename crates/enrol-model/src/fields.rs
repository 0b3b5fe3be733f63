//! Column names of the registration sheet.

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const STATE: &str = "State";
pub const PARENT_EMAIL: &str = "Parent Email";
pub const ORGANIZATION_NAME: &str = "Organization Name";

/// Fields every registration must carry, in sheet order.
pub const REQUIRED: [&str; 7] = [
    FIRST_NAME,
    LAST_NAME,
    AGE,
    GENDER,
    STATE,
    PARENT_EMAIL,
    ORGANIZATION_NAME,
];

/// Fields that identify a registration for duplicate detection.
pub const IDENTITY: [&str; 3] = [PARENT_EMAIL, FIRST_NAME, LAST_NAME];
