//! Record checks run before a registration is committed.
//!
//! - [`schema`]: required fields and declared types
//! - [`rules`]: age range and parent email format
//! - [`duplicate`]: identity match against committed records
//!
//! Every check is a pure function; none of them mutate the record or the
//! stored data.

pub mod duplicate;
pub mod rules;
pub mod schema;

pub use duplicate::{DuplicateKeying, is_duplicate};
pub use rules::{AgeRange, EMAIL_REGEX, RuleConfig, check_age, check_email, is_valid_email};
pub use schema::validate_record;
