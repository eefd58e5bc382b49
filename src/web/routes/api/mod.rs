pub mod signup;
pub mod signups;

pub use signup::signup;
pub use signups::{signup_by_id, signups_list};
