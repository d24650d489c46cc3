pub mod messages;
pub mod partners;
pub mod sessions;
pub mod utils;
