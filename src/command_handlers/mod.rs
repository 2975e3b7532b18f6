pub mod catalog;
pub mod dispatch;
pub mod install;
pub mod search;
