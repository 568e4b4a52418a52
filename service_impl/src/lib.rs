pub mod clock;
pub mod config;
pub mod export;
pub mod month_html;
pub mod pass;
pub mod permission;
pub mod user_info;
pub mod uuid_service;
pub mod work;

mod test;
