pub mod asset;
pub mod cache;
pub mod conf;
pub mod context;
pub mod dispatch;
pub mod handler;
pub mod manifest;
pub mod providers;
pub mod routes;
pub mod storefront;
pub mod work;
