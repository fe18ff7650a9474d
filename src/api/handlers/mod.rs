//! HTTP request handlers.

pub mod create_url;
pub mod not_found;
pub mod redirect;

pub use create_url::create_url_handler;
pub use not_found::not_found_handler;
pub use redirect::redirect_handler;
