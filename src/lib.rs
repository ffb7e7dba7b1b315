//! PayPal IPN gateway - a thin integration layer between a merchant site
//! and PayPal's form-POST checkout flow.
//!
//! The gateway renders the self-submitting checkout form, receives PayPal's
//! asynchronous Instant Payment Notification (IPN), verifies it by echoing
//! it back to PayPal, and relays the outcome to an internal processing
//! endpoint.

pub mod config;
pub mod error;
pub mod fields;
pub mod forward;
pub mod handlers;
pub mod ipn;
pub mod logger;
pub mod pages;
pub mod state;
