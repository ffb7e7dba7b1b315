use std::env;
use std::path::PathBuf;

use crate::logger::{LogMode, Verbosity};

pub const PAYPAL_PRODUCTION_URL: &str = "https://www.paypal.com/cgi-bin/webscr";
pub const PAYPAL_SANDBOX_URL: &str = "https://www.sandbox.paypal.com/cgi-bin/webscr";

/// Which PayPal endpoint the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instance {
    Production,
    Sandbox,
}

impl Instance {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Instance::Production),
            "sandbox" => Some(Instance::Sandbox),
            _ => None,
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            Instance::Production => PAYPAL_PRODUCTION_URL,
            Instance::Sandbox => PAYPAL_SANDBOX_URL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub instance: Instance,
    pub log_mode: LogMode,
    pub log_level: Verbosity,
    pub log_file: PathBuf,
    /// Client-visible delay before auto-submit/redirect, in seconds.
    pub load_time_secs: u64,
    pub cart_url: String,
    pub orders_url: String,
    pub processing_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self {
            host,
            port,
            instance: parse_env("PAYPAL_INSTANCE", Instance::from_str, Instance::Sandbox),
            log_mode: parse_env("PAYPAL_LOG_MODE", LogMode::from_str, LogMode::Console),
            log_level: parse_env("PAYPAL_LOG_LEVEL", Verbosity::from_str, Verbosity::Low),
            log_file: env::var("PAYPAL_LOG_FILE")
                .unwrap_or_else(|_| "PayPal-IPN-Integration-Logs.txt".to_string())
                .into(),
            load_time_secs: env::var("PAYPAL_LOAD_TIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            cart_url: env::var("CART_URL").unwrap_or_default(),
            orders_url: env::var("ORDERS_URL").unwrap_or_default(),
            processing_url: env::var("PROCESSING_URL").unwrap_or_default(),
        }
    }

    pub fn paypal_url(&self) -> &'static str {
        self.instance.url()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T>(name: &str, parse: impl Fn(&str) -> Option<T>, default: T) -> T {
    match env::var(name) {
        Ok(value) => parse(&value).unwrap_or_else(|| {
            tracing::warn!("Unrecognized {} value {:?}, using default", name, value);
            default
        }),
        Err(_) => default,
    }
}
