use std::time::Duration;

pub const BASE_URL_REGISTRY: &str = "https://pypi.org/pypi";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
