//! HTTP Client Factory
//!
//! One shared reqwest client for the whole process. No application-level
//! timeout: the workflow relies on the transport's defaults, and calls are
//! never issued concurrently.

/// Build the `reqwest::Client` used for all Gemini calls.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("failed to build reqwest client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let _client = build_http_client();
    }
}
