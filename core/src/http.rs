//! Plain-data description of an outgoing API request.
//!
//! # Design
//! `TrackerClient` builds `HttpRequest` values before handing them to
//! reqwest for execution. Keeping the request as plain data makes the exact
//! method, URL, headers, and body assertable in unit tests without ever
//! touching the network.

use std::fmt;

/// HTTP method for a request. The tracker API only uses GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `TrackerClient` request builders; executed by the client's
/// dispatch path. Headers are kept in insertion order.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_displays_as_wire_verb() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
