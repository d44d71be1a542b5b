use crate::{ErrorKind, Validation};
use http::{Method, StatusCode};
use metrics::{Gauge, SharedString};
use std::time::Instant;

/// Times one API call and holds its slot in the in-flight gauge.
pub(crate) struct RequestTimer {
    method: SharedString,
    resource: &'static str,
    validation: &'static str,
    started: Instant,
    inflight: Gauge,
}

impl RequestTimer {
    pub(crate) fn start(method: &Method, resource: Option<&str>, validation: Validation) -> Self {
        let inflight = metrics::gauge!("gumroad_sdk_inflight");
        inflight.increment(1.0);
        Self {
            method: method_label(method),
            resource: resource_label(resource),
            validation: validation_label(validation),
            started: Instant::now(),
            inflight,
        }
    }

    /// `status` is `None` when no response arrived.
    pub(crate) fn finish(self, status: Option<StatusCode>, error: Option<ErrorKind>) {
        let status_class = status.map_or("none", status_class);

        metrics::counter!(
            "gumroad_sdk_requests_total",
            "method" => self.method.clone(),
            "resource" => self.resource,
            "status_class" => status_class
        )
        .increment(1);
        metrics::histogram!(
            "gumroad_sdk_request_duration_seconds",
            "method" => self.method.clone(),
            "resource" => self.resource
        )
        .record(self.started.elapsed());

        if let Some(kind) = error {
            metrics::counter!(
                "gumroad_sdk_errors_total",
                "resource" => self.resource,
                "validation" => self.validation,
                "kind" => error_kind_label(kind)
            )
            .increment(1);
        }
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        self.inflight.decrement(1.0);
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum SessionEvent {
    Login,
    Logout,
    /// Scoped release could not log out; the token was dropped locally.
    ReleaseFailed,
}

pub(crate) fn record_session(event: SessionEvent) {
    let event = match event {
        SessionEvent::Login => "login",
        SessionEvent::Logout => "logout",
        SessionEvent::ReleaseFailed => "release_failed",
    };
    metrics::counter!("gumroad_sdk_session_events_total", "event" => event).increment(1);
}

fn resource_label(resource: Option<&str>) -> &'static str {
    match resource {
        Some("links") => "links",
        Some("sessions") => "sessions",
        _ => "other",
    }
}

fn validation_label(validation: Validation) -> &'static str {
    match validation {
        Validation::Strict => "strict",
        Validation::Permissive => "permissive",
    }
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

fn error_kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Http => "http",
        ErrorKind::Api => "api",
        ErrorKind::Transport => "transport",
        ErrorKind::Decode => "decode",
        ErrorKind::InvalidConfig => "invalid_config",
    }
}

// Custom verbs share one label.
fn method_label(method: &Method) -> SharedString {
    match *method {
        Method::GET | Method::HEAD | Method::POST | Method::PUT | Method::PATCH | Method::DELETE => {
            SharedString::from(method.as_str().to_owned())
        }
        _ => SharedString::const_str("OTHER"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_resources_collapse_into_one_label() {
        assert_eq!(resource_label(Some("links")), "links");
        assert_eq!(resource_label(Some("sessions")), "sessions");
        assert_eq!(resource_label(Some("sales")), "other");
        assert_eq!(resource_label(None), "other");
    }

    #[test]
    fn redirects_are_their_own_status_class() {
        assert_eq!(status_class(StatusCode::FOUND), "3xx");
        assert_eq!(status_class(StatusCode::BAD_GATEWAY), "5xx");
    }
}
