use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;

/// Header sent by the page script when it only wants the swapped fragment back.
pub const PARTIAL_HEADER: &str = "ts-request";

pub struct Template {
    partial: bool,
    toast_duration_ms: u64,
}

impl Template {
    pub fn new(partial: bool, toast_duration_ms: u64) -> Self {
        Self {
            partial,
            toast_duration_ms,
        }
    }

    /// True when the request came from the page script rather than a plain form post.
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn toast_duration_ms(&self) -> u64 {
        self.toast_duration_ms
    }

    pub fn to_string<T: askama::Template>(&self, template: T) -> String {
        match template.render() {
            Ok(html) => html,
            Err(err) => format!("Failed to render template. Error: {err}"),
        }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match template.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!("Failed to render template: {err}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {err}"),
                )
                    .into_response()
            }
        }
    }
}

impl FromRequestParts<crate::routes::AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::routes::AppState,
    ) -> Result<Self, Self::Rejection> {
        let partial = parts
            .headers
            .get(PARTIAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Template::new(
            partial,
            state.config.enquiry.toast_duration_ms,
        ))
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "partials/toast-success.html")]
pub struct ToastSuccessTemplate<'a> {
    pub original: Option<&'a str>,
    pub message: &'a str,
    pub description: Option<&'a str>,
    pub duration_ms: u64,
}

#[derive(askama::Template)]
#[template(path = "partials/toast-error.html")]
pub struct ToastErrorTemplate<'a> {
    pub original: Option<&'a str>,
    pub message: &'a str,
    pub description: Option<&'a str>,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_wraps_original_fragment() {
        let template = Template::new(true, 1500);
        let html = template.to_string(ToastSuccessTemplate {
            original: Some("<form data-enquiry-form></form>"),
            message: "Saved <ok>",
            description: None,
            duration_ms: template.toast_duration_ms(),
        });

        assert!(html.starts_with("<form data-enquiry-form></form>"));
        assert!(html.contains("Saved &#60;ok&#62;"));
        assert!(!html.contains("<ok>"));
        assert!(html.contains(r#"data-toast-duration="1500""#));
    }

    #[test]
    fn test_error_toast_description() {
        let template = Template::new(false, 4000);
        let html = template.to_string(ToastErrorTemplate {
            original: None,
            message: "Failed",
            description: Some("Try again"),
            duration_ms: template.toast_duration_ms(),
        });

        assert!(html.contains(r#"data-toast="error""#));
        assert!(html.contains("Try again"));
    }
}
