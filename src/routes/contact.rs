use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use gurudev_enquiry::{
    ContactForm, ContactFormValues, FIELD_ROWS, Field, InputKind, MESSAGE_MAX_LEN, NAME_MAX_LEN,
    Region, SubmitOutcome,
};
use strum::VariantArray;

use crate::{
    routes::AppState,
    template::{Template, ToastErrorTemplate, ToastSuccessTemplate},
};

pub const SUBMITTED_MESSAGE: &str = "Enquiry submitted successfully";
pub const FAILED_MESSAGE: &str = "Failed to submit enquiry";
pub const BUSY_MESSAGE: &str = "Your enquiry is already being submitted";

/// One input control with its current value and inline error.
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input_type: &'static str,
    pub is_select: bool,
    pub required: bool,
    pub pattern: Option<&'static str>,
    pub max_length: Option<u64>,
    pub value: String,
    pub error: Option<&'static str>,
}

impl FieldView {
    fn new(form: &ContactForm, field: Field) -> Self {
        let rule = field.rule();

        Self {
            name: field.into(),
            label: rule.label,
            placeholder: rule.placeholder,
            input_type: rule.kind.as_str(),
            is_select: rule.kind == InputKind::Select,
            required: rule.required,
            pattern: rule.pattern,
            max_length: match field {
                Field::Name => Some(NAME_MAX_LEN),
                Field::Message => Some(MESSAGE_MAX_LEN),
                _ => None,
            },
            value: form.values.value(field).to_owned(),
            error: form.errors.get(field),
        }
    }

    pub fn is_selected(&self, region: &Region) -> bool {
        self.value == region.to_string()
    }
}

pub struct ContactFormView {
    pub rows: Vec<Vec<FieldView>>,
    pub regions: &'static [Region],
    /// Lifetime of toasts the page script raises on its own.
    pub toast_duration_ms: u64,
}

impl ContactFormView {
    pub fn new(form: &ContactForm, toast_duration_ms: u64) -> Self {
        Self {
            rows: FIELD_ROWS
                .iter()
                .map(|row| row.iter().map(|f| FieldView::new(form, *f)).collect())
                .collect(),
            regions: Region::VARIANTS,
            toast_duration_ms,
        }
    }
}

#[derive(askama::Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub form: ContactFormView,
    pub toast: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "partials/contact-form.html")]
pub struct ContactFormTemplate<'a> {
    pub form: &'a ContactFormView,
}

enum Toast {
    Success(&'static str),
    Error(&'static str),
}

impl Toast {
    fn to_string(&self, template: &Template, original: Option<&str>) -> String {
        match *self {
            Toast::Success(message) => template.to_string(ToastSuccessTemplate {
                original,
                message,
                description: None,
                duration_ms: template.toast_duration_ms(),
            }),
            Toast::Error(message) => template.to_string(ToastErrorTemplate {
                original,
                message,
                description: Some("Please check your details and try again"),
                duration_ms: template.toast_duration_ms(),
            }),
        }
    }
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(ContactTemplate {
        form: ContactFormView::new(&ContactForm::default(), template.toast_duration_ms()),
        toast: None,
    })
}

#[tracing::instrument(skip_all, fields(partial = template.is_partial()))]
pub async fn action(
    template: Template,
    State(app_state): State<AppState>,
    Form(values): Form<ContactFormValues>,
) -> impl IntoResponse {
    let mut form = ContactForm::new(values);
    let outcome = form
        .submit(
            app_state.submitter.as_ref(),
            &app_state.in_flight,
            app_state.config.enquiry.submit_timeout(),
        )
        .await;

    let (status, toast) = match outcome {
        SubmitOutcome::Invalid => (StatusCode::UNPROCESSABLE_ENTITY, None),
        SubmitOutcome::Submitted(_) => (StatusCode::OK, Some(Toast::Success(SUBMITTED_MESSAGE))),
        SubmitOutcome::Failed => (StatusCode::OK, Some(Toast::Error(FAILED_MESSAGE))),
        SubmitOutcome::Busy => (StatusCode::CONFLICT, Some(Toast::Error(BUSY_MESSAGE))),
    };

    let view = ContactFormView::new(&form, template.toast_duration_ms());

    if template.is_partial() {
        let fragment = template.to_string(ContactFormTemplate { form: &view });
        let body = match toast {
            Some(toast) => toast.to_string(&template, Some(&fragment)),
            None => fragment,
        };

        return (status, Html(body)).into_response();
    }

    let response = template.render(ContactTemplate {
        toast: toast.map(|toast| toast.to_string(&template, None)),
        form: view,
    });

    with_status(response, status)
}

/// Keeps render failures as they are.
fn with_status(mut response: Response, status: StatusCode) -> Response {
    if response.status().is_success() {
        *response.status_mut() = status;
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_view_layout() {
        let view = ContactFormView::new(&ContactForm::default(), 4000);

        assert_eq!(view.rows.len(), 2);
        assert!(view.rows.iter().all(|row| row.len() == 3));
        assert_eq!(view.rows[0][0].name, "name");
        assert_eq!(view.rows[1][0].name, "state");
        assert!(view.rows[1][0].is_select);
        assert!(!view.rows[1][2].required);
        assert_eq!(view.rows[1][2].max_length, Some(MESSAGE_MAX_LEN));
        assert_eq!(view.regions.len(), 35);
        assert_eq!(view.toast_duration_ms, 4000);
    }

    #[test]
    fn test_form_view_keeps_values_and_errors() {
        let mut form = ContactForm::new(ContactFormValues {
            state: "Kerala".to_owned(),
            pincode: "12345".to_owned(),
            ..Default::default()
        });
        form.errors = form.values.validate_input().unwrap_err();

        let view = ContactFormView::new(&form, 4000);
        let state = &view.rows[1][0];
        let pincode = &view.rows[1][1];

        assert!(state.is_selected(&Region::Kerala));
        assert!(!state.is_selected(&Region::Goa));
        assert_eq!(state.error, None);
        assert_eq!(pincode.value, "12345");
        assert_eq!(pincode.error, Some("Please enter a valid 6-digit pin code"));
    }
}
