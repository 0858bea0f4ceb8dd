use std::{borrow::Cow, collections::BTreeMap, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{Field, MESSAGE_MAX_LEN, NAME_MAX_LEN, Region, TOO_LONG};

static GMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@gmail\.com$").expect("gmail address regex")
});
static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone number regex"));
static PIN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("pin code regex"));

fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }

    if value.chars().count() as u64 > NAME_MAX_LEN {
        return Err(ValidationError::new(TOO_LONG));
    }

    Ok(())
}

fn validate_state(value: &str) -> Result<(), ValidationError> {
    Region::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("required"))
}

fn validate_message(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() as u64 > MESSAGE_MAX_LEN {
        return Err(ValidationError::new(TOO_LONG));
    }

    Ok(())
}

/// Values as posted by the contact form. Missing inputs deserialize to empty strings.
#[derive(Validate, Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ContactFormValues {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(regex(path = *GMAIL_ADDRESS))]
    pub email: String,
    #[validate(regex(path = *PHONE_NUMBER))]
    pub phone: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(regex(path = *PIN_CODE))]
    pub pincode: String,
    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

impl ContactFormValues {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::State => &self.state,
            Field::Pincode => &self.pincode,
            Field::Message => &self.message,
        }
    }

    /// Trims the free-text fields. Patterned fields are checked as posted, like the
    /// browser's `pattern` attribute does.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            message: self.message.trim().to_owned(),
            ..self.clone()
        }
    }

    /// Checks every field and builds the submittable record when all constraints hold.
    pub fn validate_input(&self) -> Result<EnquiryInput, FieldErrors> {
        let values = self.trimmed();

        if let Err(errors) = values.validate() {
            return Err(FieldErrors::from(errors));
        }

        let Ok(state) = Region::from_str(&values.state) else {
            return Err(FieldErrors::single(Field::State));
        };

        Ok(EnquiryInput {
            name: values.name,
            email: values.email,
            phone: values.phone,
            state,
            pincode: values.pincode,
            message: values.message,
        })
    }
}

/// Inline messages keyed by field, in form order.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    fn single(field: Field) -> Self {
        let mut errors = Self::default();
        errors.0.insert(field, field.message_for(""));
        errors
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();

        for (name, errors) in errors.field_errors() {
            let Ok(field) = Field::from_str(&name) else {
                continue;
            };

            let code = errors
                .first()
                .map(|err| err.code.clone())
                .unwrap_or(Cow::Borrowed(""));

            fields.insert(field, field.message_for(&code));
        }

        Self(fields)
    }
}

/// A contact enquiry that passed every field constraint.
///
/// Only [`ContactFormValues::validate_input`] builds one, so holding an `EnquiryInput`
/// means it is ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnquiryInput {
    name: String,
    email: String,
    phone: String,
    state: Region,
    pincode: String,
    message: String,
}

impl EnquiryInput {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn state(&self) -> Region {
        self.state
    }

    pub fn pincode(&self) -> &str {
        &self.pincode
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Identifies the same person submitting the same enquiry twice.
    pub fn fingerprint(&self) -> String {
        format!("{}|{}", self.email.to_lowercase(), self.phone)
    }
}
