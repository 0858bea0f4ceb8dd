use strum::{AsRefStr, Display, EnumString, IntoStaticStr, VariantArray};

pub const NAME_MAX_LEN: u64 = 100;
pub const MESSAGE_MAX_LEN: u64 = 2000;

/// Error code reported when a bounded field is longer than allowed.
pub const TOO_LONG: &str = "too_long";

/// Inputs of the contact form, keyed by their form name.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    IntoStaticStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    State,
    Pincode,
    Message,
}

/// Rendered three per row.
pub const FIELD_ROWS: [[Field; 3]; 2] = [
    [Field::Name, Field::Email, Field::Phone],
    [Field::State, Field::Pincode, Field::Message],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Select,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Select => "select",
        }
    }
}

/// One row of the validation table.
///
/// `pattern` mirrors the server rule so browsers can reject obvious mistakes before
/// posting; the server check in [`crate::ContactFormValues::validate_input`] is authoritative.
#[derive(Debug)]
pub struct FieldRule {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: InputKind,
    pub required: bool,
    pub pattern: Option<&'static str>,
    pub message: Option<&'static str>,
    pub too_long_message: Option<&'static str>,
}

static NAME: FieldRule = FieldRule {
    label: "Name",
    placeholder: "Your Name",
    kind: InputKind::Text,
    required: true,
    pattern: None,
    message: Some("Name is required"),
    too_long_message: Some("Name must be at most 100 characters"),
};

static EMAIL: FieldRule = FieldRule {
    label: "Email",
    placeholder: "yourname@gmail.com",
    kind: InputKind::Email,
    required: true,
    pattern: Some(r"[a-zA-Z0-9._%+\-]+@[gG][mM][aA][iI][lL]\.[cC][oO][mM]"),
    message: Some("Please enter a valid Gmail address"),
    too_long_message: None,
};

static PHONE: FieldRule = FieldRule {
    label: "Phone Number",
    placeholder: "10 digit number",
    kind: InputKind::Tel,
    required: true,
    pattern: Some("[0-9]{10}"),
    message: Some("Please enter a valid 10-digit phone number"),
    too_long_message: None,
};

static STATE: FieldRule = FieldRule {
    label: "State",
    placeholder: "Select State",
    kind: InputKind::Select,
    required: true,
    pattern: None,
    message: Some("Please select a state"),
    too_long_message: None,
};

static PINCODE: FieldRule = FieldRule {
    label: "Pin Code",
    placeholder: "6 digit pin code",
    kind: InputKind::Text,
    required: true,
    pattern: Some("[0-9]{6}"),
    message: Some("Please enter a valid 6-digit pin code"),
    too_long_message: None,
};

static MESSAGE: FieldRule = FieldRule {
    label: "Additional Message",
    placeholder: "Additional Message",
    kind: InputKind::Text,
    required: false,
    pattern: None,
    message: None,
    too_long_message: Some("Message must be at most 2000 characters"),
};

impl Field {
    pub fn rule(self) -> &'static FieldRule {
        match self {
            Field::Name => &NAME,
            Field::Email => &EMAIL,
            Field::Phone => &PHONE,
            Field::State => &STATE,
            Field::Pincode => &PINCODE,
            Field::Message => &MESSAGE,
        }
    }

    /// Message shown beside the field for a failed validation `code`.
    pub fn message_for(self, code: &str) -> &'static str {
        let rule = self.rule();

        if code == TOO_LONG {
            if let Some(message) = rule.too_long_message {
                return message;
            }
        }

        rule.message
            .or(rule.too_long_message)
            .unwrap_or("Invalid value")
    }
}
