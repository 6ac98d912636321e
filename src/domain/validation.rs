use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidMsisdn { input: String },
    InvalidPhoneNumber { input: String },
    InvalidEmail { input: String },
    InvalidUrl { input: String },
    InvalidHex { field: &'static str },
    PageSizeOutOfRange { min: u32, max: u32, actual: u32 },
    InvalidAmount { actual: f64 },
    InvalidDateRange { from: u64, to: u64 },
    EmptyUpdate { resource: &'static str },
    SameWallet { wallet: u64 },
    WrongRecipients {
        expected: &'static str,
        actual: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidMsisdn { input } => write!(f, "invalid msisdn: {input}"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidEmail { input } => write!(f, "invalid email address: {input}"),
            Self::InvalidUrl { input } => write!(f, "invalid callback url: {input}"),
            Self::InvalidHex { field } => write!(f, "{field} must be an even-length hex string"),
            Self::PageSizeOutOfRange { min, max, actual } => {
                write!(f, "page size out of range: {actual} (expected {min}..={max})")
            }
            Self::InvalidAmount { actual } => {
                write!(f, "amount must be a finite positive number: {actual}")
            }
            Self::InvalidDateRange { from, to } => {
                write!(f, "from_date {from} is after to_date {to}")
            }
            Self::EmptyUpdate { resource } => write!(f, "{resource} update changes nothing"),
            Self::SameWallet { wallet } => {
                write!(f, "cannot transfer from wallet {wallet} to itself")
            }
            Self::WrongRecipients { expected, actual } => {
                write!(f, "recipients must be {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
