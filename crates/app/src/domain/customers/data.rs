//! Customer Data

use thiserror::Error;

/// Delivery contact captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub address: String,
    pub postal_code: String,
}

/// Why a [`Contact`] was rejected. Always names the offending field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} is too long")]
    TooLong(&'static str),

    #[error("email is not a valid address")]
    InvalidEmail,
}

impl ContactError {
    /// The contact field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing(field) | Self::TooLong(field) => field,
            Self::InvalidEmail => "email",
        }
    }
}

impl Contact {
    /// Trim every field and check it is present and within its length limit.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError`] naming the first invalid field.
    pub fn normalized(self) -> Result<Self, ContactError> {
        let contact = Self {
            name: required("name", &self.name, 255)?,
            phone: required("phone", &self.phone, 20)?,
            email: required("email", &self.email, 255)?,
            city: required("city", &self.city, 100)?,
            address: required("address", &self.address, 255)?,
            postal_code: required("postal_code", &self.postal_code, 20)?,
        };

        if !contact.email.contains('@') {
            return Err(ContactError::InvalidEmail);
        }

        Ok(contact)
    }
}

fn required(field: &'static str, value: &str, max_len: usize) -> Result<String, ContactError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ContactError::Missing(field));
    }

    if value.chars().count() > max_len {
        return Err(ContactError::TooLong(field));
    }

    Ok(value.to_string())
}
