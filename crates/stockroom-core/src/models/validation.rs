use std::fmt;

/// A form field that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    Name,
    Description,
    Price,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldError {
    field: Field,
    message: String,
}

/// Per-field validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. The first message for a field wins.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Drop the message for a field, e.g. once the user edits it.
    pub fn clear_field(&mut self, field: Field) {
        self.errors.retain(|e| e.field != field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::Name, "Product name is required");
        errors.add(Field::Name, "Product name must be at least 2 characters");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Name), Some("Product name is required"));
    }

    #[test]
    fn test_clear_field() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::Username, "Username is required");
        errors.add(Field::Password, "Password is required");
        errors.clear_field(Field::Username);
        assert_eq!(errors.get(Field::Username), None);
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
    }

    #[test]
    fn test_into_result_and_display() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add(Field::Price, "Price must be greater than 0");
        errors.add(Field::Name, "Product name is required");
        let err = errors.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Price must be greater than 0; Product name is required"
        );
    }
}
