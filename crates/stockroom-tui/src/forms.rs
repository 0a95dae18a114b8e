//! Form state for the login, register and product pages.
//!
//! Each form owns its field buffers, the focused field and the last set of
//! validation messages. Submitting is a two step affair: the form builds and
//! validates the request body, the app sends it.

use stockroom_core::models::{Credentials, Field, Product, ProductDraft, ValidationErrors};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

const MAX_NAME_LENGTH: usize = 100;

const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Digits plus one decimal point is plenty for a price.
const MAX_PRICE_LENGTH: usize = 12;

// ============================================================================
// Input validation helpers
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Price input only takes digits and a single decimal point.
pub fn can_add_price_char(current: &str, c: char) -> bool {
    if current.chars().count() >= MAX_PRICE_LENGTH {
        return false;
    }
    c.is_ascii_digit() || (c == '.' && !current.contains('.'))
}

// ============================================================================
// Credentials form (login and register)
// ============================================================================

/// Focus state shared by the login and register forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsFocus {
    Username,
    Password,
    Button,
}

impl CredentialsFocus {
    pub fn next(self) -> Self {
        match self {
            CredentialsFocus::Username => CredentialsFocus::Password,
            CredentialsFocus::Password => CredentialsFocus::Button,
            CredentialsFocus::Button => CredentialsFocus::Username,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CredentialsFocus::Username => CredentialsFocus::Button,
            CredentialsFocus::Password => CredentialsFocus::Username,
            CredentialsFocus::Button => CredentialsFocus::Password,
        }
    }
}

/// Which rules a credentials form checks before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsKind {
    Login,
    Register,
}

#[derive(Debug, Clone)]
pub struct CredentialsForm {
    pub kind: CredentialsKind,
    pub username: String,
    pub password: String,
    pub focus: CredentialsFocus,
    pub errors: ValidationErrors,
    /// Set while the request is in flight; input is ignored meanwhile.
    pub submitting: bool,
}

impl CredentialsForm {
    pub fn new(kind: CredentialsKind) -> Self {
        Self {
            kind,
            username: String::new(),
            password: String::new(),
            focus: CredentialsFocus::Username,
            errors: ValidationErrors::new(),
            submitting: false,
        }
    }

    /// Login form with the username filled in from the last session.
    pub fn login(last_username: Option<&str>) -> Self {
        let mut form = Self::new(CredentialsKind::Login);
        if let Some(username) = last_username {
            form.username = username.to_string();
            form.focus = CredentialsFocus::Password;
        }
        form
    }

    pub fn register() -> Self {
        Self::new(CredentialsKind::Register)
    }

    fn focused_field(&self) -> Option<Field> {
        match self.focus {
            CredentialsFocus::Username => Some(Field::Username),
            CredentialsFocus::Password => Some(Field::Password),
            CredentialsFocus::Button => None,
        }
    }

    /// Type a character into the focused field. Editing a field clears its
    /// error message.
    pub fn push_char(&mut self, c: char) {
        let accepted = match self.focus {
            CredentialsFocus::Username if can_add_username_char(self.username.chars().count(), c) => {
                self.username.push(c);
                true
            }
            CredentialsFocus::Password if can_add_password_char(self.password.chars().count(), c) => {
                self.password.push(c);
                true
            }
            _ => false,
        };
        if accepted {
            self.clear_focused_error();
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            CredentialsFocus::Username => {
                self.username.pop();
            }
            CredentialsFocus::Password => {
                self.password.pop();
            }
            CredentialsFocus::Button => return,
        }
        self.clear_focused_error();
    }

    fn clear_focused_error(&mut self) {
        if let Some(field) = self.focused_field() {
            self.errors.clear_field(field);
        }
    }

    /// Validate and build the request body. On failure the messages are kept
    /// on the form and `None` is returned.
    pub fn submit(&mut self) -> Option<Credentials> {
        let credentials = Credentials::new(self.username.trim(), self.password.clone());
        let checked = match self.kind {
            CredentialsKind::Login => credentials.validate_login(),
            CredentialsKind::Register => credentials.validate_registration(),
        };
        match checked {
            Ok(()) => {
                self.errors = ValidationErrors::new();
                Some(credentials)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

// ============================================================================
// Product form (new and edit)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFocus {
    Name,
    Description,
    Price,
    Save,
    Cancel,
}

impl ProductFocus {
    pub fn next(self) -> Self {
        match self {
            ProductFocus::Name => ProductFocus::Description,
            ProductFocus::Description => ProductFocus::Price,
            ProductFocus::Price => ProductFocus::Save,
            ProductFocus::Save => ProductFocus::Cancel,
            ProductFocus::Cancel => ProductFocus::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ProductFocus::Name => ProductFocus::Cancel,
            ProductFocus::Description => ProductFocus::Name,
            ProductFocus::Price => ProductFocus::Description,
            ProductFocus::Save => ProductFocus::Price,
            ProductFocus::Cancel => ProductFocus::Save,
        }
    }

    fn field(self) -> Option<Field> {
        match self {
            ProductFocus::Name => Some(Field::Name),
            ProductFocus::Description => Some(Field::Description),
            ProductFocus::Price => Some(Field::Price),
            ProductFocus::Save | ProductFocus::Cancel => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductForm {
    /// `None` creates a product, `Some(id)` updates one.
    pub product_id: Option<i64>,
    pub name: String,
    pub description: String,
    /// Kept as typed so a half-entered price survives redraws.
    pub price: String,
    pub focus: ProductFocus,
    pub errors: ValidationErrors,
    /// Edit forms start out loading the product.
    pub loading: bool,
    pub submitting: bool,
}

impl ProductForm {
    pub fn new_product() -> Self {
        Self {
            product_id: None,
            name: String::new(),
            description: String::new(),
            price: String::new(),
            focus: ProductFocus::Name,
            errors: ValidationErrors::new(),
            loading: false,
            submitting: false,
        }
    }

    pub fn edit(id: i64) -> Self {
        Self {
            product_id: Some(id),
            loading: true,
            ..Self::new_product()
        }
    }

    pub fn is_edit(&self) -> bool {
        self.product_id.is_some()
    }

    /// Fill the fields from a product fetched for editing.
    pub fn load(&mut self, product: &Product) {
        let draft = ProductDraft::from(product);
        self.name = draft.name;
        self.description = draft.description;
        self.price = format_price_input(draft.price);
        self.loading = false;
    }

    pub fn push_char(&mut self, c: char) {
        let accepted = match self.focus {
            ProductFocus::Name if self.name.chars().count() < MAX_NAME_LENGTH && is_valid_input_char(c) => {
                self.name.push(c);
                true
            }
            ProductFocus::Description
                if self.description.chars().count() < MAX_DESCRIPTION_LENGTH && is_valid_input_char(c) =>
            {
                self.description.push(c);
                true
            }
            ProductFocus::Price if can_add_price_char(&self.price, c) => {
                self.price.push(c);
                true
            }
            _ => false,
        };
        if accepted {
            self.clear_focused_error();
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            ProductFocus::Name => {
                self.name.pop();
            }
            ProductFocus::Description => {
                self.description.pop();
            }
            ProductFocus::Price => {
                self.price.pop();
            }
            ProductFocus::Save | ProductFocus::Cancel => return,
        }
        self.clear_focused_error();
    }

    fn clear_focused_error(&mut self) {
        if let Some(field) = self.focus.field() {
            self.errors.clear_field(field);
        }
    }

    /// Validate and build the request body.
    pub fn submit(&mut self) -> Option<ProductDraft> {
        let parsed_price = self.price.trim().parse::<f64>().ok();
        let draft = ProductDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: parsed_price.unwrap_or(f64::NAN),
        };

        let mut errors = match draft.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if parsed_price.is_none() && !self.price.trim().is_empty() {
            errors.clear_field(Field::Price);
            errors.add(Field::Price, "Price must be a number");
        }

        let valid = errors.is_empty();
        self.errors = errors;
        valid.then_some(draft)
    }
}

/// Render a stored price back into the input buffer without noise like
/// "12.500000".
fn format_price_input(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        let text = format!("{:.2}", price);
        text.trim_end_matches('0').to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
