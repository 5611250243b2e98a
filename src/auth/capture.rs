// Credential capture from the login surface.
use super::{Auth, Credentials};
use tracing::debug;

/// Animation bound to `:-webkit-autofill` in the stylesheet. Password
/// managers fill fields without firing input events, but the animation
/// still runs.
pub const AUTOFILL_ANIMATION: &str = "onAutoFillStart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    Password,
}

impl CredentialField {
    pub fn autocomplete(self) -> &'static str {
        match self {
            CredentialField::Username => "username",
            CredentialField::Password => "current-password",
        }
    }

    fn other(self) -> Self {
        match self {
            CredentialField::Username => CredentialField::Password,
            CredentialField::Password => CredentialField::Username,
        }
    }
}

/// Live values of the login inputs, as opposed to the values held in state.
pub trait FieldReader {
    fn read(&self, field: CredentialField) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// A field changed; keep collecting.
    Edited(Credentials),
    /// Credentials arrived complete and should be accepted as-is.
    Submitted(Credentials),
}

/// A place credentials come from.
pub trait CredentialSource {
    fn capture(&self, current: &Auth) -> Option<Capture>;
}

fn read_or_held<R>(fields: &R, field: CredentialField, current: &Auth) -> String
where
    R: FieldReader + ?Sized,
{
    fields.read(field).unwrap_or_else(|| {
        current
            .credentials()
            .map(|credentials| match field {
                CredentialField::Username => credentials.username.clone(),
                CredentialField::Password => credentials.password.clone(),
            })
            .unwrap_or_default()
    })
}

/// A typed change to one of the login fields.
pub struct FormInput<'a, R: FieldReader + ?Sized> {
    pub field: CredentialField,
    pub value: String,
    pub fields: &'a R,
}

impl<R: FieldReader + ?Sized> CredentialSource for FormInput<'_, R> {
    fn capture(&self, current: &Auth) -> Option<Capture> {
        let other = read_or_held(self.fields, self.field.other(), current);
        let credentials = match self.field {
            CredentialField::Username => Credentials::new(self.value.clone(), other),
            CredentialField::Password => Credentials::new(other, self.value.clone()),
        };
        Some(Capture::Edited(credentials))
    }
}

/// An `animationend` seen on the password field.
pub struct AutofillObserver<'a, R: FieldReader + ?Sized> {
    pub animation_name: String,
    pub fields: &'a R,
}

impl<R: FieldReader + ?Sized> CredentialSource for AutofillObserver<'_, R> {
    fn capture(&self, current: &Auth) -> Option<Capture> {
        if self.animation_name != AUTOFILL_ANIMATION {
            return None;
        }
        debug!("password manager autofill detected");
        Some(Capture::Submitted(Credentials::new(
            read_or_held(self.fields, CredentialField::Username, current),
            read_or_held(self.fields, CredentialField::Password, current),
        )))
    }
}

impl Auth {
    /// Fold a capture into the current state. Captures only matter while
    /// the login surface is up, so determined states ignore them.
    pub fn apply_capture(self, capture: Capture) -> Auth {
        match (self, capture) {
            (Auth::Unfinished(_), Capture::Edited(credentials)) => Auth::Unfinished(credentials),
            (Auth::Unknown | Auth::Unfinished(_), Capture::Submitted(credentials)) => {
                Auth::Http(credentials)
            }
            (current, _) => current,
        }
    }
}

/// Reads the login inputs straight from the document by their
/// `autocomplete` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomFields;

impl FieldReader for DomFields {
    #[cfg(target_arch = "wasm32")]
    fn read(&self, field: CredentialField) -> Option<String> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let selector = format!("input[autocomplete='{}']", field.autocomplete());
        let element = document.query_selector(&selector).ok()??;
        let input = element.dyn_into::<web_sys::HtmlInputElement>().ok()?;
        Some(input.value())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read(&self, _field: CredentialField) -> Option<String> {
        None
    }
}
