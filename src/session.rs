//! Session shell: identity, greeting header and sign-out around the view.

use std::fmt;
use std::sync::Arc;

use crate::core::{BlueprintView, Clock};

pub const APP_TITLE: &str = "Healthcare Blueprint Generator";

/// Identity handed in by the host; only the display name is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

/// Externally supplied sign-out action.
pub type SignOutFn = Box<dyn FnMut() + Send>;

/// Fixed header contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: &'static str,
    pub greeting: String,
    pub show_sign_out: bool,
}

pub struct SessionShell {
    user: User,
    authenticated: bool,
    sign_out: Option<SignOutFn>,
    signed_out: bool,
    view: BlueprintView,
}

impl SessionShell {
    /// Builds the shell; a missing identity falls back to `guest_name`.
    pub fn new(
        user: Option<User>,
        sign_out: Option<SignOutFn>,
        guest_name: &str,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let authenticated = user.is_some();
        let user = user.unwrap_or_else(|| User::new(guest_name));
        let view = BlueprintView::new(user.clone(), clock);
        Self {
            user,
            authenticated,
            sign_out,
            signed_out: false,
            view,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn is_guest(&self) -> bool {
        !self.authenticated
    }

    pub fn greeting(&self) -> String {
        format!("Hello, {}", self.user.display_name())
    }

    pub fn header(&self) -> Header {
        Header {
            title: APP_TITLE,
            greeting: self.greeting(),
            show_sign_out: self.can_sign_out(),
        }
    }

    pub fn can_sign_out(&self) -> bool {
        self.sign_out.is_some() && !self.signed_out
    }

    /// Invokes the supplied sign-out action. Returns `false` when none exists.
    pub fn sign_out(&mut self) -> bool {
        if self.signed_out {
            return false;
        }
        match self.sign_out.as_mut() {
            Some(action) => {
                action();
                self.signed_out = true;
                tracing::info!(user = %self.user, "signed out");
                true
            }
            None => {
                tracing::debug!("sign-out requested without a sign-out capability");
                false
            }
        }
    }

    pub fn is_signed_out(&self) -> bool {
        self.signed_out
    }

    pub fn view(&self) -> &BlueprintView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut BlueprintView {
        &mut self.view
    }
}
