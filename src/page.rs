//! Page sections of the single-page front-end

pub const PAGES: [&str; 6] = ["home", "login", "profile", "badges", "chat", "notes"];

/// Which of the two auth forms is showing on the login page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Signup,
}

#[derive(Debug, Clone)]
pub struct PageNavigator {
    pages: Vec<String>,
    active: Option<usize>,
    auth_form: AuthForm,
}

impl PageNavigator {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            active: None,
            auth_form: AuthForm::Login,
        }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.pages[i].as_str())
    }

    pub fn is_active(&self, page_id: &str) -> bool {
        self.active() == Some(page_id)
    }

    /// Deactivate every page, then activate `page_id` if it exists.
    /// Returns whether a page is now active.
    pub fn show_page(&mut self, page_id: &str) -> bool {
        self.active = self.pages.iter().position(|p| p == page_id);
        self.active.is_some()
    }

    pub fn auth_form(&self) -> AuthForm {
        self.auth_form
    }

    pub fn show_signup(&mut self) {
        self.auth_form = AuthForm::Signup;
    }

    pub fn show_login(&mut self) {
        self.auth_form = AuthForm::Login;
    }
}

impl Default for PageNavigator {
    fn default() -> Self {
        let mut nav = Self::new(PAGES);
        nav.show_page("home");
        nav
    }
}
