/// The set of views a controller chooses from.
///
/// `primary` is shown when idle and while values arrive, and stands in for
/// `success` on completion. A missing `loading` or `error` template means the
/// corresponding transition leaves the current view on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Templates<Tpl> {
    pub primary: Tpl,
    pub loading: Option<Tpl>,
    pub error: Option<Tpl>,
    pub success: Option<Tpl>,
}

impl<Tpl> Templates<Tpl> {
    pub fn new(primary: Tpl) -> Self {
        Self {
            primary,
            loading: None,
            error: None,
            success: None,
        }
    }

    pub fn with_loading(self, loading: Tpl) -> Self {
        Self {
            loading: Some(loading),
            ..self
        }
    }

    pub fn with_error(self, error: Tpl) -> Self {
        Self {
            error: Some(error),
            ..self
        }
    }

    pub fn with_success(self, success: Tpl) -> Self {
        Self {
            success: Some(success),
            ..self
        }
    }

    pub fn for_idle(&self) -> &Tpl {
        &self.primary
    }

    pub fn for_loading(&self) -> Option<&Tpl> {
        self.loading.as_ref()
    }

    pub fn for_value(&self) -> &Tpl {
        &self.primary
    }

    pub fn for_error(&self) -> Option<&Tpl> {
        self.error.as_ref()
    }

    pub fn for_completed(&self) -> &Tpl {
        self.success.as_ref().unwrap_or(&self.primary)
    }
}
