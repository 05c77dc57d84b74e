use crate::ViewContext;

/// Host-side hook that displays views.
///
/// `mount` must fully replace whatever view is currently displayed and must be
/// safe to call any number of times. The controller calls it while holding its
/// internal lock, so implementations must not call back into the controller.
pub trait ViewRenderer<Tpl, T>: Send + 'static {
    fn mount(&mut self, template: &Tpl, context: Option<ViewContext<T>>);

    /// Called after every mount, for hosts that schedule re-renders.
    fn mark_for_check(&mut self) {}
}

impl<Tpl, T, F> ViewRenderer<Tpl, T> for F
where
    F: FnMut(&Tpl, Option<ViewContext<T>>) + Send + 'static,
{
    fn mount(&mut self, template: &Tpl, context: Option<ViewContext<T>>) {
        self(template, context)
    }
}
