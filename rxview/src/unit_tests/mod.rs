use crate::mock::RecordingRenderer;
use crate::{AsyncViewController, Templates, ViewValue};

// Import test modules
mod async_error_test;


pub const PRIMARY: &str = "primary";
pub const LOADING: &str = "loading";
pub const ERROR: &str = "error";
pub const SUCCESS: &str = "success";

pub type Tpl = &'static str;

pub fn full_templates() -> Templates<Tpl> {
    Templates::new(PRIMARY)
        .with_loading(LOADING)
        .with_error(ERROR)
        .with_success(SUCCESS)
}

pub fn recorded<T: ViewValue>(
    templates: Templates<Tpl>,
) -> (AsyncViewController<T, Tpl>, RecordingRenderer<Tpl, T>) {
    let renderer = RecordingRenderer::new();
    let controller = AsyncViewController::new(templates, renderer.clone());
    (controller, renderer)
}
