use rxview::mock::RecordingRenderer;
use rxview::{AsyncViewController, Templates};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Content,
    Loading,
    Error,
    Success,
}

pub type Fruits = Vec<String>;

pub fn fruits(names: &[&str]) -> Fruits {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn controller_with(
    templates: Templates<View>,
) -> (AsyncViewController<Fruits, View>, RecordingRenderer<View, Fruits>) {
    let renderer = RecordingRenderer::new();
    let controller = AsyncViewController::new(templates, renderer.clone());
    (controller, renderer)
}
