mod tracing_setup;

use rxview::{AsyncError, AsyncSource, AsyncViewController, Templates, ViewContext, ViewEvent};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use tracing_setup::tracing_init;

#[derive(Clone, Copy, Debug)]
enum Screen {
    FruitList,
    Spinner,
    Oops,
}

fn draw(screen: &Screen, context: Option<ViewContext<Vec<String>>>) {
    match (screen, context.as_ref().and_then(ViewContext::implicit)) {
        (Screen::FruitList, Some(fruits)) => info!("[fruit list] {}", fruits.join(", ")),
        (Screen::FruitList, None) => info!("[fruit list] nothing to show"),
        (Screen::Spinner, _) => info!("[spinner] loading..."),
        (Screen::Oops, _) => warn!("[oops] could not load fruits"),
    }
}

async fn wait_until_settled(events: &mut UnboundedReceiver<ViewEvent<Vec<String>>>) {
    while let Some(event) = events.recv().await {
        match event {
            ViewEvent::Success(_) | ViewEvent::Error(_) => break,
            other => info!(?other, "view event"),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_init();

    let templates = Templates::new(Screen::FruitList)
        .with_loading(Screen::Spinner)
        .with_error(Screen::Oops);
    let controller = AsyncViewController::new(templates, draw);
    let mut events = controller.subscribe_events();

    controller.configure(None);

    let basket = AsyncSource::from_future(|| async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        vec!["Apple".to_string(), "Banana".to_string()]
    });
    controller.configure(Some(basket.clone()));
    // same handle again: ignored
    controller.configure(Some(basket));
    wait_until_settled(&mut events).await;

    let broken = AsyncSource::failing(AsyncError::error("orchard unreachable"));
    controller.configure(Some(broken));
    wait_until_settled(&mut events).await;

    let slow = AsyncSource::<Vec<String>>::from_stream(futures::stream::pending)
        .with_timeout(Duration::from_millis(200));
    controller.configure(Some(slow));
    wait_until_settled(&mut events).await;

    controller.configure(None);
    controller.dispose();
    info!(state = ?controller.get_state(), "done");
}
