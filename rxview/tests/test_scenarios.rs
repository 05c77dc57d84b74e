mod common;

use common::{controller_with, fruits, Fruits, View};
use futures::StreamExt;
use rxview::mock::ManualSource;
use rxview::{AsyncError, AsyncSource, Templates, ViewEvent, ViewState, ViewStreamExt};
use std::time::Duration;

#[tokio::test]
async fn test_delayed_list_without_success_template() {
    let (controller, renderer) =
        controller_with(Templates::new(View::Content).with_loading(View::Loading));
    let mut events = controller.subscribe_events();

    let source = AsyncSource::<Fruits>::from_future(|| async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        fruits(&["Apple", "Banana"])
    });

    controller.configure(None);
    controller.configure(Some(source));

    assert_eq!(events.recv().await, Some(ViewEvent::Loading));
    assert_eq!(
        events.recv().await,
        Some(ViewEvent::Value(fruits(&["Apple", "Banana"])))
    );
    assert_eq!(
        events.recv().await,
        Some(ViewEvent::Success(Some(fruits(&["Apple", "Banana"]))))
    );

    let mounts = renderer.mounts();
    let views: Vec<View> = mounts.iter().map(|mount| mount.template).collect();
    assert_eq!(
        views,
        vec![View::Content, View::Loading, View::Content, View::Content]
    );
    assert_eq!(mounts[0].context, None);
    assert_eq!(mounts[2].value(), Some(&fruits(&["Apple", "Banana"])));
    assert_eq!(mounts[3].value(), Some(&fruits(&["Apple", "Banana"])));
}

#[tokio::test]
async fn test_action_with_all_templates() {
    let (controller, renderer) = controller_with(
        Templates::new(View::Content)
            .with_loading(View::Loading)
            .with_error(View::Error)
            .with_success(View::Success),
    );
    let mut events = controller.subscribe_events();

    controller.configure(None);
    assert_eq!(renderer.last().unwrap().template, View::Content);

    controller.configure(Some(AsyncSource::from_future(|| async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Fruits::new()
    })));
    assert_eq!(renderer.last().unwrap().template, View::Loading);

    while let Some(event) = events.recv().await {
        if matches!(event, ViewEvent::Success(_)) {
            break;
        }
    }
    assert_eq!(renderer.last().unwrap().template, View::Success);
}

#[tokio::test]
async fn test_long_running_source_fails_after_value() {
    let (controller, renderer) = controller_with(
        Templates::new(View::Content)
            .with_loading(View::Loading)
            .with_error(View::Error),
    );
    let source = ManualSource::new();
    let mut events = controller.subscribe_events();

    controller.configure(Some(source.source()));
    assert_eq!(renderer.last().unwrap().template, View::Loading);

    source.emit(fruits(&["Apple"]));
    assert_eq!(events.recv().await, Some(ViewEvent::Loading));
    assert_eq!(events.recv().await, Some(ViewEvent::Value(fruits(&["Apple"]))));
    assert_eq!(renderer.last().unwrap().template, View::Content);

    source.fail(AsyncError::error("Error"));
    assert_eq!(
        events.recv().await,
        Some(ViewEvent::Error(AsyncError::error("Error")))
    );
    assert_eq!(renderer.last().unwrap().template, View::Error);

    // late values after failure change nothing
    source.emit(fruits(&["Cherry"]));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(renderer.last().unwrap().template, View::Error);
}

#[tokio::test]
async fn test_switching_sources_tracks_latest_only() {
    let (controller, renderer) = controller_with(Templates::new(View::Content));
    let first = ManualSource::new();
    let second = ManualSource::new();
    let mut events = controller.subscribe_events();

    controller.configure(Some(first.source()));
    controller.configure(Some(second.source()));
    first.emit(fruits(&["Stale"]));
    second.emit(fruits(&["Fresh"]));

    assert_eq!(events.recv().await, Some(ViewEvent::Loading));
    assert_eq!(events.recv().await, Some(ViewEvent::Loading));
    assert_eq!(events.recv().await, Some(ViewEvent::Value(fruits(&["Fresh"]))));
    assert_eq!(first.live_count(), 0);
    assert_eq!(second.live_count(), 1);
    assert_eq!(renderer.mount_count(), 1);
}

#[tokio::test]
async fn test_state_stream_settles_on_completion() {
    let (controller, _renderer) = controller_with(Templates::new(View::Content));

    controller.configure(Some(AsyncSource::from_values(vec![
        fruits(&["Apple"]),
        fruits(&["Apple", "Banana"]),
    ])));

    let settled = controller
        .to_stream()
        .stop_if(|state| state.is_complete())
        .collect::<Vec<_>>()
        .await;

    assert_eq!(
        settled.last(),
        Some(&ViewState::Completed(Some(fruits(&["Apple", "Banana"]))))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dispose_on_multi_thread_runtime() {
    let (controller, renderer) = controller_with(
        Templates::new(View::Content)
            .with_loading(View::Loading)
            .with_success(View::Success),
    );
    let source = ManualSource::new();

    controller.configure(Some(source.source()));
    for index in 0..50 {
        source.emit(fruits(&[&format!("item-{index}")]));
    }
    controller.dispose();
    let mounted = renderer.mount_count();

    source.emit(fruits(&["late"]));
    source.complete();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(renderer.mount_count(), mounted);
    assert_ne!(renderer.last().unwrap().template, View::Success);
    assert!(controller.get_state().is_terminal());
}
