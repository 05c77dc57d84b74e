use crate::AsyncError;

#[test]
fn test_async_error_methods() {
    let none_error = AsyncError::None;
    assert!(none_error.is_none());
    assert!(!none_error.is_error());
    assert!(!none_error.is_timeout());

    let error = AsyncError::error("message".to_string());
    assert!(!error.is_none());
    assert!(error.is_error());
    assert!(!error.is_timeout());

    let timeout = AsyncError::Timeout;
    assert!(!timeout.is_none());
    assert!(!timeout.is_error());
    assert!(timeout.is_timeout());
}

#[test]
fn test_async_error_display() {
    assert_eq!(AsyncError::error("Connection failed").to_string(), "Connection failed");
    assert_eq!(AsyncError::None.to_string(), "Source returned None!");
    assert_eq!(AsyncError::Timeout.to_string(), "deadline has elapsed!");
}

#[cfg(feature = "serde")]
#[test]
fn test_async_error_serde() {
    let error = AsyncError::error("message");
    let serialized = serde_json::to_string(&error).unwrap();
    assert_eq!(serialized, r#"{"error":"message"}"#);
    let deserialized: AsyncError = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, error);

    let serialized_timeout = serde_json::to_string(&AsyncError::Timeout).unwrap();
    assert_eq!(serialized_timeout, r#""timeout""#);
}

#[cfg(feature = "serde")]
#[test]
fn test_view_state_serde() {
    use crate::ViewState;

    let state = ViewState::Completed(Some(3));
    let serialized = serde_json::to_string(&state).unwrap();
    let deserialized: ViewState<i32> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, state);
}
