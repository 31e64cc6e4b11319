use super::*;
use serde_json::json;

#[test]
fn config_defaults_match_the_site_markup() {
    let config = PageConfig::default();
    assert_eq!(config.timing.flash_delay_ms, 5_000);
    assert_eq!(config.timing.flash_fade_ms, 500);
    assert_eq!(config.timing.search_debounce_ms, 300);
    assert_eq!(config.timing.search_min_chars, 2);
    assert_eq!(config.markup.search_input, ".nav-search input[name=\"q\"]");
    assert_eq!(config.markup.lazy_image_selector(), "img[data-src]");
    assert_eq!(config.markup.confirm_selector(), "[data-confirm]");
}

#[test]
fn partial_json_config_keeps_remaining_defaults() -> Result<()> {
    let config = PageConfig::from_json_str(
        r#"{ "markup": { "rating_active_class": "lit" }, "timer_step_limit": 50 }"#,
    )?;
    assert_eq!(config.markup.rating_active_class, "lit");
    assert_eq!(config.markup.carousel_active_class, "active");
    assert_eq!(config.timer_step_limit, 50);
    assert_eq!(config.timing, Timing::default());
    Ok(())
}

#[test]
fn invalid_config_is_rejected() {
    assert!(matches!(
        PageConfig::from_json_str(r#"{ "timer_step_limit": 0 }"#),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        PageConfig::from_json_str(r#"{ "timing": { "search_debounce_ms": -1 } }"#),
        Err(Error::Config(message)) if message.contains("search_debounce_ms")
    ));
    assert!(matches!(
        PageConfig::from_json_str("{ not json"),
        Err(Error::Config(_))
    ));
}

#[test]
fn custom_markup_drives_widget_discovery() -> Result<()> {
    let config = PageConfig::from_json_str(
        r#"{ "markup": { "rating_container": ".stars", "rating_active_class": "lit" } }"#,
    )?;
    let mut page = Page::with_config(
        r#"<div class="stars"><b data-value="1" id="one"></b><b data-value="2" id="two"></b></div>"#,
        config,
    )?;
    page.initialize()?;
    page.click("#two")?;
    page.assert_class("#one", "lit", true)?;
    page.assert_class("#two", "lit", true)?;
    Ok(())
}

#[test]
fn get_request_sends_json_header_and_no_body() {
    let mut fetch = MockFetch::new();
    fetch.set_mock("/api/items", r#"{"items":[1,2]}"#);
    let value = make_request(&mut fetch, "/api/items", Method::default(), None);
    assert_eq!(value, Some(json!({ "items": [1, 2] })));

    let calls = fetch.take_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Get);
    assert_eq!(calls[0].header("content-type"), Some("application/json"));
    assert_eq!(calls[0].body, None);
}

#[test]
fn payload_is_serialized_as_the_body() {
    let mut fetch = MockFetch::new();
    fetch.set_mock("/api/reviews", r#"{"ok":true}"#);
    let payload = json!({ "rating": 4 });
    let value = make_request(&mut fetch, "/api/reviews", Method::Post, Some(&payload));
    assert_eq!(value, Some(json!({ "ok": true })));
    assert_eq!(
        fetch.take_calls()[0].body.as_deref(),
        Some(r#"{"rating":4}"#)
    );

    make_request(&mut fetch, "/api/reviews", Method::Post, Some(&serde_json::Value::Null));
    assert_eq!(fetch.take_calls()[0].body, None);
}

#[test]
fn failures_yield_none() {
    let mut fetch = MockFetch::new();
    assert_eq!(make_request(&mut fetch, "/missing", Method::Get, None), None);
    fetch.set_mock("/broken", "<html>");
    assert_eq!(make_request(&mut fetch, "/broken", Method::Get, None), None);
    fetch.clear_mocks();
    assert_eq!(make_request(&mut fetch, "/broken", Method::Get, None), None);
}

#[test]
fn methods_parse_case_insensitively() {
    assert_eq!("post".parse::<Method>(), Ok(Method::Post));
    assert_eq!(" Delete ".parse::<Method>(), Ok(Method::Delete));
    assert_eq!(
        "TRACE".parse::<Method>(),
        Err(FetchError::UnsupportedMethod("TRACE".into()))
    );
    assert_eq!(Method::Patch.to_string(), "PATCH");
}

#[test]
fn page_request_helper_uses_its_mock_transport() -> Result<()> {
    let mut page = Page::load("<p></p>")?;
    page.set_fetch_mock("/api/ping", "\"pong\"");
    assert_eq!(
        page.make_request("/api/ping", Method::Get, None),
        Some(json!("pong"))
    );
    page.clear_fetch_mocks();
    assert_eq!(page.make_request("/api/ping", Method::Get, None), None);
    assert_eq!(page.take_fetch_calls().len(), 2);
    Ok(())
}
