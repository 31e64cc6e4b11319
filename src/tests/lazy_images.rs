use super::*;

const LAZY_HTML: &str = r#"
<img id="hero" data-src="/img/hero.jpg" alt="hero">
<img id="thumb" data-src="/img/thumb.jpg" src="/img/placeholder.gif">
<img id="eager" src="/img/eager.jpg">
"#;

#[test]
fn images_load_when_they_first_intersect() -> Result<()> {
    let mut page = Page::load(LAZY_HTML)?;
    assert_eq!(page.observed_images().len(), 2);
    page.assert_attr("#hero", "src", None)?;

    let loaded = page.scroll_into_view("#hero")?;
    assert_eq!(loaded, vec![page.select("#hero")?]);
    page.assert_attr("#hero", "src", Some("/img/hero.jpg"))?;
    page.assert_attr("#hero", "data-src", None)?;
    assert_eq!(page.observed_images(), vec![page.select("#thumb")?]);
    Ok(())
}

#[test]
fn non_intersecting_and_repeated_entries_are_ignored() -> Result<()> {
    let mut page = Page::load(LAZY_HTML)?;
    assert!(page.scroll_out_of_view("#thumb")?.is_empty());
    page.assert_attr("#thumb", "src", Some("/img/placeholder.gif"))?;

    page.scroll_into_view("#thumb")?;
    page.assert_attr("#thumb", "src", Some("/img/thumb.jpg"))?;
    assert!(page.scroll_into_view("#thumb")?.is_empty());
    assert!(page.scroll_into_view("#eager")?.is_empty());
    page.assert_attr("#eager", "src", Some("/img/eager.jpg"))?;
    Ok(())
}

#[test]
fn batched_entries_load_every_intersecting_image() -> Result<()> {
    let mut page = Page::load(LAZY_HTML)?;
    let hero = page.select("#hero")?;
    let thumb = page.select("#thumb")?;
    let loaded = page.report_intersections(&[
        IntersectionEntry::leaving(hero),
        IntersectionEntry::entering(thumb),
        IntersectionEntry::entering(hero),
    ])?;
    assert_eq!(loaded, vec![thumb, hero]);
    assert!(page.observed_images().is_empty());
    Ok(())
}

#[test]
fn custom_observer_receives_registrations() -> Result<()> {
    let mut page = Page::with_capabilities(
        LAZY_HTML,
        PageConfig::default(),
        Box::new(TimerQueue::new()),
        Box::new(IntersectionRegistry::new()),
    )?;
    assert!(page.observed_images().is_empty());
    page.initialize()?;
    assert_eq!(page.observed_images().len(), 2);
    Ok(())
}
