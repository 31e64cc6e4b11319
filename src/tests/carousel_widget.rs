use super::*;

const CAROUSEL_HTML: &str = r#"
<div class="carousel" id="gallery">
  <div class="carousel-item" id="slide-0">one</div>
  <div class="carousel-item active" id="slide-1">two</div>
  <div class="carousel-item active" id="slide-2">three</div>
  <button class="carousel-prev" id="prev">prev</button>
  <button class="carousel-next" id="next">next</button>
</div>
"#;

fn active_slide(page: &Page) -> Result<String> {
    let active = page.dom().query_selector_all("#gallery .carousel-item.active")?;
    assert_eq!(active.len(), 1, "exactly one slide should be active");
    Ok(page.dom().attr(active[0], "id").unwrap_or_default())
}

#[test]
fn initialization_shows_only_the_first_slide() -> Result<()> {
    let page = Page::load(CAROUSEL_HTML)?;
    assert_eq!(active_slide(&page)?, "slide-0");
    assert_eq!(page.carousels()[0].current(), 0);
    Ok(())
}

#[test]
fn next_and_prev_wrap_around() -> Result<()> {
    let mut page = Page::load(CAROUSEL_HTML)?;
    page.click("#prev")?;
    assert_eq!(active_slide(&page)?, "slide-2");
    page.click("#next")?;
    assert_eq!(active_slide(&page)?, "slide-0");
    page.click("#next")?;
    page.click("#next")?;
    page.click("#next")?;
    assert_eq!(active_slide(&page)?, "slide-0");
    Ok(())
}

#[test]
fn carousel_without_controls_stays_on_first_slide() -> Result<()> {
    let html = r#"
      <div class="carousel"><div class="carousel-item" id="only">x</div></div>
      <div class="carousel" id="bare"><button class="carousel-next">n</button></div>
    "#;
    let mut page = Page::load(html)?;
    assert_eq!(page.carousels().len(), 1);
    page.assert_class("#only", "active", true)?;
    page.click("#bare .carousel-next")?;
    page.assert_class("#only", "active", true)?;
    Ok(())
}

#[test]
fn carousels_step_independently() -> Result<()> {
    let html = r#"
      <div class="carousel" id="c1">
        <div class="carousel-item" id="a0"></div><div class="carousel-item" id="a1"></div>
        <button class="carousel-next" id="n1"></button>
      </div>
      <div class="carousel" id="c2">
        <div class="carousel-item" id="b0"></div><div class="carousel-item" id="b1"></div>
        <button class="carousel-next" id="n2"></button>
      </div>
    "#;
    let mut page = Page::load(html)?;
    page.click("#n1")?;
    page.assert_class("#a1", "active", true)?;
    page.assert_class("#b0", "active", true)?;
    page.assert_class("#b1", "active", false)?;
    Ok(())
}

#[test]
fn show_next_and_show_prev_move_the_active_class() -> Result<()> {
    let mut dom = Dom::parse(CAROUSEL_HTML)?;
    let container = dom.by_id("gallery").unwrap();
    let mut carousel = Carousel::from_container(&dom, container, &Markup::default())?.unwrap();
    carousel.render(&mut dom)?;

    carousel.show_prev(&mut dom)?;
    assert_eq!(carousel.current(), 2);
    assert!(dom.class_contains(dom.by_id("slide-2").unwrap(), "active")?);
    assert!(!dom.class_contains(dom.by_id("slide-0").unwrap(), "active")?);

    carousel.show_next(&mut dom)?;
    carousel.show_next(&mut dom)?;
    assert_eq!(carousel.current(), 1);
    assert_eq!(
        dom.query_selector_all(".carousel-item.active")?,
        vec![dom.by_id("slide-1").unwrap()]
    );
    Ok(())
}

#[test]
fn carousel_with_only_a_next_control_still_steps_forward() -> Result<()> {
    let html = r#"
      <div class="carousel" id="gallery">
        <div class="carousel-item" id="slide-0"></div>
        <div class="carousel-item" id="slide-1"></div>
        <div class="carousel-item" id="slide-2"></div>
        <button class="carousel-next" id="next"></button>
      </div>
    "#;
    let mut page = Page::load(html)?;
    let carousel = &page.carousels()[0];
    assert_eq!(carousel.prev_control(), None);
    assert_eq!(carousel.next_control(), page.dom().by_id("next"));

    page.click("#next")?;
    assert_eq!(active_slide(&page)?, "slide-1");
    page.click("#next")?;
    page.click("#next")?;
    assert_eq!(active_slide(&page)?, "slide-0");
    Ok(())
}

#[test]
fn carousel_with_only_a_prev_control_still_steps_backward() -> Result<()> {
    let html = r#"
      <div class="carousel" id="gallery">
        <div class="carousel-item" id="slide-0"></div>
        <div class="carousel-item" id="slide-1"></div>
        <button class="carousel-prev" id="prev"></button>
      </div>
    "#;
    let mut page = Page::load(html)?;
    assert_eq!(page.carousels()[0].next_control(), None);

    page.click("#prev")?;
    assert_eq!(active_slide(&page)?, "slide-1");
    page.click("#prev")?;
    assert_eq!(active_slide(&page)?, "slide-0");
    Ok(())
}
