use super::*;

#[test]
fn query_selector_all_returns_document_order_without_duplicates() -> Result<()> {
    let dom = Dom::parse(
        r#"<div id="a" class="x"><span class="x y" id="b"></span></div><p class="y" id="c"></p>"#,
    )?;
    let ids = dom
        .query_selector_all(".x, .y")?
        .into_iter()
        .filter_map(|node| dom.attr(node, "id"))
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn combinators_and_attribute_operators_match() -> Result<()> {
    let dom = Dom::parse(
        r#"<nav class="nav-search"><form><input name="q" id="q"></form></nav>
           <ul><li id="one" data-kind="alpha beta"></li><li id="two" data-kind="gamma"></li></ul>"#,
    )?;
    assert_eq!(
        dom.query_selector(r#".nav-search input[name="q"]"#)?,
        dom.by_id("q")
    );
    assert_eq!(dom.query_selector(".nav-search > input")?, None);
    assert_eq!(dom.query_selector("[data-kind~=beta]")?, dom.by_id("one"));
    assert_eq!(dom.query_selector("[data-kind^=gam]")?, dom.by_id("two"));
    assert_eq!(dom.query_selector("#one + li")?, dom.by_id("two"));
    assert_eq!(dom.query_selector("#one ~ [data-kind$=ma]")?, dom.by_id("two"));
    assert_eq!(dom.query_selector("[data-kind*=lph]")?, dom.by_id("one"));
    Ok(())
}

#[test]
fn unsupported_selector_is_reported() -> Result<()> {
    let dom = Dom::parse("<div></div>")?;
    match dom.query_selector("div:hover") {
        Err(Error::UnsupportedSelector(selector)) => assert!(selector.contains("hover")),
        other => panic!("expected unsupported selector, got: {other:?}"),
    }
    Ok(())
}

#[test]
fn class_set_and_style_set_edit_attributes_in_place() -> Result<()> {
    let mut dom = Dom::parse(r#"<div id="n" class="a" style="color: red;"></div>"#)?;
    let node = dom.by_id("n").expect("node");
    dom.class_set(node, "b", true)?;
    dom.class_set(node, "a", false)?;
    dom.class_set(node, "b", true)?;
    assert_eq!(dom.attr(node, "class").as_deref(), Some("b"));

    dom.style_set(node, "opacity", "0")?;
    dom.style_set(node, "color", "")?;
    assert_eq!(dom.style_get(node, "opacity")?, "0");
    assert_eq!(dom.style_get(node, "color")?, "");
    assert_eq!(dom.attr(node, "style").as_deref(), Some("opacity: 0;"));
    dom.style_set(node, "opacity", "")?;
    assert!(!dom.has_attr(node, "style"));
    Ok(())
}

#[test]
fn removed_nodes_are_detached_and_leave_the_id_index() -> Result<()> {
    let mut dom = Dom::parse(r#"<section><div id="gone"><b id="inner"></b></div></section>"#)?;
    let gone = dom.by_id("gone").expect("node");
    let inner = dom.by_id("inner").expect("node");
    dom.remove_node(gone)?;
    assert!(!dom.is_connected(gone));
    assert!(!dom.is_connected(inner));
    assert_eq!(dom.by_id("gone"), None);
    assert_eq!(dom.query_selector("#inner")?, None);
    // Removing a detached node is a no-op.
    dom.remove_node(gone)?;
    assert!(matches!(dom.remove_node(dom.root()), Err(Error::InvalidNode(_))));
    Ok(())
}

#[test]
fn closest_includes_the_node_itself() -> Result<()> {
    let dom = Dom::parse(r#"<a href="/x" id="link"><span id="label">go</span></a>"#)?;
    let label = dom.by_id("label").expect("node");
    let link = dom.by_id("link");
    assert_eq!(dom.closest(label, "a[href]")?, link);
    assert_eq!(dom.closest(link.expect("node"), "a")?, link);
    assert_eq!(dom.closest(label, "form")?, None);
    Ok(())
}

#[test]
fn truncate_chars_marks_cut_output() {
    assert_eq!(dom::truncate_chars("abcdef", 3), "abc...");
    assert_eq!(dom::truncate_chars("abc", 3), "abc");
}

#[test]
fn descendant_combinator_tries_every_ancestor() -> Result<()> {
    let dom = Dom::parse(
        r#"<div class="a"><div class="b" id="outer"><div class="x">
             <div class="b" id="inner"><span class="c" id="target"></span></div>
           </div></div></div>"#,
    )?;
    assert_eq!(
        dom.query_selector_all(".a > .b .c")?,
        vec![dom.by_id("target").unwrap()]
    );
    assert_eq!(dom.query_selector_all(".a > .b > .c")?, Vec::new());
    Ok(())
}

#[test]
fn general_sibling_combinator_tries_every_previous_sibling() -> Result<()> {
    let dom = Dom::parse(
        r#"<ul><li class="p"></li><li class="q" id="first-q"></li>
             <li class="q" id="second-q"></li><li class="r" id="target"></li></ul>"#,
    )?;
    assert_eq!(
        dom.query_selector_all(".p + .q ~ .r")?,
        vec![dom.by_id("target").unwrap()]
    );
    assert_eq!(dom.query_selector_all(".p + .q + .r")?, Vec::new());
    Ok(())
}

#[test]
fn text_content_handles_deeply_nested_elements() -> Result<()> {
    let depth = 200_000;
    let mut html = String::with_capacity(depth * 11 + 16);
    html.push_str(r#"<div id="top">"#);
    for _ in 1..depth {
        html.push_str("<div>");
    }
    html.push('x');
    for _ in 0..depth {
        html.push_str("</div>");
    }

    let page = Page::from_html(&html)?;
    page.assert_text("#top", "x")?;
    let top = page.dom().by_id("top").unwrap();
    assert_eq!(page.dom().text_content(top), "x");
    Ok(())
}
