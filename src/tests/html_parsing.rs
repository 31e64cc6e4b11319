use super::*;

#[test]
fn void_elements_and_text_are_attached_to_the_right_parent() -> Result<()> {
    let dom = Dom::parse(r#"<p id="p">one<br>two<img src="a.png">three</p>"#)?;
    let p = dom.by_id("p").expect("node");
    assert_eq!(dom.text_content(p), "onetwothree");
    assert_eq!(dom.query_selector_all("p > img")?.len(), 1);
    Ok(())
}

#[test]
fn scripts_are_kept_as_inert_text() -> Result<()> {
    let dom = Dom::parse(
        r#"<div id="out"></div><script>document.getElementById('out').textContent = '<b>';</script>"#,
    )?;
    let out = dom.by_id("out").expect("node");
    assert_eq!(dom.text_content(out), "");
    assert_eq!(dom.query_selector_all("b")?.len(), 0);
    Ok(())
}

#[test]
fn textarea_body_seeds_its_value_and_entities_are_decoded() -> Result<()> {
    let dom = Dom::parse(r#"<textarea id="t">a &amp; b</textarea><p id="p">&lt;ok&gt;</p>"#)?;
    let textarea = dom.by_id("t").expect("node");
    assert_eq!(dom.value(textarea)?, "a & b");
    assert_eq!(dom.text_content(dom.by_id("p").expect("node")), "<ok>");
    Ok(())
}

#[test]
fn stray_end_tags_are_dropped_and_comments_skipped() -> Result<()> {
    let dom = Dom::parse(
        r#"<!DOCTYPE html><div id="a"></span><!-- note --><i id="b"></i></div><p id="c"></p>"#,
    )?;
    let a = dom.by_id("a");
    let b = dom.by_id("b").expect("node");
    assert_eq!(dom.parent(b), a);
    let c = dom.by_id("c").expect("node");
    assert_eq!(dom.parent(c), Some(dom.root()));
    Ok(())
}

#[test]
fn unclosed_comment_is_a_parse_error() {
    match Dom::parse("<div><!-- open") {
        Err(Error::HtmlParse(message)) => assert!(message.contains("comment")),
        other => panic!("expected parse error, got: {other:?}"),
    }
}

#[test]
fn uppercase_tags_and_attributes_are_normalized() -> Result<()> {
    let dom = Dom::parse(r#"<DIV ID="x" DATA-VALUE="3"></DIV>"#)?;
    let x = dom.by_id("x").expect("node");
    assert_eq!(dom.tag_name(x), Some("div"));
    assert_eq!(dom.attr(x, "data-value").as_deref(), Some("3"));
    Ok(())
}
