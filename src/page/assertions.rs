use super::*;
use crate::dom::truncate_chars;

impl Page {
    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    /// Fails when any connected element matches `selector`.
    pub fn assert_missing(&self, selector: &str) -> Result<()> {
        if let Some(found) = self.dom.query_selector(selector)? {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: "no match".into(),
                actual: "element present".into(),
                dom_snippet: self.node_snippet(found),
            });
        }
        Ok(())
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.class_contains(target, class_name)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("class {class_name:?} present={expected}"),
                actual: format!("class {class_name:?} present={actual}"),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    /// `expected == None` asserts the attribute is absent.
    pub fn assert_attr(&self, selector: &str, name: &str, expected: Option<&str>) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.attr(target, name);
        if actual.as_deref() != expected {
            let describe = |value: Option<&str>| match value {
                Some(value) => format!("{name}={value:?}"),
                None => format!("{name} absent"),
            };
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: describe(expected),
                actual: describe(actual.as_deref()),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }
}
