use std::collections::{BTreeMap, HashMap, HashSet};

use crate::html::parse_html;
use crate::selector::{
    SelectorAttrCondition, SelectorCombinator, SelectorPart, SelectorStep, parse_selector_groups,
};
use crate::{Error, Result};

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Handle to a node in a [`Dom`] arena. Handles stay valid after the node is
/// detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) value: String,
    pub(crate) disabled: bool,
    pub(crate) readonly: bool,
}

#[derive(Debug, Clone)]
pub struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    pub fn parse(html: &str) -> Result<Self> {
        parse_html(html)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: BTreeMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let disabled = attrs.contains_key("disabled");
        let readonly = attrs.contains_key("readonly");
        let element = Element {
            tag_name,
            attrs,
            value,
            disabled,
            readonly,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            self.id_index.entry(id_attr).or_insert(id);
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_or_err(&self, node_id: NodeId, op: &str) -> Result<&Element> {
        self.element(node_id)
            .ok_or_else(|| Error::InvalidNode(format!("{op} target is not an element")))
    }

    fn element_mut_or_err(&mut self, node_id: NodeId, op: &str) -> Result<&mut Element> {
        self.element_mut(node_id)
            .ok_or_else(|| Error::InvalidNode(format!("{op} target is not an element")))
    }

    pub fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0).and_then(|node| node.parent)
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn text_content(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document | NodeType::Element(_) => self.nodes[node_id.0]
                    .children
                    .iter()
                    .map(|child| self.text_content(*child))
                    .collect(),
                NodeType::Text(text) => text.clone(),
            }
        })
    }

    pub fn value(&self, node_id: NodeId) -> Result<String> {
        Ok(self.element_or_err(node_id, "value")?.value.clone())
    }

    pub fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        self.element_mut_or_err(node_id, "value")?.value = value.to_string();
        Ok(())
    }

    pub fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|e| e.disabled)
    }

    pub fn readonly(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|e| e.readonly)
    }

    pub fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|e| e.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    pub fn has_attr(&self, node_id: NodeId, name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|e| e.attrs.contains_key(&name.to_ascii_lowercase()))
    }

    pub fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        let element = self.element_mut_or_err(node_id, "setAttribute")?;
        element.attrs.insert(lowered.clone(), value.to_string());
        match lowered.as_str() {
            "value" => element.value = value.to_string(),
            "disabled" => element.disabled = true,
            "readonly" => element.readonly = true,
            "id" => self.rebuild_id_index(),
            _ => {}
        }
        Ok(())
    }

    pub fn remove_attr(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        let element = self.element_mut_or_err(node_id, "removeAttribute")?;
        element.attrs.remove(&lowered);
        match lowered.as_str() {
            "disabled" => element.disabled = false,
            "readonly" => element.readonly = false,
            "id" => self.rebuild_id_index(),
            _ => {}
        }
        Ok(())
    }

    pub fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let element = self.element_or_err(node_id, "classList")?;
        Ok(has_class(element, class_name))
    }

    pub fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.element_mut_or_err(node_id, "classList")?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.element_mut_or_err(node_id, "classList")?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
        Ok(())
    }

    /// Adds or removes `class_name` so that its presence equals `force`.
    pub fn class_set(&mut self, node_id: NodeId, class_name: &str, force: bool) -> Result<()> {
        if force {
            self.class_add(node_id, class_name)
        } else {
            self.class_remove(node_id, class_name)
        }
    }

    pub fn style_get(&self, node_id: NodeId, property: &str) -> Result<String> {
        let element = self.element_or_err(node_id, "style")?;
        let name = property.trim().to_ascii_lowercase();
        let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        Ok(decls
            .iter()
            .find(|(prop, _)| prop == &name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default())
    }

    pub fn style_set(&mut self, node_id: NodeId, property: &str, value: &str) -> Result<()> {
        let name = property.trim().to_ascii_lowercase();
        let element = self.element_mut_or_err(node_id, "style")?;

        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(prop, _)| prop == &name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name, value.to_string()));
        }

        if decls.is_empty() {
            element.attrs.remove("style");
        } else {
            element
                .attrs
                .insert("style".to_string(), serialize_style_declarations(&decls));
        }
        Ok(())
    }

    /// Detaches `node` from its parent. Detached nodes are left untouched.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::InvalidNode("cannot remove document root".into()));
        }
        if node.0 >= self.nodes.len() {
            return Err(Error::InvalidNode(format!("unknown node {}", node.0)));
        }
        let Some(parent) = self.parent(node) else {
            return Ok(());
        };
        self.nodes[parent.0].children.retain(|id| *id != node);
        self.nodes[node.0].parent = None;
        self.rebuild_id_index();
        Ok(())
    }

    pub fn is_connected(&self, node_id: NodeId) -> bool {
        let mut cursor = Some(node_id);
        while let Some(node) = cursor {
            if node == self.root {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    fn rebuild_id_index(&mut self) {
        let mut next = HashMap::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if let NodeType::Element(element) = &self.nodes[node.0].node_type {
                if let Some(id) = element.attrs.get("id") {
                    if !id.is_empty() {
                        next.entry(id.clone()).or_insert(node);
                    }
                }
            }
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        self.id_index = next;
    }

    fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            if matches!(self.nodes[node_id.0].node_type, NodeType::Element(_)) {
                out.push(node_id);
            }
            for child in &self.nodes[node_id.0].children {
                self.collect_elements_dfs(*child, out);
            }
        })
    }

    fn collect_elements_descendants_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;

        if groups.len() == 1 && groups[0].len() == 1 {
            if let Some(id) = groups[0][0].step.id_only() {
                return Ok(self.by_id(id).into_iter().collect());
            }
        }

        let mut ids = Vec::new();
        self.collect_elements_dfs(self.root, &mut ids);
        Ok(self.filter_matching(ids, &groups))
    }

    pub fn query_selector_from(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self
            .query_selector_all_from(root, selector)?
            .into_iter()
            .next())
    }

    /// Matches descendants of `root` (excluding `root` itself) in document order.
    pub fn query_selector_all_from(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut ids = Vec::new();
        self.collect_elements_descendants_dfs(root, &mut ids);
        Ok(self.filter_matching(ids, &groups))
    }

    fn filter_matching(&self, candidates: Vec<NodeId>, groups: &[Vec<SelectorPart>]) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut matched = Vec::new();
        for candidate in candidates {
            if groups
                .iter()
                .any(|steps| self.matches_selector_chain(candidate, steps))
                && seen.insert(candidate)
            {
                matched.push(candidate);
            }
        }
        matched
    }

    pub fn matches_selector(&self, node_id: NodeId, selector: &str) -> Result<bool> {
        if self.element(node_id).is_none() {
            return Ok(false);
        }
        let groups = parse_selector_groups(selector)?;
        Ok(groups
            .iter()
            .any(|steps| self.matches_selector_chain(node_id, steps)))
    }

    pub fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        if self.element(node_id).is_none() {
            return Ok(None);
        }
        let groups = parse_selector_groups(selector)?;
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if groups
                .iter()
                .any(|steps| self.matches_selector_chain(current, steps))
            {
                return Ok(Some(current));
            }
            cursor = self.parent(current);
        }
        Ok(None)
    }

    pub fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self
                .tag_name(current)
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|id| *id == node_id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|sibling| self.element(*sibling).is_some())
    }

    fn matches_selector_chain(&self, node_id: NodeId, steps: &[SelectorPart]) -> bool {
        if steps.is_empty() {
            return false;
        }
        self.matches_chain_at(node_id, steps, steps.len() - 1)
    }

    /// Whether `node_id` matches `steps[idx]` and some relative of it matches
    /// the steps before. Descendant and sibling combinators try every
    /// candidate, not only the nearest one.
    fn matches_chain_at(&self, node_id: NodeId, steps: &[SelectorPart], idx: usize) -> bool {
        if !self.matches_step(node_id, &steps[idx].step) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let prev = idx - 1;
        match steps[idx]
            .combinator
            .unwrap_or(SelectorCombinator::Descendant)
        {
            SelectorCombinator::Child => self
                .parent(node_id)
                .is_some_and(|parent| self.matches_chain_at(parent, steps, prev)),
            SelectorCombinator::Descendant => {
                let mut cursor = self.parent(node_id);
                while let Some(ancestor) = cursor {
                    if self.matches_chain_at(ancestor, steps, prev) {
                        return true;
                    }
                    cursor = self.parent(ancestor);
                }
                false
            }
            SelectorCombinator::AdjacentSibling => self
                .previous_element_sibling(node_id)
                .is_some_and(|sibling| self.matches_chain_at(sibling, steps, prev)),
            SelectorCombinator::GeneralSibling => {
                let mut cursor = self.previous_element_sibling(node_id);
                while let Some(sibling) = cursor {
                    if self.matches_chain_at(sibling, steps, prev) {
                        return true;
                    }
                    cursor = self.previous_element_sibling(sibling);
                }
                false
            }
        }
    }

    fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        if let Some(tag) = &step.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &step.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }

        if step
            .classes
            .iter()
            .any(|class_name| !has_class(element, class_name))
        {
            return false;
        }

        step.attrs.iter().all(|cond| match cond {
            SelectorAttrCondition::Exists { key } => element.attrs.contains_key(key),
            SelectorAttrCondition::Eq { key, value } => element.attrs.get(key) == Some(value),
            SelectorAttrCondition::StartsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.starts_with(value.as_str())),
            SelectorAttrCondition::EndsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.ends_with(value.as_str())),
            SelectorAttrCondition::Contains { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.contains(value.as_str())),
            SelectorAttrCondition::Includes { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| attr.split_whitespace().any(|token| token == value)),
        })
    }

    /// Serializes `node_id` and its subtree. Attributes are emitted in name
    /// order so the output is stable.
    pub fn dump_node(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document => self.nodes[node_id.0]
                    .children
                    .iter()
                    .map(|child| self.dump_node(*child))
                    .collect(),
                NodeType::Text(text) => text.clone(),
                NodeType::Element(element) => {
                    let mut out = String::new();
                    out.push('<');
                    out.push_str(&element.tag_name);
                    for (k, v) in &element.attrs {
                        out.push(' ');
                        out.push_str(k);
                        out.push_str("=\"");
                        out.push_str(v);
                        out.push('"');
                    }
                    out.push('>');
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.dump_node(*child));
                    }
                    out.push_str("</");
                    out.push_str(&element.tag_name);
                    out.push('>');
                    out
                }
            }
        })
    }
}

fn has_class(element: &Element, class_name: &str) -> bool {
    element
        .attrs
        .get("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
}

fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .map(|value| value.split_whitespace().map(ToOwned::to_owned).collect())
        .unwrap_or_default()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}

fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    for decl in style_attr.split(';') {
        let Some((name, value)) = decl.trim().split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }
        let value = value.trim().to_string();
        if let Some(pos) = out.iter().position(|(existing, _)| existing == &name) {
            out[pos].1 = value;
        } else {
            out.push((name, value));
        }
    }

    out
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out: String = it.by_ref().take(max_chars).collect();
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}
