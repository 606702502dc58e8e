use std::collections::BTreeMap;

/// A rendered element. `text` is emitted after the children, so an icon child
/// survives a text update (phone and email links).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_class(tag: &str, class: &str) -> Self {
        Self::new(tag).attr("class", class)
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn get_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn child_elements(&self) -> &[Element] {
        &self.children
    }

    pub fn child_elements_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    pub fn replace_children(&mut self, children: Vec<Element>) {
        self.children = children;
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|part| part == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr("class", classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(existing) = self.get_attr("class") {
            let remaining: Vec<&str> = existing
                .split_whitespace()
                .filter(|part| *part != class)
                .collect();
            let remaining = remaining.join(" ");
            self.set_attr("class", remaining);
        }
    }

    /// Depth-first search, self included.
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_class(class))
    }

    pub fn find_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_class_mut(class))
    }

    pub fn find_all_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            out.push(self);
        }
        for child in &self.children {
            child.find_all_class(class, out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        if !is_void(&self.tag) {
            out.push_str("</");
            out.push_str(&self.tag);
            out.push('>');
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr" | "input" | "meta" | "link" | "polygon" | "polyline" | "path")
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// The statically rendered page, addressed by the structural selectors the
/// markup uses. A selector may match several elements (e.g. `.header-phone`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    regions: BTreeMap<String, Vec<Element>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, selector: &str, element: Element) {
        self.regions
            .entry(selector.to_string())
            .or_default()
            .push(element);
    }

    pub fn with(mut self, selector: &str, element: Element) -> Self {
        self.insert(selector, element);
        self
    }

    pub fn first(&self, selector: &str) -> Option<&Element> {
        self.regions.get(selector).and_then(|els| els.first())
    }

    pub fn first_mut(&mut self, selector: &str) -> Option<&mut Element> {
        self.regions.get_mut(selector).and_then(|els| els.first_mut())
    }

    pub fn all(&self, selector: &str) -> &[Element] {
        self.regions.get(selector).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all_mut(&mut self, selector: &str) -> &mut [Element] {
        match self.regions.get_mut(selector) {
            Some(elements) => elements.as_mut_slice(),
            None => &mut [],
        }
    }

    /// `textContent = text` on the first match; `None` leaves it alone.
    pub fn set_text(&mut self, selector: &str, text: Option<&str>) -> bool {
        match (self.first_mut(selector), text) {
            (Some(el), Some(text)) if !text.is_empty() => {
                el.set_text(text);
                true
            }
            _ => false,
        }
    }

    pub fn set_attr(&mut self, selector: &str, name: &str, value: Option<&str>) -> bool {
        match (self.first_mut(selector), value) {
            (Some(el), Some(value)) if !value.is_empty() => {
                el.set_attr(name, value);
                true
            }
            _ => false,
        }
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}
