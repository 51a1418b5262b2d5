//! Markup-agnostic extraction core.
//!
//! A [`Ruleset`] describes how to find list items in a page and how to read
//! each field out of an item. Rules for the same [`Field`] form a fallback
//! chain: they are tried in the order they were added and the first one that
//! yields a non-empty value wins. A rule whose selector matches nothing, or
//! whose value is blank, is simply skipped.
//!
//! Site-specific selectors live in the [`news`](super::news) and
//! [`events`](super::events) modules; this module knows nothing about them.

use crate::error::FeedError;
use crate::utils::{collapse_whitespace, to_absolute};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A value the extractors know how to fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Title,
    Link,
    DateText,
    Image,
}

impl Field {
    /// Fields holding URLs, which get resolved against the page origin.
    fn is_url(self) -> bool {
        matches!(self, Field::Link | Field::Image)
    }
}

/// How to turn the first matched element into a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Read {
    /// All descendant text, trimmed.
    Text,
    /// All descendant text, whitespace runs collapsed to one space, trimmed.
    CollapsedText,
    /// An attribute value, trimmed.
    Attr(&'static str),
}

/// One step of a field's fallback chain.
#[derive(Clone, Debug)]
pub struct Rule {
    pub field: Field,
    pub selector: Selector,
    pub read: Read,
}

impl Rule {
    /// Read this rule's value from `item`, or `None` if nothing usable is there.
    fn apply(&self, item: ElementRef<'_>) -> Option<String> {
        let element = item.select(&self.selector).next()?;
        let value = match self.read {
            Read::Text => element.text().collect::<String>().trim().to_string(),
            Read::CollapsedText => collapse_whitespace(&element.text().collect::<String>()),
            Read::Attr(name) => element.value().attr(name)?.trim().to_string(),
        };
        (!value.is_empty()).then_some(value)
    }
}

/// Raw field values of a single list item, URLs already absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub date_text: Option<String>,
    pub image: Option<String>,
}

/// Ordered extraction rules plus the selectors locating the items.
#[derive(Clone, Debug)]
pub struct Ruleset {
    scope: Option<Selector>,
    items: Selector,
    rules: Vec<Rule>,
}

fn parse_selector(css: &str) -> Result<Selector, FeedError> {
    Selector::parse(css).map_err(|e| FeedError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

impl Ruleset {
    /// Start a ruleset whose items are every element matching `items`.
    pub fn new(items: &str) -> Result<Self, FeedError> {
        Ok(Self {
            scope: None,
            items: parse_selector(items)?,
            rules: Vec::new(),
        })
    }

    /// Restrict items to those below the first element matching `container`.
    ///
    /// When no element matches, extraction yields no items.
    pub fn scoped_to(mut self, container: &str) -> Result<Self, FeedError> {
        self.scope = Some(parse_selector(container)?);
        Ok(self)
    }

    /// Append a rule to `field`'s fallback chain.
    pub fn rule(mut self, field: Field, selector: &str, read: Read) -> Result<Self, FeedError> {
        self.rules.push(Rule {
            field,
            selector: parse_selector(selector)?,
            read,
        });
        Ok(self)
    }

    /// First non-empty value for `field`, following the fallback chain.
    fn value(&self, item: ElementRef<'_>, field: Field) -> Option<String> {
        self.rules
            .iter()
            .filter(|rule| rule.field == field)
            .find_map(|rule| rule.apply(item))
    }

    /// Extract every item of `html`, in document order.
    ///
    /// Link and image values are resolved against `base`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Url`] if a link or image cannot be resolved.
    /// Missing elements never produce errors.
    pub fn extract(&self, html: &str, base: &Url) -> Result<Vec<RawItem>, FeedError> {
        let document = Html::parse_document(html);

        let scope = match &self.scope {
            Some(container) => match document.select(container).next() {
                Some(element) => element,
                None => return Ok(Vec::new()),
            },
            None => document.root_element(),
        };

        let items: Vec<RawItem> = scope
            .select(&self.items)
            .map(|item| self.extract_item(item, base))
            .collect::<Result<_, _>>()?;
        Ok(items)
    }

    fn extract_item(&self, item: ElementRef<'_>, base: &Url) -> Result<RawItem, FeedError> {
        let resolved = |field: Field| -> Result<Option<String>, FeedError> {
            let value = self.value(item, field);
            if field.is_url() {
                Ok(to_absolute(value.as_deref(), base)?)
            } else {
                Ok(value)
            }
        };

        Ok(RawItem {
            title: resolved(Field::Title)?,
            link: resolved(Field::Link)?,
            date_text: resolved(Field::DateText)?,
            image: resolved(Field::Image)?,
        })
    }
}
