use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use crate::Error;
use crate::attributes::Attributes;

/// Receives markup events in document order.
pub trait TokenSink {
    /// Names are lower-cased, as are attribute names.
    fn open_element(&mut self, name: &str, attrs: Attributes);

    fn text(&mut self, text: &str);

    fn close_element(&mut self, name: &str);

    fn error(&mut self, error: Error);

    /// The document's `<base href>`, when known before replay starts.
    fn base_hint(&mut self, _href: &str) {}
}

/// Buffers HTML input and replays it as [`TokenSink`] events.
///
/// Input is parsed only once it is complete, so chunk boundaries can fall
/// anywhere, even inside a tag.
#[derive(Debug, Default)]
pub struct HtmlTokenizer {
    buffer: String,
}

enum Step<'a> {
    Open(ElementRef<'a>),
    Text(&'a str),
    Close(&'a str),
}

impl HtmlTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);
    }

    /// Parses everything written so far and replays it into `sink`.
    pub fn end(&mut self, sink: &mut impl TokenSink) {
        let input = std::mem::take(&mut self.buffer);
        let document = Html::parse_document(&input);
        for error in &document.errors {
            sink.error(Error::Markup(error.to_string()));
        }

        if let Ok(selector) = Selector::parse("html > head > base[href]") {
            if let Some(href) = document
                .select(&selector)
                .next()
                .and_then(|base| base.value().attr("href"))
            {
                trace!(href, "Found <base> in head");
                sink.base_hint(href);
            }
        }

        let mut stack = vec![Step::Open(document.root_element())];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(element) => {
                    let el = element.value();
                    let attrs: Attributes = el.attrs().collect();
                    sink.open_element(el.name(), attrs);

                    stack.push(Step::Close(el.name()));
                    for child in element.children().rev() {
                        if let Some(child) = ElementRef::wrap(child) {
                            stack.push(Step::Open(child));
                        } else if let Some(text) = child.value().as_text() {
                            stack.push(Step::Text(text));
                        }
                    }
                }
                Step::Text(text) => sink.text(text),
                Step::Close(name) => sink.close_element(name),
            }
        }
    }
}
