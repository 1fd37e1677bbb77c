//! An RDFa 1.1 Core processor for HTML.
//!
//! Markup goes in, RDF quads come out:
//!
//! ```
//! use oxiri::Iri;
//!
//! let html = r##"<p about="#me" property="dc:title">Hello</p>"##;
//! let quads = rdfa_quads::parse(html, Iri::parse("http://example.org/".to_string()).unwrap());
//! assert_eq!(
//!     quads[0].to_string(),
//!     r#"<http://example.org/#me> <http://purl.org/dc/terms/title> "Hello""#
//! );
//! ```

use std::str::FromStr;

use curie::PrefixMapping;
use icu::locale::LanguageIdentifier;
use oxiri::Iri;
use oxrdf::{NamedNode, NamedNodeRef, Quad};

mod attributes;
mod context;
mod factory;
mod list;
mod processor;
mod resolve;
mod sink;
mod tokenizer;

pub use attributes::{Attr, Attributes};
pub use context::{Profile, initial_context_prefixes};
use context::EvaluationContext;
pub use factory::{LiteralAnnotation, OxrdfFactory, SequentialFactory, TermFactory};
pub use processor::Processor;
pub use resolve::{is_absolute_iri, resolve_iri};
pub use sink::{DataListener, ErrorListener, ListenerError, QuadSink};
pub use tokenizer::{HtmlTokenizer, TokenSink};

/// `rdf:HTML`, the datatype of HTML literals.
pub static RDF_HTML: NamedNodeRef =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML");

#[derive(derive_more::Error, derive_more::Display, derive_more::From, Debug)]
pub enum Error {
    #[display("IRI parse error: `{iri}`")]
    IriParseError {
        source: oxiri::IriParseError,
        iri: String,
    },

    #[display("Invalid blank node identifier: `{id}`")]
    BlankNodeIdError {
        source: oxrdf::BlankNodeIdParseError,
        id: String,
    },

    #[display("Invalid language tag: `{tag}`")]
    LanguageTagError {
        source: oxrdf::LanguageTagParseError,
        tag: String,
    },

    LanguageIdentifierError(icu::locale::ParseError),

    #[display("Invalid prefix: the prefix '_' is reserved.")]
    ReservedPrefixError(#[error(not(source))] curie::InvalidPrefixError),

    #[display("Markup error: {_0}")]
    #[from(ignore)]
    Markup(#[error(not(source))] String),

    #[display("Input was written after the evaluator finished.")]
    Finished,
}

/// Configures and builds an [`RdfaEvaluator`].
///
/// ```
/// use rdfa_quads::{Profile, RdfaParser};
///
/// let mut evaluator = RdfaParser::with_base_iri("http://example.org/doc")?
///     .with_vocab("http://schema.org/")?
///     .with_language("en")?
///     .with_profile(Profile::Html)
///     .build();
/// evaluator.feed(r#"<p typeof="Person"><span property="name">Ann</span></p>"#);
/// evaluator.finish();
/// assert_eq!(evaluator.quads().len(), 2);
/// # Ok::<_, rdfa_quads::Error>(())
/// ```
#[derive(Clone)]
pub struct RdfaParser<F = OxrdfFactory> {
    base: Iri<String>,
    language: Option<LanguageIdentifier>,
    vocab: Option<NamedNode>,
    prefixes: PrefixMapping,
    profile: Profile,
    factory: F,
}

impl RdfaParser {
    pub fn new(base: Iri<String>) -> Self {
        Self {
            base,
            language: None,
            vocab: None,
            prefixes: initial_context_prefixes().clone(),
            profile: Profile::default(),
            factory: OxrdfFactory,
        }
    }

    pub fn with_base_iri(base: &str) -> Result<Self, Error> {
        let base = Iri::parse(base.to_string()).map_err(|source| Error::IriParseError {
            source,
            iri: base.to_string(),
        })?;
        Ok(Self::new(base))
    }
}

impl<F: TermFactory> RdfaParser<F> {
    /// The language of literals when the document does not set one.
    pub fn with_language(mut self, tag: &str) -> Result<Self, Error> {
        self.language = Some(LanguageIdentifier::from_str(tag)?);
        Ok(self)
    }

    /// The vocabulary used for bare terms, and restored by `@vocab=""`.
    pub fn with_vocab(mut self, iri: &str) -> Result<Self, Error> {
        let vocab = Iri::parse(iri.to_string()).map_err(|source| Error::IriParseError {
            source,
            iri: iri.to_string(),
        })?;
        self.vocab = Some(NamedNode::new_unchecked(vocab.into_inner()));
        Ok(self)
    }

    /// Adds a prefix mapping on top of the default ones.
    pub fn with_prefix(mut self, prefix: &str, iri: &str) -> Result<Self, Error> {
        self.prefixes
            .add_prefix(&prefix.to_ascii_lowercase(), iri)?;
        Ok(self)
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_factory<G: TermFactory>(self, factory: G) -> RdfaParser<G> {
        RdfaParser {
            base: self.base,
            language: self.language,
            vocab: self.vocab,
            prefixes: self.prefixes,
            profile: self.profile,
            factory,
        }
    }

    /// A processor to drive from some other source of markup events.
    pub fn processor(self) -> Processor<F> {
        let context = EvaluationContext {
            xml_base: None,
            prefixes: std::rc::Rc::new(self.prefixes),
            vocab: self.vocab,
            language: self.language.map(std::rc::Rc::new),
        };
        Processor::new(self.base, self.profile, context, self.factory)
    }

    pub fn build(self) -> RdfaEvaluator<F> {
        RdfaEvaluator {
            processor: self.processor(),
            tokenizer: HtmlTokenizer::new(),
        }
    }
}

/// Evaluates an HTML document written in chunks.
pub struct RdfaEvaluator<F = OxrdfFactory> {
    processor: Processor<F>,
    tokenizer: HtmlTokenizer,
}

impl<F: TermFactory> RdfaEvaluator<F> {
    pub fn feed(&mut self, chunk: &str) {
        if self.processor.is_finished() {
            self.processor.error(Error::Finished);
            return;
        }
        self.tokenizer.write(chunk);
    }

    /// Evaluates the whole document and terminates open lists.
    /// Later calls do nothing.
    pub fn finish(&mut self) {
        if self.processor.is_finished() {
            return;
        }
        self.tokenizer.end(&mut self.processor);
        self.processor.finish();
    }

    pub fn subscribe(&mut self, sink: impl QuadSink + 'static) {
        self.processor.subscribe(sink);
    }

    /// Calls `listener` with each quad as it is emitted.
    pub fn on_data(
        &mut self,
        listener: impl FnMut(&Quad) -> Result<(), ListenerError> + 'static,
    ) {
        self.subscribe(DataListener(listener));
    }

    /// Calls `listener` with each reported error.
    pub fn on_error(
        &mut self,
        listener: impl FnMut(&Error) -> Result<(), ListenerError> + 'static,
    ) {
        self.subscribe(ErrorListener(listener));
    }

    pub fn quads(&self) -> &[Quad] {
        self.processor.quads()
    }

    pub fn into_quads(self) -> Vec<Quad> {
        self.processor.into_quads()
    }
}

/// Evaluates a complete document with the default configuration.
pub fn parse(input: &str, base: Iri<String>) -> Vec<Quad> {
    let mut evaluator = RdfaParser::new(base).build();
    evaluator.feed(input);
    evaluator.finish();
    evaluator.into_quads()
}
