use std::rc::Rc;
use std::str::FromStr;

use curie::PrefixMapping;
use icu::locale::LanguageIdentifier;
use oxiri::Iri;
use oxrdf::vocab::xsd;
use oxrdf::{NamedNode, NamedNodeRef};
use tracing::debug;

use crate::attributes::{Attr, Attributes};

/// The values inherited by an element from its ancestors.
///
/// A context is never modified once an element has been opened; children
/// derive a new one when their attributes change anything.
#[derive(Clone)]
pub(crate) struct EvaluationContext {
    /// Set only when an `xml:base` is in scope. Otherwise the document base
    /// applies, which lets a later `<base href>` take effect for every open
    /// element that did not override it.
    pub(crate) xml_base: Option<Iri<String>>,

    /// In-scope prefix mappings, keyed by lower-cased prefix.
    pub(crate) prefixes: Rc<PrefixMapping>,

    /// The default vocabulary used to expand terms.
    pub(crate) vocab: Option<NamedNode>,

    pub(crate) language: Option<Rc<LanguageIdentifier>>,
}

impl EvaluationContext {
    pub(crate) fn base<'a>(&'a self, document_base: &'a Iri<String>) -> &'a Iri<String> {
        self.xml_base.as_ref().unwrap_or(document_base)
    }
}

pub fn initial_context_prefixes() -> &'static PrefixMapping {
    static INITIAL_CONTEXT: std::sync::OnceLock<PrefixMapping> = std::sync::OnceLock::new();
    // https://www.w3.org/2011/rdfa-context/rdfa-1.1
    // Vocabulary prefixes
    INITIAL_CONTEXT.get_or_init(|| {
        let mut mapping = PrefixMapping::default();
        for (prefix, iri) in [
            // W3C documents
            ("as", "https://www.w3.org/ns/activitystreams#"),
            ("csvw", "http://www.w3.org/ns/csvw#"),
            ("dcat", "http://www.w3.org/ns/dcat#"),
            ("dqv", "http://www.w3.org/ns/dqv#"),
            ("duv", "http://www.w3.org/ns/duv#"),
            ("grddl", "http://www.w3.org/2003/g/data-view#"),
            ("jsonld", "http://json-ld.org/vocab#"),
            ("ma", "http://www.w3.org/ns/ma-ont#"),
            ("org", "http://www.w3.org/ns/org#"),
            ("owl", "http://www.w3.org/2002/07/owl#"),
            ("prov", "http://www.w3.org/ns/prov#"),
            ("qb", "http://purl.org/linked-data/cube#"),
            ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            ("rdfa", "http://www.w3.org/ns/rdfa#"),
            ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
            ("rif", "http://www.w3.org/2007/rif#"),
            ("rr", "http://www.w3.org/ns/r2rml#"),
            ("sd", "http://www.w3.org/ns/sparql-service-description#"),
            ("skos", "http://www.w3.org/2004/02/skos/core#"),
            ("skosxl", "http://www.w3.org/2008/05/skos-xl#"),
            ("sosa", "http://www.w3.org/ns/sosa/"),
            ("ssn", "http://www.w3.org/ns/ssn/"),
            ("time", "http://www.w3.org/2006/time#"),
            ("void", "http://rdfs.org/ns/void#"),
            ("wdr", "http://www.w3.org/2007/05/powder#"),
            ("wdrs", "http://www.w3.org/2007/05/powder-s#"),
            ("xhv", "http://www.w3.org/1999/xhtml/vocab#"),
            ("xml", "http://www.w3.org/XML/1998/namespace"),
            ("xsd", "http://www.w3.org/2001/XMLSchema#"),
            // "widely used"
            ("cc", "http://creativecommons.org/ns#"),
            ("ctag", "http://commontag.org/ns#"),
            ("dc", "http://purl.org/dc/terms/"),
            ("dc11", "http://purl.org/dc/elements/1.1/"),
            ("dcterms", "http://purl.org/dc/terms/"),
            ("foaf", "http://xmlns.com/foaf/0.1/"),
            ("gr", "http://purl.org/goodrelations/v1#"),
            ("ical", "http://www.w3.org/2002/12/cal/icaltzd#"),
            ("og", "http://ogp.me/ns#"),
            ("rev", "http://purl.org/stuff/rev#"),
            ("schema", "http://schema.org/"),
            ("schemas", "https://schema.org/"),
            ("sioc", "http://rdfs.org/ns/sioc/ns#"),
            ("v", "http://rdf.data-vocabulary.org/#"),
            ("vcard", "http://www.w3.org/2006/vcard/ns#"),
        ] {
            if mapping.add_prefix(prefix, iri).is_err() {
                unreachable!("initial context prefixes are never reserved");
            }
        }
        mapping
    })
}

/// Splits an `@prefix` value into `(prefix, IRI)` pairs.
///
/// Prefixes are lower-cased. Tokens that are not of the form `prefix:`
/// followed by an IRI are skipped.
pub(crate) fn parse_prefixes(value: &str) -> Vec<(String, &str)> {
    let mut result = Vec::new();
    let mut tokens = value.split_ascii_whitespace();
    while let Some(token) = tokens.next() {
        let Some(prefix) = token.strip_suffix(':') else {
            debug!(token, "@prefix syntax error: prefix must end with ':'");
            continue;
        };

        let Some(iri) = tokens.next() else {
            debug!(prefix, "@prefix syntax error: no IRI for prefix");
            break;
        };

        result.push((prefix.to_ascii_lowercase(), iri));
    }
    result
}

pub(crate) fn parse_language(tag: &str) -> Option<Rc<LanguageIdentifier>> {
    match LanguageIdentifier::from_str(tag) {
        Ok(lang) => Some(Rc::new(lang)),
        Err(error) => {
            tracing::warn!(tag, %error, "Invalid language identifier, ignoring");
            None
        }
    }
}

/// The host language whose rules apply on top of RDFa Core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// HTML+RDFa: `<base href>`, `@lang`, `<time>` and `@datetime` are recognized.
    #[default]
    Html,
    /// RDFa Core only: `xml:base` and `xml:lang`.
    Core,
}

pub(crate) trait HostLanguage {
    /// The language attribute in effect on an element.
    fn language<'a>(&self, attrs: &'a Attributes) -> Attr<&'a str>;

    /// The href of an element that sets the document base.
    fn base_href<'a>(&self, name: &str, attrs: &'a Attributes) -> Option<&'a str>;

    /// A machine-readable date or time standing in for the element text.
    fn datetime<'a>(&self, attrs: &'a Attributes) -> Option<&'a str>;

    /// The datatype of literals from this element when none is given.
    fn implicit_datatype(&self, name: &str) -> Option<NamedNodeRef<'static>>;

    /// Elements serialized without a closing tag.
    fn is_void(&self, name: &str) -> bool;
}

// [html-rdfa] 3.1, extensions to [rdfa-core] processing
impl HostLanguage for Profile {
    // “The current language can be set using either the @lang
    //  or @xml:lang attributes. When the @lang attribute and
    //  the @xml:lang attribute are specified on the same element,
    //  the @xml:lang attribute takes precedence.
    fn language<'a>(&self, attrs: &'a Attributes) -> Attr<&'a str> {
        match (self, attrs.get("xml:lang")) {
            (_, lang @ (Attr::Value(_) | Attr::Empty)) => lang,
            (Profile::Html, Attr::Missing) => attrs.get("lang"),
            (Profile::Core, Attr::Missing) => Attr::Missing,
        }
    }

    fn base_href<'a>(&self, name: &str, attrs: &'a Attributes) -> Option<&'a str> {
        match self {
            Profile::Html if name == "base" => attrs.raw("href"),
            _ => None,
        }
    }

    fn datetime<'a>(&self, attrs: &'a Attributes) -> Option<&'a str> {
        match self {
            Profile::Html => attrs.raw("datetime"),
            Profile::Core => None,
        }
    }

    fn implicit_datatype(&self, name: &str) -> Option<NamedNodeRef<'static>> {
        match self {
            Profile::Html if name == "time" => Some(xsd::DATE_TIME),
            _ => None,
        }
    }

    fn is_void(&self, name: &str) -> bool {
        matches!(self, Profile::Html)
            && matches!(
                name,
                "area"
                    | "base"
                    | "br"
                    | "col"
                    | "embed"
                    | "hr"
                    | "img"
                    | "input"
                    | "link"
                    | "meta"
                    | "source"
                    | "track"
                    | "wbr"
            )
    }
}

// [html-rdfa] extension #9
// “Otherwise, if the value of @datetime lexically matches a valid xsd:date, xsd:time,
//  xsd:dateTime, xsd:duration, xsd:gYear, or xsd:gYearMonth a typed literal must be generated,
//  with its datatype set to the matching xsd datatype.
pub(crate) fn datetime_datatype(value: &str) -> Option<NamedNodeRef<'static>> {
    if oxsdatatypes::Duration::from_str(value).is_ok() {
        Some(xsd::DURATION)
    } else if oxsdatatypes::DateTime::from_str(value).is_ok() {
        Some(xsd::DATE_TIME)
    } else if oxsdatatypes::Date::from_str(value).is_ok() {
        Some(xsd::DATE)
    } else if oxsdatatypes::Time::from_str(value).is_ok() {
        Some(xsd::TIME)
    } else if oxsdatatypes::GYearMonth::from_str(value).is_ok() {
        Some(xsd::G_YEAR_MONTH)
    } else if oxsdatatypes::GYear::from_str(value).is_ok() {
        Some(xsd::G_YEAR)
    } else {
        None
    }
}
