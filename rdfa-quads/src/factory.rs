use std::cell::Cell;

use oxrdf::{BlankNode, GraphName, Literal, NamedNode, NamedOrBlankNode, Quad, Term};

use crate::Error;

/// How a literal's lexical value is annotated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralAnnotation {
    /// An `xsd:string` literal.
    Plain,
    /// A language-tagged string.
    Language(String),
    /// A typed literal.
    Datatype(NamedNode),
}

/// Constructs the terms and quads produced by the evaluator.
///
/// Every term the evaluator emits passes through the factory, so an
/// implementation can control blank node labelling or reject terms.
pub trait TermFactory {
    fn named_node(&self, iri: String) -> Result<NamedNode, Error> {
        NamedNode::new(iri.as_str()).map_err(|source| Error::IriParseError { source, iri })
    }

    /// A blank node with the given label, or a fresh document-unique one for `None`.
    fn blank_node(&self, label: Option<&str>) -> Result<BlankNode, Error>;

    fn literal(&self, value: String, annotation: LiteralAnnotation) -> Result<Literal, Error> {
        match annotation {
            LiteralAnnotation::Plain => Ok(Literal::new_simple_literal(value)),
            LiteralAnnotation::Language(tag) => {
                Literal::new_language_tagged_literal(value, tag.as_str())
                    .map_err(|source| Error::LanguageTagError { source, tag })
            }
            LiteralAnnotation::Datatype(datatype) => Ok(Literal::new_typed_literal(value, datatype)),
        }
    }

    fn quad(
        &self,
        subject: NamedOrBlankNode,
        predicate: NamedNode,
        object: Term,
        graph: Option<GraphName>,
    ) -> Result<Quad, Error> {
        Ok(Quad::new(
            subject,
            predicate,
            object,
            graph.unwrap_or_else(|| self.default_graph()),
        ))
    }

    fn default_graph(&self) -> GraphName {
        GraphName::DefaultGraph
    }
}

/// The default factory: fresh blank nodes get random labels.
#[derive(Clone, Copy, Debug, Default)]
pub struct OxrdfFactory;

impl TermFactory for OxrdfFactory {
    fn blank_node(&self, label: Option<&str>) -> Result<BlankNode, Error> {
        match label {
            None => Ok(BlankNode::default()),
            Some(id) => BlankNode::new(id).map_err(|source| Error::BlankNodeIdError {
                source,
                id: id.to_string(),
            }),
        }
    }
}

/// Labels fresh blank nodes `b0`, `b1`, … in allocation order.
///
/// Useful when output must be reproducible between runs.
#[derive(Debug, Default)]
pub struct SequentialFactory {
    next: Cell<u64>,
}

impl SequentialFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TermFactory for SequentialFactory {
    fn blank_node(&self, label: Option<&str>) -> Result<BlankNode, Error> {
        match label {
            None => {
                let n = self.next.get();
                self.next.set(n + 1);
                Ok(BlankNode::new_unchecked(format!("b{n}")))
            }
            Some(id) => OxrdfFactory.blank_node(Some(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_labels_count_up() {
        let factory = SequentialFactory::new();
        let labels: Vec<String> = (0..3)
            .map(|_| factory.blank_node(None).unwrap().as_str().to_string())
            .collect();
        assert_eq!(labels, ["b0", "b1", "b2"]);
    }

    #[test]
    fn explicit_labels_are_validated() {
        let factory = OxrdfFactory;
        assert_eq!(factory.blank_node(Some("x")).unwrap().as_str(), "x");
        assert!(matches!(
            factory.blank_node(Some("not valid")),
            Err(Error::BlankNodeIdError { .. })
        ));
    }

    #[test]
    fn literal_annotations() {
        let factory = OxrdfFactory;
        let plain = factory.literal("a".into(), LiteralAnnotation::Plain).unwrap();
        assert_eq!(plain.datatype(), oxrdf::vocab::xsd::STRING);

        let tagged = factory
            .literal("a".into(), LiteralAnnotation::Language("en".into()))
            .unwrap();
        assert_eq!(tagged.language(), Some("en"));

        assert!(matches!(
            factory.literal("a".into(), LiteralAnnotation::Language("".into())),
            Err(Error::LanguageTagError { .. })
        ));
    }

    #[test]
    fn quads_default_to_the_default_graph() {
        let factory = OxrdfFactory;
        let s = factory.named_node("http://example.org/s".into()).unwrap();
        let p = factory.named_node("http://example.org/p".into()).unwrap();
        let quad = factory.quad(s.clone().into(), p, s.into(), None).unwrap();
        assert_eq!(quad.graph_name, GraphName::DefaultGraph);
    }

    #[test]
    fn relative_iris_are_rejected() {
        assert!(matches!(
            OxrdfFactory.named_node("relative".into()),
            Err(Error::IriParseError { .. })
        ));
    }
}
