use indexmap::IndexMap;
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, NamedNode, NamedOrBlankNode, Term};
use tracing::trace;

/// A triple waiting to be turned into a quad.
pub(crate) type Statement = (NamedOrBlankNode, NamedNode, Term);

#[derive(Debug, Default)]
struct ListMapping {
    head: Option<BlankNode>,
    tail: Option<BlankNode>,
    finalized: bool,
}

/// In-progress RDF collections, keyed by the subject and predicate that
/// point at their head.
///
/// Items for the same key may arrive from any element in the document,
/// so the registry lives outside the element stack.
#[derive(Debug, Default)]
pub(crate) struct ListRegistry {
    lists: IndexMap<(NamedOrBlankNode, NamedNode), ListMapping>,
}

impl ListRegistry {
    /// Appends `value` to the list for `(subject, predicate)` using `node`
    /// as its list cell, and returns the triples that link it in.
    pub(crate) fn append(
        &mut self,
        subject: &NamedOrBlankNode,
        predicate: &NamedNode,
        node: BlankNode,
        value: Term,
    ) -> Vec<Statement> {
        let list = self
            .lists
            .entry((subject.clone(), predicate.clone()))
            .or_default();

        let mut statements: Vec<Statement> =
            vec![(node.clone().into(), rdf::FIRST.into_owned(), value)];
        match list.tail.replace(node.clone()) {
            None => {
                trace!(%subject, %predicate, "Starting list");
                list.head = Some(node.clone());
                statements.push((subject.clone(), predicate.clone(), node.into()));
            }
            Some(tail) => {
                statements.push((tail.into(), rdf::REST.into_owned(), node.into()));
            }
        }
        statements
    }

    /// Terminates every list that has not been terminated yet.
    pub(crate) fn finalize(&mut self) -> Vec<Statement> {
        let mut statements: Vec<Statement> = Vec::new();
        for ((subject, predicate), list) in &mut self.lists {
            if list.finalized {
                continue;
            }
            list.finalized = true;

            if let Some(tail) = &list.tail {
                trace!(%subject, %predicate, head = ?list.head, "Closing list");
                statements.push((
                    tail.clone().into(),
                    rdf::REST.into_owned(),
                    rdf::NIL.into_owned().into(),
                ));
            }
        }
        statements
    }
}
