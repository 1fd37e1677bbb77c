use std::cell::RefCell;
use std::collections::HashMap;

use curie::Curie;
use oxiri::Iri;
use oxrdf::{BlankNode, NamedNode, NamedOrBlankNode};
use tracing::{debug, trace, warn};
use vec1::Vec1;

use crate::attributes::Attr;
use crate::context::EvaluationContext;
use crate::factory::TermFactory;

/// Schemes accepted as absolute IRIs in CURIE position even though their
/// references are not hierarchical.
const OPAQUE_SCHEMES: [&str; 5] = ["urn", "mailto", "tag", "tel", "data"];

fn is_scheme(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Whether the value starts with a URI scheme followed by `:`.
pub fn is_absolute_iri(value: &str) -> bool {
    value
        .split_once(':')
        .is_some_and(|(scheme, _)| is_scheme(scheme))
}

/// Resolves an IRI attribute value against `base`.
///
/// Absolute values are returned unchanged. Blank node references and
/// malformed values resolve to nothing.
pub fn resolve_iri(value: &str, base: &Iri<String>) -> Option<Iri<String>> {
    let value = value.trim();
    if value.starts_with("_:") {
        return None;
    }

    let result = if is_absolute_iri(value) {
        Iri::parse(value.to_string())
    } else {
        base.resolve(value)
    };

    match result {
        Ok(iri) => Some(iri),
        Err(error) => {
            debug!(value, %error, "Ignoring invalid IRI");
            None
        }
    }
}

/// Expands a term, CURIE or safe CURIE to an IRI string.
///
/// Bare terms are expanded against the in-scope vocabulary; nothing else
/// is consulted for them.
pub(crate) fn expand_term(value: &str, context: &EvaluationContext) -> Option<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    if let Some((prefix, reference)) = value.split_once(':') {
        if prefix == "_" {
            return None;
        }

        let prefix = prefix.to_ascii_lowercase();
        if let Ok(iri) = context
            .prefixes
            .expand_curie(&Curie::new(Some(prefix.as_str()), reference))
        {
            return Some(iri);
        }

        // an unmapped prefix is only read as a scheme when the rest looks like an IRI
        if is_scheme(&prefix)
            && (reference.starts_with('/') || OPAQUE_SCHEMES.contains(&prefix.as_str()))
        {
            return Some(value.to_string());
        }

        debug!(value, "No mapping for CURIE prefix");
        return None;
    }

    // [rdfa-core] 7.5.3
    // > term     ::=  NCNameStartChar termChar*
    // > termChar ::=  ( NameChar - ':' ) | '/'
    let is_term = !value.is_empty()
        && !value.starts_with('/')
        && value
            .split('/')
            .all(|s| s.is_empty() || rxml_validation::validate_ncname(s).is_ok());
    if !is_term {
        debug!(value, "Not a valid term");
        return None;
    }

    match &context.vocab {
        Some(vocab) => Some(format!("{}{value}", vocab.as_str())),
        None => {
            debug!(value, "Term used without a vocabulary");
            None
        }
    }
}

/// Resolves attribute values to terms within a single element.
pub(crate) struct Resolver<'a, F: ?Sized> {
    pub(crate) context: &'a EvaluationContext,
    pub(crate) base: &'a Iri<String>,
    pub(crate) factory: &'a F,
    /// Document labels, including the empty `_:`, and their nodes.
    pub(crate) document_bnodes: &'a RefCell<HashMap<String, BlankNode>>,
}

impl<F: TermFactory + ?Sized> Resolver<'_, F> {
    fn named(&self, iri: String) -> Option<NamedNode> {
        match self.factory.named_node(iri) {
            Ok(node) => Some(node),
            Err(error) => {
                debug!(%error, "Factory rejected IRI");
                None
            }
        }
    }

    pub(crate) fn iri(&self, value: &str) -> Option<NamedNode> {
        resolve_iri(value, self.base).and_then(|iri| self.named(iri.into_inner()))
    }

    pub(crate) fn term(&self, value: &str) -> Option<NamedNode> {
        let expanded = expand_term(value, self.context)?;
        // prefixes may be bound to relative IRIs
        self.iri(&expanded)
    }

    /// The node for a label written in the document. Labels are not passed
    /// to the factory: each gets a fresh node, so they cannot collide with
    /// the nodes the processor allocates.
    pub(crate) fn blank(&self, label: &str) -> Option<BlankNode> {
        if let Some(node) = self.document_bnodes.borrow().get(label) {
            return Some(node.clone());
        }

        match self.factory.blank_node(None) {
            Ok(node) => {
                trace!(label, %node, "Allocated node for document label");
                self.document_bnodes
                    .borrow_mut()
                    .insert(label.to_string(), node.clone());
                Some(node)
            }
            Err(error) => {
                debug!(label, %error, "Factory rejected blank node");
                None
            }
        }
    }

    /// `_:label` gives a blank node. Otherwise terms or IRIs are tried,
    /// depending on what the attribute allows.
    pub(crate) fn resource_or_iri(&self, value: &str, allow_terms: bool) -> Option<NamedOrBlankNode> {
        let value = value.trim();
        if let Some(label) = value.strip_prefix("_:") {
            return self.blank(label).map(Into::into);
        }

        if allow_terms {
            self.term(value).map(Into::into)
        } else {
            self.iri(value).map(Into::into)
        }
    }

    /// Resolves `@about` or `@resource`.
    ///
    /// An empty value names the document itself. A safe CURIE is expanded
    /// and ignored entirely if that fails.
    pub(crate) fn about(&self, value: Attr<&str>) -> Option<NamedOrBlankNode> {
        match value {
            Attr::Missing => None,
            Attr::Empty => self.iri("").map(Into::into),
            Attr::Value(v) => match v.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
                Some(safe) => self.resource_or_iri(safe, true),
                None => self.resource_or_iri(v, false),
            },
        }
    }

    /// Resolves a whitespace-separated list of terms.
    pub(crate) fn many(&self, value: Attr<&str>) -> Attr<Vec1<NamedOrBlankNode>> {
        match value {
            Attr::Missing => Attr::Missing,
            Attr::Empty => Attr::Empty,
            Attr::Value(v) => {
                let resolved = v
                    .split_ascii_whitespace()
                    .filter_map(|token| self.resource_or_iri(token, true))
                    .collect();
                match Vec1::try_from_vec(resolved) {
                    Ok(values) => Attr::Value(values),
                    Err(_) => Attr::Empty,
                }
            }
        }
    }

    /// Like [`Self::many`], but blank nodes are dropped since they cannot
    /// be predicates.
    pub(crate) fn predicates(&self, name: &str, value: Attr<&str>) -> Attr<Vec1<NamedNode>> {
        let values = match self.many(value) {
            Attr::Missing => return Attr::Missing,
            Attr::Empty => return Attr::Empty,
            Attr::Value(values) => values,
        };

        let predicates = values
            .into_iter()
            .filter_map(|value| match value {
                NamedOrBlankNode::NamedNode(node) => Some(node),
                NamedOrBlankNode::BlankNode(node) => {
                    warn!(attribute = name, %node, "Blank node cannot be used as a predicate");
                    None
                }
            })
            .collect();

        match Vec1::try_from_vec(predicates) {
            Ok(predicates) => Attr::Value(predicates),
            Err(_) => Attr::Empty,
        }
    }
}
