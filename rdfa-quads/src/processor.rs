use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use curie::PrefixMapping;
use itertools::Itertools;
use oxiri::Iri;
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, NamedNode, NamedNodeRef, NamedOrBlankNode, Quad, Term};
use tracing::{debug, trace, warn};
use vec1::Vec1;

use crate::attributes::{Attr, Attributes};
use crate::context::{
    EvaluationContext, HostLanguage, Profile, datetime_datatype, parse_language, parse_prefixes,
};
use crate::factory::{LiteralAnnotation, OxrdfFactory, TermFactory};
use crate::list::{ListRegistry, Statement};
use crate::resolve::{Resolver, resolve_iri};
use crate::sink::{Listeners, QuadSink};
use crate::tokenizer::TokenSink;
use crate::{Error, RDF_HTML};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

/// A `@rel` or `@rev` relation still waiting for its object.
#[derive(Debug)]
struct PendingRelation {
    predicate: NamedNode,
    direction: Direction,
    subject: NamedOrBlankNode,
    inlist: bool,
    completed: bool,
}

/// Attribute values resolved against an element's context.
struct Resolved {
    about: Option<NamedOrBlankNode>,
    /// `@resource`, `@href` or `@src`, in that order.
    target: Option<NamedOrBlankNode>,
    types: Attr<Vec1<NamedOrBlankNode>>,
    rels: Attr<Vec1<NamedNode>>,
    revs: Attr<Vec1<NamedNode>>,
    properties: Attr<Vec1<NamedNode>>,
    datatype: Attr<Option<NamedNode>>,
}

/// One open element.
struct Frame {
    name: String,
    attrs: Attributes,
    context: Rc<EvaluationContext>,

    current_subject: NamedOrBlankNode,
    /// The resource this element established, if any. Descendants stop
    /// looking further up for pending relations once they reach it.
    new_subject: Option<NamedOrBlankNode>,
    current_object: Option<NamedOrBlankNode>,
    has_rel: bool,
    target: Option<NamedOrBlankNode>,

    incomplete: Vec<PendingRelation>,
    pending_object: Option<BlankNode>,
    pending_claimed: bool,

    properties: Attr<Vec1<NamedNode>>,
    datatype: Attr<Option<NamedNode>>,
    inlist: bool,
    property_resolved: bool,

    text: String,
    /// Serialized inner markup, kept while this element or an ancestor
    /// needs an XML literal.
    markup: Option<String>,
}

/// The RDFa evaluator proper.
///
/// It consumes element events in document order and emits quads as soon
/// as they are known. Any tokenizer can drive it through [`TokenSink`].
pub struct Processor<F = OxrdfFactory> {
    factory: F,
    profile: Profile,

    /// The base the processor was configured with.
    configured_base: Iri<String>,
    /// The configured base, possibly replaced by `<base href>`.
    document_base: Iri<String>,
    initial_context: Rc<EvaluationContext>,
    default_vocab: Option<NamedNode>,

    stack: Vec<Frame>,
    lists: ListRegistry,
    quads: Vec<Quad>,
    listeners: Listeners,
    /// Nodes allocated for the blank node labels written in the document.
    document_bnodes: RefCell<HashMap<String, BlankNode>>,
    finished: bool,
}

fn is_markup_datatype(datatype: &NamedNode) -> bool {
    datatype.as_ref() == rdf::XML_LITERAL || datatype.as_ref() == RDF_HTML
}

impl<F: TermFactory> Processor<F> {
    pub(crate) fn new(
        base: Iri<String>,
        profile: Profile,
        initial_context: EvaluationContext,
        factory: F,
    ) -> Self {
        Self {
            factory,
            profile,
            document_base: base.clone(),
            configured_base: base,
            default_vocab: initial_context.vocab.clone(),
            initial_context: Rc::new(initial_context),
            stack: Vec::new(),
            lists: ListRegistry::default(),
            quads: Vec::new(),
            listeners: Listeners::default(),
            document_bnodes: RefCell::default(),
            finished: false,
        }
    }

    pub fn subscribe(&mut self, sink: impl QuadSink + 'static) {
        self.listeners.subscribe(sink);
    }

    /// Every quad emitted so far, in emission order.
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn into_quads(self) -> Vec<Quad> {
        self.quads
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The base IRI currently in effect for elements without `xml:base`.
    pub fn document_base(&self) -> &Iri<String> {
        &self.document_base
    }

    /// Replaces the document base. The href is resolved against the
    /// configured base, so applying the same `<base>` twice is harmless.
    pub fn set_document_base(&mut self, href: &str) {
        match resolve_iri(href, &self.configured_base) {
            Some(base) => {
                trace!(%base, "Document base set by <base>");
                self.document_base = base;
            }
            None => debug!(href, "Ignoring <base> with invalid href"),
        }
    }

    /// Reports an error on the error channel. Evaluation continues.
    pub fn error(&mut self, error: Error) {
        debug!(%error, "Reporting error");
        self.listeners.error(&error);
    }

    pub fn open_element(&mut self, name: &str, attrs: Attributes) {
        if self.finished {
            warn!(element = name, "Ignoring element after finish");
            return;
        }

        if let Some(href) = self.profile.base_href(name, &attrs) {
            self.set_document_base(href);
        }

        let parent_context = match self.stack.last() {
            Some(parent) => Rc::clone(&parent.context),
            None => Rc::clone(&self.initial_context),
        };
        let context = self.derive_context(&parent_context, &attrs);
        let resolved = self.resolve_attributes(&context, &attrs);

        let is_root = self.stack.is_empty();
        let inherited: NamedOrBlankNode = match self.stack.last() {
            Some(parent) => parent
                .current_object
                .clone()
                .unwrap_or_else(|| parent.current_subject.clone()),
            None => {
                // the document itself, without any fragment
                let base = context.base(&self.document_base);
                let document = base.resolve("").unwrap_or_else(|_| base.clone());
                NamedNode::new_unchecked(document.into_inner()).into()
            }
        };

        let has_rel = attrs.contains("rel") || attrs.contains("rev");
        let has_typeof = attrs.contains("typeof");

        let mut new_subject = None;
        let mut current_object = None;
        let subject = if let Some(about) = resolved.about.clone() {
            new_subject = Some(about.clone());
            about
        } else if is_root {
            new_subject = Some(inherited.clone());
            inherited.clone()
        } else if has_rel {
            inherited.clone()
        } else if has_typeof {
            let typed = match resolved.target.clone() {
                Some(target) => Some(target),
                None => match self.claim_pending_object() {
                    Some(node) => Some(node.into()),
                    None => self.fresh_blank_node().map(Into::into),
                },
            };
            match typed {
                Some(typed) => {
                    new_subject = Some(typed.clone());
                    typed
                }
                None => inherited.clone(),
            }
        } else if let Some(target) = resolved.target.clone() {
            current_object = Some(target.clone());
            new_subject = Some(target);
            inherited.clone()
        } else {
            inherited.clone()
        };

        if has_rel {
            current_object = match resolved.target.clone() {
                Some(target) => Some(target),
                None if has_typeof && resolved.about.is_none() => {
                    let typed: Option<NamedOrBlankNode> = match self.claim_pending_object() {
                        Some(node) => Some(node.into()),
                        None => self.fresh_blank_node().map(Into::into),
                    };
                    // the typed object also completes relations waiting above
                    new_subject = typed.clone();
                    typed
                }
                None => None,
            };
        }

        trace!(
            element = name,
            %subject,
            new_subject = ?new_subject.as_ref().map(ToString::to_string),
            current_object = ?current_object.as_ref().map(ToString::to_string),
            "Opened element"
        );

        if let Some(resource) = &new_subject {
            self.complete_pending(resource);
        }

        // [rdfa-core] 7.5 step 7
        // > If in any of the previous steps a typed resource was set to a non-null value,
        // > it is now used to provide a subject for type values
        let typed_resource = if has_rel && resolved.about.is_none() {
            current_object.clone()
        } else {
            Some(subject.clone())
        };
        if let (Attr::Value(types), Some(typed)) = (&resolved.types, &typed_resource) {
            trace!(types = %types.iter().join(" "), "Typing resource");
            for ty in types {
                self.emit(typed.clone(), rdf::TYPE.into_owned(), ty.clone().into());
            }
        }

        let inlist = attrs.contains("inlist");

        // @property with @typeof relates the parent's resource to the new typed one
        let mut property_resolved = false;
        if let Attr::Value(properties) = &resolved.properties {
            if has_typeof
                && resolved.about.is_none()
                && !has_rel
                && !is_root
                && !attrs.contains("content")
                && !resolved.datatype.is_present()
            {
                for property in properties {
                    self.relate(inherited.clone(), property.clone(), subject.clone().into(), inlist);
                }
                property_resolved = true;
            }
        }

        let mut incomplete = Vec::new();
        let mut pending_object = None;
        if has_rel {
            let forward = resolved.rels.value().map(|v| v.as_slice()).unwrap_or_default();
            let reverse = resolved.revs.value().map(|v| v.as_slice()).unwrap_or_default();
            match &current_object {
                Some(object) => {
                    for predicate in forward {
                        self.relate(subject.clone(), predicate.clone(), object.clone().into(), inlist);
                    }
                    for predicate in reverse {
                        self.emit(object.clone(), predicate.clone(), subject.clone().into());
                    }
                }
                None if !forward.is_empty() || !reverse.is_empty() => {
                    pending_object = self.fresh_blank_node();
                    let relations = forward
                        .iter()
                        .map(|p| (p, Direction::Forward))
                        .chain(reverse.iter().map(|p| (p, Direction::Reverse)));
                    for (predicate, direction) in relations {
                        trace!(%predicate, ?direction, "Deferring relation");
                        incomplete.push(PendingRelation {
                            predicate: predicate.clone(),
                            direction,
                            subject: subject.clone(),
                            inlist: inlist && direction == Direction::Forward,
                            completed: false,
                        });
                    }
                }
                None => {}
            }
        }

        let captures = matches!(&resolved.datatype, Attr::Value(Some(dt)) if is_markup_datatype(dt));
        let parent_captures = self.stack.last().is_some_and(|p| p.markup.is_some());

        self.stack.push(Frame {
            name: name.to_string(),
            attrs,
            context,
            current_subject: subject,
            new_subject,
            current_object,
            has_rel,
            target: resolved.target,
            incomplete,
            pending_object,
            pending_claimed: false,
            properties: resolved.properties,
            datatype: resolved.datatype,
            inlist,
            property_resolved,
            text: String::new(),
            markup: (captures || parent_captures).then(String::new),
        });
    }

    pub fn text(&mut self, text: &str) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };

        frame.text.push_str(text);
        if let Some(markup) = &mut frame.markup {
            escape_into(markup, text, false);
        }
    }

    /// Closes the innermost open element with this name, along with any
    /// elements still open inside it.
    pub fn close_element(&mut self, name: &str) {
        let Some(position) = self.stack.iter().rposition(|frame| frame.name == name) else {
            warn!(element = name, "Ignoring close tag with no matching open element");
            return;
        };

        while self.stack.len() > position {
            if let Some(frame) = self.stack.pop() {
                self.close_frame(frame);
            }
        }
    }

    /// Closes any elements still open and terminates every list.
    /// Calling this more than once has no further effect.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }

        while let Some(frame) = self.stack.pop() {
            self.close_frame(frame);
        }

        let statements = self.lists.finalize();
        self.emit_all(statements);
        self.finished = true;
        self.listeners.finish();
        trace!(quads = self.quads.len(), "Finished");
    }

    fn resolver<'a>(&'a self, context: &'a EvaluationContext) -> Resolver<'a, F> {
        Resolver {
            context,
            base: context.base(&self.document_base),
            factory: &self.factory,
            document_bnodes: &self.document_bnodes,
        }
    }

    fn derive_context(
        &self,
        parent: &Rc<EvaluationContext>,
        attrs: &Attributes,
    ) -> Rc<EvaluationContext> {
        let xml_base = attrs.get("xml:base");
        let prefix = attrs.get("prefix");
        let vocab = attrs.get("vocab");
        let language = self.profile.language(attrs);

        if !(xml_base.is_present()
            || prefix.is_present()
            || vocab.is_present()
            || language.is_present())
        {
            return Rc::clone(parent);
        }

        let mut context = EvaluationContext::clone(parent);

        if let Attr::Value(value) = xml_base {
            match resolve_iri(value, parent.base(&self.document_base)) {
                Some(base) => context.xml_base = Some(base),
                None => debug!(value, "Ignoring invalid xml:base"),
            }
        }

        if let Attr::Value(value) = prefix {
            let mut prefixes = PrefixMapping::clone(&parent.prefixes);
            for (name, iri) in parse_prefixes(value) {
                if prefixes.add_prefix(&name, iri).is_err() {
                    debug!(prefix = %name, "Ignoring reserved prefix");
                }
            }
            context.prefixes = Rc::new(prefixes);
        }

        // [rdfa-core] 7.5 step 2
        // > If the value is empty, then the local default vocabulary MUST be
        // > reset to the Host Language defined default (if any).
        match vocab {
            Attr::Missing => {}
            Attr::Empty => context.vocab = self.default_vocab.clone(),
            Attr::Value(value) => match resolve_iri(value, context.base(&self.document_base)) {
                Some(iri) => context.vocab = Some(NamedNode::new_unchecked(iri.into_inner())),
                None => debug!(value, "Ignoring invalid @vocab"),
            },
        }

        match language {
            Attr::Missing => {}
            Attr::Empty => context.language = None,
            Attr::Value(tag) => {
                if let Some(language) = parse_language(tag) {
                    context.language = Some(language);
                }
            }
        }

        Rc::new(context)
    }

    fn resolve_attributes(&self, context: &EvaluationContext, attrs: &Attributes) -> Resolved {
        let resolver = self.resolver(context);

        let target = resolver
            .about(attrs.get("resource"))
            .or_else(|| attrs.raw("href").and_then(|v| resolver.iri(v)).map(Into::into))
            .or_else(|| attrs.raw("src").and_then(|v| resolver.iri(v)).map(Into::into));

        Resolved {
            about: resolver.about(attrs.get("about")),
            target,
            types: resolver.many(attrs.get("typeof")),
            rels: resolver.predicates("rel", attrs.get("rel")),
            revs: resolver.predicates("rev", attrs.get("rev")),
            properties: resolver.predicates("property", attrs.get("property")),
            datatype: attrs.get("datatype").map(|v| resolver.term(v)),
        }
    }

    /// Index of the frame whose pending relations a new resource here
    /// would complete. The search stops at the nearest frame that
    /// established a resource of its own.
    fn pending_owner(&self) -> Option<usize> {
        for (index, frame) in self.stack.iter().enumerate().rev() {
            if !frame.incomplete.is_empty() {
                return Some(index);
            }
            if frame.new_subject.is_some() || frame.current_object.is_some() {
                return None;
            }
        }
        None
    }

    /// Takes the pending object of the relations a typed element is about
    /// to complete, so that the same node is used for both.
    fn claim_pending_object(&mut self) -> Option<BlankNode> {
        let index = self.pending_owner()?;
        let frame = &mut self.stack[index];
        if frame.pending_claimed || frame.incomplete.iter().all(|r| r.completed) {
            return None;
        }
        frame.pending_claimed = true;
        frame.pending_object.clone()
    }

    fn complete_pending(&mut self, resource: &NamedOrBlankNode) {
        let Some(index) = self.pending_owner() else {
            return;
        };

        let mut completions = Vec::new();
        for relation in &mut self.stack[index].incomplete {
            if relation.completed {
                continue;
            }

            // list relations take one item per completing element
            if !relation.inlist {
                relation.completed = true;
            }

            completions.push(match relation.direction {
                Direction::Forward => (
                    relation.subject.clone(),
                    relation.predicate.clone(),
                    Term::from(resource.clone()),
                    relation.inlist,
                ),
                Direction::Reverse => (
                    resource.clone(),
                    relation.predicate.clone(),
                    relation.subject.clone().into(),
                    false,
                ),
            });
        }

        for (subject, predicate, object, inlist) in completions {
            trace!(%subject, %predicate, %object, "Completing relation");
            self.relate(subject, predicate, object, inlist);
        }
    }

    fn close_frame(&mut self, frame: Frame) {
        if !frame.property_resolved {
            if let Attr::Value(properties) = &frame.properties {
                match self.property_object(&frame) {
                    Ok(Some(object)) => {
                        for property in properties {
                            self.relate(
                                frame.current_subject.clone(),
                                property.clone(),
                                object.clone(),
                                frame.inlist,
                            );
                        }
                    }
                    Ok(None) => debug!(element = %frame.name, "No value for @property"),
                    Err(error) => self.error(error),
                }
            }
        }

        let is_void = self.profile.is_void(&frame.name);
        if let Some(parent) = self.stack.last_mut() {
            if !frame.attrs.contains("property") {
                parent.text.push_str(&frame.text);
            }
            if let Some(markup) = &mut parent.markup {
                serialize_element(markup, &frame, is_void);
            }
        }
    }

    // [rdfa-core] 7.5 step 11
    fn property_object(&self, frame: &Frame) -> Result<Option<Term>, Error> {
        if let Some(target) = &frame.target {
            return Ok(Some(target.clone().into()));
        }

        if frame.has_rel {
            if let Some(object) = &frame.current_object {
                return Ok(Some(object.clone().into()));
            }
        }

        let content = frame.attrs.raw("content");
        let datetime = content
            .is_none()
            .then(|| self.profile.datetime(&frame.attrs))
            .flatten();

        let captured = match &frame.datatype {
            Attr::Value(Some(datatype)) if is_markup_datatype(datatype) => frame.markup.as_deref(),
            _ => None,
        };

        let value = match (content.or(datetime), captured) {
            (Some(explicit), _) => explicit.to_string(),
            (None, Some(markup)) => markup.to_string(),
            (None, None) => {
                let text = frame.text.trim();
                if text.is_empty() && !frame.datatype.is_present() {
                    return Ok(None);
                }
                text.to_string()
            }
        };

        let annotation = match &frame.datatype {
            Attr::Value(Some(datatype)) => LiteralAnnotation::Datatype(datatype.clone()),
            // unresolvable datatypes keep the content as a plain literal
            Attr::Value(None) | Attr::Empty => LiteralAnnotation::Plain,
            Attr::Missing => {
                // a <time> value matching no xsd type still defaults to xsd:dateTime
                let datatype: Option<NamedNodeRef<'static>> = datetime
                    .and_then(|v| datetime_datatype(v.trim()))
                    .or_else(|| self.profile.implicit_datatype(&frame.name));
                match (datatype, &frame.context.language) {
                    (Some(datatype), _) => LiteralAnnotation::Datatype(datatype.into_owned()),
                    (None, Some(language)) => LiteralAnnotation::Language(language.to_string()),
                    (None, None) => LiteralAnnotation::Plain,
                }
            }
        };

        let literal = self.factory.literal(value, annotation)?;
        Ok(Some(literal.into()))
    }

    fn fresh_blank_node(&mut self) -> Option<BlankNode> {
        match self.factory.blank_node(None) {
            Ok(node) => Some(node),
            Err(error) => {
                self.error(error);
                None
            }
        }
    }

    /// Emits a triple, or appends the object to the list for
    /// `(subject, predicate)` when `inlist` is set.
    fn relate(
        &mut self,
        subject: NamedOrBlankNode,
        predicate: NamedNode,
        object: Term,
        inlist: bool,
    ) {
        if !inlist {
            self.emit(subject, predicate, object);
            return;
        }

        let Some(node) = self.fresh_blank_node() else {
            return;
        };
        let statements = self.lists.append(&subject, &predicate, node, object);
        self.emit_all(statements);
    }

    fn emit_all(&mut self, statements: Vec<Statement>) {
        for (subject, predicate, object) in statements {
            self.emit(subject, predicate, object);
        }
    }

    fn emit(&mut self, subject: NamedOrBlankNode, predicate: NamedNode, object: Term) {
        match self.factory.quad(subject, predicate, object, None) {
            Ok(quad) => {
                trace!(%quad, "Emitting quad");
                self.listeners.quad(&quad);
                self.quads.push(quad);
            }
            Err(error) => self.error(error),
        }
    }
}

impl<F: TermFactory> TokenSink for Processor<F> {
    fn open_element(&mut self, name: &str, attrs: Attributes) {
        Processor::open_element(self, name, attrs);
    }

    fn text(&mut self, text: &str) {
        Processor::text(self, text);
    }

    fn close_element(&mut self, name: &str) {
        Processor::close_element(self, name);
    }

    fn error(&mut self, error: Error) {
        Processor::error(self, error);
    }

    fn base_hint(&mut self, href: &str) {
        if self.profile == Profile::Html {
            self.set_document_base(href);
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

fn serialize_element(out: &mut String, frame: &Frame, is_void: bool) {
    out.push('<');
    out.push_str(&frame.name);
    for (name, value) in frame.attrs.iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(out, value, true);
        out.push('"');
    }

    let inner = frame.markup.as_deref().unwrap_or_default();
    if is_void && inner.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    out.push_str(inner);
    out.push_str("</");
    out.push_str(&frame.name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RdfaParser;
    use crate::factory::SequentialFactory;

    fn processor() -> Processor<SequentialFactory> {
        RdfaParser::new(Iri::parse("http://ex.org/doc".to_string()).unwrap())
            .with_factory(SequentialFactory::new())
            .processor()
    }

    fn attrs<const N: usize>(pairs: [(&str, &str); N]) -> Attributes {
        pairs.into_iter().collect()
    }

    fn lines(processor: &Processor<SequentialFactory>) -> Vec<String> {
        processor.quads().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn mismatched_close_tags_close_inner_elements() {
        let mut p = processor();
        p.open_element("div", attrs([("about", "#a")]));
        p.open_element("span", attrs([("property", "dc:title")]));
        p.text("Title");
        p.close_element("p");
        assert_eq!(p.stack.len(), 2);

        p.close_element("div");
        assert!(p.stack.is_empty());
        assert_eq!(
            lines(&p),
            [r#"<http://ex.org/doc#a> <http://purl.org/dc/terms/title> "Title""#]
        );
    }

    #[test]
    fn finish_closes_open_elements_once() {
        let mut p = processor();
        p.open_element("div", attrs([("about", "#a"), ("rel", "dc:hasPart")]));
        p.open_element("span", attrs([("about", "#b")]));
        p.finish();
        p.finish();

        assert!(p.is_finished());
        assert_eq!(
            lines(&p),
            ["<http://ex.org/doc#a> <http://purl.org/dc/terms/hasPart> <http://ex.org/doc#b>"]
        );
    }

    #[test]
    fn pending_object_is_reused_once() {
        let mut p = processor();
        p.open_element("div", attrs([("about", "#a"), ("rel", "dc:hasPart")]));
        p.open_element("span", attrs([("typeof", "rdfs:Resource")]));
        p.close_element("span");
        p.open_element("span", attrs([("typeof", "rdfs:Resource")]));
        p.close_element("span");
        p.close_element("div");
        p.finish();

        // b0 is the pending object, b1 the second typed node
        assert_eq!(
            lines(&p),
            [
                "<http://ex.org/doc#a> <http://purl.org/dc/terms/hasPart> _:b0",
                "_:b0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2000/01/rdf-schema#Resource>",
                "_:b1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2000/01/rdf-schema#Resource>",
            ]
        );
    }

    #[test]
    fn reverse_relations_point_back() {
        let mut p = processor();
        p.open_element("div", attrs([("about", "#a"), ("rev", "dc:isPartOf")]));
        p.open_element("a", attrs([("href", "#b")]));
        p.finish();

        assert_eq!(
            lines(&p),
            ["<http://ex.org/doc#b> <http://purl.org/dc/terms/isPartOf> <http://ex.org/doc#a>"]
        );
    }

    #[test]
    fn markup_is_serialized_for_xml_literals() {
        let mut p = processor();
        p.open_element(
            "p",
            attrs([("about", "#a"), ("property", "dc:description"), ("datatype", "rdf:XMLLiteral")]),
        );
        p.text("a ");
        p.open_element("em", attrs([("class", "x")]));
        p.text("b & c");
        p.close_element("em");
        p.open_element("br", Attributes::new());
        p.close_element("br");
        p.close_element("p");
        p.finish();

        assert_eq!(
            lines(&p),
            [r#"<http://ex.org/doc#a> <http://purl.org/dc/terms/description> "a <em class=\"x\">b &amp; c</em><br/>"^^<http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral>"#]
        );
    }

    #[test]
    fn events_after_finish_are_ignored() {
        let mut p = processor();
        p.finish();
        p.open_element("div", attrs([("about", "#a"), ("typeof", "rdfs:Class")]));
        assert!(p.quads().is_empty());
    }
}
