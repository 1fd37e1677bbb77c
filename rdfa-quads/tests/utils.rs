use itertools::Itertools;
use oxrdf::{Graph, Quad, TripleRef};

pub const BASE: &str = "http://example.org/";

#[allow(unused)]
pub fn base() -> oxiri::Iri<String> {
    oxiri::Iri::parse(BASE.to_string()).unwrap()
}

#[allow(unused)]
pub fn to_graph(quads: &[Quad]) -> Graph {
    let mut graph = Graph::new();
    for quad in quads {
        graph.insert(TripleRef::new(
            quad.subject.as_ref(),
            quad.predicate.as_ref(),
            quad.object.as_ref(),
        ));
    }
    graph
}

/// Turtle with canonical blank node labels, one triple per statement.
fn canonical_turtle(graph: &Graph) -> String {
    let idents = rdf_canon::issue_graph_with::<sha2::Sha256>(graph, &Default::default()).unwrap();
    let graph = rdf_canon::relabel_graph(graph, &idents).unwrap();

    let mut ttl = oxttl::TurtleSerializer::new()
        .with_base_iri(BASE)
        .unwrap()
        .for_writer(Vec::new());
    for triple in graph.iter().sorted_by_cached_key(ToString::to_string) {
        ttl.serialize_triple(triple).unwrap();
    }

    String::from_utf8(ttl.finish().unwrap()).unwrap()
}

fn parse_turtle(ttl: &str) -> Graph {
    let mut graph = Graph::new();
    let parser = oxttl::TurtleParser::new().with_base_iri(BASE).unwrap();
    for triple in parser.for_slice(ttl.as_bytes()) {
        graph.insert(&triple.unwrap());
    }
    graph
}

/// Compares the output for `html` against `ttl`, ignoring blank node labels.
#[allow(unused)]
pub fn assert_graph(html: &str, ttl: &str) {
    let quads = rdfa_quads::parse(html, base());
    assert_quads(&quads, ttl);
}

#[allow(unused)]
pub fn assert_quads(quads: &[Quad], ttl: &str) {
    let output = canonical_turtle(&to_graph(quads));
    let expected = canonical_turtle(&parse_turtle(ttl));

    pretty_assertions::assert_eq!(output, expected);
}

/// Quads in N-Quads line syntax, in emission order.
#[allow(unused)]
pub fn lines(quads: &[Quad]) -> String {
    quads.iter().map(ToString::to_string).join("\n")
}
