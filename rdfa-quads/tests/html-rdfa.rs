// Samples from: https://www.w3.org/TR/html-rdfa/
// and host-language behaviour layered on top of RDFa Core.
mod utils;

#[test]
pub fn example1_2() {
    let html = r#"<!DOCTYPE html>
    <html>
      <head>
        <title>Example Document</title>
      </head>
      <body vocab="http://schema.org/">
        <p typeof="Blog">
          Welcome to my <a property="url" href="http://example.org/">blog</a>.
        </p>
      </body>
    </html>"#;

    let ttl = r#"
    [] a <http://schema.org/Blog>;
    <http://schema.org/url> <http://example.org/> .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn lang_and_xml_lang() {
    let html = r##"<!DOCTYPE html>
    <html lang="en">
      <body prefix="dc: http://purl.org/dc/terms/">
        <p about="#x" property="dc:title">Hi</p>
        <p about="#y" property="dc:title" lang="">Bye</p>
        <p about="#z" property="dc:title" lang="fr" xml:lang="de">Hallo</p>
        <div lang="es"><p about="#w" property="dc:title">Color</p></div>
      </body>
    </html>"##;

    let ttl = r#"
    @prefix dc: <http://purl.org/dc/terms/> .
    <#x> dc:title "Hi"@en .
    <#y> dc:title "Bye" .
    <#z> dc:title "Hallo"@de .
    <#w> dc:title "Color"@es .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn time_and_datetime() {
    let html = r##"
    <div about="#event" prefix="ex: http://example.com/ns#">
      <time property="ex:start" datetime="2025-06-15T10:30:00Z">15 June</time>
      <time property="ex:day" datetime="2025-06-15">15 June</time>
      <span property="ex:length" datetime="PT2H">two hours</span>
      <time property="ex:when">sometime</time>
      <time property="ex:year" datetime="2025"></time>
      <time property="ex:odd" datetime="garbage"></time>
      <time property="ex:label" datatype="">noon</time>
      <span property="ex:plain" content="2025-06-15">June</span>
    </div>"##;

    let ttl = r#"
    @prefix ex: <http://example.com/ns#> .
    @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
    <#event> ex:start "2025-06-15T10:30:00Z"^^xsd:dateTime ;
        ex:day "2025-06-15"^^xsd:date ;
        ex:length "PT2H"^^xsd:duration ;
        ex:when "sometime"^^xsd:dateTime ;
        ex:year "2025"^^xsd:gYear ;
        ex:odd "garbage"^^xsd:dateTime ;
        ex:label "noon" ;
        ex:plain "2025-06-15" .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn base_element_sets_the_document_base() {
    let html = r#"<!DOCTYPE html>
    <html>
      <head><base href="http://other.org/dir/"><title>t</title></head>
      <body>
        <p about="x" property="dc:title">T</p>
        <p about="" rel="dc:relation" href="../y"></p>
      </body>
    </html>"#;

    let ttl = r#"
    @prefix dc: <http://purl.org/dc/terms/> .
    <http://other.org/dir/x> dc:title "T" .
    <http://other.org/dir/> dc:relation <http://other.org/y> .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn xml_base_applies_to_descendants() {
    let html = r#"
    <div xml:base="http://b.org/a/">
      <p about="y" property="dc:title">T</p>
    </div>
    <p about="y" property="dc:title">U</p>"#;

    let ttl = r#"
    @prefix dc: <http://purl.org/dc/terms/> .
    <http://b.org/a/y> dc:title "T" .
    <y> dc:title "U" .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn property_with_typeof_links_parent_to_new_node() {
    let html = r##"
    <div vocab="http://schema.org/" about="#a">
      <div property="address" typeof="PostalAddress">
        <span property="streetAddress">1 Main St</span>
      </div>
    </div>"##;

    let ttl = r#"
    @prefix schema: <http://schema.org/> .
    <#a> schema:address [
        a schema:PostalAddress ;
        schema:streetAddress "1 Main St"
    ] .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn chaining_through_resources() {
    let html = r##"
    <div about="#a" rel="foaf:knows" href="#b">
      <span property="foaf:name">B</span>
    </div>
    <a about="#c" rev="foaf:knows" href="#d">d</a>
    <div about="#e">
      <a href="#f"><span property="foaf:name">F</span></a>
      <span property="foaf:name">E</span>
    </div>"##;

    let ttl = r#"
    @prefix foaf: <http://xmlns.com/foaf/0.1/> .
    <#a> foaf:knows <#b> .
    <#b> foaf:name "B" .
    <#d> foaf:knows <#c> .
    <#f> foaf:name "F" .
    <#e> foaf:name "E" .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn blank_node_references_are_shared() {
    let html = r#"
    <div about="_:x" property="dc:title">T</div>
    <div about="[_:x]" rel="foaf:knows" resource="[_:y]"></div>
    <div about="_:" property="dc:title">A</div>
    <div about="[_:]" property="dc:description">B</div>"#;

    let ttl = r#"
    @prefix dc: <http://purl.org/dc/terms/> .
    @prefix foaf: <http://xmlns.com/foaf/0.1/> .
    _:x dc:title "T" ; foaf:knows _:y .
    _:e dc:title "A" ; dc:description "B" .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn xml_literals_keep_markup() {
    let html = r##"
    <p about="#x" property="dc:description" datatype="rdf:XMLLiteral">a <em>b</em><br>c</p>
    <p about="#y" property="dc:abstract" datatype="rdf:HTML"><b class="k">&lt;x&gt;</b></p>"##;

    let ttl = r#"
    @prefix dc: <http://purl.org/dc/terms/> .
    @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
    <#x> dc:description "a <em>b</em><br/>c"^^rdf:XMLLiteral .
    <#y> dc:abstract "<b class=\"k\">&lt;x&gt;</b>"^^rdf:HTML .
    "#;

    utils::assert_graph(html, ttl);
}

#[test]
pub fn vocab_and_prefix_scoping() {
    let html = r##"
    <div vocab="http://schema.org/" prefix="ex: http://example.com/ns# EX2: http://example.com/two#">
      <p about="#a" property="name ex:label EX2:other">A</p>
      <div vocab="">
        <p about="#b" property="name">B</p>
      </div>
    </div>
    <p about="#c" property="ex:label">C</p>"##;

    let ttl = r#"
    @prefix schema: <http://schema.org/> .
    <#a> schema:name "A" ;
        <http://example.com/ns#label> "A" ;
        <http://example.com/two#other> "A" .
    "#;

    utils::assert_graph(html, ttl);
}
