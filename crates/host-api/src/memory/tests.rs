use super::*;
use crate::event::EventTarget;

fn fixture() -> (MemoryDocument, NodeId, NodeId, NodeId) {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let form = doc
        .append(body, NodeSpec::new("form").role(Role::Form))
        .unwrap();
    let list = doc
        .append(form, NodeSpec::new("ul").role(Role::CountryList))
        .unwrap();
    let item = doc
        .append(
            list,
            NodeSpec::new("li")
                .role(Role::CountryItem)
                .id("country-FR")
                .data("value", "FR"),
        )
        .unwrap();
    doc.append(
        form,
        NodeSpec::new("input")
            .role(Role::CountryInput)
            .attr("name", "country_code"),
    )
    .unwrap();
    (doc, form, list, item)
}

#[test]
fn roles_resolve_through_their_markers() {
    let (doc, form, list, item) = fixture();
    assert!(doc.matches(form, Role::Form));
    assert_eq!(doc.query(doc.body(), Role::CountryList), Some(list));
    assert_eq!(doc.query_all(form, Role::CountryItem), vec![item]);
    assert_eq!(doc.closest(item, Role::Form), Some(form));
    assert_eq!(doc.dataset(item, "value"), Some("FR"));
}

#[test]
fn query_excludes_the_scope_itself() {
    let (doc, _, list, _) = fixture();
    assert_eq!(doc.query(list, Role::CountryList), None);
}

#[test]
fn contains_is_inclusive() {
    let (doc, form, list, item) = fixture();
    assert!(doc.contains(form, item));
    assert!(doc.contains(list, list));
    assert!(!doc.contains(item, list));
}

#[test]
fn append_rejects_foreign_parents() {
    let mut doc = MemoryDocument::new();
    let err = doc.append(NodeId(42), NodeSpec::new("div")).unwrap_err();
    assert_eq!(err, MarkupError::UnknownNode { node: NodeId(42) });
    assert_eq!(
        doc.append(doc.body(), NodeSpec::new("")).unwrap_err(),
        MarkupError::EmptyTag
    );
}

#[test]
fn toggle_attribute_adds_and_removes() {
    let (mut doc, _, list, _) = fixture();
    doc.toggle_attribute(list, "hidden", true);
    assert!(doc.has_attribute(list, "hidden"));
    doc.toggle_attribute(list, "hidden", false);
    assert!(!doc.has_attribute(list, "hidden"));
}

#[test]
fn submission_records_named_fields() {
    let (mut doc, form, _, _) = fixture();
    let input = doc.query(form, Role::CountryInput).unwrap();
    doc.set_value(input, "DE");
    doc.submit(form);

    let submissions = doc.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].fields.get("country_code").map(String::as_str), Some("DE"));

    let json = serde_json::to_value(&submissions[0]).unwrap();
    assert_eq!(json["fields"]["country_code"], "DE");
}

#[test]
fn listeners_are_tracked_per_target() {
    let (mut doc, _, list, _) = fixture();
    let on_list = doc.listen(EventTarget::Node(list), EventKind::Click);
    let on_document = doc.listen(EventTarget::Document, EventKind::KeyUp);

    assert_eq!(doc.listeners_for(EventTarget::Node(list), EventKind::Click), vec![on_list]);
    assert_eq!(doc.document_listener_count(), 1);

    doc.unlisten(on_document);
    doc.unlisten(on_document);
    assert_eq!(doc.document_listener_count(), 0);
    assert_eq!(doc.listener_count(), 1);
}

#[test]
fn propagation_path_walks_to_body() {
    let (doc, form, list, item) = fixture();
    assert_eq!(doc.propagation_path(item), vec![item, list, form, doc.body()]);
}
