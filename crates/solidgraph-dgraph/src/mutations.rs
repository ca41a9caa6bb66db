//! Write-side upsert construction for the Dgraph accessor.
//!
//! Every write is one existence-conditional upsert transaction: query
//! variables bind the nodes that may already exist, set statements pin
//! their identity attributes (creating them when the variable is
//! empty), and delete statements clear whatever gets replaced. The
//! builders here are pure; the transport submits the result.

use std::collections::HashMap;

use solidgraph_core::types::{Quad, Term};

use crate::upsert::{escape_value, UpsertBuilder, VarNamer};
use crate::value::ValueSlot;

/// Which typed-child section of an entity a quad set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildSection {
    Metadata,
    Data,
}

impl ChildSection {
    fn type_name(&self) -> &'static str {
        match self {
            ChildSection::Metadata => "Metadata",
            ChildSection::Data => "EntityData",
        }
    }

    /// Query variable binding the section's existing children.
    fn children_var(&self) -> &'static str {
        match self {
            ChildSection::Metadata => "entityMetadata",
            ChildSection::Data => "entityData",
        }
    }

    /// Blank-node template prefix for the section's subject nodes.
    fn template_prefix(&self) -> &'static str {
        match self {
            ChildSection::Metadata => "metadata",
            ChildSection::Data => "data",
        }
    }

    /// Variable prefix for object-node lookups within the section.
    fn object_prefix(&self) -> &'static str {
        match self {
            ChildSection::Metadata => "metadataobject",
            ChildSection::Data => "dataobject",
        }
    }
}

/// Value-node identity for deduplication within one request: identical
/// (slot, value, language, datatype) literals share one lookup variable
/// and therefore one stored node.
type ValueKey = (ValueSlot, String, String, String);

/// Build the upsert replacing a resource's metadata (and, for document
/// writes, its data) while recreating its containment edge.
///
/// `parent` is `None` only for the root container. `data` is `None` for
/// container writes; its presence is what marks the resource as a
/// document.
pub fn write_request(
    name: &str,
    metadata: &[Quad],
    parent: Option<&str>,
    data: Option<&[Quad]>,
) -> UpsertBuilder {
    let mut builder = UpsertBuilder::new();
    let mut namer = VarNamer::new();
    let mut values: HashMap<ValueKey, String> = HashMap::new();

    append_entity_pin(&mut builder, "entity", name);

    replace_typed_children(
        &mut builder,
        &mut namer,
        &mut values,
        ChildSection::Metadata,
        metadata,
    );

    if let Some(parent) = parent {
        append_entity_pin(&mut builder, "parent", parent);
        builder.append_set("uid(entity) <container> uid(parent) .");
    }

    if let Some(data) = data {
        replace_typed_children(
            &mut builder,
            &mut namer,
            &mut values,
            ChildSection::Data,
            data,
        );
    }

    builder
}

/// Build the upsert removing a resource: its entity node, every child
/// node owned by it, and (for non-root resources) its containment edge.
pub fn delete_request(name: &str, parent: Option<&str>) -> UpsertBuilder {
    let mut builder = UpsertBuilder::new();

    builder.append_query(entity_query("entity", name));
    builder.append_query(
        "children as var(func: has(<container>)) @filter(uid_in(<container>, uid(entity)))",
    );

    if let Some(parent) = parent {
        builder.append_query(entity_query("parent", parent));
        builder.append_delete("uid(entity) <container> uid(parent) .");
    }

    builder.append_delete("uid(entity) * * .");
    builder.append_delete("uid(children) * * .");

    builder
}

/// Query block binding `var` to the Entity node with the given IRI.
fn entity_query(var: &str, iri: &str) -> String {
    format!("{var} as var(func: eq(<uri>, \"{iri}\")) @filter(type(Entity))")
}

/// Declare an entity variable and pin its identity attributes, creating
/// the node when the variable binds nothing.
fn append_entity_pin(builder: &mut UpsertBuilder, var: &str, iri: &str) {
    builder.append_query(entity_query(var, iri));
    builder.append_set(format!("uid({var}) <uri> \"{iri}\" ."));
    builder.append_set(format!("uid({var}) <dgraph.type> \"Entity\" ."));
}

/// Replace the entity's typed children of one section with the given
/// quad set: wildcard-delete the existing children, then emit one
/// blank-node template per distinct subject carrying that subject's
/// triples.
fn replace_typed_children(
    builder: &mut UpsertBuilder,
    namer: &mut VarNamer,
    values: &mut HashMap<ValueKey, String>,
    section: ChildSection,
    quads: &[Quad],
) {
    let children_var = section.children_var();
    builder.append_query(format!(
        "{children_var} as var(func: type({})) @filter(uid_in(<container>, uid(entity)))",
        section.type_name()
    ));
    builder.append_delete(format!("uid({children_var}) * * ."));

    for (index, (subject, subject_quads)) in group_by_subject(quads).into_iter().enumerate() {
        let node = format!("_:{}{index}", section.template_prefix());
        match subject {
            Term::NamedNode(iri) => {
                builder.append_set(format!("{node} <uri> \"{iri}\" ."));
            }
            Term::BlankNode(label) => {
                builder.append_set(format!("{node} <blank> \"{}\" .", escape_value(&label)));
            }
            // Literal subjects cannot occur in well-formed RDF input.
            Term::Literal(_) => continue,
        }
        builder.append_set(format!("{node} <container> uid(entity) ."));
        builder.append_set(format!("{node} <dgraph.type> \"{}\" .", section.type_name()));

        for quad in subject_quads {
            append_object(builder, namer, values, section, &node, quad);
        }
    }
}

/// Emit the statements linking one subject template to one object.
fn append_object(
    builder: &mut UpsertBuilder,
    namer: &mut VarNamer,
    values: &mut HashMap<ValueKey, String>,
    section: ChildSection,
    node: &str,
    quad: &Quad,
) {
    let predicate = &quad.predicate;
    match &quad.object {
        Term::Literal(literal) => {
            let slot = ValueSlot::for_literal(&literal.datatype, &literal.value);
            let value = escape_value(&literal.value);
            let language = literal.language.clone().unwrap_or_default();
            let key = (slot, value.clone(), language.clone(), literal.datatype.clone());

            let var = match values.get(&key) {
                Some(var) => var.clone(),
                None => {
                    let var = namer.next("value");
                    builder.append_query(format!(
                        "{var} as var(func: eq(<{slot}>, \"{value}\")) \
                         @filter(eq(<language>, \"{language}\") AND eq(<datatype>, \"{datatype}\"))",
                        slot = slot.predicate(),
                        datatype = literal.datatype,
                    ));
                    builder.append_set(format!(
                        "uid({var}) <{}> \"{value}\" .",
                        slot.predicate()
                    ));
                    builder.append_set(format!("uid({var}) <language> \"{language}\" ."));
                    builder.append_set(format!(
                        "uid({var}) <datatype> \"{}\" .",
                        literal.datatype
                    ));
                    values.insert(key, var.clone());
                    var
                }
            };
            builder.append_set(format!("{node} <{predicate}> uid({var}) ."));
        }
        Term::NamedNode(iri) => {
            let var = namer.next(section.object_prefix());
            builder.append_query(entity_query(&var, iri));
            builder.append_set(format!("uid({var}) <uri> \"{iri}\" ."));
            builder.append_set(format!("uid({var}) <dgraph.type> \"Entity\" ."));
            builder.append_set(format!("{node} <{predicate}> uid({var}) ."));
        }
        Term::BlankNode(label) => {
            let label = escape_value(label);
            let var = namer.next(section.object_prefix());
            builder.append_query(format!(
                "{var} as var(func: eq(<blank>, \"{label}\")) \
                 @filter(uid_in(<container>, uid(entity)))"
            ));
            builder.append_set(format!("uid({var}) <blank> \"{label}\" ."));
            builder.append_set(format!("uid({var}) <container> uid(entity) ."));
            builder.append_set(format!(
                "uid({var}) <dgraph.type> \"{}\" .",
                section.type_name()
            ));
            builder.append_set(format!("{node} <{predicate}> uid({var}) ."));
        }
    }
}

/// Group quads by subject, keeping first-appearance order.
fn group_by_subject(quads: &[Quad]) -> Vec<(Term, Vec<&Quad>)> {
    let mut groups: Vec<(Term, Vec<&Quad>)> = Vec::new();
    for quad in quads {
        match groups.iter_mut().find(|(subject, _)| *subject == quad.subject) {
            Some((_, group)) => group.push(quad),
            None => groups.push((quad.subject.clone(), vec![quad])),
        }
    }
    groups
}
