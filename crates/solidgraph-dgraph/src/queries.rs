//! Read-side query texts for the Dgraph accessor.
//!
//! All three reads share the same first stage: bind `entity` to the
//! Entity node whose `uri` equals the `$identifier` variable. Data and
//! metadata reads then fetch the typed children owned by that entity,
//! expanding two levels so literal value nodes and named-entity leaves
//! come back in one round trip. The child listing fetches Entity-typed
//! children one level deep, identifiers only.

use std::collections::HashMap;

/// Result block name shared by the data and metadata queries.
pub const DATA_BLOCK: &str = "data";

/// Result block name for the container child listing.
pub const CHILDREN_BLOCK: &str = "children";

pub const DATA_QUERY: &str = "\
query data($identifier: string) {
  entity as var(func: eq(<uri>, $identifier)) @filter(type(Entity))
  data(func: type(EntityData)) @filter(uid_in(<container>, uid(entity))) {
    uid
    expand(_all_) {
      uid
      expand(_all_)
    }
  }
}";

pub const METADATA_QUERY: &str = "\
query data($identifier: string) {
  entity as var(func: eq(<uri>, $identifier)) @filter(type(Entity))
  data(func: type(Metadata)) @filter(uid_in(<container>, uid(entity))) {
    uid
    expand(_all_) {
      uid
      expand(_all_)
    }
  }
}";

pub const CHILDREN_QUERY: &str = "\
query children($identifier: string) {
  entity as var(func: eq(<uri>, $identifier)) @filter(type(Entity))
  children(func: type(Entity)) @filter(uid_in(<container>, uid(entity))) {
    uid
    <uri>
  }
}";

/// The variable bindings for any of the fixed queries.
pub fn identifier_vars(identifier: &str) -> HashMap<String, String> {
    HashMap::from([("$identifier".to_string(), identifier.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_filter_on_the_expected_types() {
        assert!(DATA_QUERY.contains("func: type(EntityData)"));
        assert!(METADATA_QUERY.contains("func: type(Metadata)"));
        assert!(CHILDREN_QUERY.contains("func: type(Entity)"));
    }

    #[test]
    fn data_queries_expand_two_levels() {
        assert_eq!(DATA_QUERY.matches("expand(_all_)").count(), 2);
        assert_eq!(METADATA_QUERY.matches("expand(_all_)").count(), 2);
        assert!(!CHILDREN_QUERY.contains("expand"));
    }

    #[test]
    fn vars_bind_the_identifier() {
        let vars = identifier_vars("http://test.com/doc");
        assert_eq!(vars["$identifier"], "http://test.com/doc");
    }
}
