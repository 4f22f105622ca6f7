use serde::{Deserialize, Serialize};

///
/// RelationshipDescriptor
///
/// Normalized directional descriptor for a named relationship between two
/// entity types. The shape is decided once at resolution time; no later
/// stage re-inspects raw relationship records.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RelationshipDescriptor {
    OneToMany(OneToManyRelationship),
    ManyToMany(ManyToManyRelationship),
}

impl RelationshipDescriptor {
    #[must_use]
    pub const fn is_many_to_many(&self) -> bool {
        matches!(self, Self::ManyToMany(_))
    }

    #[must_use]
    pub fn schema_name(&self) -> &str {
        match self {
            Self::OneToMany(rel) => &rel.schema_name,
            Self::ManyToMany(rel) => &rel.schema_name,
        }
    }
}

///
/// OneToManyRelationship
///
/// One-to-many and many-to-one records share this shape; both normalize
/// here with the referenced/referencing orientation the platform declares.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OneToManyRelationship {
    pub schema_name: String,
    /// Parent-side entity logical name.
    pub referenced_entity: String,
    /// Attribute on the parent, typically its primary key.
    pub referenced_attribute: String,
    /// Child-side entity logical name.
    pub referencing_entity: String,
    /// Foreign-key lookup attribute on the child.
    pub referencing_attribute: String,
}

///
/// ManyToManyRelationship
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ManyToManyRelationship {
    pub schema_name: String,
    pub entity1: String,
    pub entity2: String,
    pub intersect_entity: String,
    pub entity1_intersect_attribute: String,
    pub entity2_intersect_attribute: String,
}

impl ManyToManyRelationship {
    /// Orientation bit for a composition: whether the form entity sits on
    /// the entity1 side. Compute once and thread through every attribute
    /// choice for the same composition.
    #[must_use]
    pub fn form_is_first(&self, form_entity: &str) -> bool {
        self.entity1.eq_ignore_ascii_case(form_entity)
    }

    /// Intersect attribute joining toward the subgrid side.
    #[must_use]
    pub fn subgrid_side_intersect_attribute(&self, form_is_first: bool) -> &str {
        if form_is_first {
            &self.entity2_intersect_attribute
        } else {
            &self.entity1_intersect_attribute
        }
    }

    /// Intersect attribute joining toward the form side.
    #[must_use]
    pub fn form_side_intersect_attribute(&self, form_is_first: bool) -> &str {
        if form_is_first {
            &self.entity1_intersect_attribute
        } else {
            &self.entity2_intersect_attribute
        }
    }

    /// Entity logical name on the form side.
    #[must_use]
    pub fn form_side_entity(&self, form_is_first: bool) -> &str {
        if form_is_first {
            &self.entity1
        } else {
            &self.entity2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership() -> ManyToManyRelationship {
        ManyToManyRelationship {
            schema_name: "account_contact_membership".to_string(),
            entity1: "account".to_string(),
            entity2: "contact".to_string(),
            intersect_entity: "account_contact".to_string(),
            entity1_intersect_attribute: "accountid".to_string(),
            entity2_intersect_attribute: "contactid".to_string(),
        }
    }

    #[test]
    fn orientation_follows_entity1_match() {
        let rel = membership();
        assert!(rel.form_is_first("account"));
        assert!(rel.form_is_first("Account"));
        assert!(!rel.form_is_first("contact"));
    }

    #[test]
    fn intersect_attribute_selection_swaps_with_orientation() {
        let rel = membership();

        let form_first = rel.form_is_first("account");
        assert_eq!(rel.subgrid_side_intersect_attribute(form_first), "contactid");
        assert_eq!(rel.form_side_intersect_attribute(form_first), "accountid");
        assert_eq!(rel.form_side_entity(form_first), "account");

        let form_second = rel.form_is_first("contact");
        assert_eq!(
            rel.subgrid_side_intersect_attribute(form_second),
            "accountid"
        );
        assert_eq!(rel.form_side_intersect_attribute(form_second), "contactid");
        assert_eq!(rel.form_side_entity(form_second), "contact");
    }
}
