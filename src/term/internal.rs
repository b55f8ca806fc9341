use crate::term::{TermGroup, TermId};
use crate::{DEFAULT_NUM_ALL_PARENTS, DEFAULT_NUM_PARENTS};

/// Owned storage of a single term inside the ontology arena
///
/// Synonyms and alternate IDs live in the ontology's alias maps, not here.
#[derive(Debug)]
pub(crate) struct TermInternal {
    id: TermId,
    name: String,
    parents: TermGroup,
    all_parents: TermGroup,
    children: TermGroup,
    ic: f32,
}

impl TermInternal {
    pub fn new(id: TermId, name: &str) -> TermInternal {
        TermInternal {
            id,
            name: name.to_string(),
            parents: TermGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_parents: TermGroup::with_capacity(DEFAULT_NUM_ALL_PARENTS),
            children: TermGroup::with_capacity(DEFAULT_NUM_PARENTS),
            ic: 0.0,
        }
    }

    pub fn id(&self) -> TermId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &TermGroup {
        &self.parents
    }

    pub fn children(&self) -> &TermGroup {
        &self.children
    }

    pub fn all_parents(&self) -> &TermGroup {
        &self.all_parents
    }

    pub fn all_parents_mut(&mut self) -> &mut TermGroup {
        &mut self.all_parents
    }

    /// Terms without parents don't need a cache, they are their own closure
    pub fn parents_cached(&self) -> bool {
        if self.parents.is_empty() {
            true
        } else {
            !self.all_parents.is_empty()
        }
    }

    pub fn add_parent(&mut self, parent_id: TermId) {
        self.parents.insert(parent_id);
    }

    pub fn add_child(&mut self, child_id: TermId) {
        self.children.insert(child_id);
    }

    pub fn information_content(&self) -> f32 {
        self.ic
    }

    pub fn information_content_mut(&mut self) -> &mut f32 {
        &mut self.ic
    }
}

impl PartialEq for TermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TermInternal {}
